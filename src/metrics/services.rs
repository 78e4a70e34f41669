use uuid::Uuid;

use super::engine::{Metrics, OrderedFlags};
use crate::{error::ApiError, state::AppState};

/// Reads the user's ledger fresh and runs the engine over it. Every metrics
/// endpoint goes through here, so all of them see the same single pass.
pub async fn load_metrics(state: &AppState, user_id: Uuid) -> Result<Metrics, ApiError> {
    let entries = state.meals.entries(user_id).await?;
    let flags = OrderedFlags::from_entries(&entries)?;
    Ok(Metrics::from_ordered(&flags))
}
