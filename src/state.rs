use crate::config::AppConfig;
use crate::db::PgStore;
use crate::meals::MealLedger;
use crate::memory::MemoryStore;
use crate::users::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub meals: Arc<dyn MealLedger>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        match config.database_url.clone() {
            Some(url) => {
                let store = Arc::new(PgStore::connect(&config, &url).await?);
                store.migrate().await?;
                tracing::info!("using postgres store");
                Ok(Self::from_parts(config, store.clone(), store))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; data lives in memory and is lost on exit");
                let store = Arc::new(MemoryStore::new());
                Ok(Self::from_parts(config, store.clone(), store))
            }
        }
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        meals: Arc<dyn MealLedger>,
    ) -> Self {
        Self {
            config,
            users,
            meals,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            db_max_connections: 1,
            session: crate::config::SessionConfig::default(),
        });
        let store = Arc::new(MemoryStore::new());
        Self::from_parts(config, store.clone(), store)
    }
}
