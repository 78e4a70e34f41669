use serde::Serialize;

use super::engine::Metrics;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub total_of_meals: u64,
    pub total_in_diet: u64,
    pub total_out_of_diet: u64,
    pub best_sequence_in_diet: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalResponse {
    pub total_of_meals: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InDietResponse {
    pub total_in_diet: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfDietResponse {
    pub total_out_of_diet: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSequenceResponse {
    pub best_sequence_in_diet: u64,
}

impl From<Metrics> for MetricsResponse {
    fn from(m: Metrics) -> Self {
        Self {
            total_of_meals: m.total,
            total_in_diet: m.in_diet,
            total_out_of_diet: m.out_of_diet,
            best_sequence_in_diet: m.best_streak,
        }
    }
}

impl From<Metrics> for TotalResponse {
    fn from(m: Metrics) -> Self {
        Self {
            total_of_meals: m.total,
        }
    }
}

impl From<Metrics> for InDietResponse {
    fn from(m: Metrics) -> Self {
        Self {
            total_in_diet: m.in_diet,
        }
    }
}

impl From<Metrics> for OutOfDietResponse {
    fn from(m: Metrics) -> Self {
        Self {
            total_out_of_diet: m.out_of_diet,
        }
    }
}

impl From<Metrics> for BestSequenceResponse {
    fn from(m: Metrics) -> Self {
        Self {
            best_sequence_in_diet: m.best_streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundle_field_names() {
        let m = Metrics {
            total: 6,
            in_diet: 4,
            out_of_diet: 2,
            best_streak: 3,
        };
        assert_eq!(
            serde_json::to_value(MetricsResponse::from(m)).unwrap(),
            json!({
                "totalOfMeals": 6,
                "totalInDiet": 4,
                "totalOutOfDiet": 2,
                "bestSequenceInDiet": 3
            })
        );
        assert_eq!(
            serde_json::to_value(BestSequenceResponse::from(m)).unwrap(),
            json!({ "bestSequenceInDiet": 3 })
        );
    }
}
