use serde::{Deserialize, Serialize};
use thor_routing::engine::EngineStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    #[serde(flatten)]
    pub stats: EngineStats,
}

impl From<EngineStats> for HealthDto {
    fn from(stats: EngineStats) -> Self {
        Self {
            status: "ok".into(),
            stats,
        }
    }
}
