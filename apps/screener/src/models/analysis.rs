use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One scored résumé, as returned by `POST /analyze` and `GET /scores/{jd_name}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub resume_name: String,
    /// `None` when the backend could not find an address in the résumé.
    pub email: Option<String>,
    pub score: f64,
    #[serde(deserialize_with = "super::deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Orders results best-first. Ties keep backend order.
pub fn rank_by_score(results: &mut [AnalysisResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}
