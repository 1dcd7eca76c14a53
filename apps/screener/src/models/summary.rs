use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Summary {
    pub resume_name: String,
    pub summary: String,
}
