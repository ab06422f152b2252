use serde::Deserialize;

/// Body of every `POST /list` call.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ListRequest {
    pub offset: i64,
    pub limit: i64,
}
