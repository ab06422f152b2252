use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Named configuration value kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Variable {
    #[sqlx(rename = "Id")]
    pub id: i64,
    #[sqlx(rename = "Nombre")]
    pub name: Option<String>,
    #[sqlx(rename = "Valor")]
    pub value: Option<String>,
    /// Free-form type tag, e.g. `"int"` or `"string"`.
    #[sqlx(rename = "Tipo")]
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVariable {
    pub name: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVariable {
    pub id: i64,
    pub name: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
