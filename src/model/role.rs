use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row emitted by `PKG_ROLES_READ_BY_ID` / `PKG_ROLES_READ_ALL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[sqlx(rename = "Id")]
    pub id: i64,
    #[sqlx(rename = "Nombre")]
    pub name: Option<String>,
    /// Only some procedures project the number of users holding the role.
    #[sqlx(rename = "usuarios_count", default)]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRole {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRole {
    pub id: i64,
    pub name: String,
}

/// One page of roles plus the size of the whole table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePage {
    pub roles: Vec<Role>,
    pub total: i64,
}
