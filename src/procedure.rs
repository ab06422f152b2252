use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::outcome::{Outcome, StoreError};

/// Result codes reported through `p_resultado`.
///
/// The values belong to the stored procedures; this layer only compares against them.
pub mod codes {
    pub const SUCCESS: i64 = 0;

    pub const ROLE_NOT_FOUND_ON_READ: i64 = 2002;
    pub const ROLE_NOT_FOUND_ON_UPDATE: i64 = 3004;
    pub const ROLE_NOT_FOUND_ON_DELETE: i64 = 4002;
    pub const ROLE_HAS_USERS: i64 = 4003;

    pub const USER_NOT_FOUND_ON_READ: i64 = 6002;
    pub const USER_NOT_FOUND_ON_UPDATE: i64 = 7009;
    pub const USER_NOT_FOUND_ON_DELETE: i64 = 8002;
    /// Expected from `PKG_USUARIOS_DELETE` for a user still referenced; not yet observed from the store.
    pub const USER_HAS_DEPENDENTS: i64 = 8003;

    pub const VARIABLE_NOT_FOUND_ON_READ: i64 = 10002;
    pub const VARIABLE_NOT_FOUND_BY_NAME: i64 = 10004;
    pub const VARIABLE_NOT_FOUND_ON_UPDATE: i64 = 11005;
    pub const VARIABLE_NOT_FOUND_ON_DELETE: i64 = 12002;
}

/// How a non-zero code outside the reserved ones is surfaced.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Unclassified {
    /// The caller sent something the store refused (400).
    Validation,
    /// The store itself failed or is misconfigured (500).
    Infra,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, IntoStaticStr, EnumIter)]
pub enum Procedure {
    #[strum(serialize = "PKG_ROLES_CREATE")]
    RolesCreate,
    #[strum(serialize = "PKG_ROLES_READ_BY_ID")]
    RolesReadById,
    #[strum(serialize = "PKG_ROLES_READ_ALL")]
    RolesReadAll,
    #[strum(serialize = "PKG_ROLES_UPDATE")]
    RolesUpdate,
    #[strum(serialize = "PKG_ROLES_DELETE")]
    RolesDelete,

    #[strum(serialize = "PKG_USUARIOS_CREATE")]
    UsersCreate,
    #[strum(serialize = "PKG_USUARIOS_READ_BY_ID")]
    UsersReadById,
    #[strum(serialize = "PKG_USUARIOS_READ_ALL")]
    UsersReadAll,
    #[strum(serialize = "PKG_USUARIOS_UPDATE")]
    UsersUpdate,
    #[strum(serialize = "PKG_USUARIOS_DELETE")]
    UsersDelete,

    #[strum(serialize = "PKG_VARIABLES_CREATE")]
    VariablesCreate,
    #[strum(serialize = "PKG_VARIABLES_READ_BY_ID")]
    VariablesReadById,
    #[strum(serialize = "PKG_VARIABLES_READ_BY_NAME")]
    VariablesReadByName,
    #[strum(serialize = "PKG_VARIABLES_READ_ALL")]
    VariablesReadAll,
    #[strum(serialize = "PKG_VARIABLES_UPDATE")]
    VariablesUpdate,
    #[strum(serialize = "PKG_VARIABLES_DELETE")]
    VariablesDelete,
}

impl Procedure {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Code this procedure reports when the addressed row does not exist.
    pub const fn not_found_code(self) -> Option<i64> {
        use Procedure::*;
        match self {
            RolesReadById => Some(codes::ROLE_NOT_FOUND_ON_READ),
            RolesUpdate => Some(codes::ROLE_NOT_FOUND_ON_UPDATE),
            RolesDelete => Some(codes::ROLE_NOT_FOUND_ON_DELETE),
            UsersReadById => Some(codes::USER_NOT_FOUND_ON_READ),
            UsersUpdate => Some(codes::USER_NOT_FOUND_ON_UPDATE),
            UsersDelete => Some(codes::USER_NOT_FOUND_ON_DELETE),
            VariablesReadById => Some(codes::VARIABLE_NOT_FOUND_ON_READ),
            VariablesReadByName => Some(codes::VARIABLE_NOT_FOUND_BY_NAME),
            VariablesUpdate => Some(codes::VARIABLE_NOT_FOUND_ON_UPDATE),
            VariablesDelete => Some(codes::VARIABLE_NOT_FOUND_ON_DELETE),
            RolesCreate | RolesReadAll | UsersCreate | UsersReadAll | VariablesCreate
            | VariablesReadAll => None,
        }
    }

    /// Code this procedure reports when a delete is blocked by dependent rows.
    pub const fn conflict_code(self) -> Option<i64> {
        match self {
            Procedure::RolesDelete => Some(codes::ROLE_HAS_USERS),
            Procedure::UsersDelete => Some(codes::USER_HAS_DEPENDENTS),
            _ => None,
        }
    }

    /// Reads blame the store for unknown codes, writes blame the caller.
    pub const fn unclassified(self) -> Unclassified {
        use Procedure::*;
        match self {
            RolesReadById | RolesReadAll | UsersReadById | UsersReadAll | VariablesReadById
            | VariablesReadByName | VariablesReadAll => Unclassified::Infra,
            RolesCreate | RolesUpdate | RolesDelete | UsersCreate | UsersUpdate | UsersDelete
            | VariablesCreate | VariablesUpdate | VariablesDelete => Unclassified::Validation,
        }
    }

    /// Decodes the `(payload, p_resultado, p_mensaje)` triple of one call.
    pub fn classify<T>(self, code: i64, message: String, payload: T) -> Outcome<T> {
        if code == codes::SUCCESS {
            return Outcome::Success(payload);
        }

        let err = StoreError::new(code, message);
        if self.not_found_code() == Some(code) {
            Outcome::NotFound(err)
        } else if self.conflict_code() == Some(code) {
            Outcome::Conflict(err)
        } else {
            match self.unclassified() {
                Unclassified::Validation => Outcome::Validation(err),
                Unclassified::Infra => Outcome::Infra(err),
            }
        }
    }
}
