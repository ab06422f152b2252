//! One repository per resource. Each method makes exactly one stored procedure
//! call and decodes its result code into an [`Outcome`] before returning.

use sqlx::MySqlPool;

use crate::model::role::{CreateRole, Role, RolePage, UpdateRole};
use crate::model::user::{CreateUser, UpdateUser, User};
use crate::model::variable::{CreateVariable, UpdateVariable, Variable};
use crate::outcome::Outcome;

pub mod role;
pub mod user;
pub mod variable;

#[cfg(test)]
pub mod fake;

pub type StoreResult<T> = Result<Outcome<T>, sqlx::Error>;

#[allow(async_fn_in_trait)]
pub trait RoleRepository: 'static {
    async fn create(&self, input: &CreateRole) -> StoreResult<i64>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Role>>;
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<RolePage>;
    async fn update(&self, input: &UpdateRole) -> StoreResult<()>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait UserRepository: 'static {
    async fn create(&self, input: &CreateUser) -> StoreResult<i64>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<User>>;
    async fn update(&self, input: &UpdateUser) -> StoreResult<()>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait VariableRepository: 'static {
    async fn create(&self, input: &CreateVariable) -> StoreResult<i64>;
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Variable>>;
    async fn get_by_name(&self, name: &str) -> StoreResult<Option<Variable>>;
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Variable>>;
    async fn update(&self, input: &UpdateVariable) -> StoreResult<()>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Stored-procedure backed store shared by all three repositories.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}
