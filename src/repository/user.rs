use crate::model::user::{CreateUser, UpdateUser, User};
use crate::procedure::Procedure;
use crate::utils::db_utils::{OutParam, ProcedureCall};

use super::{MySqlStore, StoreResult, UserRepository};

impl UserRepository for MySqlStore {
    async fn create(&self, input: &CreateUser) -> StoreResult<i64> {
        let output = ProcedureCall::new(Procedure::UsersCreate)
            .arg(input.username.as_str())
            .arg(input.email.as_deref())
            .arg(input.role_id)
            .returning(OutParam::GeneratedId)
            .execute(self.pool())
            .await?;

        Ok(output.into_generated_id())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let (user, output) = ProcedureCall::new(Procedure::UsersReadById)
            .arg(id)
            .fetch_optional::<User>(self.pool())
            .await?;

        Ok(output.into_outcome(user))
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let (users, output) = ProcedureCall::new(Procedure::UsersReadAll)
            .arg(offset)
            .arg(limit)
            .fetch_all::<User>(self.pool())
            .await?;

        Ok(output.into_outcome(users))
    }

    async fn update(&self, input: &UpdateUser) -> StoreResult<()> {
        let output = ProcedureCall::new(Procedure::UsersUpdate)
            .arg(input.id)
            .arg(input.username.as_str())
            .arg(input.email.as_deref())
            .arg(input.role_id)
            .execute(self.pool())
            .await?;

        Ok(output.into_outcome(()))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let output = ProcedureCall::new(Procedure::UsersDelete)
            .arg(id)
            .execute(self.pool())
            .await?;

        Ok(output.into_outcome(()))
    }
}
