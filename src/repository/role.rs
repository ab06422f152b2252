use crate::model::role::{CreateRole, Role, RolePage, UpdateRole};
use crate::procedure::Procedure;
use crate::utils::db_utils::{OutParam, ProcedureCall};

use super::{MySqlStore, RoleRepository, StoreResult};

impl RoleRepository for MySqlStore {
    async fn create(&self, input: &CreateRole) -> StoreResult<i64> {
        let output = ProcedureCall::new(Procedure::RolesCreate)
            .arg(input.name.as_str())
            .returning(OutParam::GeneratedId)
            .execute(self.pool())
            .await?;

        Ok(output.into_generated_id())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Role>> {
        let (role, output) = ProcedureCall::new(Procedure::RolesReadById)
            .arg(id)
            .fetch_optional::<Role>(self.pool())
            .await?;

        Ok(output.into_outcome(role))
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<RolePage> {
        let (roles, output) = ProcedureCall::new(Procedure::RolesReadAll)
            .arg(offset)
            .arg(limit)
            .returning(OutParam::TotalCount)
            .fetch_all::<Role>(self.pool())
            .await?;

        Ok(output
            .into_page(roles)
            .map(|(roles, total)| RolePage { roles, total }))
    }

    async fn update(&self, input: &UpdateRole) -> StoreResult<()> {
        let output = ProcedureCall::new(Procedure::RolesUpdate)
            .arg(input.id)
            .arg(input.name.as_str())
            .execute(self.pool())
            .await?;

        Ok(output.into_outcome(()))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let output = ProcedureCall::new(Procedure::RolesDelete)
            .arg(id)
            .execute(self.pool())
            .await?;

        Ok(output.into_outcome(()))
    }
}
