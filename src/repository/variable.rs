use crate::model::variable::{CreateVariable, UpdateVariable, Variable};
use crate::procedure::Procedure;
use crate::utils::db_utils::{OutParam, ProcedureCall};

use super::{MySqlStore, StoreResult, VariableRepository};

impl VariableRepository for MySqlStore {
    async fn create(&self, input: &CreateVariable) -> StoreResult<i64> {
        let output = ProcedureCall::new(Procedure::VariablesCreate)
            .arg(input.name.as_str())
            .arg(input.value.as_str())
            .arg(input.kind.as_deref())
            .returning(OutParam::GeneratedId)
            .execute(self.pool())
            .await?;

        Ok(output.into_generated_id())
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Variable>> {
        let (variable, output) = ProcedureCall::new(Procedure::VariablesReadById)
            .arg(id)
            .fetch_optional::<Variable>(self.pool())
            .await?;

        Ok(output.into_outcome(variable))
    }

    async fn get_by_name(&self, name: &str) -> StoreResult<Option<Variable>> {
        let (variable, output) = ProcedureCall::new(Procedure::VariablesReadByName)
            .arg(name)
            .fetch_optional::<Variable>(self.pool())
            .await?;

        Ok(output.into_outcome(variable))
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Variable>> {
        let (variables, output) = ProcedureCall::new(Procedure::VariablesReadAll)
            .arg(offset)
            .arg(limit)
            .fetch_all::<Variable>(self.pool())
            .await?;

        Ok(output.into_outcome(variables))
    }

    async fn update(&self, input: &UpdateVariable) -> StoreResult<()> {
        let output = ProcedureCall::new(Procedure::VariablesUpdate)
            .arg(input.id)
            .arg(input.name.as_str())
            .arg(input.value.as_str())
            .arg(input.kind.as_deref())
            .execute(self.pool())
            .await?;

        Ok(output.into_outcome(()))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let output = ProcedureCall::new(Procedure::VariablesDelete)
            .arg(id)
            .execute(self.pool())
            .await?;

        Ok(output.into_outcome(()))
    }
}
