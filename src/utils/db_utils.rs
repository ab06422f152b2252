use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlRow};
use sqlx::{Arguments, FromRow, MySqlPool, Row};
use tracing::debug;

use crate::outcome::Outcome;
use crate::procedure::Procedure;

const RESULT_VAR: &str = "p_resultado";
const MESSAGE_VAR: &str = "p_mensaje";

/// ===============================
/// SQL bindable IN argument
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    I64(i64),
    String(String),
    Null,
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_owned())
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(v: Option<&str>) -> Self {
        v.map_or(SqlValue::Null, SqlValue::from)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(SqlValue::Null, SqlValue::I64)
    }
}

/// OUT parameter some procedures declare after `p_resultado, p_mensaje`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutParam {
    GeneratedId,
    TotalCount,
}

impl OutParam {
    fn var(self) -> &'static str {
        match self {
            OutParam::GeneratedId => "p_id_generado",
            OutParam::TotalCount => "p_total_registros",
        }
    }
}

/// OUT parameters read back after a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcOutput {
    pub procedure: Procedure,
    pub code: i64,
    pub message: String,
    pub generated_id: Option<i64>,
    pub total_count: Option<i64>,
}

impl ProcOutput {
    pub fn into_outcome<T>(self, payload: T) -> Outcome<T> {
        self.procedure.classify(self.code, self.message, payload)
    }

    /// Outcome of a create call; success without `p_id_generado` is a store fault.
    pub fn into_generated_id(self) -> Outcome<i64> {
        let procedure = self.procedure;
        let id = self.generated_id;
        self.into_outcome(id)
            .required_or(format!("{procedure} reported success without a generated id"))
    }

    /// Outcome of a paged read, paired with `p_total_registros`.
    /// Success without the total is a store fault.
    pub fn into_page<T>(self, rows: Vec<T>) -> Outcome<(Vec<T>, i64)> {
        let procedure = self.procedure;
        let total = self.total_count;
        self.into_outcome(total)
            .required_or(format!("{procedure} reported success without a total count"))
            .map(|total| (rows, total))
    }
}

/// ===============================
/// Stored procedure invocation
/// ===============================
///
/// MySQL only hands OUT parameters back through session variables, so the
/// `CALL` and the `SELECT` of those variables run on the same connection.
#[derive(Debug)]
pub struct ProcedureCall {
    procedure: Procedure,
    args: Vec<SqlValue>,
    extra: Option<OutParam>,
}

impl ProcedureCall {
    pub fn new(procedure: Procedure) -> Self {
        Self {
            procedure,
            args: Vec::new(),
            extra: None,
        }
    }

    /// Appends the next IN argument, in declaration order.
    pub fn arg(mut self, value: impl Into<SqlValue>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn returning(mut self, out: OutParam) -> Self {
        self.extra = Some(out);
        self
    }

    fn out_vars(&self) -> impl Iterator<Item = &'static str> {
        [RESULT_VAR, MESSAGE_VAR]
            .into_iter()
            .chain(self.extra.map(OutParam::var))
    }

    /// `CALL NAME(?, ?, @p_resultado, @p_mensaje[, @extra])`
    pub fn call_sql(&self) -> String {
        let params = std::iter::repeat("?".to_string())
            .take(self.args.len())
            .chain(self.out_vars().map(|v| format!("@{v}")))
            .collect::<Vec<_>>()
            .join(", ");

        format!("CALL {}({})", self.procedure, params)
    }

    pub fn outputs_sql(&self) -> String {
        let columns = self
            .out_vars()
            .map(|v| {
                let cast = if v == MESSAGE_VAR { "CHAR" } else { "SIGNED" };
                format!("CAST(@{v} AS {cast}) AS {v}")
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("SELECT {columns}")
    }

    fn arguments(&self) -> MySqlArguments {
        let mut args = MySqlArguments::default();
        for value in &self.args {
            match value {
                SqlValue::I64(v) => args.add(*v),
                SqlValue::String(v) => args.add(v.clone()),
                SqlValue::Null => args.add(None::<String>),
            }
        }
        args
    }

    /// Runs a procedure that produces no row set.
    pub async fn execute(self, pool: &MySqlPool) -> Result<ProcOutput, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let sql = self.call_sql();
        debug!(procedure = %self.procedure, sql = %sql, "Calling stored procedure");

        sqlx::query_with(&sql, self.arguments())
            .execute(&mut *conn)
            .await?;

        self.read_outputs(&mut conn).await
    }

    /// Runs a procedure that produces a row set.
    pub async fn fetch_all<T>(self, pool: &MySqlPool) -> Result<(Vec<T>, ProcOutput), sqlx::Error>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let mut conn = pool.acquire().await?;
        let sql = self.call_sql();
        debug!(procedure = %self.procedure, sql = %sql, "Calling stored procedure");

        let rows = sqlx::query_as_with::<_, T, _>(&sql, self.arguments())
            .fetch_all(&mut *conn)
            .await?;

        let output = self.read_outputs(&mut conn).await?;
        Ok((rows, output))
    }

    /// Like [`fetch_all`](Self::fetch_all), keeping only the first row.
    pub async fn fetch_optional<T>(
        self,
        pool: &MySqlPool,
    ) -> Result<(Option<T>, ProcOutput), sqlx::Error>
    where
        T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let (rows, output) = self.fetch_all(pool).await?;
        Ok((rows.into_iter().next(), output))
    }

    async fn read_outputs(&self, conn: &mut MySqlConnection) -> Result<ProcOutput, sqlx::Error> {
        let row = sqlx::query(&self.outputs_sql()).fetch_one(&mut *conn).await?;

        let code: Option<i64> = row.try_get(RESULT_VAR)?;
        let code = code.ok_or_else(|| {
            sqlx::Error::Protocol(format!("{} did not set {RESULT_VAR}", self.procedure))
        })?;
        let message: Option<String> = row.try_get(MESSAGE_VAR)?;

        let extra = match self.extra {
            Some(out) => row.try_get::<Option<i64>, _>(out.var())?,
            None => None,
        };

        debug!(procedure = %self.procedure, code, "Stored procedure returned");

        Ok(ProcOutput {
            procedure: self.procedure,
            code,
            message: message.unwrap_or_default(),
            generated_id: extra.filter(|_| self.extra == Some(OutParam::GeneratedId)),
            total_count: extra.filter(|_| self.extra == Some(OutParam::TotalCount)),
        })
    }
}
