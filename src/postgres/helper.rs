use crate::fixture_file::FixtureValue;
use crate::helper::Database as DB;
use async_trait::async_trait;
use sqlx::postgres::PgPool;

/// **PostgreSQL** driver.
pub struct PostgreSql {
    pub pool: PgPool,
}

#[async_trait]
impl DB for PostgreSql {
    async fn execute(&self, sql: &str, params: &[FixtureValue]) -> anyhow::Result<()> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                FixtureValue::String(param) => query.bind(param.clone()),
                FixtureValue::Integer(param) => query.bind(*param),
                FixtureValue::Float(param) => query.bind(*param),
                FixtureValue::Boolean(param) => query.bind(*param),
                FixtureValue::Datetime(param) => query.bind(*param),
                FixtureValue::Null => query.bind(None::<String>),
            };
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn delete_all(&self, table: &str) -> anyhow::Result<()> {
        sqlx::query(format!("DELETE FROM {}", table).as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }
}
