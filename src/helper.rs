use crate::fixture_file::FixtureValue;
use async_trait::async_trait;

/// Database capability consumed by the loader.
///
/// Implementations execute one parameterized statement at a time and can
/// unconditionally delete every row of a named table. Connection setup,
/// pooling, and transactions belong to the implementation, not to the
/// loader.
#[async_trait]
pub trait Database {
    /// Execute `sql`, binding `params` positionally.
    async fn execute(&self, sql: &str, params: &[FixtureValue]) -> anyhow::Result<()>;

    /// Delete all rows from `table`.
    async fn delete_all(&self, table: &str) -> anyhow::Result<()>;

    /// Positional placeholder for the 1-based parameter `index`.
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
