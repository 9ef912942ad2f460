use crate::loader::Loader;
use crate::postgres::helper::PostgreSql;
use sqlx::postgres::PgPool;

/// An alias for [Loader](crate::loader::Loader), specialized for **PostgreSQL**.
pub type PostgresLoader = Loader<PostgreSql>;

impl PostgresLoader {
    pub fn from_pool(pool: PgPool) -> PostgresLoader {
        Loader::new(PostgreSql { pool })
    }
}
