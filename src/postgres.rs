pub mod helper;
pub mod loader;

pub use helper::PostgreSql;
pub use loader::PostgresLoader;
