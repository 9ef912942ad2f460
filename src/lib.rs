pub mod error;
pub mod fixture_file;
pub mod helper;
pub mod key;
pub mod loader;
pub mod mysql;
pub mod postgres;
// reexport key APIs
pub use error::FixtureError;
pub use fixture_file::{ColumnMap, Fixture, FixtureFile, FixtureValue, InsertedRecord};
pub use helper::Database;
pub use key::derive;
pub use loader::Loader;
pub use mysql::loader::MySqlLoader;
pub use postgres::loader::PostgresLoader;
