pub mod helper;
pub mod loader;

pub use helper::MySql;
pub use loader::MySqlLoader;
