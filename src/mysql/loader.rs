use crate::loader::Loader;
use crate::mysql::helper::MySql;
use sqlx::mysql::MySqlPool;

/// An alias for [Loader](crate::loader::Loader), specialized for **MySQL**.
pub type MySqlLoader = Loader<MySql>;

impl MySqlLoader {
    pub fn from_pool(pool: MySqlPool) -> MySqlLoader {
        Loader::new(MySql { pool })
    }
}
