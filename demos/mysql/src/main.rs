use sqlx::mysql::MySqlPool;
use sqlx::Row;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let pool = MySqlPool::connect(&env::var("DATABASE_URL")?).await?;
    println!("{}", list_users(&pool).await?);
    Ok(())
}

async fn list_users(pool: &MySqlPool) -> anyhow::Result<String> {
    let rows = sqlx::query("SELECT id, name FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;

    let mut users = String::new();
    for row in rows {
        let id: i64 = row.get("id");
        let name: String = row.get("name");
        users.push_str(&format!("- {}: {}\n", id, name));
    }

    Ok(users)
}
