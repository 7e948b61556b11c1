//! SQLite store: database bootstrap, table DDL, and typed row access for users and produce.

use crate::error::{AppError, ConfigError};
use crate::model::{NewProduce, NewUser, Produce, User};
use crate::service::auth::USERNAME_TAKEN;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        location TEXT
    )
"#;

// farmer_id is a loose integer; no foreign key to users.
const PRODUCE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS produce (
        produce_id INTEGER PRIMARY KEY AUTOINCREMENT,
        farmer_id INTEGER NOT NULL,
        crop TEXT NOT NULL,
        quantity REAL NOT NULL CHECK (quantity >= 0),
        price REAL NOT NULL CHECK (price >= 0),
        location TEXT NOT NULL
    )
"#;

const PRODUCE_CROP_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_produce_crop ON produce (crop)";

/// Ensure the SQLite file in `database_url` can be created: makes the parent directory if needed.
/// In-memory URLs are left untouched. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some(path) = database_file_path(database_url) else {
        return Ok(());
    };
    if let Some(parent) = Path::new(&path).parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::Load(format!("cannot create database directory {}: {}", parent.display(), e)))?;
    }
    Ok(())
}

/// File path part of a sqlite URL, or None for in-memory databases.
fn database_file_path(url: &str) -> Option<String> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or("").trim();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path.to_string())
}

/// Open a pool on the file database, creating the file if missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::Load(format!("invalid DATABASE_URL: {}", e)))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Single-connection in-memory pool. The connection is never recycled, so the data lives as long as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the users and produce tables if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in [USERS_DDL, PRODUCE_DDL, PRODUCE_CROP_INDEX] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = "SELECT user_id, username, password, location FROM users WHERE username = ?1";
    tracing::debug!(sql = %sql, username = %username, "query");
    let row = sqlx::query_as::<_, User>(sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert one user. A UNIQUE violation on username is reported as `AppError::Conflict`.
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<i64, AppError> {
    let sql = "INSERT INTO users (username, password, location) VALUES (?1, ?2, ?3)";
    tracing::debug!(sql = %sql, username = %user.username, "query");
    let result = sqlx::query(sql)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.location)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict(USERNAME_TAKEN.into());
                }
            }
            AppError::Db(e)
        })?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_produce(pool: &SqlitePool, produce: &NewProduce) -> Result<i64, AppError> {
    let sql = "INSERT INTO produce (farmer_id, crop, quantity, price, location) VALUES (?1, ?2, ?3, ?4, ?5)";
    tracing::debug!(sql = %sql, crop = %produce.crop, "query");
    let result = sqlx::query(sql)
        .bind(produce.farmer_id)
        .bind(&produce.crop)
        .bind(produce.quantity)
        .bind(produce.price)
        .bind(&produce.location)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// All produce rows, or only those whose crop matches exactly. Ordered by id, which is insertion order.
pub async fn list_produce(pool: &SqlitePool, crop: Option<&str>) -> Result<Vec<Produce>, AppError> {
    const COLUMNS: &str = "produce_id, farmer_id, crop, quantity, price, location";
    let rows = match crop {
        Some(crop) => {
            // `=` on TEXT uses BINARY collation, so the match is case-sensitive.
            let sql = format!("SELECT {} FROM produce WHERE crop = ?1 ORDER BY produce_id", COLUMNS);
            tracing::debug!(sql = %sql, crop = %crop, "query");
            sqlx::query_as::<_, Produce>(&sql).bind(crop).fetch_all(pool).await?
        }
        None => {
            let sql = format!("SELECT {} FROM produce ORDER BY produce_id", COLUMNS);
            tracing::debug!(sql = %sql, "query");
            sqlx::query_as::<_, Produce>(&sql).fetch_all(pool).await?
        }
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_from_url() {
        assert_eq!(database_file_path("sqlite://farmers.db").as_deref(), Some("farmers.db"));
        assert_eq!(database_file_path("sqlite:data/farmers.db?mode=rwc").as_deref(), Some("data/farmers.db"));
        assert_eq!(database_file_path("sqlite::memory:"), None);
        assert_eq!(database_file_path("postgres://x/y"), None);
    }

    #[tokio::test]
    async fn produce_roundtrip_keeps_insertion_order() {
        let pool = connect_in_memory().await.unwrap();
        ensure_tables(&pool).await.unwrap();
        for crop in ["rice", "wheat", "rice"] {
            insert_produce(
                &pool,
                &NewProduce {
                    farmer_id: 7,
                    crop: crop.into(),
                    quantity: 1.0,
                    price: 2.0,
                    location: "Nashik".into(),
                },
            )
            .await
            .unwrap();
        }
        let rice = list_produce(&pool, Some("rice")).await.unwrap();
        assert_eq!(rice.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(list_produce(&pool, Some("Rice")).await.unwrap().is_empty());
        assert_eq!(list_produce(&pool, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn duplicate_username_hits_unique_constraint() {
        let pool = connect_in_memory().await.unwrap();
        ensure_tables(&pool).await.unwrap();
        let user = NewUser {
            username: "asha".into(),
            password: "pw".into(),
            location: None,
        };
        insert_user(&pool, &user).await.unwrap();
        let err = insert_user(&pool, &user).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn ensure_tables_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        ensure_tables(&pool).await.unwrap();
        ensure_tables(&pool).await.unwrap();
    }
}
