use crate::DbError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `items` table.
///
/// `id` and `created_at` are assigned by PostgreSQL (`gen_random_uuid()` and
/// `now()` column defaults); the application never generates either.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The `ItemRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Creates a new `ItemRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issues a trivial liveness query. Used by the readiness probe to tell
    /// "database reachable" apart from "process alive".
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Fetches all items, newest first.
    pub async fn list_items(&self) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, created_at FROM items ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Inserts a new item and returns the full row, including the
    /// server-assigned `id` and `created_at`.
    pub async fn insert_item(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Item, DbError> {
        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO items (name, description) VALUES ($1, $2) \
             RETURNING id, name, description, created_at",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Looks up a single item by id.
    ///
    /// The id arrives as the raw path segment and is cast by PostgreSQL, so a
    /// malformed id surfaces as a query error rather than a missing row.
    pub async fn get_item(&self, id: &str) -> Result<Item, DbError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, description, created_at FROM items WHERE id = $1::uuid",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        item.ok_or(DbError::NotFound)
    }

    /// Deletes an item by id, returning the deleted row so callers can tell
    /// "not found" apart from "deleted".
    pub async fn delete_item(&self, id: &str) -> Result<Item, DbError> {
        let item = sqlx::query_as::<_, Item>(
            "DELETE FROM items WHERE id = $1::uuid \
             RETURNING id, name, description, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        item.ok_or(DbError::NotFound)
    }

    /// Closes the pool: stops handing out connections, waits for in-flight
    /// checkouts to be returned, then closes every connection. Part of the
    /// ordered shutdown sequence.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn item_serializes_absent_description_as_null() {
        let item = Item {
            id: Uuid::nil(),
            name: "foo".to_string(),
            description: None,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&item).expect("item should serialize");
        assert_eq!(value["name"], Value::from("foo"));
        assert_eq!(value["description"], Value::Null);
    }
}
