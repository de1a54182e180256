/*
 * Responsibility
 * - objects テーブル向け SQLx 操作
 * - 1 レコード = 1 行 (kind, id, data jsonb)
 * - put/delete は即時実行 (save はコミット済みなので何もしない)
 */
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::{ForeignKey, Kind, Record};
use crate::storage::{Storage, StorageResult};

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct ObjectRow {
    data: Json<Record>,
}

impl PgStorage {
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn all(&self, kind: Kind) -> StorageResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, ObjectRow>(
            r#"
            SELECT data
            FROM objects
            WHERE kind = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(kind.class_name())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.data.0).collect())
    }

    async fn get(&self, kind: Kind, id: &str) -> StorageResult<Option<Record>> {
        let row = sqlx::query_as::<_, ObjectRow>(
            r#"
            SELECT data
            FROM objects
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(kind.class_name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.data.0))
    }

    async fn children(
        &self,
        kind: Kind,
        foreign_key: ForeignKey,
        parent_id: &str,
    ) -> StorageResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, ObjectRow>(
            r#"
            SELECT data
            FROM objects
            WHERE kind = $1 AND data ->> $2::text = $3
            ORDER BY created_at, id
            "#,
        )
        .bind(kind.class_name())
        .bind(foreign_key.as_str())
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.data.0).collect())
    }

    async fn put(&self, record: Record) -> StorageResult<()> {
        sqlx::query(
            r#"
            INSERT INTO objects (kind, id, data, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (kind, id) DO UPDATE
            SET data = EXCLUDED.data
            "#,
        )
        .bind(record.kind().class_name())
        .bind(record.id())
        .bind(Json(&record))
        .bind(record.base().created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> StorageResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM objects
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(kind.class_name())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn count(&self, kind: Kind) -> StorageResult<u64> {
        let n: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM objects
            WHERE kind = $1
            "#,
        )
        .bind(kind.class_name())
        .fetch_one(&self.pool)
        .await?;

        Ok(n.max(0) as u64)
    }

    async fn close(&self) -> StorageResult<()> {
        // Connections go back to the pool when their guards drop.
        Ok(())
    }
}
