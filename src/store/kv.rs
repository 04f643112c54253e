//! Key-value store over the `collections` table
//!
//! Every feature collection persists as one named row holding a JSON
//! array of records. A `save` overwrites the whole row in a single
//! statement, so readers never observe a partial write; every save is
//! immediately visible to subsequent loads (no caching layer).

use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

/// Handle to the persistent key-value store.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Raw payload of a named entry, if it has ever been written.
    pub async fn get_raw(&self, name: &str) -> Result<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM collections WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    /// Overwrite a named entry with a raw payload.
    pub async fn put_raw(&self, name: &str, payload: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO collections (name, payload) VALUES (?, ?)
            ON CONFLICT(name) DO UPDATE
                SET payload = excluded.payload,
                    updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(name)
        .bind(payload)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Saved entry '{}' ({} bytes)", name, payload.len());
        Ok(())
    }

    /// Typed read of a singleton entry (e.g. the user profile).
    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.get_raw(name).await? {
            None => Ok(None),
            Some(payload) => {
                let value = serde_json::from_str(&payload).map_err(|source| {
                    AppError::CorruptData {
                        collection: name.to_string(),
                        source,
                    }
                })?;
                Ok(Some(value))
            }
        }
    }

    /// Typed write of a singleton entry.
    pub async fn put<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        self.put_raw(name, &payload).await
    }

    /// Load a collection. A collection that has never been written is
    /// the empty sequence; a payload that fails to decode is
    /// `CorruptData`.
    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        match self.get_raw(collection).await? {
            None => Ok(Vec::new()),
            Some(payload) => serde_json::from_str(&payload).map_err(|source| {
                AppError::CorruptData {
                    collection: collection.to_string(),
                    source,
                }
            }),
        }
    }

    /// Load a collection, substituting the empty sequence when the
    /// persisted payload is corrupt. Read paths that feed a UI use this
    /// so a bad payload never takes the whole view down.
    pub async fn load_or_default<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        match self.load(collection).await {
            Ok(records) => Ok(records),
            Err(err) if err.is_corrupt_data() => {
                tracing::warn!("Recovering '{}' as empty: {}", collection, err);
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Overwrite a collection with the given records.
    pub async fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<()> {
        let payload = serde_json::to_string(records)?;
        self.put_raw(collection, &payload).await
    }

    /// Read-modify-write a collection in one logical step.
    ///
    /// The closure runs synchronously between the load and the save, so
    /// no other operation can observe an intermediate state. Callers
    /// must not split a load from its save across an await of unrelated
    /// work; this combinator is the supported way to mutate.
    ///
    /// A corrupt payload is recovered as the empty collection before
    /// the closure runs, matching `load_or_default`.
    pub async fn mutate<T, R, F>(&self, collection: &str, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let mut records: Vec<T> = self.load_or_default(collection).await?;
        let outcome = f(&mut records);
        self.save(collection, &records).await?;
        Ok(outcome)
    }

    /// Allocate the next id for a collection.
    ///
    /// Ids come from a persisted per-collection sequence and are
    /// strictly increasing, so two creations can never collide no
    /// matter how close together they land.
    pub async fn next_id(&self, collection: &str) -> Result<u64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO id_sequences (collection, next_id) VALUES (?, 1)
            ON CONFLICT(collection) DO UPDATE SET next_id = next_id + 1
            RETURNING next_id
            "#,
        )
        .bind(collection)
        .fetch_one(&self.pool)
        .await?;

        Ok(id as u64)
    }
}
