pub mod memory;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, FindOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("insert did not return an ObjectId")]
    MissingInsertedId,
}

/// Read options for `DocumentStore::find`
#[derive(Debug, Clone, Default)]
pub struct FindSpec {
    pub sort: Option<Document>,
    pub projection: Option<Document>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Collections of schema-less documents.
///
/// Filters are plain equality documents (`{ field: value }`). Updates are applied
/// with `$set` semantics.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: &str, doc: Document) -> StoreResult<ObjectId>;

    /// Inserts `doc` only when nothing matches `key`. Returns the new id, or `None`
    /// when a matching document already exists.
    async fn insert_if_absent(
        &self,
        collection: &str,
        key: Document,
        doc: Document,
    ) -> StoreResult<Option<ObjectId>>;

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>>;

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        spec: FindSpec,
    ) -> StoreResult<Vec<Document>>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> StoreResult<UpdateOutcome>;

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64>;

    async fn ping(&self) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some("salon-booking-api".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };

        mongodb.ping().await?;
        log::info!("📡 Pinged database '{}'", db_name);

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// One user per email: the unique index backs `insert_if_absent` on `users`
    async fn ensure_indexes(&self) -> StoreResult<()> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection("users");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index ready: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }

        Ok(())
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn insert_one(&self, collection: &str, doc: Document) -> StoreResult<ObjectId> {
        let result = self.collection(collection).insert_one(doc).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or(StoreError::MissingInsertedId)
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        key: Document,
        mut doc: Document,
    ) -> StoreResult<Option<ObjectId>> {
        for field in key.keys() {
            doc.remove(field);
        }

        let result = self
            .collection(collection)
            .update_one(key, doc! { "$setOnInsert": doc })
            .upsert(true)
            .await;

        match result {
            Ok(outcome) => Ok(outcome.upserted_id.and_then(|id| id.as_object_id())),
            // Lost a concurrent upsert race against the unique index
            Err(e) if is_duplicate_key(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        spec: FindSpec,
    ) -> StoreResult<Vec<Document>> {
        let mut options = FindOptions::default();
        options.sort = spec.sort;
        options.projection = spec.projection;
        options.limit = spec.limit;

        let cursor = self
            .collection(collection)
            .find(filter)
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri, "salon_booking_test").await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_insert_if_absent_is_keyed_on_email() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "salon_booking_test").await.unwrap();

        let email = format!("{}@example.com", ObjectId::new().to_hex());
        let first = db
            .insert_if_absent("users", doc! { "email": &email }, doc! { "email": &email, "name": "A" })
            .await
            .unwrap();
        let second = db
            .insert_if_absent("users", doc! { "email": &email }, doc! { "email": &email, "name": "B" })
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());

        db.delete_one("users", doc! { "email": &email }).await.unwrap();
    }
}
