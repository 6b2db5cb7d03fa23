use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{DocumentStore, FindSpec, UpdateOutcome};
use crate::utils::error::{AppError, AppResult};

pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

/// CRUD facade over one collection of the document store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str) -> Self {
        Self { store, collection }
    }

    pub async fn create(&self, doc: Document) -> AppResult<ObjectId> {
        Ok(self.store.insert_one(self.collection, doc).await?)
    }

    pub async fn create_if_absent(&self, key: Document, doc: Document) -> AppResult<Option<ObjectId>> {
        Ok(self.store.insert_if_absent(self.collection, key, doc).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Document>> {
        let id = parse_object_id(id)?;
        self.find_one(doc! { "_id": id }).await
    }

    pub async fn find_one(&self, filter: Document) -> AppResult<Option<Document>> {
        Ok(self.store.find_one(self.collection, filter).await?)
    }

    pub async fn list(&self, filter: Document, spec: FindSpec) -> AppResult<Vec<Document>> {
        Ok(self.store.find(self.collection, filter, spec).await?)
    }

    pub async fn update(&self, id: &str, fields: Document) -> AppResult<UpdateOutcome> {
        let id = parse_object_id(id)?;
        self.update_where(doc! { "_id": id }, fields).await
    }

    pub async fn update_where(&self, filter: Document, mut fields: Document) -> AppResult<UpdateOutcome> {
        fields.remove("_id");
        if fields.is_empty() {
            return Err(AppError::Validation("nothing to update".to_string()));
        }
        Ok(self.store.update_one(self.collection, filter, fields).await?)
    }

    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let id = parse_object_id(id)?;
        self.delete_where(doc! { "_id": id }).await
    }

    pub async fn delete_where(&self, filter: Document) -> AppResult<u64> {
        Ok(self.store.delete_one(self.collection, filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn repository() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()), "things")
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_the_store() {
        let repo = repository();

        assert!(matches!(repo.get_by_id("not-an-id").await, Err(AppError::InvalidId(_))));
        assert!(matches!(repo.delete("123").await, Err(AppError::InvalidId(_))));
        assert!(matches!(
            repo.update("zz", doc! { "a": 1 }).await,
            Err(AppError::InvalidId(_))
        ));
    }

    #[tokio::test]
    async fn test_crud_round() {
        let repo = repository();
        let id = repo.create(doc! { "name": "first" }).await.unwrap();
        let hex = id.to_hex();

        let outcome = repo.update(&hex, doc! { "name": "second", "_id": "ignored" }).await.unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let stored = repo.get_by_id(&hex).await.unwrap().unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "second");
        assert_eq!(stored.get_object_id("_id").unwrap(), id);

        assert_eq!(repo.delete(&hex).await.unwrap(), 1);
        assert!(repo.get_by_id(&hex).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let repo = repository();
        let id = repo.create(doc! { "name": "first" }).await.unwrap();

        let result = repo.update(&id.to_hex(), doc! { "_id": id }).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
