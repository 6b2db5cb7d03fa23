use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::{DocumentStore, FindSpec, StoreResult, UpdateOutcome};

/// In-process document store with the same query semantics the handlers rely on:
/// equality filters, ascending/descending sort, inclusion projection and limit.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collection<R>(&self, name: &str, f: impl FnOnce(&mut Vec<Document>) -> R) -> R {
        let mut guard = self
            .collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(guard.entry(name.to_string()).or_default())
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
}

fn with_id(mut doc: Document) -> (ObjectId, Document) {
    let id = match doc.get_object_id("_id") {
        Ok(id) => id,
        Err(_) => {
            let id = ObjectId::new();
            doc.insert("_id", id);
            id
        }
    };
    (id, doc)
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(x), Some(y)) => match (as_number(x), as_number(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

fn is_truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(b) => *b,
        other => as_number(other).map_or(true, |n| n != 0.0),
    }
}

fn project(doc: &Document, projection: &Document) -> Document {
    let keep_id = projection.get("_id").map_or(true, is_truthy);

    let mut projected = Document::new();
    for (key, value) in doc {
        let included = if key == "_id" {
            keep_id
        } else {
            projection.get(key).is_some_and(is_truthy)
        };
        if included {
            projected.insert(key.clone(), value.clone());
        }
    }
    projected
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> StoreResult<ObjectId> {
        let (id, doc) = with_id(doc);
        self.with_collection(collection, |docs| docs.push(doc));
        Ok(id)
    }

    async fn insert_if_absent(
        &self,
        collection: &str,
        key: Document,
        doc: Document,
    ) -> StoreResult<Option<ObjectId>> {
        Ok(self.with_collection(collection, |docs| {
            if docs.iter().any(|existing| matches(existing, &key)) {
                return None;
            }
            let mut doc = doc;
            for (field, value) in key {
                doc.insert(field, value);
            }
            let (id, doc) = with_id(doc);
            docs.push(doc);
            Some(id)
        }))
    }

    async fn find_one(&self, collection: &str, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self.with_collection(collection, |docs| {
            docs.iter().find(|doc| matches(doc, &filter)).cloned()
        }))
    }

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        spec: FindSpec,
    ) -> StoreResult<Vec<Document>> {
        let mut found: Vec<Document> = self.with_collection(collection, |docs| {
            docs.iter().filter(|doc| matches(doc, &filter)).cloned().collect()
        });

        if let Some(sort) = &spec.sort {
            found.sort_by(|a, b| {
                sort.iter()
                    .map(|(field, direction)| {
                        let ordering = compare_values(a.get(field), b.get(field));
                        if as_number(direction).is_some_and(|d| d < 0.0) {
                            ordering.reverse()
                        } else {
                            ordering
                        }
                    })
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        if let Some(limit) = spec.limit.filter(|limit| *limit > 0) {
            found.truncate(limit as usize);
        }

        if let Some(projection) = &spec.projection {
            found = found.iter().map(|doc| project(doc, projection)).collect();
        }

        Ok(found)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> StoreResult<UpdateOutcome> {
        Ok(self.with_collection(collection, |docs| {
            let Some(doc) = docs.iter_mut().find(|doc| matches(doc, &filter)) else {
                return UpdateOutcome { matched: 0, modified: 0 };
            };

            let before = doc.clone();
            for (key, value) in fields {
                doc.insert(key, value);
            }

            UpdateOutcome {
                matched: 1,
                modified: u64::from(*doc != before),
            }
        }))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        Ok(self.with_collection(collection, |docs| {
            match docs.iter().position(|doc| matches(doc, &filter)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            }
        }))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_find_sorts_projects_and_limits() {
        let store = MemoryStore::new();
        for (name, paid) in [("Zoe", true), ("Ann", false), ("Mia", true)] {
            store
                .insert_one("bookings", doc! { "userName": name, "isPaid": paid, "note": "x" })
                .await
                .unwrap();
        }

        let spec = FindSpec {
            sort: Some(doc! { "userName": 1 }),
            projection: Some(doc! { "_id": 1, "userName": 1 }),
            limit: Some(2),
        };
        let found = store.find("bookings", doc! {}, spec).await.unwrap();

        let names: Vec<&str> = found.iter().map(|d| d.get_str("userName").unwrap()).collect();
        assert_eq!(names, vec!["Ann", "Mia"]);
        assert!(found.iter().all(|d| d.len() == 2 && d.contains_key("_id")));
    }

    #[tokio::test]
    async fn test_descending_sort() {
        let store = MemoryStore::new();
        for price in [10.0, 30.0, 20.0] {
            store.insert_one("services", doc! { "price": price }).await.unwrap();
        }

        let spec = FindSpec {
            sort: Some(doc! { "price": -1 }),
            ..Default::default()
        };
        let found = store.find("services", doc! {}, spec).await.unwrap();
        let prices: Vec<f64> = found.iter().map(|d| d.get_f64("price").unwrap()).collect();
        assert_eq!(prices, vec![30.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let store = MemoryStore::new();
        let key = doc! { "email": "a@example.com" };

        let first = store
            .insert_if_absent("users", key.clone(), doc! { "name": "A" })
            .await
            .unwrap();
        let second = store
            .insert_if_absent("users", key.clone(), doc! { "name": "B" })
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());

        let stored = store.find_one("users", key).await.unwrap().unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "A");
        assert_eq!(stored.get_object_id("_id").unwrap(), first.unwrap());
    }

    #[tokio::test]
    async fn test_update_reports_modified_count() {
        let store = MemoryStore::new();
        let id = store.insert_one("users", doc! { "name": "A" }).await.unwrap();

        let changed = store
            .update_one("users", doc! { "_id": id }, doc! { "role": "Admin" })
            .await
            .unwrap();
        let unchanged = store
            .update_one("users", doc! { "_id": id }, doc! { "role": "Admin" })
            .await
            .unwrap();
        let missing = store
            .update_one("users", doc! { "_id": ObjectId::new() }, doc! { "role": "Admin" })
            .await
            .unwrap();

        assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1 });
        assert_eq!(unchanged, UpdateOutcome { matched: 1, modified: 0 });
        assert_eq!(missing, UpdateOutcome { matched: 0, modified: 0 });
    }

    #[tokio::test]
    async fn test_delete_removes_one_match() {
        let store = MemoryStore::new();
        store.insert_one("users", doc! { "name": "dup" }).await.unwrap();
        store.insert_one("users", doc! { "name": "dup" }).await.unwrap();

        assert_eq!(store.delete_one("users", doc! { "name": "dup" }).await.unwrap(), 1);
        assert_eq!(store.delete_one("users", doc! { "name": "nobody" }).await.unwrap(), 0);

        let left = store.find("users", doc! {}, FindSpec::default()).await.unwrap();
        assert_eq!(left.len(), 1);
    }
}
