use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::{Map, Value};

use crate::database::{FindSpec, UpdateOutcome};
use crate::models::{NewUser, ADMIN_ROLE};
use crate::services::repository::Repository;
use crate::utils::document::{to_document, to_json_list};
use crate::utils::error::AppResult;

pub const COLLECTION: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created(ObjectId),
    AlreadyExists,
}

pub struct UserService {
    repo: Repository,
}

impl UserService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// One document per email, existing users are left untouched
    pub async fn create(&self, fields: Map<String, Value>) -> AppResult<CreateUserOutcome> {
        let user = NewUser::from_fields(&fields)?;
        let key = doc! { "email": &user.email };

        match self.repo.create_if_absent(key, to_document(fields)?).await? {
            Some(id) => Ok(CreateUserOutcome::Created(id)),
            None => Ok(CreateUserOutcome::AlreadyExists),
        }
    }

    pub async fn list(&self) -> AppResult<Value> {
        Ok(to_json_list(self.repo.list(doc! {}, FindSpec::default()).await?))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Document>> {
        self.repo.find_one(doc! { "email": email }).await
    }

    pub async fn role_of(&self, email: &str) -> AppResult<Option<String>> {
        Ok(self
            .find_by_email(email)
            .await?
            .and_then(|user| user.get_str("role").ok().map(str::to_string)))
    }

    pub async fn is_admin(&self, email: &str) -> AppResult<bool> {
        Ok(self.role_of(email).await?.as_deref() == Some(ADMIN_ROLE))
    }

    pub async fn set_role(&self, id: &str, role: &str) -> AppResult<UpdateOutcome> {
        self.repo.update(id, doc! { "role": role }).await
    }

    pub async fn delete_by_name(&self, name: &str) -> AppResult<u64> {
        self.repo.delete_where(doc! { "name": name }).await
    }
}
