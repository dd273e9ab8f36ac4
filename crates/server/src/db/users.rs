//! MongoDB persistence for the `users` collection.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::options::ReturnDocument;
use serde::{Deserialize, Serialize};

use restaurant_orders_core::UserId;

use super::{MongoStore, RepositoryError, USERS_COLLECTION, UserStore};
use crate::models::{User, UserInput};

// =============================================================================
// Stored Document Type
// =============================================================================

/// Shape of a document in the `users` collection.
///
/// Unknown fields (such as a `__v` version key written by other clients) are
/// ignored on read.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl From<UserInput> for UserDocument {
    fn from(input: UserInput) -> Self {
        Self {
            id: None,
            name: input.name,
            email: input.email,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = RepositoryError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| RepositoryError::DataCorruption("user document without _id".into()))?;

        Ok(Self {
            id: UserId::from(id),
            name: doc.name,
            email: doc.email,
        })
    }
}

fn object_id(id: &UserId) -> Result<ObjectId, RepositoryError> {
    id.to_object_id()
        .ok_or_else(|| RepositoryError::DataCorruption(format!("unusable user id: {id}")))
}

impl MongoStore {
    fn users(&self) -> Collection<UserDocument> {
        self.database().collection(USERS_COLLECTION)
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn create_user(&self, input: UserInput) -> Result<User, RepositoryError> {
        let mut document = UserDocument::from(input);

        let result = self.users().insert_one(&document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "insert returned non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        document.id = Some(id);
        User::try_from(document)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let documents: Vec<UserDocument> = self.users().find(doc! {}).await?.try_collect().await?;

        documents.into_iter().map(User::try_from).collect()
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let oid = object_id(id)?;

        self.users()
            .find_one(doc! { "_id": oid })
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn update_user(
        &self,
        id: &UserId,
        input: UserInput,
    ) -> Result<Option<User>, RepositoryError> {
        let oid = object_id(id)?;

        // Replacing the whole document makes an omitted field absent afterwards.
        self.users()
            .find_one_and_replace(doc! { "_id": oid }, UserDocument::from(input))
            .return_document(ReturnDocument::After)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let oid = object_id(id)?;
        let result = self.users().delete_one(doc! { "_id": oid }).await?;

        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_document_to_user() {
        let oid = ObjectId::new();
        let user = User::try_from(UserDocument {
            id: Some(oid),
            name: Some("Ada".to_string()),
            email: None,
        })
        .unwrap();
        assert_eq!(user.id.as_str(), oid.to_hex());
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert!(user.email.is_none());
    }

    #[test]
    fn test_document_without_id_is_corrupt() {
        let result = User::try_from(UserDocument {
            id: None,
            name: None,
            email: None,
        });
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_new_document_has_no_id_field() {
        let document = bson::serialize_to_document(&UserDocument::from(UserInput {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        }))
        .unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("name").unwrap(), "Ada");
    }

    #[test]
    fn test_document_ignores_version_key() {
        let oid = ObjectId::new();
        let stored = doc! { "_id": oid, "name": "Ada", "__v": 0 };
        let document: UserDocument = bson::deserialize_from_document(stored).unwrap();
        assert_eq!(document.id, Some(oid));
    }
}
