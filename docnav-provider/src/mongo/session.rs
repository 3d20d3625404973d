//! `MongoDB` 连接会话

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

use super::document::{from_json_object, to_entry, to_pretty_json};
use super::error::MongoErrorMapper;
use super::id::{id_filters, id_from_bson, prepare_new_id};
use super::BACKEND;
use crate::error::{ProviderError, Result};
use crate::traits::{parse_document_object, ErrorMapper, Session};
use crate::types::{DocumentEntry, DocumentId};

/// 已连接的会话，持有驱动客户端（内部带连接池，可廉价克隆）
pub struct MongoSession {
    client: Client,
    profile_name: String,
    errors: MongoErrorMapper,
}

impl MongoSession {
    pub(crate) fn new(client: Client, profile_name: String) -> Self {
        Self {
            client,
            profile_name,
            errors: MongoErrorMapper,
        }
    }

    fn collection(&self, database: &str, collection: &str) -> Collection<Document> {
        self.client.database(database).collection::<Document>(collection)
    }

    fn filters(&self, id: &DocumentId) -> Result<Vec<Document>> {
        id_filters(id).map_err(|e| self.errors.invalid_document(e))
    }

    fn not_found(id: &DocumentId) -> ProviderError {
        ProviderError::DocumentNotFound {
            backend: BACKEND.to_string(),
            document_id: id.to_string(),
        }
    }

    fn require_name(param: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                backend: BACKEND.to_string(),
                param: param.to_string(),
                detail: format!("{param} name cannot be empty"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Session for MongoSession {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn profile_name(&self) -> &str {
        &self.profile_name
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        let mut names = self
            .client
            .list_database_names()
            .await
            .map_err(|e| self.errors.map_driver(&e))?;
        names.sort();
        Ok(names)
    }

    async fn list_collections(&self, database: &str) -> Result<Vec<String>> {
        let mut names = self
            .client
            .database(database)
            .list_collection_names()
            .await
            .map_err(|e| self.errors.map_driver(&e))?;
        names.sort();
        Ok(names)
    }

    async fn list_documents(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<DocumentEntry>> {
        let mut cursor = self
            .collection(database, collection)
            .find(doc! {})
            .await
            .map_err(|e| self.errors.map_driver(&e))?;

        let mut entries = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| self.errors.map_driver(&e))?
        {
            entries.push(to_entry(document).map_err(|e| self.errors.serialization_error(e))?);
        }

        log::debug!(
            "Listed {} documents from {database}.{collection}",
            entries.len()
        );
        Ok(entries)
    }

    async fn get_document(
        &self,
        database: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<String> {
        let coll = self.collection(database, collection);
        for filter in self.filters(id)? {
            let found = coll
                .find_one(filter)
                .await
                .map_err(|e| self.errors.map_driver(&e))?;
            if let Some(document) = found {
                return to_pretty_json(document).map_err(|e| self.errors.serialization_error(e));
            }
        }
        Err(Self::not_found(id))
    }

    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &DocumentId,
        json: &str,
    ) -> Result<()> {
        let mut payload = parse_document_object(BACKEND, json)?;
        // id 只能来自已存储的值
        payload.remove("_id");
        let replacement = from_json_object(payload).map_err(|e| self.errors.invalid_document(e))?;

        let coll = self.collection(database, collection);
        for filter in self.filters(id)? {
            let result = coll
                .replace_one(filter, replacement.clone())
                .await
                .map_err(|e| self.errors.map_driver(&e))?;
            if result.matched_count > 0 {
                log::info!("Replaced document {id} in {database}.{collection}");
                return Ok(());
            }
        }
        Err(Self::not_found(id))
    }

    async fn create_document(
        &self,
        database: &str,
        collection: &str,
        json: &str,
    ) -> Result<DocumentId> {
        let mut payload = parse_document_object(BACKEND, json)?;
        prepare_new_id(&mut payload);
        let document = from_json_object(payload).map_err(|e| self.errors.invalid_document(e))?;

        let result = self
            .collection(database, collection)
            .insert_one(document)
            .await
            .map_err(|e| self.errors.map_driver(&e))?;

        let id = id_from_bson(&result.inserted_id);
        log::info!("Inserted document {id} into {database}.{collection}");
        Ok(id)
    }

    async fn delete_document(
        &self,
        database: &str,
        collection: &str,
        id: &DocumentId,
    ) -> Result<()> {
        let coll = self.collection(database, collection);
        for filter in self.filters(id)? {
            let result = coll
                .delete_one(filter)
                .await
                .map_err(|e| self.errors.map_driver(&e))?;
            if result.deleted_count > 0 {
                log::info!("Deleted document {id} from {database}.{collection}");
                return Ok(());
            }
        }
        Err(Self::not_found(id))
    }

    async fn create_database(&self, database: &str, first_collection: &str) -> Result<()> {
        Self::require_name("database", database)?;
        Self::require_name("collection", first_collection)?;
        self.create_collection(database, first_collection).await
    }

    async fn create_collection(&self, database: &str, collection: &str) -> Result<()> {
        Self::require_name("collection", collection)?;
        self.client
            .database(database)
            .create_collection(collection)
            .await
            .map_err(|e| self.errors.map_driver(&e))?;
        log::info!("Created collection {database}.{collection}");
        Ok(())
    }

    async fn delete_database(&self, database: &str) -> Result<()> {
        self.client
            .database(database)
            .drop()
            .await
            .map_err(|e| self.errors.map_driver(&e))?;
        log::info!("Dropped database {database}");
        Ok(())
    }

    async fn delete_collection(&self, database: &str, collection: &str) -> Result<()> {
        self.collection(database, collection)
            .drop()
            .await
            .map_err(|e| self.errors.map_driver(&e))?;
        log::info!("Dropped collection {database}.{collection}");
        Ok(())
    }
}
