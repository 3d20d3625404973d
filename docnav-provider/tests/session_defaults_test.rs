//! `Session` 默认导出/导入实现测试（无需数据库）

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use docnav_provider::{DocumentEntry, DocumentId, ProviderError, Result, Session};

/// 每个集合是一组 (id, json)；名为 "broken" 的集合列举时报错
#[derive(Default)]
struct FixtureSession {
    collections: BTreeMap<String, Vec<(String, String)>>,
    inserted: Mutex<Vec<String>>,
}

impl FixtureSession {
    fn with(mut self, collection: &str, docs: &[(&str, &str)]) -> Self {
        self.collections.insert(
            collection.to_string(),
            docs.iter()
                .map(|(id, json)| ((*id).to_string(), (*json).to_string()))
                .collect(),
        );
        self
    }
}

fn unsupported() -> ProviderError {
    ProviderError::Unknown {
        backend: "fixture".to_string(),
        raw_code: None,
        raw_message: "unsupported".to_string(),
    }
}

#[async_trait]
impl Session for FixtureSession {
    fn backend(&self) -> &'static str {
        "fixture"
    }

    fn profile_name(&self) -> &str {
        "fixture"
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        Ok(vec!["db".to_string()])
    }

    async fn list_collections(&self, _database: &str) -> Result<Vec<String>> {
        Ok(self.collections.keys().cloned().collect())
    }

    async fn list_documents(&self, _database: &str, collection: &str) -> Result<Vec<DocumentEntry>> {
        if collection == "broken" {
            return Err(ProviderError::ConnectionFailed {
                backend: "fixture".to_string(),
                detail: "cursor died".to_string(),
            });
        }
        Ok(self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, json)| DocumentEntry {
                        id: DocumentId::from_string(id.clone()),
                        label: id.clone(),
                        json: json.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_document(&self, database: &str, collection: &str, id: &DocumentId) -> Result<String> {
        self.list_documents(database, collection)
            .await?
            .into_iter()
            .find(|e| &e.id == id)
            .map(|e| e.json)
            .ok_or_else(|| ProviderError::DocumentNotFound {
                backend: "fixture".to_string(),
                document_id: id.to_string(),
            })
    }

    async fn replace_document(&self, _: &str, _: &str, _: &DocumentId, _: &str) -> Result<()> {
        Err(unsupported())
    }

    async fn create_document(&self, _: &str, _: &str, json: &str) -> Result<DocumentId> {
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(json.to_string());
        Ok(DocumentId::from_string(format!("new-{}", inserted.len())))
    }

    async fn delete_document(&self, _: &str, _: &str, _: &DocumentId) -> Result<()> {
        Err(unsupported())
    }

    async fn create_database(&self, _: &str, _: &str) -> Result<()> {
        Err(unsupported())
    }

    async fn create_collection(&self, _: &str, _: &str) -> Result<()> {
        Err(unsupported())
    }

    async fn delete_database(&self, _: &str) -> Result<()> {
        Err(unsupported())
    }

    async fn delete_collection(&self, _: &str, _: &str) -> Result<()> {
        Err(unsupported())
    }
}

#[tokio::test]
async fn export_document_writes_the_fetched_json() {
    let session = FixtureSession::default().with("users", &[("u1", r#"{"_id":"u1"}"#)]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db").join("users").join("u1.json");

    session
        .export_document("db", "users", &DocumentId::from_string("u1"), &path)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), r#"{"_id":"u1"}"#);
}

#[tokio::test]
async fn export_collection_sanitizes_file_names() {
    let session = FixtureSession::default().with("users", &[("a/b:c", "{}"), ("plain", "{}")]);
    let dir = tempfile::tempdir().unwrap();

    let report = session
        .export_collection("db", "users", dir.path())
        .await
        .unwrap();

    assert_eq!(report.exported_count, 2);
    assert!(dir.path().join("a_b_c.json").exists());
    assert!(dir.path().join("plain.json").exists());
}

#[tokio::test]
async fn export_collection_keeps_ids_that_sanitize_alike() {
    let session = FixtureSession::default().with(
        "users",
        &[("a/b", r#"{"n":1}"#), ("a_b", r#"{"n":2}"#)],
    );
    let dir = tempfile::tempdir().unwrap();

    let report = session
        .export_collection("db", "users", dir.path())
        .await
        .unwrap();

    assert_eq!(report.exported_count, 2);
    assert_eq!(report.failed_count, 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("a_b.json")).unwrap(),
        r#"{"n":1}"#
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("a_b-2.json")).unwrap(),
        r#"{"n":2}"#
    );
}

#[tokio::test]
async fn export_database_continues_past_a_failing_collection() {
    let session = FixtureSession::default()
        .with("broken", &[])
        .with("orders", &[("o1", "{}"), ("o2", "{}")])
        .with("users", &[("u1", "{}")]);
    let dir = tempfile::tempdir().unwrap();

    let report = session.export_database("db", dir.path()).await.unwrap();

    assert_eq!(report.exported_count, 3);
    assert_eq!(report.failed_count, 1);
    assert_eq!(report.failures[0].item, "broken");
    assert!(dir.path().join("orders").join("o2.json").exists());
    assert!(dir.path().join("users").join("u1.json").exists());
}

#[tokio::test]
async fn import_inserts_each_element_of_an_array() {
    let session = FixtureSession::default();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("import.json");
    std::fs::write(&file, r#"[{"name":"a"},{"name":"b"}]"#).unwrap();

    let count = session.import_documents("db", "users", &file).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(session.inserted.lock().unwrap().len(), 2);
}
