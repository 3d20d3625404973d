//! 测试辅助模块
//!
//! 提供内存版的 Gateway / Session 以及便捷的测试工厂方法。
//! 本 crate 的测试直接使用；其他 crate 通过 `test-utils` feature 引入。

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docnav_provider::{
    parse_document_object, ConnectionProfile, DocumentEntry, DocumentId, Gateway, ProviderError,
    Result, Session, SessionHandle,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::config::ProfileStore;
use crate::navigation::NavigationController;

const BACKEND: &str = "memory";

type Collections = BTreeMap<String, Vec<(DocumentId, Value)>>;

pub fn profile(name: &str) -> ConnectionProfile {
    ConnectionProfile {
        name: name.to_string(),
        host: "127.0.0.1".to_string(),
        port: 27017,
        username: String::new(),
        password: String::new(),
        database: String::new(),
    }
}

// ===== MockSession =====

pub struct MockSession {
    profile_name: String,
    databases: RwLock<BTreeMap<String, Collections>>,
    /// 每次 replace 收到的 (id, payload)
    replaced: RwLock<Vec<(DocumentId, String)>>,
    /// 如果 Some，下一次调用返回此错误（用于测试错误路径）
    fail_next: RwLock<Option<ProviderError>>,
    next_id: AtomicU64,
}

impl MockSession {
    pub fn new(profile_name: &str) -> Self {
        Self::with_databases(profile_name, BTreeMap::new())
    }

    fn with_databases(profile_name: &str, databases: BTreeMap<String, Collections>) -> Self {
        Self {
            profile_name: profile_name.to_string(),
            databases: RwLock::new(databases),
            replaced: RwLock::new(Vec::new()),
            fail_next: RwLock::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// shop: orders(o1, o2), users(u1, u2, u3)；analytics: events(空)
    pub fn seeded(profile_name: &str) -> Self {
        let mut dbs = BTreeMap::new();
        let mut shop = Collections::new();
        shop.insert(
            "orders".to_string(),
            vec![doc("o1", json!({"total": 10})), doc("o2", json!({"total": 25}))],
        );
        shop.insert(
            "users".to_string(),
            vec![
                doc("u1", json!({"name": "Alice", "age": 30})),
                doc("u2", json!({"name": "Bob"})),
                doc("u3", json!({"email": "carol@example.com"})),
            ],
        );
        dbs.insert("shop".to_string(), shop);

        let mut analytics = Collections::new();
        analytics.insert("events".to_string(), Vec::new());
        dbs.insert("analytics".to_string(), analytics);
        Self::with_databases(profile_name, dbs)
    }

    pub async fn set_fail_next(&self, err: Option<ProviderError>) {
        *self.fail_next.write().await = err;
    }

    pub async fn replaced(&self) -> Vec<(DocumentId, String)> {
        self.replaced.read().await.clone()
    }

    pub async fn document(&self, database: &str, collection: &str, id: &str) -> Option<Value> {
        let id = DocumentId::from_string(id);
        self.databases
            .read()
            .await
            .get(database)?
            .get(collection)?
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(_, value)| value.clone())
    }

    async fn check_failure(&self) -> Result<()> {
        match self.fail_next.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: &DocumentId) -> ProviderError {
        ProviderError::DocumentNotFound {
            backend: BACKEND.to_string(),
            document_id: id.to_string(),
        }
    }

    fn missing(param: &str, name: &str) -> ProviderError {
        ProviderError::InvalidParameter {
            backend: BACKEND.to_string(),
            param: param.to_string(),
            detail: format!("{param} '{name}' does not exist"),
        }
    }
}

fn doc(id: &str, mut value: Value) -> (DocumentId, Value) {
    if let Value::Object(map) = &mut value {
        map.insert("_id".to_string(), Value::String(id.to_string()));
    }
    (DocumentId::from_string(id), value)
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[async_trait]
impl Session for MockSession {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn profile_name(&self) -> &str {
        &self.profile_name
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        self.check_failure().await?;
        Ok(self.databases.read().await.keys().cloned().collect())
    }

    async fn list_collections(&self, database: &str) -> Result<Vec<String>> {
        self.check_failure().await?;
        Ok(self
            .databases
            .read()
            .await
            .get(database)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_documents(&self, database: &str, collection: &str) -> Result<Vec<DocumentEntry>> {
        self.check_failure().await?;
        let dbs = self.databases.read().await;
        let docs = dbs
            .get(database)
            .and_then(|c| c.get(collection))
            .cloned()
            .unwrap_or_default();
        Ok(docs
            .iter()
            .map(|(id, value)| DocumentEntry {
                id: id.clone(),
                label: match value.get("name").and_then(Value::as_str) {
                    Some(name) => format!("{id}  {name}"),
                    None => id.to_string(),
                },
                json: pretty(value),
            })
            .collect())
    }

    async fn get_document(&self, database: &str, collection: &str, id: &DocumentId) -> Result<String> {
        self.check_failure().await?;
        let dbs = self.databases.read().await;
        dbs.get(database)
            .and_then(|c| c.get(collection))
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, value)| pretty(value))
            .ok_or_else(|| Self::not_found(id))
    }

    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &DocumentId,
        json: &str,
    ) -> Result<()> {
        self.check_failure().await?;
        let mut payload = parse_document_object(BACKEND, json)?;
        payload.remove("_id");
        payload.insert("_id".to_string(), id.as_value().clone());

        let mut dbs = self.databases.write().await;
        let slot = dbs
            .get_mut(database)
            .and_then(|c| c.get_mut(collection))
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
            .ok_or_else(|| Self::not_found(id))?;
        slot.1 = Value::Object(payload);

        self.replaced.write().await.push((id.clone(), json.to_string()));
        Ok(())
    }

    async fn create_document(&self, database: &str, collection: &str, json: &str) -> Result<DocumentId> {
        self.check_failure().await?;
        let mut payload = parse_document_object(BACKEND, json)?;
        let id = DocumentId::from_string(format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst)));
        payload.insert("_id".to_string(), id.as_value().clone());

        let mut dbs = self.databases.write().await;
        let docs = dbs
            .get_mut(database)
            .and_then(|c| c.get_mut(collection))
            .ok_or_else(|| Self::missing("collection", collection))?;
        docs.push((id.clone(), Value::Object(payload)));
        Ok(id)
    }

    async fn delete_document(&self, database: &str, collection: &str, id: &DocumentId) -> Result<()> {
        self.check_failure().await?;
        let mut dbs = self.databases.write().await;
        let docs = dbs
            .get_mut(database)
            .and_then(|c| c.get_mut(collection))
            .ok_or_else(|| Self::not_found(id))?;
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id);
        if docs.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn create_database(&self, database: &str, first_collection: &str) -> Result<()> {
        self.check_failure().await?;
        if database.is_empty() || first_collection.is_empty() {
            return Err(ProviderError::InvalidParameter {
                backend: BACKEND.to_string(),
                param: "name".to_string(),
                detail: "name cannot be empty".to_string(),
            });
        }
        self.databases
            .write()
            .await
            .entry(database.to_string())
            .or_default()
            .insert(first_collection.to_string(), Vec::new());
        Ok(())
    }

    async fn create_collection(&self, database: &str, collection: &str) -> Result<()> {
        self.check_failure().await?;
        self.databases
            .write()
            .await
            .get_mut(database)
            .ok_or_else(|| Self::missing("database", database))?
            .insert(collection.to_string(), Vec::new());
        Ok(())
    }

    async fn delete_database(&self, database: &str) -> Result<()> {
        self.check_failure().await?;
        self.databases.write().await.remove(database);
        Ok(())
    }

    async fn delete_collection(&self, database: &str, collection: &str) -> Result<()> {
        self.check_failure().await?;
        if let Some(collections) = self.databases.write().await.get_mut(database) {
            collections.remove(collection);
        }
        Ok(())
    }
}

// ===== MockGateway =====

pub struct MockGateway {
    session: Arc<MockSession>,
    delay: Duration,
    failure: Option<String>,
    connects: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_session(Arc::new(MockSession::seeded("local")))
    }

    pub fn with_session(session: Arc<MockSession>) -> Self {
        Self {
            session,
            delay: Duration::ZERO,
            failure: None,
            connects: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_failure(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn id(&self) -> &'static str {
        BACKEND
    }

    async fn connect(&self, _profile: &ConnectionProfile) -> Result<SessionHandle> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(ref detail) = self.failure {
            return Err(ProviderError::ConnectionFailed {
                backend: BACKEND.to_string(),
                detail: detail.clone(),
            });
        }
        let session: SessionHandle = self.session.clone();
        Ok(session)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

// ===== 工厂方法 =====

/// 两个连接配置 + 种子数据的控制器
pub fn create_controller() -> (NavigationController, Arc<MockSession>) {
    let session = Arc::new(MockSession::seeded("local"));
    let gateway = Arc::new(MockGateway::with_session(session.clone()));
    let profiles = ProfileStore::from_profiles(vec![profile("local"), profile("staging")]);
    (NavigationController::new(gateway, profiles), session)
}
