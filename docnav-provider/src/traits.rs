use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::types::{ConnectionProfile, DocumentEntry, DocumentId, ExportReport};
use crate::utils::{read_import_file, unique_file_stem, write_json_file};

/// Shared handle to an open connection.
///
/// Obtained from [`Gateway::connect`] and passed to everything that talks to the
/// database; there is no process-wide client.
pub type SessionHandle = Arc<dyn Session>;

/// 原始后端错误（内部使用）
#[derive(Debug, Clone)]
#[cfg_attr(not(feature = "mongo"), allow(dead_code))]
pub(crate) struct RawBackendError {
    /// 错误码（各后端格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

/// 后端错误映射 Trait（内部使用）
/// 各后端实现此 trait 以将驱动错误映射到统一错误类型
#[cfg_attr(not(feature = "mongo"), allow(dead_code))]
pub(crate) trait ErrorMapper {
    /// 返回后端标识符
    fn backend_name(&self) -> &'static str;

    /// 将原始错误映射到统一错误类型
    fn map_error(&self, raw: RawBackendError) -> ProviderError;

    /// 快捷方法：序列化错误
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            backend: self.backend_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：无效文档
    fn invalid_document(&self, detail: impl ToString) -> ProviderError {
        ProviderError::InvalidDocument {
            backend: self.backend_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawBackendError) -> ProviderError {
        ProviderError::Unknown {
            backend: self.backend_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 连接入口 Trait
#[async_trait]
pub trait Gateway: Send + Sync {
    /// 后端标识符
    fn id(&self) -> &'static str;

    /// 建立连接并验证可用（ping）
    async fn connect(&self, profile: &ConnectionProfile) -> Result<SessionHandle>;
}

/// 已建立连接上的全部操作
#[async_trait]
pub trait Session: Send + Sync {
    /// 后端标识符
    fn backend(&self) -> &'static str;

    /// 建立此连接所用的配置名称
    fn profile_name(&self) -> &str;

    /// 获取数据库列表
    async fn list_databases(&self) -> Result<Vec<String>>;

    /// 获取集合列表
    async fn list_collections(&self, database: &str) -> Result<Vec<String>>;

    /// 获取文档列表
    async fn list_documents(&self, database: &str, collection: &str)
    -> Result<Vec<DocumentEntry>>;

    /// 获取单个文档（格式化 JSON）
    async fn get_document(&self, database: &str, collection: &str, id: &DocumentId)
    -> Result<String>;

    /// 按已存储的 id 整体替换文档
    ///
    /// 载荷中的 `_id` 字段会被忽略；没有匹配文档时返回
    /// [`ProviderError::DocumentNotFound`]。
    async fn replace_document(
        &self,
        database: &str,
        collection: &str,
        id: &DocumentId,
        json: &str,
    ) -> Result<()>;

    /// 插入文档，缺省或模板 `_id` 时生成新 id
    async fn create_document(&self, database: &str, collection: &str, json: &str)
    -> Result<DocumentId>;

    /// 删除文档
    async fn delete_document(&self, database: &str, collection: &str, id: &DocumentId)
    -> Result<()>;

    /// 创建数据库（以首个集合落地）
    async fn create_database(&self, database: &str, first_collection: &str) -> Result<()>;

    /// 创建集合
    async fn create_collection(&self, database: &str, collection: &str) -> Result<()>;

    /// 删除数据库
    async fn delete_database(&self, database: &str) -> Result<()>;

    /// 删除集合
    async fn delete_collection(&self, database: &str, collection: &str) -> Result<()>;

    /// 导出单个文档到指定文件
    async fn export_document(
        &self,
        database: &str,
        collection: &str,
        id: &DocumentId,
        destination: &Path,
    ) -> Result<()> {
        let json = self.get_document(database, collection, id).await?;
        write_json_file(self.backend(), destination, &json).await
    }

    /// 导出集合内全部文档到目录，每个文档一个 `<id>.json`
    ///
    /// 清理后重名的 id 追加 `-2` 等后缀，不会互相覆盖。
    /// 单个文档失败不会中断导出，失败项记录在报告中。
    async fn export_collection(
        &self,
        database: &str,
        collection: &str,
        destination_dir: &Path,
    ) -> Result<ExportReport> {
        let documents = self.list_documents(database, collection).await?;
        let mut report = ExportReport::default();
        let mut taken = HashSet::new();

        for entry in documents {
            let id = entry.id.to_string();
            let stem = unique_file_stem(&id, &mut taken);
            let path = destination_dir.join(format!("{stem}.json"));
            match write_json_file(self.backend(), &path, &entry.json).await {
                Ok(()) => report.record_success(),
                Err(e) => {
                    log::warn!("Export of {database}.{collection} document {id} failed: {e}");
                    report.record_failure(id, e.to_string());
                }
            }
        }

        Ok(report)
    }

    /// 导出数据库内全部集合，每个集合一个子目录
    ///
    /// 单个集合失败不会中断导出。
    async fn export_database(&self, database: &str, destination_dir: &Path) -> Result<ExportReport> {
        let collections = self.list_collections(database).await?;
        let mut report = ExportReport::default();
        let mut taken = HashSet::new();

        for collection in collections {
            let dir = destination_dir.join(unique_file_stem(&collection, &mut taken));
            match self.export_collection(database, &collection, &dir).await {
                Ok(nested) => report.absorb(nested),
                Err(e) => {
                    log::warn!("Export of collection {database}.{collection} failed: {e}");
                    report.record_failure(collection, e.to_string());
                }
            }
        }

        Ok(report)
    }

    /// 从 JSON 文件导入文档（单个对象或数组），返回插入数量
    async fn import_documents(&self, database: &str, collection: &str, source: &Path)
    -> Result<usize> {
        let documents = read_import_file(self.backend(), source).await?;
        let mut inserted = 0;
        for document in documents {
            let json = serde_json::to_string(&document).map_err(|e| {
                ProviderError::SerializationError {
                    backend: self.backend().to_string(),
                    detail: e.to_string(),
                }
            })?;
            self.create_document(database, collection, &json).await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

/// 解析用户提交的文档文本，要求为 JSON 对象
pub fn parse_document_object(backend: &str, json: &str) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ProviderError::InvalidDocument {
            backend: backend.to_string(),
            detail: "document must be a JSON object".to_string(),
        }),
        Err(e) => Err(ProviderError::InvalidDocument {
            backend: backend.to_string(),
            detail: e.to_string(),
        }),
    }
}
