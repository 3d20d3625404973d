//! 创建 / 删除 / 导出 / 导入流程
//!
//! 多步创建用一个小状态机驱动同一个 `PopupDialog`：
//! 每次对话框保存后调用 [`CreateFlow::advance`]，得到下一个提示或最终的提交请求。

use std::fmt;

use docnav_provider::DocumentId;
use rand::Rng;
use serde_json::Value;

use crate::navigation::Level;
use crate::popup::{PopupMode, PopupRequest, PopupTitle};

/// 新文档模板，`_id` 会在插入时生成
pub const DOCUMENT_TEMPLATE: &str = "{\n  \"_id\": {\"$oid\": \"<generated>\"}\n}";

/// 新数据库的默认名称，如 `new_db4821`
pub fn default_database_name() -> String {
    format!("new_db{}", rand::rng().random_range(1000..10000))
}

/// 流程中的当前步骤
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStep {
    AwaitingDatabaseName,
    AwaitingCollectionName { database: String },
    AwaitingDocument { database: String, collection: String },
    Committing,
}

/// 最终交给控制器的创建请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequest {
    Database {
        name: String,
        first_collection: String,
    },
    Collection {
        database: String,
        name: String,
    },
    Document {
        database: String,
        collection: String,
        json: String,
    },
}

/// `advance` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    Prompt(PopupRequest),
    Commit(CreateRequest),
    Rejected(String),
}

/// 创建流程状态机
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFlow {
    step: CreateStep,
    /// 数据库流程需要两步
    new_database: bool,
}

impl CreateFlow {
    /// 按当前层级开始流程；连接层不支持创建
    pub fn start(
        level: Level,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Option<(Self, PopupRequest)> {
        match (level, database, collection) {
            (Level::Databases, _, _) => Some((
                Self {
                    step: CreateStep::AwaitingDatabaseName,
                    new_database: true,
                },
                PopupRequest::new(
                    PopupTitle::NewDatabase,
                    default_database_name(),
                    PopupMode::SingleLine,
                ),
            )),
            (Level::Collections, Some(database), _) => Some((
                Self {
                    step: CreateStep::AwaitingCollectionName {
                        database: database.to_string(),
                    },
                    new_database: false,
                },
                PopupRequest::new(
                    PopupTitle::NewCollection {
                        database: database.to_string(),
                    },
                    "",
                    PopupMode::SingleLine,
                ),
            )),
            (Level::Documents, Some(database), Some(collection)) => Some((
                Self {
                    step: CreateStep::AwaitingDocument {
                        database: database.to_string(),
                        collection: collection.to_string(),
                    },
                    new_database: false,
                },
                PopupRequest::new(
                    PopupTitle::NewDocument {
                        collection: collection.to_string(),
                    },
                    DOCUMENT_TEMPLATE,
                    PopupMode::MultiLine,
                ),
            )),
            _ => None,
        }
    }

    pub fn step(&self) -> &CreateStep {
        &self.step
    }

    /// 消费一次对话框输入；被拒绝时停留在当前步骤
    pub fn advance(&mut self, input: &str) -> FlowStep {
        let step = std::mem::replace(&mut self.step, CreateStep::Committing);
        let (next, result) = match step {
            CreateStep::AwaitingDatabaseName => match non_empty(input, "database") {
                Ok(name) => {
                    let prompt = PopupRequest::new(
                        PopupTitle::FirstCollection {
                            database: name.clone(),
                        },
                        "",
                        PopupMode::SingleLine,
                    );
                    (
                        CreateStep::AwaitingCollectionName { database: name },
                        FlowStep::Prompt(prompt),
                    )
                }
                Err(reason) => (CreateStep::AwaitingDatabaseName, FlowStep::Rejected(reason)),
            },
            CreateStep::AwaitingCollectionName { database } => match non_empty(input, "collection") {
                Ok(name) => {
                    let request = if self.new_database {
                        CreateRequest::Database {
                            name: database,
                            first_collection: name,
                        }
                    } else {
                        CreateRequest::Collection { database, name }
                    };
                    (CreateStep::Committing, FlowStep::Commit(request))
                }
                Err(reason) => (
                    CreateStep::AwaitingCollectionName { database },
                    FlowStep::Rejected(reason),
                ),
            },
            CreateStep::AwaitingDocument {
                database,
                collection,
            } => match serde_json::from_str::<Value>(input) {
                Ok(Value::Object(_)) => (
                    CreateStep::Committing,
                    FlowStep::Commit(CreateRequest::Document {
                        database,
                        collection,
                        json: input.to_string(),
                    }),
                ),
                Ok(_) => (
                    CreateStep::AwaitingDocument {
                        database,
                        collection,
                    },
                    FlowStep::Rejected("document must be a JSON object".to_string()),
                ),
                Err(e) => (
                    CreateStep::AwaitingDocument {
                        database,
                        collection,
                    },
                    FlowStep::Rejected(format!("invalid JSON: {e}")),
                ),
            },
            CreateStep::Committing => (
                CreateStep::Committing,
                FlowStep::Rejected("already committed".to_string()),
            ),
        };
        self.step = next;
        result
    }
}

fn non_empty(input: &str, what: &str) -> Result<String, String> {
    let name = input.trim();
    if name.is_empty() {
        Err(format!("{what} name cannot be empty"))
    } else {
        Ok(name.to_string())
    }
}

/// 删除 / 导出的对象
#[derive(Debug, Clone, PartialEq)]
pub enum ActionTarget {
    Database {
        name: String,
    },
    Collection {
        database: String,
        name: String,
    },
    Document {
        database: String,
        collection: String,
        id: DocumentId,
    },
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database { name } => write!(f, "database '{name}'"),
            Self::Collection { database, name } => write!(f, "collection '{database}.{name}'"),
            Self::Document { collection, id, .. } => {
                write!(f, "document '{id}' in '{collection}'")
            }
        }
    }
}

/// 等待确认的操作
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Delete(ActionTarget),
    Export(ActionTarget),
}

impl PendingAction {
    pub fn target(&self) -> &ActionTarget {
        match self {
            Self::Delete(target) | Self::Export(target) => target,
        }
    }
}

/// 导入文件路径的输入框
pub fn import_prompt(collection: &str) -> PopupRequest {
    PopupRequest::new(
        PopupTitle::Import {
            collection: collection.to_string(),
        },
        "",
        PopupMode::SingleLine,
    )
}
