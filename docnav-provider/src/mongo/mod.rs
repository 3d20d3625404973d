//! `MongoDB` gateway.
//!
//! Connects with `directConnection=true` so a single member of a replica set can be
//! browsed without discovering the rest of the topology, and verifies the connection with
//! a `ping` before handing out a session.

mod document;
mod error;
pub mod id;
mod session;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::error::Result;
use crate::traits::{Gateway, SessionHandle};
use crate::types::ConnectionProfile;

pub use session::MongoSession;

use self::error::MongoErrorMapper;

pub(crate) const BACKEND: &str = "mongodb";

/// 默认的服务器选择超时
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// 构造连接串，凭证做 URL 转义
pub fn connection_uri(profile: &ConnectionProfile) -> String {
    let credentials = if profile.has_credentials() {
        format!(
            "{}:{}@",
            urlencoding::encode(&profile.username),
            urlencoding::encode(&profile.password)
        )
    } else {
        String::new()
    };

    format!(
        "mongodb://{credentials}{}:{}/{}?directConnection=true",
        profile.host,
        profile.port,
        urlencoding::encode(&profile.database)
    )
}

/// `MongoDB` 连接入口
#[derive(Debug, Clone)]
pub struct MongoGateway {
    connect_timeout: Duration,
}

impl MongoGateway {
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// 自定义服务器选择/建连超时
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for MongoGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MongoGateway {
    fn id(&self) -> &'static str {
        BACKEND
    }

    async fn connect(&self, profile: &ConnectionProfile) -> Result<SessionHandle> {
        let errors = MongoErrorMapper;

        let mut options = ClientOptions::parse(connection_uri(profile))
            .await
            .map_err(|e| errors.map_driver(&e))?;
        options.app_name = Some("docnav".to_string());
        options.server_selection_timeout = Some(self.connect_timeout);
        options.connect_timeout = Some(self.connect_timeout);

        let client = Client::with_options(options).map_err(|e| errors.map_driver(&e))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| errors.map_driver(&e))?;

        log::info!(
            "Connected to {} ({})",
            profile.name,
            profile.address()
        );

        Ok(Arc::new(MongoSession::new(client, profile.name.clone())))
    }
}
