//! `MongoDB` Gateway 集成测试
//!
//! 运行方式:
//! ```bash
//! MONGO_TEST_HOST=127.0.0.1 MONGO_TEST_PORT=27017 \
//!     cargo test -p docnav-provider --test mongo_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{generate_test_database_name, profile_from_env};
use std::time::Duration;

use docnav_provider::{Gateway, MongoGateway, ProviderError, Session};

#[tokio::test]
#[ignore = "integration test: requires MONGO_TEST_HOST"]
async fn test_mongo_connect_and_list_databases() {
    skip_if_no_server!("MONGO_TEST_HOST");

    let profile = require_some!(profile_from_env(), "创建测试配置失败");
    let session = require_ok!(MongoGateway::new().connect(&profile).await, "connect 调用失败");

    let databases = require_ok!(session.list_databases().await, "list_databases 调用失败");
    assert!(databases.iter().any(|d| d == "admin"), "应包含 admin 数据库");

    println!("✓ connect 测试通过，共 {} 个数据库", databases.len());
}

#[tokio::test]
#[ignore = "integration test: requires MONGO_TEST_HOST"]
async fn test_mongo_document_lifecycle() {
    skip_if_no_server!("MONGO_TEST_HOST");

    let profile = require_some!(profile_from_env(), "创建测试配置失败");
    let session = require_ok!(MongoGateway::new().connect(&profile).await, "connect 调用失败");
    let db = generate_test_database_name();

    require_ok!(session.create_database(&db, "people").await, "create_database 调用失败");

    let id = require_ok!(
        session
            .create_document(&db, "people", r#"{"_id":{"$oid":"<generated>"},"name":"Ada"}"#)
            .await,
        "create_document 调用失败"
    );

    let listed = require_ok!(session.list_documents(&db, "people").await, "list_documents 调用失败");
    assert_eq!(listed.len(), 1);
    assert!(listed[0].label.ends_with("Ada"));

    // 载荷中的 _id 会被忽略
    require_ok!(
        session
            .replace_document(&db, "people", &id, r#"{"_id":"ignored","name":"Grace"}"#)
            .await,
        "replace_document 调用失败"
    );
    let fetched = require_ok!(session.get_document(&db, "people", &id).await, "get_document 调用失败");
    assert!(fetched.contains("Grace"));

    require_ok!(session.delete_document(&db, "people", &id).await, "delete_document 调用失败");
    let missing = session.delete_document(&db, "people", &id).await;
    assert!(matches!(missing, Err(ProviderError::DocumentNotFound { .. })));

    require_ok!(session.delete_database(&db).await, "delete_database 调用失败");
    println!("✓ 文档生命周期测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires MONGO_TEST_HOST"]
async fn test_mongo_export_collection() {
    skip_if_no_server!("MONGO_TEST_HOST");

    let profile = require_some!(profile_from_env(), "创建测试配置失败");
    let session = require_ok!(MongoGateway::new().connect(&profile).await, "connect 调用失败");
    let db = generate_test_database_name();
    let dir = require_ok!(tempfile::tempdir(), "创建临时目录失败");

    require_ok!(session.create_database(&db, "items").await, "create_database 调用失败");
    for n in 0..3 {
        require_ok!(
            session.create_document(&db, "items", &format!(r#"{{"n":{n}}}"#)).await,
            "create_document 调用失败"
        );
    }

    let report = require_ok!(
        session.export_database(&db, dir.path()).await,
        "export_database 调用失败"
    );
    assert_eq!(report.exported_count, 3);
    assert_eq!(report.failed_count, 0);

    require_ok!(session.delete_database(&db).await, "delete_database 调用失败");
    println!("✓ 导出测试通过");
}

#[tokio::test]
async fn test_mongo_connect_rejects_bad_uri() {
    let profile = docnav_provider::ConnectionProfile {
        name: "broken".to_string(),
        host: "bad host name".to_string(),
        port: 27017,
        username: String::new(),
        password: String::new(),
        database: String::new(),
    };

    let result = MongoGateway::new()
        .with_connect_timeout(Duration::from_millis(200))
        .connect(&profile)
        .await;
    assert!(result.is_err());
}
