//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use docnav_provider::ConnectionProfile;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_server {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {:?}",
            format_args!($($msg)+),
            res.as_ref().err()
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 从环境变量构造测试连接配置
///
/// `MONGO_TEST_HOST` 必填；`MONGO_TEST_PORT`、`MONGO_TEST_USER`、`MONGO_TEST_PASSWORD` 可选
pub fn profile_from_env() -> Option<ConnectionProfile> {
    let host = env::var("MONGO_TEST_HOST").ok()?;
    let port = env::var("MONGO_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(27017);

    Some(ConnectionProfile {
        name: "integration".to_string(),
        host,
        port,
        username: env::var("MONGO_TEST_USER").unwrap_or_default(),
        password: env::var("MONGO_TEST_PASSWORD").unwrap_or_default(),
        database: String::new(),
    })
}

/// 生成唯一的测试数据库名称
pub fn generate_test_database_name() -> String {
    let oid = mongodb::bson::oid::ObjectId::new().to_hex();
    format!("_docnav_test_{}", &oid[16..])
}
