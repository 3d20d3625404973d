//! 日志初始化
//!
//! 终端处于备用屏幕时不能往 stdout/stderr 写日志，因此写入
//! `<data_dir>/docnav/logs/` 下按天滚动的文件。库中的 `log` 记录经 tracing-log 桥接。

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志过滤环境变量
pub const LOG_ENV: &str = "DOCNAV_LOG";

/// 初始化日志；无法创建日志目录时静默跳过
pub fn init_logging() -> Option<WorkerGuard> {
    let dir = dirs::data_local_dir()?.join("docnav").join("logs");
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::daily(&dir, "docnav.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .ok()?;

    tracing::info!("Starting docnav v{}", env!("CARGO_PKG_VERSION"));
    Some(guard)
}
