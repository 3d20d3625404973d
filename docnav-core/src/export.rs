//! 导出路径：`<base>/<db>/<collection>/<id>.json`

use std::path::{Path, PathBuf};

use docnav_provider::{sanitize_file_name, DocumentId};

/// 默认导出目录（相对当前目录）
pub const DEFAULT_EXPORT_DIR: &str = "exports";
/// 覆盖导出目录的环境变量
pub const EXPORT_DIR_ENV: &str = "DOCNAV_EXPORT_DIR";

/// 导出根目录
pub fn export_base() -> PathBuf {
    std::env::var_os(EXPORT_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR), PathBuf::from)
}

pub fn database_dir(base: &Path, database: &str) -> PathBuf {
    base.join(sanitize_file_name(database))
}

pub fn collection_dir(base: &Path, database: &str, collection: &str) -> PathBuf {
    database_dir(base, database).join(sanitize_file_name(collection))
}

pub fn document_path(base: &Path, database: &str, collection: &str, id: &DocumentId) -> PathBuf {
    collection_dir(base, database, collection)
        .join(format!("{}.json", sanitize_file_name(&id.to_string())))
}
