//! 连接配置文件加载
//!
//! 配置文件是一个 JSON 数组，启动时读取一次，运行期只读。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use docnav_provider::ConnectionProfile;

use crate::error::{CoreError, CoreResult};

/// 覆盖配置文件路径的环境变量
pub const PROFILES_ENV: &str = "DOCNAV_PROFILES";
/// 默认文件名
pub const PROFILES_FILE: &str = "connections.json";
/// 配置目录下的应用子目录
pub const APP_DIR: &str = "docnav";

/// 已加载的连接配置
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<ConnectionProfile>,
}

impl ProfileStore {
    /// 查找配置文件：环境变量 → 当前目录 → 用户配置目录
    pub fn resolve_path() -> PathBuf {
        if let Some(path) = std::env::var_os(PROFILES_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }

        let local = PathBuf::from(PROFILES_FILE);
        if local.exists() {
            return local;
        }

        dirs::config_dir().map_or(local, |dir| dir.join(APP_DIR).join(PROFILES_FILE))
    }

    /// 读取并校验配置文件
    pub async fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| store_error(path, e.to_string()))?;
        let profiles = Self::parse(path, &text)?;

        log::info!("Loaded {} connection profiles from {}", profiles.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            profiles,
        })
    }

    /// 解析配置文本，拒绝空名称、重复名称和空主机
    pub fn parse(path: &Path, text: &str) -> CoreResult<Vec<ConnectionProfile>> {
        let profiles: Vec<ConnectionProfile> =
            serde_json::from_str(text).map_err(|e| store_error(path, e.to_string()))?;

        let mut seen = HashSet::new();
        for profile in &profiles {
            if profile.name.trim().is_empty() {
                return Err(store_error(path, "profile name cannot be empty".to_string()));
            }
            if profile.host.trim().is_empty() {
                return Err(store_error(
                    path,
                    format!("profile '{}' has an empty host", profile.name),
                ));
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(store_error(
                    path,
                    format!("duplicate profile name '{}'", profile.name),
                ));
            }
        }

        Ok(profiles)
    }

    /// 直接由内存中的配置构造（测试与嵌入场景）
    pub fn from_profiles(profiles: Vec<ConnectionProfile>) -> Self {
        Self {
            path: PathBuf::new(),
            profiles,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profiles(&self) -> &[ConnectionProfile] {
        &self.profiles
    }

    /// 可变访问，仅用于启动阶段补全密码
    pub fn profiles_mut(&mut self) -> &mut [ConnectionProfile] {
        &mut self.profiles
    }

    pub fn get(&self, name: &str) -> CoreResult<&ConnectionProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CoreError::ProfileNotFound(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }
}

fn store_error(path: &Path, detail: String) -> CoreError {
    CoreError::ProfileStore {
        path: path.display().to_string(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reads_profiles_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROFILES_FILE);
        std::fs::write(
            &path,
            r#"[
                {"name": "local", "host": "127.0.0.1"},
                {"name": "prod", "host": "db.example.com", "port": 27018,
                 "username": "admin", "password": "secret", "database": "admin"}
            ]"#,
        )
        .unwrap();

        let store = ProfileStore::load(&path).await.unwrap();

        assert_eq!(store.names(), vec!["local", "prod"]);
        assert_eq!(store.get("local").unwrap().port, 27017);
        assert!(store.get("prod").unwrap().has_credentials());
        assert_eq!(store.path(), path.as_path());
    }

    #[tokio::test]
    async fn load_missing_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProfileStore::load(dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ProfileStore { .. }));
        assert!(!err.is_expected());
    }

    #[test]
    fn parse_rejects_duplicate_names() {
        let err = ProfileStore::parse(
            Path::new("c.json"),
            r#"[{"name":"a","host":"h"},{"name":"a","host":"h2"}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate profile name 'a'"));
    }

    #[test]
    fn parse_rejects_empty_name_and_host() {
        let path = Path::new("c.json");
        assert!(ProfileStore::parse(path, r#"[{"name":" ","host":"h"}]"#).is_err());
        assert!(ProfileStore::parse(path, r#"[{"name":"a","host":""}]"#).is_err());
    }

    #[test]
    fn get_unknown_profile() {
        let store = ProfileStore::from_profiles(Vec::new());
        assert!(matches!(
            store.get("nope"),
            Err(CoreError::ProfileNotFound(name)) if name == "nope"
        ));
    }
}
