//! 工具函数：终端、日志、启动配置

mod logging;
mod terminal;

pub use logging::init_logging;
pub use terminal::{init_terminal, restore_terminal, Term};

use docnav_core::config::ProfileStore;

use crate::i18n::{current_language, set_language, Language};
use crate::view::theme::set_theme_index;

/// 界面语言环境变量（`en` / `zh`）
pub const LANG_ENV: &str = "DOCNAV_LANG";
/// 主题环境变量（`dark` / `light`）
pub const THEME_ENV: &str = "DOCNAV_THEME";
/// 系统钥匙串中的服务名
pub const KEYRING_SERVICE: &str = "docnav";

/// 从环境变量读取语言与主题
pub fn apply_ui_settings() {
    if let Ok(code) = std::env::var(LANG_ENV) {
        match Language::from_code(&code) {
            Some(lang) => set_language(lang),
            None => log::warn!("Unknown {LANG_ENV} value: {code}"),
        }
    }

    if let Ok(theme) = std::env::var(THEME_ENV) {
        match theme.as_str() {
            "dark" => set_theme_index(0),
            "light" => set_theme_index(1),
            other => log::warn!("Unknown {THEME_ENV} value: {other}"),
        }
    }

    log::debug!("UI language: {}", current_language().code());
}

/// 配置了用户名但没有密码的连接，从系统钥匙串补全密码
pub fn fill_missing_passwords(store: &mut ProfileStore) {
    for profile in store.profiles_mut() {
        if !profile.has_credentials() || !profile.password.is_empty() {
            continue;
        }

        match keyring::Entry::new(KEYRING_SERVICE, &profile.name).and_then(|e| e.get_password()) {
            Ok(password) => {
                profile.password = password;
                log::debug!("Loaded password for {} from keyring", profile.name);
            }
            Err(keyring::Error::NoEntry) => {
                log::debug!("No keyring entry for {}", profile.name);
            }
            Err(e) => log::warn!("Keyring lookup for {} failed: {e}", profile.name),
        }
    }
}
