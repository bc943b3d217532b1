use super::paths::get_settings_path;
use crate::kernel::services::ports::settings::Settings;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot determine settings directory")]
    NoSettingsDir,
}

/// 确保配置文件存在，不存在时写入默认配置
pub fn ensure_settings_file() -> Result<PathBuf, SettingsError> {
    let path = get_settings_path().ok_or(SettingsError::NoSettingsDir)?;
    ensure_settings_file_at(&path)?;
    Ok(path)
}

pub fn ensure_settings_file_at(path: &Path) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content).map_err(io_err)?;
    }
    Ok(())
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// 读取用户配置；文件缺失或损坏时回退到默认配置。
/// 配置决定日志过滤规则，读取发生在日志初始化之前，错误交还给调用方在初始化后记录。
pub fn load_settings() -> (Settings, Option<SettingsError>) {
    fallback_to_default(ensure_settings_file().and_then(|path| load_settings_from(&path)))
}

pub fn load_settings_at(path: &Path) -> (Settings, Option<SettingsError>) {
    fallback_to_default(ensure_settings_file_at(path).and_then(|()| load_settings_from(path)))
}

fn fallback_to_default(
    result: Result<Settings, SettingsError>,
) -> (Settings, Option<SettingsError>) {
    match result {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
