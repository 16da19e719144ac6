//! 命令行配置
//!
//! JSON 格式，默认位于 `<config_dir>/xiangqi/config.json`，
//! 可用环境变量 `XIANGQI_CONFIG` 指定其他路径。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "XIANGQI_CONFIG";

/// 命令行配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 使用 ANSI 颜色
    pub use_color: bool,
    /// 每步显示中文纵线表示法
    pub show_notation: bool,
    /// 翻转棋盘（黑方在下）
    pub flip_board: bool,
    /// 日志级别（RUST_LOG 未设置时使用）
    pub log_level: String,
    /// 自定义开局 FEN
    pub start_fen: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_notation: true,
            flip_board: false,
            log_level: "warn".to_string(),
            start_fen: None,
        }
    }
}

impl CliConfig {
    /// 获取配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|mut path| {
            path.push("xiangqi");
            path.push("config.json");
            path
        })
    }

    /// 从默认路径加载配置，失败时使用默认配置
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("无法获取配置目录，使用默认配置");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// 从指定路径加载配置，失败时使用默认配置
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::info!("已加载配置: {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("配置文件格式无效: {}，使用默认配置", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("无法读取配置文件: {}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 保存配置到指定路径
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        std::fs::write(path, content)
            .with_context(|| format!("写入配置文件失败: {:?}", path))?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("missing.json"));
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = CliConfig {
            use_color: false,
            flip_board: true,
            start_fen: Some("3k5/9/9/9/9/9/9/9/9/4K4 r".to_string()),
            ..CliConfig::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(CliConfig::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "use_color": false }"#).unwrap();

        let config = CliConfig::load_from(&path);
        assert!(!config.use_color);
        assert!(config.show_notation);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_malformed_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(CliConfig::load_from(&path), CliConfig::default());
    }
}
