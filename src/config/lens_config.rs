use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "laravel-routes.json";

/// laravel-routes.json の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensConfig {
    /// CodeLensを表示する（デフォルト: true）
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// PHP実行ファイル
    #[serde(default = "default_php")]
    pub php: String,
    /// artisanスクリプトのパス（ワークスペースからの相対パス可）
    #[serde(default = "default_artisan")]
    pub artisan: String,
    #[serde(default = "default_route_list_args")]
    pub route_list_args: Vec<String>,
    /// route:list のタイムアウト秒数
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_php() -> String {
    "php".to_string()
}

fn default_artisan() -> String {
    "artisan".to_string()
}

fn default_route_list_args() -> Vec<String> {
    vec!["route:list".to_string(), "--json".to_string()]
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            php: default_php(),
            artisan: default_artisan(),
            route_list_args: default_route_list_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LensConfig {
    /// 指定ディレクトリから laravel-routes.json を読み込む
    pub fn load_from_dir(dir: &Path) -> Self {
        Self::load_from_path(&dir.join(CONFIG_FILE_NAME))
    }

    /// 指定パスから読み込む（存在しない・不正な場合はデフォルト）
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", CONFIG_FILE_NAME, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", CONFIG_FILE_NAME, e);
                Self::default()
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LensConfig::default();
        assert!(config.enabled);
        assert_eq!(config.php, "php");
        assert_eq!(config.artisan, "artisan");
        assert_eq!(config.route_list_args, vec!["route:list", "--json"]);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "php": "/usr/local/bin/php8.3",
            "artisan": "src/artisan",
            "routeListArgs": ["route:list", "--json", "--except-vendor"],
            "timeoutSecs": 5
        }"#;
        let config: LensConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.php, "/usr/local/bin/php8.3");
        assert_eq!(config.artisan, "src/artisan");
        assert_eq!(config.route_list_args.len(), 3);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "enabled": false }"#;
        let config: LensConfig = serde_json::from_str(json).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.php, "php");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LensConfig::load_from_dir(dir.path());
        assert!(config.enabled);
        assert_eq!(config.artisan, "artisan");
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        let config = LensConfig::load_from_dir(dir.path());
        assert_eq!(config.php, "php");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"php": "php8"}"#).unwrap();
        let config = LensConfig::load_from_dir(dir.path());
        assert_eq!(config.php, "php8");
    }
}
