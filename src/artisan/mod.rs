//! `php artisan route:list --json` の実行

mod project;

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::LensConfig;
use crate::error::FetchError;

pub use project::{has_artisan_script, is_laravel_project};

/// ルート一覧のJSONを取得する外部コラボレーター
#[tower_lsp::async_trait]
pub trait RouteListFetcher: Send + Sync {
    async fn fetch(&self, cwd: &Path) -> Result<String, FetchError>;
}

/// artisanを子プロセスとして実行するFetcher
pub struct ArtisanRouteList {
    config: LensConfig,
}

impl ArtisanRouteList {
    pub fn new(config: LensConfig) -> Self {
        Self { config }
    }
}

#[tower_lsp::async_trait]
impl RouteListFetcher for ArtisanRouteList {
    async fn fetch(&self, cwd: &Path) -> Result<String, FetchError> {
        if !has_artisan_script(cwd, &self.config.artisan) {
            debug!(
                "{} not found in {}, skipping route:list",
                self.config.artisan,
                cwd.display()
            );
            return Ok("[]".to_string());
        }

        debug!(
            "Running {} {} {:?} in {}",
            self.config.php,
            self.config.artisan,
            self.config.route_list_args,
            cwd.display()
        );

        let child = Command::new(&self.config.php)
            .arg(&self.config.artisan)
            .args(&self.config.route_list_args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let timeout = self.config.timeout();
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| FetchError::Timeout(timeout))??;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(FetchError::Exit {
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            warn!("artisan route:list stderr: {}", stderr);
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
