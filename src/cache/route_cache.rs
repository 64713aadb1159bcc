use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use crate::analyzer::parse_route_list;
use crate::artisan::RouteListFetcher;
use crate::model::{RouteInfo, RouteTable};

/// ルート表を保持し、必要に応じてFetcher経由で再読み込みする
///
/// 同時に走るリフレッシュは最大1つ。ルート表は丸ごと差し替える。
pub struct RouteCache {
    routes: RwLock<Arc<RouteTable>>,
    refreshing: AtomicBool,
    refresh_done: Notify,
    cwd: Option<PathBuf>,
    fetcher: Arc<dyn RouteListFetcher>,
}

/// ドロップ時にリフレッシュ中フラグを下ろし、完了待ちを起こす
struct RefreshGuard<'a>(&'a RouteCache);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.refreshing.store(false, Ordering::Release);
        self.0.refresh_done.notify_waiters();
    }
}

impl RouteCache {
    pub fn new(cwd: Option<PathBuf>, fetcher: Arc<dyn RouteListFetcher>) -> Self {
        Self {
            routes: RwLock::new(Arc::new(RouteTable::new())),
            refreshing: AtomicBool::new(false),
            refresh_done: Notify::new(),
            cwd,
            fetcher,
        }
    }

    /// 未読み込みならリフレッシュして完了を待つ
    ///
    /// 既に読み込み済み、またはリフレッシュ中なら何もしない。
    pub async fn ensure_loaded(self: &Arc<Self>) {
        if self.is_refreshing() || !self.routes.read().await.is_empty() {
            return;
        }
        self.refresh().await;
    }

    /// ルート一覧を取得し直す
    ///
    /// 失敗時は直前のルート表を保持してログに出すだけで、呼び出し元には返さない。
    /// 既にリフレッシュ中なら新たに取得はせず、その完了を待つ。
    pub async fn refresh(self: &Arc<Self>) {
        match self.start_refresh() {
            Some(task) => {
                if let Err(e) = task.await {
                    tracing::error!("Route refresh task failed: {}", e);
                }
            }
            None => self.wait_for_refresh().await,
        }
    }

    /// 実行中のリフレッシュがあれば完了まで待つ
    async fn wait_for_refresh(&self) {
        let notified = self.refresh_done.notified();
        tokio::pin!(notified);
        // フラグ確認より先に登録しておき、通知の取りこぼしを防ぐ
        notified.as_mut().enable();
        if self.is_refreshing() {
            notified.await;
        }
    }

    /// 取得は別タスクで行うため、待っている側が中断されても結果はキャッシュに反映される
    fn start_refresh(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let cwd = self.cwd.clone()?;

        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Route refresh already in flight");
            return None;
        }

        let cache = Arc::clone(self);
        Some(tokio::spawn(async move {
            let _guard = RefreshGuard(&cache);

            match cache.fetcher.fetch(&cwd).await {
                Ok(output) => {
                    let table = parse_route_list(&output);
                    tracing::info!("Loaded routes for {} actions", table.len());
                    *cache.routes.write().await = Arc::new(table);
                }
                Err(e) => {
                    tracing::error!("Failed to refresh Laravel routes: {}", e);
                }
            }
        }))
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// 指定アクションのルート（無ければ空）
    pub async fn routes_for_action(&self, action: &str) -> Vec<RouteInfo> {
        self.routes.read().await.routes_for(action).to_vec()
    }

    /// 現在のルート表
    pub async fn snapshot(&self) -> Arc<RouteTable> {
        Arc::clone(&*self.routes.read().await)
    }

    /// ルートを持つアクションの数
    pub async fn loaded_route_count(&self) -> usize {
        self.routes.read().await.len()
    }
}
