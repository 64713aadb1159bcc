mod progress;
pub mod workspace;

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::artisan::{ArtisanRouteList, is_laravel_project};
use crate::cache::RouteCache;
use crate::config::LensConfig;
use crate::handler::CodeLensHandler;
use crate::util::is_php_file;

use progress::RefreshProgress;
use workspace::{read_document, resolve_root_path};

pub const REFRESH_COMMAND: &str = "laravel-routes.refresh";

pub struct Backend {
    client: Client,
    root_path: RwLock<Option<PathBuf>>,
    config: RwLock<LensConfig>,
    routes: RwLock<Option<Arc<RouteCache>>>,
    documents: DashMap<Url, String>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            root_path: RwLock::new(None),
            config: RwLock::new(LensConfig::default()),
            routes: RwLock::new(None),
            documents: DashMap::new(),
        }
    }

    async fn route_cache(&self) -> Option<Arc<RouteCache>> {
        self.routes.read().await.clone()
    }

    async fn document_text(&self, uri: &Url) -> Option<String> {
        if let Some(doc) = self.documents.get(uri) {
            return Some(doc.value().clone());
        }
        read_document(uri).await
    }

    async fn refresh_routes(&self) -> usize {
        let Some(cache) = self.route_cache().await else {
            return 0;
        };

        let progress =
            RefreshProgress::begin(&self.client, "laravel-routes/refresh", "Loading Laravel routes")
                .await;
        cache.refresh().await;
        let count = cache.loaded_route_count().await;
        progress
            .finish(format!("Routes loaded for {} actions", count))
            .await;

        count
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = resolve_root_path(&params);
        let config = root
            .as_deref()
            .map(LensConfig::load_from_dir)
            .unwrap_or_default();

        let fetcher = Arc::new(ArtisanRouteList::new(config.clone()));
        let cache = RouteCache::new(root.clone(), fetcher);

        *self.root_path.write().await = root;
        *self.config.write().await = config;
        *self.routes.write().await = Some(Arc::new(cache));

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "laravel-routes-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_lens_provider: Some(CodeLensOptions {
                    resolve_provider: Some(false),
                }),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![REFRESH_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Laravel Routes Language Server initialized")
            .await;

        let root = self.root_path.read().await.clone();
        match root {
            Some(ref path) if is_laravel_project(path) => {
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!("Laravel project: {}", path.display()),
                    )
                    .await;
            }
            Some(ref path) => {
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!("No artisan in {}, route lenses disabled", path.display()),
                    )
                    .await;
            }
            None => {
                self.client
                    .log_message(MessageType::WARNING, "No workspace root, route lenses disabled")
                    .await;
            }
        }

        if !self.config.read().await.enabled {
            self.client
                .log_message(MessageType::INFO, "Route lenses disabled by configuration")
                .await;
        }
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        match params.command.as_str() {
            REFRESH_COMMAND => {
                self.client
                    .log_message(MessageType::INFO, "Refreshing Laravel routes...")
                    .await;

                let count = self.refresh_routes().await;

                if let Err(e) = self.client.code_lens_refresh().await {
                    tracing::debug!("Client rejected codeLens refresh: {}", e);
                }
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!("Laravel routes refreshed ({} actions)", count),
                    )
                    .await;

                Ok(Some(serde_json::json!({ "success": true, "actions": count })))
            }
            _ => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Unknown command: {}", params.command),
                    )
                    .await;
                Ok(None)
            }
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents.insert(doc.uri, doc.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().next() {
            self.documents.insert(params.text_document.uri, change.text);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        if let Some(text) = params.text {
            self.documents.insert(params.text_document.uri, text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri);
    }

    async fn code_lens(&self, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
        let uri = &params.text_document.uri;
        if !is_php_file(uri) || !self.config.read().await.enabled {
            return Ok(None);
        }
        let Some(cache) = self.route_cache().await else {
            return Ok(None);
        };

        // A cancelled request is dropped here; the refresh keeps running in its own task
        cache.ensure_loaded().await;

        let Some(text) = self.document_text(uri).await else {
            return Ok(None);
        };

        let handler = CodeLensHandler::new(cache.snapshot().await);
        Ok(handler.code_lens(&text))
    }
}
