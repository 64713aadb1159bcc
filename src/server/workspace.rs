use std::path::PathBuf;

use tower_lsp::lsp_types::{InitializeParams, Url};

/// Workspace root: `rootUri`, then the first workspace folder
pub fn resolve_root_path(params: &InitializeParams) -> Option<PathBuf> {
    #[allow(deprecated)]
    let root = params.root_uri.clone().or_else(|| {
        params
            .workspace_folders
            .as_ref()?
            .first()
            .map(|f| f.uri.clone())
    });

    root_to_path(root.as_ref()?)
}

fn root_to_path(uri: &Url) -> Option<PathBuf> {
    match uri.to_file_path() {
        Ok(path) => Some(path),
        Err(()) => {
            tracing::warn!("Workspace root is not a file path: {}", uri);
            None
        }
    }
}

/// Text of a document that is not open in the editor
pub async fn read_document(uri: &Url) -> Option<String> {
    let path = uri.to_file_path().ok()?;
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}
