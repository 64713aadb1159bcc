use tower_lsp::Client;
use tower_lsp::lsp_types::notification;
use tower_lsp::lsp_types::*;

/// Work done progress shown while `route:list` runs
pub struct RefreshProgress<'a> {
    client: &'a Client,
    token: NumberOrString,
}

impl<'a> RefreshProgress<'a> {
    /// Create a progress token and send begin notification
    pub async fn begin(client: &'a Client, token_name: &str, title: &str) -> Self {
        let token = NumberOrString::String(token_name.to_string());
        let _ = client
            .send_request::<request::WorkDoneProgressCreate>(WorkDoneProgressCreateParams {
                token: token.clone(),
            })
            .await;

        let progress = Self { client, token };
        progress
            .send(WorkDoneProgress::Begin(WorkDoneProgressBegin {
                title: title.to_string(),
                cancellable: Some(false),
                message: None,
                percentage: None,
            }))
            .await;
        progress
    }

    /// Send end notification
    pub async fn finish(self, message: String) {
        self.send(WorkDoneProgress::End(WorkDoneProgressEnd {
            message: Some(message),
        }))
        .await;
    }

    async fn send(&self, value: WorkDoneProgress) {
        self.client
            .send_notification::<notification::Progress>(ProgressParams {
                token: self.token.clone(),
                value: ProgressParamsValue::WorkDone(value),
            })
            .await;
    }
}
