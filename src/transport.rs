// src/transport.rs

use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{WidgetError, WidgetResult};
use crate::message::{ChatRequest, ChatResponse};

/// Carries one request to the chat endpoint and decodes its reply.
pub trait ChatTransport: Send + Sync + 'static {
    fn send(
        &self,
        request: ChatRequest,
    ) -> impl Future<Output = WidgetResult<ChatResponse>> + Send;
}

/// JSON over `POST {endpoint}`. No auth headers; no timeout beyond reqwest's.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

impl ChatTransport for HttpTransport {
    async fn send(&self, request: ChatRequest) -> WidgetResult<ChatResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "chat endpoint replied");
        Ok(serde_json::from_slice(&body)?)
    }
}
