use std::time::Duration;

use arena_protocol::{
    Endpoint, EndRequest, EndResponse, StartRequest, StartResponse, StateRequest, StateResponse,
    UseMoveRequest, UseMoveResponse,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Transport, TransportError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpTransportConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl HttpTransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }
}

/// JSON over HTTP POST, one endpoint per request kind
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpTransportConfig,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    async fn post<Req, Resp>(&self, endpoint: Endpoint, request: &Req) -> Result<Resp, TransportError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.config.url(endpoint);
        debug!(url = %url, "POST");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Failure-shaped bodies are still responses, whatever the status
        match arena_protocol::decode(&body) {
            Ok(decoded) => Ok(decoded),
            Err(_) if !status.is_success() => {
                warn!(url = %url, status = status.as_u16(), "Battle server error");
                Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn start(&self, request: StartRequest) -> Result<StartResponse, TransportError> {
        self.post(Endpoint::Start, &request).await
    }

    async fn use_move(&self, request: UseMoveRequest) -> Result<UseMoveResponse, TransportError> {
        self.post(Endpoint::UseMove, &request).await
    }

    async fn end(&self, request: EndRequest) -> Result<EndResponse, TransportError> {
        self.post(Endpoint::End, &request).await
    }

    async fn state(&self, request: StateRequest) -> Result<StateResponse, TransportError> {
        self.post(Endpoint::State, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = HttpTransportConfig::new("https://arena.example/api/");
        assert_eq!(config.url(Endpoint::UseMove), "https://arena.example/api/battle/use-move");
        assert_eq!(config.url(Endpoint::Start), "https://arena.example/api/battle/start");
    }

    #[test]
    fn test_config_from_json_keeps_defaults() {
        let config: HttpTransportConfig =
            serde_json::from_str(r#"{ "base_url": "http://10.0.0.2:9000" }"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let transport = HttpTransport::new(HttpTransportConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_millis(500),
        })
        .unwrap();

        let result = transport
            .state(StateRequest {
                battle_id: arena_protocol::BattleId::new(),
            })
            .await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
