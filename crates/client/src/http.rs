// Path: crates/client/src/http.rs

//! [`ContractGateway`] over a node's `/v2` RPC endpoints.

use async_trait::async_trait;
use govscan_api::gateway::ContractGateway;
use govscan_telemetry::sinks::metrics;
use govscan_telemetry::time::{Timer, TimerTarget};
use govscan_types::config::GatewayConfig;
use govscan_types::error::GatewayError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest response excerpt carried in an error.
const SNIPPET_CHARS: usize = 160;

#[derive(Serialize)]
struct CallReadRequest<'a> {
    sender: &'a str,
    arguments: &'a [String],
}

#[derive(Deserialize)]
struct CallReadResponse {
    okay: bool,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    cause: Option<String>,
}

#[derive(Deserialize)]
struct MapEntryResponse {
    data: String,
}

fn ascii_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s: String = s.trim().chars().take(SNIPPET_CHARS).collect();
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Reads one contract through a node's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpContractGateway {
    client: Client,
    base: String,
    contract_address: String,
    contract_name: String,
}

impl HttpContractGateway {
    /// A gateway for the configured proposal contract.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::for_contract(config, &config.proposal_contract)
    }

    /// A gateway for `contract_name`, deployed by the configured address.
    pub fn for_contract(config: &GatewayConfig, contract_name: &str) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base: config.effective_rpc_url(),
            contract_address: config.contract_address.clone(),
            contract_name: contract_name.to_string(),
        })
    }

    /// The RPC base URL requests go to.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, route: &str, name: &str) -> String {
        format!(
            "{}/v2/{}/{}/{}/{}",
            self.base, route, self.contract_address, self.contract_name, name
        )
    }

    /// POSTs `body` and parses a successful JSON reply.
    async fn post<B, R>(&self, operation: &str, url: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let _timer = Timer::new(metrics(), TimerTarget::Gateway(operation));

        let resp = match self.client.post(url).json(body).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(target: "gateway", "send to {} failed: {}", url, e);
                metrics().inc_requests_total(operation, "transport");
                return Err(GatewayError::Transport(e.to_string()));
            }
        };
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| {
            metrics().inc_requests_total(operation, "transport");
            GatewayError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            tracing::debug!(
                target: "gateway",
                "HTTP {} for '{}'; body='{}'",
                status.as_u16(),
                operation,
                ascii_snippet(&bytes)
            );
            metrics().inc_requests_total(operation, "status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: ascii_snippet(&bytes),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            metrics().inc_requests_total(operation, "invalid");
            GatewayError::InvalidResponse(format!("{}: '{}'", e, ascii_snippet(&bytes)))
        })
    }
}

#[async_trait]
impl ContractGateway for HttpContractGateway {
    async fn call_read_only(
        &self,
        function_name: &str,
        args: &[String],
    ) -> Result<String, GatewayError> {
        let url = self.url("contracts/call-read", function_name);
        let request = CallReadRequest {
            sender: &self.contract_address,
            arguments: args,
        };
        let resp: CallReadResponse = self.post(function_name, &url, &request).await?;

        if !resp.okay {
            metrics().inc_requests_total(function_name, "failed");
            return Err(GatewayError::Execution(resp.cause.unwrap_or_default()));
        }
        match resp.result {
            Some(result) => {
                metrics().inc_requests_total(function_name, "ok");
                Ok(result)
            }
            None => {
                metrics().inc_requests_total(function_name, "invalid");
                Err(GatewayError::InvalidResponse(
                    "okay response without a result".to_string(),
                ))
            }
        }
    }

    async fn get_map_entry(&self, map_name: &str, key_hex: &str) -> Result<String, GatewayError> {
        let url = self.url("map_entry", map_name);
        let resp: MapEntryResponse = self.post(map_name, &url, key_hex).await?;
        metrics().inc_requests_total(map_name, "ok");
        Ok(resp.data)
    }
}
