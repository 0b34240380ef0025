use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::app::config::{Config, SecretKey};
use crate::error::GatewayError;
use crate::models::payment::{ChargeResult, GatewayCharge, GatewayReply};

pub const SECRET_KEY_HEADER: &str = "X-Auth-Secret-Key";
const CHARGES_PATH: &str = "v1/charges";

/// Something that can attempt one card charge.
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    async fn create_charge(&self, charge: &GatewayCharge) -> Result<GatewayReply, GatewayError>;
}

/// Client for the Yoco charges API.
pub struct PaymentProcessorClient {
    client: Client,
    endpoint: Url,
    secret_key: SecretKey,
    timeout: Duration,
}

impl PaymentProcessorClient {
    pub fn new(config: &Config, secret_key: SecretKey) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.gateway_timeout)
            .build()
            .map_err(GatewayError::Client)?;

        Ok(Self {
            client,
            endpoint: charges_endpoint(&config.gateway_url)?,
            secret_key,
            timeout: config.gateway_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else {
            GatewayError::Network(err)
        }
    }
}

/// `{base}/v1/charges`, keeping any path prefix of the base URL.
fn charges_endpoint(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(CHARGES_PATH)
}

#[async_trait]
impl ChargeGateway for PaymentProcessorClient {
    async fn create_charge(&self, charge: &GatewayCharge) -> Result<GatewayReply, GatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .header(SECRET_KEY_HEADER, self.secret_key.expose())
            .json(charge)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let http_status = response.status().as_u16();
        if !response.status().is_success() {
            warn!(http_status, "Gateway answered with non-success status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        debug!(http_status, bytes = body.len(), "Gateway response received");

        let raw: Value = serde_json::from_slice(&body)?;
        let result = ChargeResult::from_json(&raw);

        Ok(GatewayReply {
            http_status,
            result,
            raw,
        })
    }
}
