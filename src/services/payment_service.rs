use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::app::config::Config;
use crate::error::{GatewayError, RelayError};
use crate::models::payment::{ChargeRequest, GatewayCharge};
use crate::services::payment_processor_client::{ChargeGateway, PaymentProcessorClient};
use crate::utils::money::format_rand;

const UNKNOWN_ERROR: &str = "Erreur inconnue";

/// Validates, forwards and interprets charges. Holds no per-request state.
pub struct PaymentService {
    /// `None` when no secret key is configured.
    gateway: Option<Arc<dyn ChargeGateway>>,
}

impl PaymentService {
    pub fn new(gateway: Option<Arc<dyn ChargeGateway>>) -> Self {
        Self { gateway }
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let gateway = match &config.secret_key {
            Some(key) => {
                let client = PaymentProcessorClient::new(config, key.clone())?;
                info!(endpoint = %client.endpoint(), "Charge gateway configured");
                Some(Arc::new(client) as Arc<dyn ChargeGateway>)
            }
            None => {
                warn!("YOCO_SECRET_KEY not set, payments will be refused");
                None
            }
        };
        Ok(Self::new(gateway))
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }

    /// Runs one charge attempt and returns the message for the caller.
    ///
    /// Exactly one gateway call happens per invocation; nothing is retried.
    #[instrument(
        skip(self, request),
        fields(charge_id = %uuid::Uuid::new_v4(), amount = request.amount)
    )]
    pub async fn charge(&self, request: ChargeRequest) -> Result<String, RelayError> {
        let gateway = self.gateway.as_ref().ok_or_else(|| {
            error!("Charge refused: secret key missing");
            RelayError::MissingSecretKey
        })?;

        let reply = gateway
            .create_charge(&GatewayCharge::from(&request))
            .await
            .map_err(|e| {
                error!(error = %e, "Gateway call failed");
                RelayError::Gateway(e)
            })?;

        if reply.is_approved() {
            info!(http_status = reply.http_status, "Charge approved");
            return Ok(format!(
                "✅ Paiement réussi ! Montant : {}",
                format_rand(request.amount)
            ));
        }

        error!(
            http_status = reply.http_status,
            response = %reply.raw,
            "Charge declined by gateway"
        );
        let detail = reply
            .result
            .detail()
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        Err(RelayError::Declined(detail))
    }
}
