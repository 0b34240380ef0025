use axum::{body::Bytes, extract::State, response::Json};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::RelayError;
use crate::models::payment::{ChargeRequest, PaymentResponse, RawChargeRequest};

/// `POST /paiement`
pub async fn create_payment(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PaymentResponse>, RelayError> {
    let raw = RawChargeRequest::from_slice(&body).map_err(|e| {
        warn!("Invalid payment body ({} bytes)", body.len());
        e
    })?;

    let request = ChargeRequest::try_from(raw).map_err(|e| {
        warn!("Rejected payment request: {}", e);
        e
    })?;

    info!("Received payment request for {} cents", request.amount);

    let message = state.payments.charge(request).await?;
    Ok(Json(PaymentResponse { message }))
}
