use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::time::Duration;
use thiserror::Error;

use crate::models::payment::PaymentResponse;

/// Failures of the outbound call to the charge API.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("délai dépassé après {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Network(reqwest::Error),

    #[error("réponse illisible : {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid gateway endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

/// Everything `/paiement` can answer besides a successful charge.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Corps de requête invalide : JSON attendu.")]
    InvalidBody,

    #[error("Données manquantes : token ou montant.")]
    MissingData,

    #[error("Données invalides : {0}.")]
    InvalidField(&'static str),

    #[error("❌ Configuration : clé Yoco manquante.")]
    MissingSecretKey,

    #[error("❌ Paiement refusé : {0}")]
    Declined(String),

    #[error("Erreur réseau ou clé Yoco invalide : {0}")]
    Gateway(#[from] GatewayError),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidBody
            | RelayError::MissingData
            | RelayError::InvalidField(_)
            | RelayError::Declined(_) => StatusCode::BAD_REQUEST,
            RelayError::MissingSecretKey | RelayError::Gateway(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = PaymentResponse {
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
