pub mod payment_processor_client;
pub mod payment_service;

pub use payment_processor_client::{ChargeGateway, PaymentProcessorClient};
pub use payment_service::PaymentService;
