pub mod api_client;
pub mod configuration;
pub mod domain;
pub mod repository;
pub mod telemetry;

pub use api_client::{ApiClient, ApiError, HttpApiClient};
pub use configuration::Config;
pub use repository::{BatchSubmissionError, ListRepository, SUBSCRIBER_BATCH_SIZE};
