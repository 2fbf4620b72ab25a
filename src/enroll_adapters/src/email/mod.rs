pub mod brevo_email_client;
pub mod mock_email_client;
pub mod unconfigured_email_client;

pub use brevo_email_client::BrevoEmailClient;
pub use mock_email_client::{MockEmailClient, SentEmail};
pub use unconfigured_email_client::UnconfiguredEmailClient;
