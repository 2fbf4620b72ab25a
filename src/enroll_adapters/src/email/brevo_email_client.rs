use enroll_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use crate::config::Settings;

pub struct BrevoEmailClient {
    http_client: Client,
    base_url: String,
    sender_email: String,
    sender_name: Option<String>,
    api_key: Secret<String>,
}

impl BrevoEmailClient {
    pub fn new(
        base_url: String,
        sender_email: String,
        sender_name: Option<String>,
        api_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender_email,
            sender_name,
            api_key,
        }
    }

    /// Construct from configuration. `Err` carries the missing or
    /// unusable keys so the caller can report them.
    pub fn from_settings(
        settings: &Settings,
        http_client: Client,
    ) -> Result<Self, Vec<&'static str>> {
        let missing = settings.email_missing_keys();
        match (settings.brevo_api_key.clone(), settings.mail_from.clone()) {
            (Some(api_key), Some(sender_email)) if missing.is_empty() => Ok(Self::new(
                settings.brevo_base_url.clone(),
                sender_email,
                settings.mail_from_name.clone(),
                api_key,
                http_client,
            )),
            _ => Err(missing),
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for BrevoEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join(BREVO_SEND_PATH).map_err(|e| e.to_string())?;

        let request_body = SendEmailRequest {
            sender: Party {
                name: self.sender_name.as_deref(),
                email: &self.sender_email,
            },
            to: [Party {
                name: None,
                email: recipient.as_ref().expose_secret(),
            }],
            subject,
            html_content: content,
        };

        let response = self
            .http_client
            .post(url)
            .header(BREVO_AUTH_HEADER, self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Brevo request failed");
                e.to_string()
            })?;

        response.error_for_status().map(|_| ()).map_err(|e| {
            tracing::error!(error = %e, "Brevo rejected the send request");
            e.to_string()
        })
    }
}

const BREVO_SEND_PATH: &str = "/v3/smtp/email";
const BREVO_AUTH_HEADER: &str = "api-key";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Party<'a>,
    to: [Party<'a>; 1],
    subject: &'a str,
    html_content: &'a str,
}

#[derive(serde::Serialize, Debug)]
struct Party<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}
