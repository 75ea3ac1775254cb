use crate::domain::{RegistrationOutcome, SubmissionError, WaitlistClient, WaitlistEmail};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Talks to the waitlist service over HTTP: `POST {base_url}/waitlist`.
#[derive(Clone)]
pub struct HttpWaitlistClient {
    http_client: Client,
    base_url: String,
    api_token: Option<Secret<String>>,
    timeout: Duration,
}

impl HttpWaitlistClient {
    pub fn new(
        base_url: String,
        api_token: Option<Secret<String>>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_token,
            timeout,
        })
    }
}

#[derive(serde::Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
}

#[async_trait]
impl WaitlistClient for HttpWaitlistClient {
    #[tracing::instrument(name = "Calling the waitlist service", skip(self, email))]
    async fn register(
        &self,
        email: &WaitlistEmail,
    ) -> Result<RegistrationOutcome, SubmissionError> {
        let url = format!("{}/waitlist", self.base_url.trim_end_matches('/'));
        let mut builder = self.http_client.post(&url).json(&RegisterRequest {
            email: email.as_ref(),
        });
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SubmissionError::Timeout(self.timeout)
            } else {
                SubmissionError::Transport(e)
            }
        })?;

        match response.status() {
            StatusCode::CREATED => Ok(RegistrationOutcome::Created),
            StatusCode::OK | StatusCode::CONFLICT => Ok(RegistrationOutcome::AlreadyExists),
            status => {
                tracing::error!(status = status.as_u16(), "Waitlist service rejected the registration");
                Err(SubmissionError::Rejected(status.as_u16()))
            }
        }
    }
}
