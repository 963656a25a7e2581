use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{info, warn};

use crate::card::SignedEnvelope;
use crate::config::Config;
use crate::error::{NotifyError, Result};

/// Outcome of handing an envelope to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The webhook answered; any status counts unless strict mode is on.
    Posted { status: u16, body: String },
    /// The body was printed instead of sent.
    Previewed { body: String },
}

#[async_trait]
pub trait Sink: Send + Sync {
    async fn deliver(&self, envelope: &SignedEnvelope) -> Result<Delivery>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Send,
    Preview,
}

pub fn sink_for(config: &Config, mode: Mode) -> Result<Box<dyn Sink>> {
    match mode {
        Mode::Send => Ok(Box::new(
            HttpSink::new(&config.webhook, config.timeout, config.strict)?
                .with_body_logging(config.debug),
        )),
        Mode::Preview => Ok(Box::new(PreviewSink)),
    }
}

/// Posts the envelope to the bot webhook exactly once.
pub struct HttpSink {
    url: String,
    client: reqwest::Client,
    strict: bool,
    log_bodies: bool,
}

impl HttpSink {
    /// A zero `timeout` leaves the request unbounded.
    pub fn new(url: &str, timeout: Duration, strict: bool) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            url: url.to_string(),
            client: builder.build()?,
            strict,
            log_bodies: false,
        })
    }

    /// Log request and response bodies verbatim.
    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn deliver(&self, envelope: &SignedEnvelope) -> Result<Delivery> {
        let payload = serde_json::to_string(envelope)?;
        if self.log_bodies {
            info!(body = %payload, "request body");
        }

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        info!(status = %status, "webhook responded");
        let body = response.text().await?;
        if self.log_bodies {
            info!(body = %body, "response body");
        }

        if let Some(reason) = rejection(status, &body) {
            if self.strict {
                return Err(NotifyError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }
            warn!(status = %status, reason = %reason, "webhook did not accept the message");
        }

        Ok(Delivery::Posted {
            status: status.as_u16(),
            body,
        })
    }
}

/// Bot reply; older endpoints spell the code `StatusCode`.
#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(alias = "StatusCode")]
    code: Option<i64>,
    #[serde(alias = "StatusMessage")]
    msg: Option<String>,
}

/// Why the webhook refused the message, if it did.
fn rejection(status: reqwest::StatusCode, body: &str) -> Option<String> {
    if !status.is_success() {
        return Some(format!("HTTP {status}"));
    }
    let reply: Reply = serde_json::from_str(body).ok()?;
    match reply.code {
        Some(code) if code != 0 => Some(format!(
            "code {code}: {}",
            reply.msg.unwrap_or_default()
        )),
        _ => None,
    }
}

/// Prints the signed body to stdout instead of sending it.
pub struct PreviewSink;

#[async_trait]
impl Sink for PreviewSink {
    async fn deliver(&self, envelope: &SignedEnvelope) -> Result<Delivery> {
        let body = serde_json::to_string_pretty(envelope)?;
        println!("{body}");
        Ok(Delivery::Previewed { body })
    }
}
