use crate::error::FetchError;
use crate::provider::{Interval, Payload, Provider};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug)]
pub enum Fetched {
    Rows(Value),
    /// The exchange answered with a structured error, body kept verbatim.
    Rejected(Value),
    /// Every mirror failed, one line per attempt.
    Unavailable(Vec<String>),
}

/// Client shared by every outbound call, built once at startup.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .timeout(timeout)
        .build()
}

pub struct CandleFetcher {
    client: Client,
    provider: Box<dyn Provider>,
    mirrors: Vec<String>,
}

impl CandleFetcher {
    pub fn new(client: Client, provider: Box<dyn Provider>, mirrors: Vec<String>) -> Self {
        CandleFetcher {
            client,
            provider,
            mirrors,
        }
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Walks the mirror list until one of them returns candle rows.
    ///
    /// Network and decode failures move on to the next mirror. Exchange
    /// rejections do too, since a geo-block on one host says nothing about
    /// the others; the last one is reported if no mirror had rows.
    pub async fn fetch(&self, instrument: &str, interval: Interval) -> Result<Fetched, FetchError> {
        let mut failures = Vec::new();
        let mut rejection = None;

        for base in &self.mirrors {
            let (url, query) = self.provider.candles_request(base, instrument, interval);

            let response = match self.client.get(&url).query(&query).send().await {
                Ok(response) => response,
                Err(e) if e.is_builder() => return Err(FetchError::InvalidRequest(e.to_string())),
                Err(e) => {
                    tracing::warn!(mirror = %base, interval = interval.as_str(), error = %e, "mirror unreachable");
                    failures.push(format!("{}: {}", base, e));
                    continue;
                }
            };

            let status = response.status();
            let body = match response.json::<Value>().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(mirror = %base, %status, error = %e, "undecodable response");
                    failures.push(format!("{}: HTTP {} with undecodable body: {}", base, status, e));
                    continue;
                }
            };

            match self.provider.unwrap_payload(body) {
                Payload::Rows(rows) => {
                    tracing::debug!(mirror = %base, instrument, interval = interval.as_str(), "candles fetched");
                    return Ok(Fetched::Rows(rows));
                }
                Payload::Rejected(body) => {
                    tracing::warn!(mirror = %base, %status, %body, "request rejected by exchange");
                    failures.push(format!("{}: rejected with HTTP {}", base, status));
                    rejection = Some(body);
                }
                Payload::Unrecognized => {
                    tracing::warn!(mirror = %base, %status, "unrecognized payload");
                    failures.push(format!("{}: HTTP {} with unrecognized payload", base, status));
                }
            }
        }

        Ok(match rejection {
            Some(body) => Fetched::Rejected(body),
            None => Fetched::Unavailable(failures),
        })
    }
}
