use serde_json::Value;
use std::str::FromStr;

pub mod binance;
pub mod okx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    OneHour,
    FourHours,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
        }
    }
}

/// What a decoded upstream body turned out to be.
#[derive(Debug, PartialEq)]
pub enum Payload {
    /// Kline rows, ready for normalization.
    Rows(Value),
    /// A structured error from the exchange, kept verbatim.
    Rejected(Value),
    /// Valid JSON, but nothing this provider speaks.
    Unrecognized,
}

/// Exchange specific request building and response parsing.
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;
    fn instrument_id(&self, symbol: &str) -> String;
    fn interval_label(&self, interval: Interval) -> &'static str;
    fn limit(&self) -> u32;
    fn default_mirrors(&self) -> Vec<String>;
    /// URL and query parameters for one candle request against `base`.
    fn candles_request(
        &self,
        base: &str,
        instrument: &str,
        interval: Interval,
    ) -> (String, Vec<(&'static str, String)>);
    fn unwrap_payload(&self, body: Value) -> Payload;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Binance,
    Okx,
}

impl ProviderKind {
    pub fn build(&self) -> Box<dyn Provider> {
        match self {
            ProviderKind::Binance => Box::new(binance::Binance),
            ProviderKind::Okx => Box::new(okx::Okx),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binance" => Ok(ProviderKind::Binance),
            "okx" => Ok(ProviderKind::Okx),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

fn join_path(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
