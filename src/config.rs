use crate::provider::ProviderKind;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) market-relay/0.1";

/// How a request is answered when only some of the intervals could be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Any failing interval turns the whole response into an error body.
    Strict,
    /// Each interval reports its own error next to the others' candles.
    PerInterval,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(FailurePolicy::Strict),
            "per_interval" | "per-interval" => Ok(FailurePolicy::PerInterval),
            other => Err(format!("unknown failure policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: String,
    pub port: u16,
    pub provider: ProviderKind,
    /// Ordered base URLs, tried one after the other.
    pub mirrors: Vec<String>,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub user_agent: String,
}

fn lookup_str(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_str(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    lookup_str(lookup, name).unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup_str(lookup, name) else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(variable = name, value = %raw, error = %e, "invalid setting, using default");
            default
        }
    }
}

fn parse_mirrors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|m| m.trim().trim_end_matches('/').to_string())
        .filter(|m| !m.is_empty())
        .collect()
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source, blank or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let provider = env_parse(&lookup, "MARKET_PROVIDER", ProviderKind::Binance);

        let mut mirrors = parse_mirrors(&env_str(&lookup, "MARKET_MIRRORS", ""));
        if mirrors.is_empty() {
            mirrors = provider.build().default_mirrors();
        }

        RelayConfig {
            bind: env_str(&lookup, "BIND", "0.0.0.0"),
            port: env_parse(&lookup, "PORT", 3000),
            provider,
            mirrors,
            request_timeout: Duration::from_millis(env_parse(&lookup, "UPSTREAM_TIMEOUT_MS", 8000)),
            failure_policy: env_parse(&lookup, "MARKET_FAILURE_POLICY", FailurePolicy::PerInterval),
            user_agent: env_str(&lookup, "UPSTREAM_USER_AGENT", DEFAULT_USER_AGENT),
        }
    }
}
