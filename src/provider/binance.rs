use super::{join_path, Interval, Payload, Provider};
use crate::symbol;
use serde_json::Value;

const KLINES_PATH: &str = "/api/v3/klines";
const LIMIT: u32 = 100;

// The api* hosts share geo restrictions, the data-api host usually does not.
const MIRRORS: [&str; 5] = [
    "https://api.binance.com",
    "https://api1.binance.com",
    "https://api2.binance.com",
    "https://api3.binance.com",
    "https://data-api.binance.vision",
];

pub struct Binance;

impl Provider for Binance {
    fn name(&self) -> &'static str {
        "binance"
    }

    fn instrument_id(&self, symbol: &str) -> String {
        symbol::to_compact(symbol)
    }

    fn interval_label(&self, interval: Interval) -> &'static str {
        interval.as_str()
    }

    fn limit(&self) -> u32 {
        LIMIT
    }

    fn default_mirrors(&self) -> Vec<String> {
        MIRRORS.iter().map(|m| m.to_string()).collect()
    }

    fn candles_request(
        &self,
        base: &str,
        instrument: &str,
        interval: Interval,
    ) -> (String, Vec<(&'static str, String)>) {
        let query = vec![
            ("symbol", instrument.to_string()),
            ("interval", self.interval_label(interval).to_string()),
            ("limit", self.limit().to_string()),
        ];
        (join_path(base, KLINES_PATH), query)
    }

    // Errors look like {"code": -1121, "msg": "Invalid symbol."}
    fn unwrap_payload(&self, body: Value) -> Payload {
        match body {
            Value::Array(_) => Payload::Rows(body),
            Value::Object(ref map) if map.contains_key("code") => Payload::Rejected(body),
            _ => Payload::Unrecognized,
        }
    }
}
