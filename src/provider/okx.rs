use super::{join_path, Interval, Payload, Provider};
use crate::symbol;
use serde_json::Value;

const CANDLES_PATH: &str = "/api/v5/market/candles";
const LIMIT: u32 = 200;
const SUCCESS_CODE: &str = "0";

const MIRRORS: [&str; 2] = ["https://www.okx.com", "https://aws.okx.com"];

pub struct Okx;

impl Provider for Okx {
    fn name(&self) -> &'static str {
        "okx"
    }

    fn instrument_id(&self, symbol: &str) -> String {
        symbol::to_dashed(symbol)
    }

    fn interval_label(&self, interval: Interval) -> &'static str {
        match interval {
            Interval::OneHour => "1H",
            Interval::FourHours => "4H",
        }
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
            ("instId", instrument.to_string()),
            ("bar", self.interval_label(interval).to_string()),
            ("limit", self.limit().to_string()),
        ];
        (join_path(base, CANDLES_PATH), query)
    }

    // Envelope: {"code": "0", "msg": "", "data": [[ts, o, h, l, c, vol, ...], ...]}
    fn unwrap_payload(&self, body: Value) -> Payload {
        let Some(code) = body.get("code") else {
            return Payload::Unrecognized;
        };

        let success = match code {
            Value::String(s) => s == SUCCESS_CODE,
            Value::Number(n) => n.as_i64() == Some(0),
            _ => false,
        };
        if !success {
            return Payload::Rejected(body);
        }

        match body.get("data") {
            Some(data) if data.is_array() => Payload::Rows(data.clone()),
            _ => Payload::Unrecognized,
        }
    }
}
