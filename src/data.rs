use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OHLCVData {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Converts a raw kline payload (array of positional rows) into candles
/// ordered oldest first. Anything that is not an array yields no candles.
pub fn normalize_candles(raw: &Value) -> Vec<OHLCVData> {
    let Some(rows) = raw.as_array() else {
        return Vec::new();
    };

    let mut data: Vec<OHLCVData> = rows.iter().filter_map(parse_row).collect();

    // Providers disagree on row order, some send newest first
    data.sort_by_key(|candle| candle.timestamp);
    data
}

// Row layout: [timestamp, open, high, low, close, volume, ...]
fn parse_row(row: &Value) -> Option<OHLCVData> {
    let fields = row.as_array()?;
    let timestamp = coerce_timestamp(fields.first()?)?;

    Some(OHLCVData {
        timestamp,
        open: coerce_f64(fields.get(1)),
        high: coerce_f64(fields.get(2)),
        low: coerce_f64(fields.get(3)),
        close: coerce_f64(fields.get(4)),
        volume: coerce_f64(fields.get(5)),
    })
}

/// Numeric coercion with the leniency of a JavaScript unary plus: never
/// fails, unreadable values become NaN.
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Null) => 0.0,
        // Arrays go through their string form: [] is "", [x] is x
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            [Value::Null] => 0.0,
            [Value::Bool(_)] | [Value::Object(_)] => f64::NAN,
            [item] => coerce_f64(Some(item)),
            _ => f64::NAN,
        },
        _ => f64::NAN,
    }
}

fn coerce_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}
