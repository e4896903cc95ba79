use crate::config::FailurePolicy;
use crate::data::{normalize_candles, OHLCVData};
use crate::error::RelayError;
use crate::fetcher::Fetched;
use crate::provider::Interval;
use crate::state::AppState;
use crate::symbol;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const UNREACHABLE: &str = "blocked_or_unreachable";

#[derive(Deserialize)]
pub struct MarketQuery {
    symbol: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct MarketSnapshot {
    pub symbol: String,
    #[serde(rename = "instrumentId")]
    pub instrument_id: String,
    pub provider: &'static str,
    pub ohlcv_1h: Vec<OHLCVData>,
    pub ohlcv_4h: Vec<OHLCVData>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<&'static str, IntervalError>,
}

#[derive(Serialize, Debug)]
pub struct IntervalError {
    pub error: String,
    pub details: Value,
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub symbol: String,
    pub error: String,
    pub details: Value,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Response {
    Success(MarketSnapshot),
    Error(ErrorBody),
}

pub async fn market(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MarketQuery>, QueryRejection>,
) -> Result<Json<Response>, RelayError> {
    let Query(query) = query.map_err(|e| RelayError::InvalidQuery(e.body_text()))?;
    let symbol = symbol::canonical(query.symbol.as_deref());
    let provider = state.fetcher.provider();
    let instrument = provider.instrument_id(&symbol);

    // Joined in this task so a dropped request also drops both upstream calls
    let (one_hour, four_hours) = tokio::join!(
        state.fetcher.fetch(&instrument, Interval::OneHour),
        state.fetcher.fetch(&instrument, Interval::FourHours),
    );

    let response = assemble(
        symbol,
        instrument,
        provider.name(),
        state.failure_policy,
        one_hour?,
        four_hours?,
    );

    match &response {
        Response::Success(snapshot) => tracing::info!(
            symbol = %snapshot.symbol,
            instrument = %snapshot.instrument_id,
            candles_1h = snapshot.ohlcv_1h.len(),
            candles_4h = snapshot.ohlcv_4h.len(),
            failed_intervals = snapshot.errors.len(),
            "market snapshot served"
        ),
        Response::Error(body) => tracing::warn!(
            symbol = %body.symbol,
            error = %body.error,
            "market snapshot failed upstream"
        ),
    }

    Ok(Json(response))
}

fn assemble(
    symbol: String,
    instrument_id: String,
    provider: &'static str,
    policy: FailurePolicy,
    one_hour: Fetched,
    four_hours: Fetched,
) -> Response {
    let one_hour = interval_outcome(provider, Interval::OneHour, one_hour);
    let four_hours = interval_outcome(provider, Interval::FourHours, four_hours);

    // No interval produced rows
    if let (Err(a), Err(b)) = (&one_hour, &four_hours) {
        let error = if a.error == UNREACHABLE && b.error == UNREACHABLE {
            UNREACHABLE.to_string()
        } else if a.error != UNREACHABLE {
            a.error.clone()
        } else {
            b.error.clone()
        };
        return Response::Error(ErrorBody {
            symbol,
            error,
            details: json!({ "1h": a.details, "4h": b.details }),
        });
    }

    let mut snapshot = MarketSnapshot {
        symbol,
        instrument_id,
        provider,
        ohlcv_1h: Vec::new(),
        ohlcv_4h: Vec::new(),
        errors: BTreeMap::new(),
    };

    for (interval, outcome) in [(Interval::OneHour, one_hour), (Interval::FourHours, four_hours)] {
        let failure = match outcome {
            Ok(candles) => {
                match interval {
                    Interval::OneHour => snapshot.ohlcv_1h = candles,
                    Interval::FourHours => snapshot.ohlcv_4h = candles,
                }
                continue;
            }
            Err(failure) => failure,
        };

        if policy == FailurePolicy::Strict {
            return Response::Error(ErrorBody {
                symbol: snapshot.symbol,
                error: failure.error,
                details: failure.details,
            });
        }
        snapshot.errors.insert(interval.as_str(), failure);
    }

    Response::Success(snapshot)
}

fn interval_outcome(
    provider: &'static str,
    interval: Interval,
    fetched: Fetched,
) -> Result<Vec<OHLCVData>, IntervalError> {
    match fetched {
        Fetched::Rows(rows) => Ok(normalize_candles(&rows)),
        Fetched::Rejected(body) => Err(IntervalError {
            error: format!("{}_{}_error", provider, interval.as_str()),
            details: body,
        }),
        Fetched::Unavailable(failures) => Err(IntervalError {
            error: UNREACHABLE.to_string(),
            details: json!(failures),
        }),
    }
}
