pub const DEFAULT_SYMBOL: &str = "BTCUSDT";

// Checked in order, first match with a non-empty base wins
const QUOTE_ASSETS: [&str; 4] = ["USDT", "USDC", "BTC", "ETH"];

/// Trimmed, uppercased symbol, or the default one when nothing usable was given.
pub fn canonical(raw: Option<&str>) -> String {
    let symbol = raw.map(|s| s.trim().to_uppercase()).unwrap_or_default();
    if symbol.is_empty() {
        DEFAULT_SYMBOL.to_string()
    } else {
        symbol
    }
}

/// `BTCUSDT` -> `BTC-USDT`. Already dashed input is returned as is and
/// unknown quotes fall through unchanged.
pub fn to_dashed(raw: &str) -> String {
    let symbol = canonical(Some(raw));
    if symbol.contains('-') {
        return symbol;
    }

    for quote in QUOTE_ASSETS {
        if let Some(base) = symbol.strip_suffix(quote) {
            if !base.is_empty() {
                return format!("{}-{}", base, quote);
            }
        }
    }

    symbol
}

/// `BTC-USDT` -> `BTCUSDT`
pub fn to_compact(raw: &str) -> String {
    canonical(Some(raw)).replace('-', "")
}
