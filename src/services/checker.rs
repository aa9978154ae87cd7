use crate::models::ActiveStrategy;

/// Decide whether a strategy fires against the live indicator value and
/// format the alert message when it does.
///
/// MACD, VOLUME and MA_CROSS have no check implemented; they always come
/// back not-triggered rather than pretending at indicator math.
pub fn check(strategy: &ActiveStrategy, live_value: f64) -> (bool, String) {
    match strategy.strategy_type.as_str() {
        "PRICE" => check_price(strategy, live_value),
        "RSI" => check_rsi(strategy, live_value),
        _ => (false, String::new()),
    }
}

// strictly greater / strictly less; sitting exactly on the threshold does
// not fire
fn check_price(strategy: &ActiveStrategy, price: f64) -> (bool, String) {
    if strategy.condition == "above" && price > strategy.threshold {
        let msg = format!(
            "{} broke above ${}! Currently at ${:.2}",
            strategy.ticker, strategy.threshold, price
        );
        return (true, msg);
    }

    if strategy.condition == "below" && price < strategy.threshold {
        let msg = format!(
            "{} dropped below ${}! Currently at ${:.2}",
            strategy.ticker, strategy.threshold, price
        );
        return (true, msg);
    }

    (false, String::new())
}

fn check_rsi(strategy: &ActiveStrategy, rsi: f64) -> (bool, String) {
    if strategy.condition == "below" && rsi < strategy.threshold {
        let msg = format!(
            "{} RSI dropped to {:.1} (below {}) - Oversold!",
            strategy.ticker, rsi, strategy.threshold
        );
        return (true, msg);
    }

    if strategy.condition == "above" && rsi > strategy.threshold {
        let msg = format!(
            "{} RSI rose to {:.1} (above {}) - Overbought!",
            strategy.ticker, rsi, strategy.threshold
        );
        return (true, msg);
    }

    (false, String::new())
}
