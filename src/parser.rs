use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Structured form of a plain-English alert description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedStrategy {
    pub ticker: String,

    // PRICE | RSI | MACD | VOLUME | MA_CROSS
    #[serde(rename = "type")]
    pub strategy_type: String,

    // "above" | "below"
    pub condition: String,

    pub threshold: f64,
    pub parameters: serde_json::Value,
    pub raw_description: String,
}

/// Lookup tables driving the parser, kept as data so a deployment can swap
/// the built-in set for its own via `PARSER_TABLES_FILE`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tables {
    // ordered: the first substring match wins
    pub tickers: Vec<(String, String)>,
    pub above_words: Vec<String>,
    pub below_words: Vec<String>,
}

impl Tables {
    pub fn builtin() -> Self {
        let tickers = [
            ("apple", "AAPL"),
            ("aapl", "AAPL"),
            ("tesla", "TSLA"),
            ("tsla", "TSLA"),
            ("microsoft", "MSFT"),
            ("msft", "MSFT"),
            ("google", "GOOGL"),
            ("googl", "GOOGL"),
            ("amazon", "AMZN"),
            ("amzn", "AMZN"),
            ("nvidia", "NVDA"),
            ("nvda", "NVDA"),
            ("meta", "META"),
            ("facebook", "META"),
            ("netflix", "NFLX"),
            ("nflx", "NFLX"),
            ("bitcoin", "BTC-USD"),
            ("btc", "BTC-USD"),
            ("ethereum", "ETH-USD"),
            ("eth", "ETH-USD"),
            ("spy", "SPY"),
            ("qqq", "QQQ"),
            ("s&p", "SPY"),
            ("nasdaq", "QQQ"),
        ];

        let above = ["above", "over", "exceed", "break", "hit", "reaches"];
        let below = ["below", "under", "drop", "fall", "dips"];

        Tables {
            tickers: tickers
                .iter()
                .map(|(n, s)| (n.to_string(), s.to_string()))
                .collect(),
            above_words: above.iter().map(|w| w.to_string()).collect(),
            below_words: below.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    }
}

#[derive(Clone)]
pub struct StrategyParser {
    tables: Tables,
    number: Regex,
}

impl StrategyParser {
    pub fn new(tables: Tables) -> Self {
        StrategyParser {
            tables,
            // currency-aware: optional $, thousands separators, decimals
            number: Regex::new(r"\$?\d+[\d,]*\.?\d*").unwrap(),
        }
    }

    /// Best-effort extraction; never fails. Unknown fields fall back to
    /// UNKNOWN / PRICE / above / 0.0.
    pub fn parse(&self, text: &str) -> ParsedStrategy {
        let lower = text.to_lowercase();

        let mut ticker = "UNKNOWN".to_string();
        for (name, symbol) in &self.tables.tickers {
            if lower.contains(name.as_str()) {
                ticker = symbol.clone();
                break;
            }
        }

        // "above" wins when both keyword classes are present
        let condition = if self
            .tables
            .above_words
            .iter()
            .any(|w| lower.contains(w.as_str()))
        {
            "above"
        } else if self
            .tables
            .below_words
            .iter()
            .any(|w| lower.contains(w.as_str()))
        {
            "below"
        } else {
            "above"
        };

        let threshold = self
            .number
            .find(text)
            .map(|m| m.as_str().replace(['$', ','], ""))
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        let strategy_type = if lower.contains("rsi") {
            "RSI"
        } else if lower.contains("macd") {
            "MACD"
        } else if lower.contains("volume") {
            "VOLUME"
        } else if lower.contains("moving average") || contains_word(&lower, "ma") {
            "MA_CROSS"
        } else {
            "PRICE"
        };

        ParsedStrategy {
            ticker,
            strategy_type: strategy_type.to_string(),
            condition: condition.to_string(),
            threshold,
            parameters: json!({}),
            raw_description: text.to_string(),
        }
    }
}

// "ma" must stand alone; a bare substring check would fire on words like
// "market".
fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}
