use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct MarketClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl MarketClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        MarketClient {
            http: Client::new(),
            base_url,
            api_key,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn quote(&self, symbol: &str) -> Result<QuoteResponse, String> {
        if !self.has_key() {
            return Err("MARKET_API_KEY is missing in .env".to_string());
        }

        let url = format!("{}/quote", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(&[("symbol", symbol), ("token", &self.api_key)])
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("quote fetch failed: {status} {body}"));
        }

        res.json::<QuoteResponse>().await.map_err(|e| e.to_string())
    }

    /// Latest price, or None when the feed had no usable data this cycle.
    pub async fn latest_price(&self, symbol: &str) -> Option<f64> {
        match self.quote(symbol).await {
            Ok(q) if q.c.is_finite() && q.c > 0.0 => Some(q.c),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("error fetching {symbol}: {e}");
                None
            }
        }
    }

    /// RSI placeholder. A real computation needs a candle history source;
    /// until one is wired in, this returns the constant the rest of the
    /// pipeline was built against.
    // TODO: compute RSI from historical closes once a candle endpoint exists
    pub async fn rsi(&self, _symbol: &str, _period: u32) -> Option<f64> {
        Some(45.0)
    }

    /// Moving-average placeholder: discounts the live price instead of
    /// averaging a window.
    pub async fn moving_average(&self, symbol: &str, _period: u32) -> Option<f64> {
        self.latest_price(symbol).await.map(|p| p * 0.98)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct QuoteResponse {
    // current
    pub c: f64,
    // change
    pub d: f64,
    // percent change
    pub dp: f64,
    // high
    pub h: f64,
    // low
    pub l: f64,
    // open
    pub o: f64,
    // previous close
    pub pc: f64,
    // timestamp
    pub t: i64,
}
