use std::collections::HashMap;
use std::time::Duration;

use tokio::time;

use crate::services::{alerts_service, checker, strategies_service};
use crate::AppState;

/// Background variant used by `serve`: the loop lives on a spawned task for
/// the life of the process.
pub fn spawn_alert_monitor(state: AppState) {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(state.settings.check_interval_secs));

        loop {
            interval.tick().await;

            if let Err(e) = run_tick(&state).await {
                tracing::error!("[alert-monitor] tick error: {e}");
            }
        }
    });
}

/// Foreground variant used by the CLI `monitor` command; runs until the
/// process is interrupted.
pub async fn run_loop(state: &AppState, interval_secs: u64) {
    tracing::info!("[alert-monitor] checking every {interval_secs}s, Ctrl+C to stop");

    let mut interval = time::interval(Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        if let Err(e) = run_tick(state).await {
            tracing::error!("[alert-monitor] tick error: {e}");
        }
    }
}

/// One monitoring cycle. Each active strategy is evaluated independently; a
/// strategy with no usable live value this cycle is skipped, not failed.
/// Returns (strategies checked, alerts sent).
pub async fn run_tick(state: &AppState) -> Result<(usize, usize), String> {
    let strategies = strategies_service::list_active(&state.db).await?;

    if strategies.is_empty() {
        return Ok((0, 0));
    }

    // one quote per symbol per tick; strategies on the same ticker share it
    let mut prices: HashMap<String, Option<f64>> = HashMap::new();

    let checked = strategies.len();
    let mut sent = 0usize;

    for s in strategies {
        let live = match s.strategy_type.as_str() {
            "PRICE" => {
                if !prices.contains_key(&s.ticker) {
                    let fetched = state.market.latest_price(&s.ticker).await;
                    prices.insert(s.ticker.clone(), fetched);
                }
                prices.get(&s.ticker).copied().flatten()
            }
            "RSI" => state.market.rsi(&s.ticker, 14).await,
            // nothing to fetch for unimplemented indicators
            _ => None,
        };

        let Some(live) = live else {
            tracing::debug!(
                "[alert-monitor] no usable {} value for {} this cycle, skipping",
                s.strategy_type,
                s.ticker
            );
            continue;
        };

        let (triggered, message) = checker::check(&s, live);
        if !triggered {
            continue;
        }

        let delivered = state
            .mailer
            .send_alert(&s.email, s.phone.as_deref(), &message)
            .await;

        match strategies_service::mark_triggered(&state.db, s.id).await {
            Ok(true) => {}
            // already fired in an earlier cycle
            Ok(false) => continue,
            Err(e) => {
                tracing::warn!("[alert-monitor] mark_triggered({}) failed: {e}", s.id);
                continue;
            }
        }

        if delivered {
            if let Err(e) = alerts_service::log_event(&state.db, s.id, s.user_id, &message).await {
                tracing::warn!("[alert-monitor] log_event({}) failed: {e}", s.id);
            }
        }

        sent += 1;
        tracing::info!("[alert-monitor] ALERT: {message}");
    }

    tracing::info!("[alert-monitor] checked {checked} strategies, {sent} alerts sent");

    Ok((checked, sent))
}
