//! Library entrypoint for StratAlerts.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod models;
pub mod parser;

pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub settings: config::Settings,
    pub parser: parser::StrategyParser,
    pub market: services::market::MarketClient,
    pub mailer: services::mailer::Mailer,
}
