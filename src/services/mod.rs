pub mod db_init;
pub mod mailer;
pub mod market;

pub mod alert_monitor;
pub mod checker;

pub mod alerts_service;
pub mod strategies_service;
pub mod user_service;
