use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePoolOptions;

use stratalerts::services::{alert_monitor, db_init, market, mailer, strategies_service, user_service};
use stratalerts::{AppState, config, parser, routes};

#[derive(Parser)]
#[command(name = "stratalerts", about = "Plain-English trading alerts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API with the alert monitor in the background
    Serve,
    /// Parse a strategy description and store it
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Run the monitoring loop in the foreground
    Monitor {
        /// Seconds between cycles (defaults to CHECK_INTERVAL_SECS)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Print user, strategy and alert counts
    Stats,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let db = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await
        .expect("Failed to open the database");

    db_init::ensure_schema(&db)
        .await
        .expect("Failed to initialize the schema");

    let tables = match settings.parser_tables_file.as_deref() {
        Some(path) => parser::Tables::from_file(path).expect("Failed to load parser tables"),
        None => parser::Tables::builtin(),
    };

    let state = AppState {
        db,
        parser: parser::StrategyParser::new(tables),
        market: market::MarketClient::new(
            settings.market_base_url.clone(),
            settings.market_api_key.clone(),
        ),
        mailer: mailer::Mailer::new(&settings),
        settings,
    };

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state).await,
        Command::Add { email, text, phone } => {
            add_strategy(&state, &email, &text, phone.as_deref()).await
        }
        Command::Monitor { interval } => {
            let interval = interval.unwrap_or(state.settings.check_interval_secs);
            alert_monitor::run_loop(&state, interval).await;
        }
        Command::Stats => print_stats(&state).await,
    }
}

async fn serve(state: AppState) {
    alert_monitor::spawn_alert_monitor(state.clone());

    let addr = SocketAddr::from((
        state.settings.host.parse::<std::net::IpAddr>().unwrap(),
        state.settings.port,
    ));

    let app = routes::app(state);

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn add_strategy(state: &AppState, email: &str, text: &str, phone: Option<&str>) {
    let user_id = user_service::add_user(&state.db, email, phone)
        .await
        .expect("Failed to store the user");

    let parsed = state.parser.parse(text);

    let strategy_id = strategies_service::create_strategy(&state.db, user_id, &parsed)
        .await
        .expect("Failed to store the strategy");

    println!(
        "Added strategy #{strategy_id} for {email}: {} {} {} {}",
        parsed.ticker, parsed.strategy_type, parsed.condition, parsed.threshold
    );
}

async fn print_stats(state: &AppState) {
    let stats = strategies_service::stats(&state.db)
        .await
        .expect("Failed to read statistics");

    println!("Total users: {}", stats.users);
    println!("Active strategies: {}", stats.active_strategies);
    println!("Total alerts sent: {}", stats.alerts_sent);
}
