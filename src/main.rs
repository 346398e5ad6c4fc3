use std::env;
use tindie_orders::config::Config;
use tindie_orders::domain::ShippedFilter;
use tindie_orders::tindie::{self, Client, ClientError};
use tracing::{Level, debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// What the binary should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Latest,
    Stats,
    All,
}

fn parse_config_path() -> String {
    for arg in env::args().skip(1) {
        if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    DEFAULT_CONFIG_PATH.to_string()
}

fn parse_command() -> Command {
    if env::args().any(|arg| arg == "--latest") {
        Command::Latest
    } else if env::args().any(|arg| arg == "--all") {
        Command::All
    } else {
        Command::Stats
    }
}

fn parse_shipped_filter() -> tindie::Result<ShippedFilter> {
    match env::args()
        .skip(1)
        .find_map(|arg| arg.strip_prefix("--shipped=").map(str::to_string))
    {
        Some(value) => value.parse().map_err(ClientError::from),
        None => Ok(ShippedFilter::Any),
    }
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("warning") => Level::WARN,
        Some(name) => name.parse().unwrap_or(Level::INFO),
        None => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() {
    let config_path = parse_config_path();
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return;
        }
    };

    init_tracing(config.app.log_level.as_deref());

    let filter = match parse_shipped_filter() {
        Ok(f) => f,
        Err(e) => {
            error!(error = %e, "Invalid arguments");
            return;
        }
    };

    let mut client = match Client::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to create client");
            return;
        }
    };

    info!(config = %config_path, app = %config.app.name, "Client initialized");

    match parse_command() {
        Command::Latest => report_latest(&mut client).await,
        Command::Stats => report_stats(&mut client, config.stats.limit).await,
        Command::All => report_all(&client, filter).await,
    }

    debug!(requests = client.request_count(), "Done");
}

async fn report_latest(client: &mut Client) {
    match client.latest_order().await {
        Ok(Some(order)) => info!(
            number = ?order.number,
            date = %order.date,
            shipped = order.shipped,
            items = order.item_count(),
            payout = ?order.seller_payout.as_ref().map(|a| a.to_string()),
            "Latest order\n{}",
            order.address_block
        ),
        Ok(None) => info!("No orders yet"),
        Err(e) => error!(error = %e, "Failed to get latest order"),
    }
}

async fn report_stats(client: &mut Client, limit: usize) {
    match client.summary(limit).await {
        Ok(summary) => info!(
            latest_order = ?summary.latest_order,
            sample_size = summary.sample_size,
            average_revenue = %summary.average_revenue.round_dp(2),
            average_shipping = %summary.average_shipping.round_dp(2),
            average_interval_hours = ?summary
                .average_interval
                .map(|gap| gap.num_minutes() as f64 / 60.0),
            "Order statistics"
        ),
        Err(e) => error!(error = %e, "Failed to compute order statistics"),
    }
}

async fn report_all(client: &Client, filter: ShippedFilter) {
    match client.fetch_all(filter).await {
        Ok(orders) => {
            for order in &orders {
                debug!(
                    number = ?order.number,
                    date = %order.date,
                    shipped = order.shipped,
                    refunded = order.refunded,
                    tracking = ?order.tracking_code,
                    "order"
                );
            }
            info!(shipped = %filter, orders = orders.len(), "Order history received");
        }
        Err(e) => error!(error = %e, "Failed to fetch order history"),
    }
}
