use std::env;
use std::fs;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod models;
mod services;
mod utils;

use api::alphavantage::AlphaVantageClient;
use models::request::ChartRequest;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing; RUST_LOG takes over completely when set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stock_charter=debug")),
        )
        .with_target(true)
        .init();

    let api_key = match env::var("ALPHAVANTAGE_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            error!("ALPHAVANTAGE_API_KEY is not set");
            process::exit(1);
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("Usage: stock-charter SYMBOL GRAPH_TYPE SERIES_KIND [START] [END] [OUT_FILE]");
        eprintln!("  GRAPH_TYPE:  line | bar");
        eprintln!("  SERIES_KIND: intraday | daily | weekly | monthly");
        eprintln!("  START/END:   YYYY-MM-DD, pass \"\" to leave a side open");
        process::exit(2);
    }

    let request = ChartRequest {
        symbol: args[0].clone(),
        graph_type: args[1].clone(),
        series_kind: args[2].clone(),
        start_date: args.get(3).cloned(),
        end_date: args.get(4).cloned(),
    };
    let out_file = args
        .get(5)
        .cloned()
        .unwrap_or_else(|| "chart.svg".to_string());

    let client = AlphaVantageClient::new(api_key);
    match commands::handle_chart_request(&client, &request).await {
        Ok(svg) => {
            if let Err(e) = fs::write(&out_file, svg) {
                error!("Failed to write {}: {}", out_file, e);
                process::exit(1);
            }
            info!("Chart written to {}", out_file);
        }
        Err(err) => {
            error!("Chart request failed: {}", err);
            eprintln!("{}", err.user_message());
            process::exit(1);
        }
    }
}
