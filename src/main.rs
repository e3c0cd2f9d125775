use std::env;
use std::process;

use childcare_engine::api::run_http_server;
use childcare_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/kinderopvang_2026";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config_dir = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CONFIG_DIR);
    let addr = args.get(2).map(String::as_str).unwrap_or(DEFAULT_ADDR);

    let config = match ConfigLoader::load(config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {config_dir}: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_http_server(config, addr).await {
        eprintln!("Server error: {e}");
        process::exit(1);
    }
}
