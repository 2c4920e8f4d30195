use std::process::ExitCode;

use canva_notifier::config::Config;
use canva_notifier::core::browser::BrowserExtractor;
use canva_notifier::core::normalizer::RelevanceFilter;
use canva_notifier::core::notifier::TelegramNotifier;
use canva_notifier::core::store::EntryStore;
use canva_notifier::core::watcher::Watcher;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filters)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let telegram = match TelegramNotifier::new(&config.telegram) {
        Ok(telegram) => telegram,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let watcher = Watcher::new(
        RelevanceFilter::from_config(&config),
        EntryStore::new(&config.store_path),
        BrowserExtractor::new(&config),
        telegram,
    );

    watcher.run_and_report().await
}
