pub mod browser;
pub mod detector;
pub mod html_parser;
pub mod normalizer;
pub mod notifier;
pub mod store;
pub mod watcher;
