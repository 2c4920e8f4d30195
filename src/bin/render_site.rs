use std::env;
use std::path::PathBuf;

use anyhow::Context;
use canva_notifier::site::nav::{self, Route};
use canva_notifier::site::notices;
use log::info;

/// Prints header, notices board and footer for one page of the class site.
///
/// Usage: `render-site <notices.json> [active-route]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();

    let mut args = env::args().skip(1);
    let path = PathBuf::from(args.next().context("usage: render-site <notices.json> [active-route]")?);
    let active = Route::from_key(args.next().as_deref().unwrap_or("avisos"));

    let notices = notices::load_notices(&path)
        .await
        .with_context(|| format!("failed to load notices from {}", path.display()))?;
    info!("Loaded {} notices from {}", notices.len(), path.display());

    println!("{}", nav::render_header(active));
    println!("{}", notices::render_notice_board(&notices));
    println!("{}", nav::render_footer());
    Ok(())
}
