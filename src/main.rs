//! leitstand - home-automation pages on an MCDU-style character display
//!
//! Loads a panel config, renders the requested page, and draws it to the
//! terminal through the preview publisher. `--follow` keeps re-rendering
//! once a minute so the status-bar clock stays current.
//!
//! Usage: leitstand [config.json] [page-id] [--follow]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use leitstand::adapter::StaticAdapter;
use leitstand::config::PanelConfig;
use leitstand::display::TerminalPublisher;
use leitstand::render::PageRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("leitstand=info".parse()?),
        )
        .init();

    let mut config_path = "leitstand.json".to_string();
    let mut page_id: Option<String> = None;
    let mut follow = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--follow" => follow = true,
            _ if arg.ends_with(".json") => config_path = arg,
            _ => page_id = Some(arg),
        }
    }

    let config = PanelConfig::load(&config_path)?;
    let adapter = Arc::new(StaticAdapter::new(config));

    let page_id = page_id
        .or_else(|| adapter.first_page_id().map(String::from))
        .context("no page id given and no pages configured")?;
    info!("rendering page '{}'", page_id);

    let publisher = Arc::new(TerminalPublisher::new());
    let mut renderer = PageRenderer::new(adapter, publisher);

    renderer.render_page(&page_id).await?;
    while follow {
        tokio::time::sleep(Duration::from_secs(60)).await;
        renderer.render_page(&page_id).await?;
    }

    Ok(())
}
