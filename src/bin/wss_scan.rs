use std::io;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use wss_probe::probe::init_logging;
use wss_probe::probe::scan::{candidates, scan};
use wss_probe::ProbeConfig;

const DOMAIN: &str = "ws.7k2v9x1r0z8t4m3n5p7w.com";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ProbeConfig::default()
        .with_connect_timeout(Some(CONNECT_TIMEOUT))
        .browser_like(&format!("https://{}", DOMAIN));

    let mut stdout = io::stdout();
    let results = scan(&config, &candidates(DOMAIN, None), &mut stdout).await?;

    let reachable = results.iter().filter(|r| r.is_success()).count();
    info!(reachable, total = results.len(), "scan finished");
    Ok(())
}
