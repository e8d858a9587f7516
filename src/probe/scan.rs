use std::io::{self, Write};

use tracing::{info, warn};

use super::websocket::WebSocketClient;
use super::Session;
use crate::config::ProbeConfig;
use crate::error::ProbeError;

const DISPLAY_URL_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub url: String,
}

impl Candidate {
    pub fn new(name: &str, url: String) -> Self {
        Self {
            name: name.to_string(),
            url,
        }
    }
}

#[derive(Debug)]
pub enum ScanStatus {
    Connected,
    Failed(ProbeError),
}

#[derive(Debug)]
pub struct ScanResult {
    pub name: String,
    pub url: String,
    pub status: ScanStatus,
}

impl ScanResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ScanStatus::Connected)
    }
}

/// The usual places a websocket endpoint hides behind a domain.
pub fn candidates(domain: &str, query: Option<&str>) -> Vec<Candidate> {
    let with_query = |base: String| match query {
        Some(q) if !q.is_empty() => {
            let sep = if base.contains('?') { '&' } else { '?' };
            format!("{}{}{}", base, sep, q)
        }
        _ => base,
    };

    vec![
        Candidate::new("Direct", with_query(format!("wss://{}/", domain))),
        Candidate::new(
            "SocketIO",
            with_query(format!("wss://{}/socket.io/?EIO=4&transport=websocket", domain)),
        ),
        Candidate::new("WS Path", with_query(format!("wss://{}/ws/", domain))),
        Candidate::new("Api Path", with_query(format!("wss://{}/api/ws/", domain))),
    ]
}

async fn try_candidate(base: &ProbeConfig, candidate: &Candidate) -> Result<(), ProbeError> {
    let config = base.clone().with_url(&candidate.url);
    let ws = WebSocketClient::from_config(&config)?.connect().await?;
    Session::new(ws).release(config.close_timeout).await;
    Ok(())
}

/// Tries each candidate in order, one connection at a time. A failing
/// candidate never stops the scan.
pub async fn scan<W: Write>(
    base: &ProbeConfig,
    candidates: &[Candidate],
    out: &mut W,
) -> io::Result<Vec<ScanResult>> {
    let mut results = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let shown: String = candidate.url.chars().take(DISPLAY_URL_CHARS).collect();
        writeln!(out, "Testing {}: {}...", candidate.name, shown)?;

        let status = match try_candidate(base, candidate).await {
            Ok(()) => {
                info!(candidate = %candidate.name, "candidate accepted connection");
                writeln!(out, "[SUCCESS] Connected to {}!", candidate.name)?;
                ScanStatus::Connected
            }
            Err(e) => {
                warn!(candidate = %candidate.name, error = %e, "candidate failed");
                writeln!(out, "[FAILED] {}: {}", candidate.name, e)?;
                ScanStatus::Failed(e)
            }
        };

        results.push(ScanResult {
            name: candidate.name.clone(),
            url: candidate.url.clone(),
            status,
        });
    }

    out.flush()?;
    Ok(results)
}
