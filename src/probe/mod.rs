pub mod scan;
pub mod types;
pub mod websocket;


use std::io::{self, Write};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use types::{CloseInfo, ProbeOutcome, ProbeReport};
use websocket::{WebSocketClient, WsStream};

/// Diagnostics go to stderr so stdout only carries the probe's own lines.
pub fn init_logging() {
    // tests call this once each; only the first install takes effect
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}

pub struct Session {
    ws: WsStream,
    peer_close: Option<CloseInfo>,
}

impl Session {
    pub fn new(ws: WsStream) -> Self {
        Self {
            ws,
            peer_close: None,
        }
    }

    pub async fn first_message(&mut self) -> Result<String, ProbeError> {
        while let Some(frame) = self.ws.next().await {
            match frame? {
                Message::Text(text) => return Ok(text),
                Message::Binary(data) => return Ok(String::from_utf8_lossy(&data).into_owned()),
                Message::Close(frame) => {
                    let info = close_info(frame.as_ref());
                    let code = info.code.unwrap_or(u16::from(CloseCode::Status));
                    let reason = format!("code {} {}", code, info.reason).trim_end().to_string();
                    self.peer_close = Some(info);
                    return Err(ProbeError::ClosedByPeer(reason));
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            }
        }
        Err(ProbeError::ClosedByPeer("stream ended".to_string()))
    }

    /// The socket is dropped on return even if the peer never acknowledges.
    pub async fn release(mut self, grace: Duration) -> CloseInfo {
        if let Some(info) = self.peer_close.take() {
            // tungstenite has queued the close reply; polling flushes it
            let _ = tokio::time::timeout(grace, async {
                while self.ws.next().await.is_some() {}
            })
            .await;
            return info;
        }

        let closing = async {
            self.ws
                .send(Message::Close(Some(CloseFrame {
                    code: CloseCode::Normal,
                    reason: "".into(),
                })))
                .await?;
            while let Some(frame) = self.ws.next().await {
                if let Message::Close(frame) = frame? {
                    return Ok(Some(close_info(frame.as_ref())));
                }
            }
            Ok::<_, tungstenite::Error>(None)
        };

        match tokio::time::timeout(grace, closing).await {
            Ok(Ok(Some(info))) => info,
            Ok(Ok(None)) => CloseInfo {
                code: None,
                reason: "stream ended before close reply".to_string(),
            },
            Ok(Err(e)) => {
                debug!(error = %e, "close handshake failed");
                CloseInfo {
                    code: None,
                    reason: e.to_string(),
                }
            }
            Err(_) => CloseInfo {
                code: None,
                reason: "no close frame from peer".to_string(),
            },
        }
    }
}

// A close frame without a payload carries no code; report it as 1005 (no status received).
fn close_info(frame: Option<&CloseFrame<'_>>) -> CloseInfo {
    CloseInfo {
        code: Some(frame.map_or(u16::from(CloseCode::Status), |f| u16::from(f.code))),
        reason: frame.map(|f| f.reason.to_string()).unwrap_or_default(),
    }
}

/// Connection problems become [`ProbeOutcome::Failed`]; only a failing `out`
/// produces an `Err`.
pub async fn run_probe<W: Write>(config: &ProbeConfig, out: &mut W) -> io::Result<ProbeReport> {
    writeln!(out, "Connecting to {}...", config.url)?;

    let connected = match WebSocketClient::from_config(config) {
        Ok(client) => client.connect().await,
        Err(e) => Err(e),
    };
    let ws = match connected {
        Ok(ws) => ws,
        Err(e) => {
            warn!(url = %config.url, error = %e, "connection failed");
            let outcome = ProbeOutcome::Failed(e);
            writeln!(out, "{}", outcome)?;
            return Ok(ProbeReport {
                outcome,
                close: None,
            });
        }
    };

    info!(url = %config.url, "connected");
    writeln!(out, "Connected!")?;

    let mut session = Session::new(ws);
    let outcome = match tokio::time::timeout(config.receive_timeout, session.first_message()).await {
        Ok(Ok(text)) => ProbeOutcome::Received(text),
        Ok(Err(e)) => ProbeOutcome::Failed(e),
        Err(_) => ProbeOutcome::TimedOut(config.receive_timeout),
    };
    writeln!(out, "{}", outcome)?;
    out.flush()?;

    let close = session.release(config.close_timeout).await;
    debug!(outcome = outcome.kind(), code = ?close.code, "probe finished");
    writeln!(out, "{}", close)?;
    out.flush()?;

    Ok(ProbeReport {
        outcome,
        close: Some(close),
    })
}
