use std::time::Duration;

use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Connect timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("Unexpected response {status}")]
    UnexpectedResponse { status: u16 },

    #[error("Websocket error: {0}")]
    Transport(String),

    #[error("Connection closed by peer: {0}")]
    ClosedByPeer(String),
}

impl From<tungstenite::Error> for ProbeError {
    fn from(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::Http(response) => ProbeError::UnexpectedResponse {
                status: response.status().as_u16(),
            },
            tungstenite::Error::Url(e) => ProbeError::InvalidUrl(e.to_string()),
            tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
                ProbeError::ClosedByPeer("connection already closed".to_string())
            }
            other => ProbeError::Transport(other.to_string()),
        }
    }
}

impl From<url::ParseError> for ProbeError {
    fn from(err: url::ParseError) -> Self {
        ProbeError::InvalidUrl(err.to_string())
    }
}
