use std::time::Duration;

use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;
use url::Url;

use crate::config::ProbeConfig;
use crate::error::ProbeError;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct WebSocketClient {
    url: Url,
    headers: Vec<(String, String)>,
    connect_timeout: Option<Duration>,
}

impl WebSocketClient {
    pub fn new(url: &str) -> Result<Self, ProbeError> {
        let url = Url::parse(url)?;
        match url.scheme() {
            "ws" | "wss" => {}
            other => return Err(ProbeError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            url,
            headers: Vec::new(),
            connect_timeout: None,
        })
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let mut client = Self::new(&config.url)?;
        client.headers = config.headers.clone();
        client.connect_timeout = config.connect_timeout;
        Ok(client)
    }

    pub async fn connect(&self) -> Result<WsStream, ProbeError> {
        let mut request = self.url.as_str().into_client_request()?;
        for (name, value) in &self.headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ProbeError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ProbeError::InvalidHeader(name.clone()))?;
            request.headers_mut().insert(header, value);
        }

        let handshake = connect_async(request);
        let (ws_stream, response) = match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, handshake)
                .await
                .map_err(|_| ProbeError::ConnectTimeout(limit))??,
            None => handshake.await?,
        };

        debug!(url = %self.url, status = %response.status(), "websocket handshake complete");
        Ok(ws_stream)
    }
}
