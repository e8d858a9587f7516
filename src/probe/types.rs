use std::fmt;
use std::time::Duration;

use crate::error::ProbeError;

#[derive(Debug)]
pub enum ProbeOutcome {
    Received(String),
    TimedOut(Duration),
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeOutcome::Received(_) => "received",
            ProbeOutcome::TimedOut(_) => "timeout",
            ProbeOutcome::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Received(text) => write!(f, "Received message: {}", text),
            ProbeOutcome::TimedOut(waited) => {
                write!(f, "No message received in {}.", human_duration(*waited))
            }
            ProbeOutcome::Failed(e) => write!(f, "Connection failed: {}", e),
        }
    }
}

/// How the connection ended once the probe let go of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: Option<u16>,
    pub reason: String,
}

impl fmt::Display for CloseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "Disconnected. Code: {}, Reason: {}", code, self.reason),
            None => write!(f, "Disconnected. Code: none, Reason: {}", self.reason),
        }
    }
}

#[derive(Debug)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    /// `None` when no connection was ever opened.
    pub close: Option<CloseInfo>,
}

fn human_duration(d: Duration) -> String {
    if d.subsec_nanos() == 0 {
        match d.as_secs() {
            1 => "1 second".to_string(),
            secs => format!("{} seconds", secs),
        }
    } else {
        format!("{:?}", d)
    }
}
