use thiserror::Error;

/// Failure of a single backend call.
///
/// Kept `Clone + Send` so a result can cross the sync worker channel.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server could not be reached (connect failure, timeout, reset).
    #[error("could not reach server: {0}")]
    Transport(String),

    /// Non-2xx response. `message` is taken from the JSON body when present.
    #[error("server returned HTTP {status}{}", suffix(.message))]
    Application {
        status: u16,
        message: Option<String>,
    },

    #[error("not found{}", suffix(.message))]
    NotFound { message: Option<String> },

    /// 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Text shown to the user: the server's own message when it sent one,
    /// a generic transport notice when the server was unreachable, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach server".to_string(),
            ApiError::Application {
                message: Some(m), ..
            }
            | ApiError::NotFound { message: Some(m) } => m.clone(),
            ApiError::Application { message: None, .. }
            | ApiError::NotFound { message: None }
            | ApiError::Decode(_) => fallback.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub(super) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"message": ..}`, `{"error": ..}` and both shapes of `{"detail": ..}`
/// (a string, or a list of `{"msg": ..}` validation entries).
pub(super) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "detail", "error"] {
        match value.get(key) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                return Some(s.trim().to_string());
            }
            Some(serde_json::Value::Array(items)) => {
                let msgs = items
                    .iter()
                    .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                    .collect::<Vec<_>>();
                if !msgs.is_empty() {
                    return Some(msgs.join("; "));
                }
            }
            _ => {}
        }
    }
    None
}
