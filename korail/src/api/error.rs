//! Korail client error types.

/// Errors from the Korail HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum KorailError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {}{}", .message, .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Korail answered with a failure that is not an empty result
    #[error("Korail error {}: {}", .code.as_deref().unwrap_or("?"), .message.as_deref().unwrap_or("no message"))]
    Upstream {
        code: Option<String>,
        message: Option<String>,
        /// The whole response, for diagnostics.
        raw: serde_json::Value,
    },
}

impl KorailError {
    /// Build an `Upstream` error carrying the raw response body.
    pub fn upstream(
        code: Option<String>,
        message: Option<String>,
        raw: serde_json::Value,
    ) -> Self {
        KorailError::Upstream { code, message, raw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = KorailError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = KorailError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));
        assert!(err.to_string().contains("(body: {})"));

        let err = KorailError::upstream(
            Some("ERR000001".into()),
            None,
            serde_json::json!({"strResult": "FAIL"}),
        );
        assert_eq!(err.to_string(), "Korail error ERR000001: no message");
        match err {
            KorailError::Upstream { raw, .. } => assert_eq!(raw["strResult"], "FAIL"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
