use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArmError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{}", api_message(.status, .code, .message))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("request signing failed: {0}")]
    Signing(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn api_message(status: &u16, code: &Option<String>, message: &str) -> String {
    match code {
        Some(code) => format!("API error {status} ({code}): {message}"),
        None => format!("API error {status}: {message}"),
    }
}
