/// Errors raised at the JSON boundary; the layout itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    #[error("invalid radar input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// A config value is outside the range the layout can handle.
    #[error("invalid radar config: {field} {reason} (got {value})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("failed to encode radar output: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RadarError>;
