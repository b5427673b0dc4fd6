use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[cfg(feature = "serde")]
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}
