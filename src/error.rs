use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] curvspeed_core::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(#[from] geojson::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Invalid settings file: {0}")]
    SettingsError(#[from] toml::de::Error),
    #[error("Failed to start worker pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
    #[error("Feature #{index}: {message}")]
    InvalidFeature { index: usize, message: String },
}

impl CliError {
    pub(crate) fn feature(index: usize, message: impl Into<String>) -> Self {
        CliError::InvalidFeature {
            index,
            message: message.into(),
        }
    }
}
