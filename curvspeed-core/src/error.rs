use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Segment #{index} of corridor '{corridor_key}' has no geometry")]
    MissingGeometry { index: usize, corridor_key: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
