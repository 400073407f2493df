use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("permit number must not be empty")]
    EmptyPermitNumber,
    #[error("unit number must not be empty")]
    EmptyUnitNumber,
    #[error("confidence score {0} is outside 0.0..=1.0")]
    ScoreOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, ModelError>;
