use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum NetworkError {
    // Construction errors
    InvalidLayerConfiguration(String),
    EmptyNetwork,

    // Propagation errors
    DimensionMismatch(String),

    // Training-call errors
    InvalidArgument(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NetworkError::InvalidLayerConfiguration(msg) => {
                write!(f, "Invalid layer configuration: {}", msg)
            }
            NetworkError::EmptyNetwork => write!(f, "Network has no layers"),
            NetworkError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            NetworkError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl Error for NetworkError {}

pub type Result<T> = std::result::Result<T, NetworkError>;
