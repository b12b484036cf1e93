pub mod core;
pub mod error;
pub mod models;
pub mod prelude;

// Re-export types
pub use crate::core::{Activation, Dense, Layer};
pub use crate::error::{NetworkError, Result};
pub use crate::models::Network;
