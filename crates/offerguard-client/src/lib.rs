//! Transport layer: single-attempt HTTP calls to the analysis service.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{AnalysisClient, ClientConfig, ClientError, DEFAULT_BASE_URL};
