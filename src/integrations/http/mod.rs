pub mod client;
pub mod error;

pub use client::{ApiTransport, HttpMethod, ReqwestApiClient};
pub use error::NetworkError;
