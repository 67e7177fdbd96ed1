// src/integrations/mod.rs
//
// External Integrations Module
//
// - http: the backend REST client (one per session)
// - player: boundary to the native media runtime

pub mod http;
pub mod player;

pub use http::{ApiTransport, HttpMethod, NetworkError, ReqwestApiClient};
pub use player::{HeadlessRuntime, MediaRuntime, RuntimeStatus};
