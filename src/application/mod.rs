// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the presentation layer and the services
// - Wires the object graph once (AppState)
// - Translates domain values into DTOs and errors into ErrorResponse

pub mod dto;
pub mod error_handling;
pub mod state;

pub use dto::{DashboardSection, DashboardView, MovieCardDto, SessionDto};
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
