pub mod entity;
pub mod invariants;

pub use entity::{LoginCredentials, RegisterCredentials, User};
pub use invariants::{is_valid_email, validate_login, validate_registration, MIN_PASSWORD_LENGTH};
