// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - Explicit SQL only

pub mod credential_repository;

pub use credential_repository::{
    CredentialEntry, CredentialRecord, CredentialStore, SqliteCredentialStore,
};

#[cfg(test)]
pub use credential_repository::MockCredentialStore;
