/// Public library interface for the habit tracker
///
/// This module exports the habit state machine, the storage backends it runs
/// against, and the CLI and HTTP frontends built on top of them.

use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod controller;

pub mod cli;
pub mod config;
pub mod server;

// Re-export public modules and types
pub use domain::*;
pub use storage::{
    open_store, BoxedStore, FileStore, HabitStore, MemoryStore, SqliteStore, StorageError,
    StoreKind, DUE_DATE_FORMAT,
};
pub use controller::{Controller, NO_HABITS_MESSAGE};

/// Errors that can occur while tracking habits
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Domain(#[from] domain::DomainError),

    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Broad classes of failure, for frontends that map errors to responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty name or unrecognized frequency
    InvalidInput,
    /// A blank habit was handed to a store
    NilInput,
    /// Create raced with another writer
    AlreadyExists,
    /// Update raced with another writer
    NotFound,
    /// I/O, encoding or database failure
    BackendFailure,
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Domain(_) => ErrorKind::InvalidInput,
            TrackerError::Storage(e) => match e {
                StorageError::NilHabit => ErrorKind::NilInput,
                StorageError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
                StorageError::NotFound { .. } => ErrorKind::NotFound,
                StorageError::InvalidLocation(_) => ErrorKind::InvalidInput,
                _ => ErrorKind::BackendFailure,
            },
            TrackerError::Io(_) | TrackerError::Server(_) => ErrorKind::BackendFailure,
        }
    }
}
