use leadbook_core::{AgentId, CoreError, TagId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid id string: {0}")]
    InvalidId(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("invalid stored value: {0}")]
    InvalidData(String),
    #[error("sales agent with email {0} already exists")]
    DuplicateEmail(String),
    #[error("sales agent {0} not found")]
    AgentNotFound(AgentId),
    #[error("tag {0} not found")]
    TagNotFound(TagId),
    #[error("sales agent {agent} still owns {leads} lead(s)")]
    AgentInUse { agent: AgentId, leads: i64 },
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    Core,
    MissingHomeDir,
    InvalidId,
    NotFound,
    Migration,
    InvalidDataPath,
    InvalidData,
    DuplicateEmail,
    AgentNotFound,
    TagNotFound,
    AgentInUse,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidId(_) => StoreErrorKind::InvalidId,
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::Migration(_) => StoreErrorKind::Migration,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::InvalidData(_) => StoreErrorKind::InvalidData,
            StoreError::DuplicateEmail(_) => StoreErrorKind::DuplicateEmail,
            StoreError::AgentNotFound(_) => StoreErrorKind::AgentNotFound,
            StoreError::TagNotFound(_) => StoreErrorKind::TagNotFound,
            StoreError::AgentInUse { .. } => StoreErrorKind::AgentInUse,
        }
    }
}
