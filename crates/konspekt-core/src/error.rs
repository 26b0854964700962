use thiserror::Error;

#[derive(Error, Debug)]
pub enum KonspektError {
    #[error("Storage read failed for {key}: {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Storage write failed for {key}: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Invalid concept key: {raw}")]
    InvalidConceptKey { raw: String },
}

pub type Result<T> = std::result::Result<T, KonspektError>;
