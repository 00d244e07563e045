use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("download engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
}
