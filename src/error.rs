#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("noise synthesis failed: {0}")]
    NoiseSynthesis(String),

    #[error("no island has room for the starting settlement")]
    StartSiteNotFound,

    #[error("map generation gave up after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Transient errors are recovered by discarding the attempt and generating again.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Error::StartSiteNotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
