use std::path::PathBuf;

use thiserror::Error;

#[derive( Error, Debug )]
pub enum SpamError {
    /// Smoothing must be a finite value strictly greater than zero
    #[error( "smoothing must be finite and positive, got {0}" )]
    InvalidSmoothing( f64 ),

    /// Neither class contributed a single token, so there are no priors
    #[error( "cannot train on an empty corpus: both ham and spam are empty" )]
    EmptyCorpus,

    #[error( "requested {requested} indicative tokens but only {available} are shared by both classes" )]
    InsufficientVocabulary { requested: usize, available: usize },

    #[error( "line {line}: unknown label {label:?} (expected \"ham\" or \"spam\")" )]
    MalformedLabel { line: usize, label: String },

    #[error( "cannot read {}: {source}", path.display() )]
    Io {
	path: PathBuf,
	#[source]
	source: std::io::Error,
    },

    #[error( "I/O error on standard streams: {0}" )]
    Stdio( #[from] std::io::Error ),

    #[error( "JSON error: {0}" )]
    Json( #[from] serde_json::Error ),
}

pub type Result<T> = std::result::Result<T, SpamError>;
