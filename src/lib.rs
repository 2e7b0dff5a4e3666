
pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod model;

pub use config::Config;
pub use data::{Corpus, Count, Label, LabelPolicy, Token, TokenSequence};
pub use error::{Result, SpamError};
pub use model::{Model, NaiveBayes, Verdict};

/// Objects that can be recorded in the log
pub trait Loggable {
    fn log(&self, message: &str, level: tracing::Level );
}
