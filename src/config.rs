use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use crate::data::LabelPolicy;

pub const DEFAULT_SMOOTHING: f64 = 1e-5;

/// Parses the smoothing factor, which must be finite and strictly positive
fn parse_smoothing( s: &str ) -> Result<f64, String> {
    let smoothing: f64 = s.parse().map_err( |_| format!( "'{s}' is not a number" ))?;
    crate::model::validate_smoothing( smoothing ).map_err( |err| err.to_string() )
}

/// Naive Bayes spam filter trained on a labeled message corpus.
///
/// Every line of the corpus starts with the label `ham` or `spam`, followed by the message.
/// Messages to classify are taken from the command line, or one per line from stdin.
#[derive( Parser, Debug, Clone )]
#[command( name = "spamfilter", version )]
pub struct Config {
    /// Labeled training corpus
    #[arg( long, short )]
    pub corpus: PathBuf,

    /// Additive smoothing factor
    #[arg( long, short, default_value_t = DEFAULT_SMOOTHING, value_parser = parse_smoothing )]
    pub smoothing: f64,

    /// How many of the most indicative words of each class to print (0 to skip)
    #[arg( long, short, default_value_t = 5 )]
    pub top: usize,

    /// Treat any label other than `ham` as spam instead of rejecting the corpus
    #[arg( long )]
    pub lenient_labels: bool,

    /// Print the report as JSON
    #[arg( long )]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg( long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"] )]
    pub log_level: String,

    /// Messages to classify
    pub messages: Vec<String>,
}

impl Config {
    pub fn label_policy( &self ) -> LabelPolicy {
	if self.lenient_labels { LabelPolicy::Lenient } else { LabelPolicy::Strict }
    }

    pub fn level_filter( &self ) -> LevelFilter {
	self.log_level.parse().unwrap_or( LevelFilter::WARN )
    }
}
