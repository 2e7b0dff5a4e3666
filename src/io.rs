use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufRead, Write};

use serde::Serialize;
use tracing::*;

use crate::data::{Corpus, Label, LabelPolicy, Token};
use crate::error::{Result, SpamError};
use crate::model::{NaiveBayes, Verdict};

/// Converts a structure into a string
pub trait PrettyFormatter<T> {
    fn format_pretty( &self, object: &T ) -> String;
}

/// Splits a corpus line into its label and content tokens. Blank lines yield `None`.
pub fn parse_labeled_line( line: &str, line_number: usize, policy: LabelPolicy ) -> Result<Option<(Label, Vec<&str>)>> {
    let mut chunks = line.split_whitespace();
    let literal = match chunks.next() {
	Some( literal ) => literal,
	None => return Ok( None ),
    };
    let label = Label::parse( literal, policy )
	.ok_or_else( || SpamError::MalformedLabel { line: line_number, label: literal.to_string() } )?;
    if label == Label::Spam && literal != "spam" {
	warn!( "line {line_number}: treating label {literal:?} as spam" );
    }
    Ok( Some( (label, chunks.collect()) ))
}

/// Reads a labeled corpus file, one message per line.
pub fn read_corpus<P: AsRef<Path>>( path: P, policy: LabelPolicy ) -> Result<Corpus> {
    let path = path.as_ref();
    let io_error = |source| SpamError::Io { path: path.to_path_buf(), source };
    let file = File::open( path ).map_err( io_error )?;
    let reader = BufReader::new( file );

    let mut corpus = Corpus::new();
    for (index, line) in reader.lines().enumerate() {
	let line = line.map_err( io_error )?;
	if let Some( (label, tokens) ) = parse_labeled_line( &line, index + 1, policy )? {
	    corpus.add_message( label, tokens );
	}
    }
    info!( "loaded {}: {} ham messages ({} tokens), {} spam messages ({} tokens)",
	   path.display(),
	   corpus.message_count( Label::Ham ), corpus.ham().len(),
	   corpus.message_count( Label::Spam ), corpus.spam().len() );
    Ok( corpus )
}

/// Classification outcome of a single message as it is reported
#[derive( Debug, Serialize )]
pub struct MessageReport<'a> {
    pub message: &'a str,
    pub spam: bool,
    pub margin: f64,
}

/// Everything one run of the filter prints
#[derive( Debug, Serialize, Default )]
pub struct Report<'a> {
    /// Summary of the trained model, only part of JSON output
    #[serde( skip_serializing_if = "Option::is_none" )]
    pub model: Option<&'a NaiveBayes>,
    #[serde( skip_serializing_if = "Vec::is_empty" )]
    pub most_indicative_spam: Vec<Token>,
    #[serde( skip_serializing_if = "Vec::is_empty" )]
    pub most_indicative_ham: Vec<Token>,
    pub verdicts: Vec<MessageReport<'a>>,
}

impl<'a> Report<'a> {
    pub fn add_verdict( &mut self, message: &'a str, verdict: &Verdict ) {
	self.verdicts.push( MessageReport {
	    message,
	    spam: verdict.is_spam(),
	    margin: verdict.margin(),
	});
    }
}

/// Writes the report as human readable lines
pub fn write_text<W: Write>( report: &Report, out: &mut W ) -> Result<()> {
    if !report.most_indicative_spam.is_empty() {
	writeln!( out, "Words most indicative of spam: {}", report.most_indicative_spam.join( " " ))?;
    }
    if !report.most_indicative_ham.is_empty() {
	writeln!( out, "Words most indicative of ham: {}", report.most_indicative_ham.join( " " ))?;
    }
    for verdict in &report.verdicts {
	let class = if verdict.spam { "spam" } else { "ham" };
	writeln!( out, "{class}\t{:+.3}\t{}", verdict.margin, verdict.message )?;
    }
    Ok( () )
}

/// Writes the report as a single JSON document
pub fn write_json<W: Write>( report: &Report, out: &mut W ) -> Result<()> {
    serde_json::to_writer_pretty( &mut *out, report )?;
    writeln!( out )?;
    Ok( () )
}
