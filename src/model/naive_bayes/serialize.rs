use serde::Serialize;

use crate::data::{Count, Label};
use crate::io::PrettyFormatter;

use super::NaiveBayes;

pub struct NaiveBayesFormatter {
    show_indicative: usize,
}

/// Serialized view of a trained model: its parameters, not its tables
#[derive( Serialize )]
struct ModelSummary {
    smoothing: f64,
    p_spam: f64,
    p_ham: f64,
    ham: TableSummary,
    spam: TableSummary,
    full: TableSummary,
    shared_vocabulary: usize,
}

#[derive( Serialize )]
struct TableSummary {
    tokens: Count,
    vocabulary: usize,
    unknown_log_prob: f64,
}

impl PrettyFormatter<NaiveBayes> for NaiveBayesFormatter {

    fn format_pretty( &self, model: &NaiveBayes ) -> String {
	let mut output = String::new();
	output.push( '\n' ); // so output begins on a new line
	output = join_lines( output, format!( "smoothing: {}", model.smoothing() ));
	output = join_lines( output, format!( "P(spam) = {:.4}  P(ham) = {:.4}", model.p_spam(), model.p_ham() ));
	for label in [ Label::Spam, Label::Ham ] {
	    let table = model.table( label );
	    output = join_lines( output, format!( "{label}: {} tokens, {} distinct", table.total_tokens(), table.vocabulary_size() ));
	}

	if self.show_indicative > 0 {
	    let available = model.shared_vocabulary_size();
	    let n = self.show_indicative.min( available );
	    for label in [ Label::Spam, Label::Ham ] {
		let ranked = model.indicative( label, n ).unwrap_or_default();
		output = ranked.iter()
		    .map( |(token, score)| format!( "  {label} {score:+.3} {token}" ))
		    .fold( output, join_lines );
	    }
	}
	output
    }
}

impl Serialize for NaiveBayes {
    fn serialize<S>( &self, serializer: S ) -> Result<S::Ok, S::Error> where S: serde::Serializer {
	let summarize = |label: Option<Label>| {
	    let table = label.map_or( self.full_table(), |label| self.table( label ));
	    TableSummary {
		tokens: table.total_tokens(),
		vocabulary: table.vocabulary_size(),
		unknown_log_prob: table.unknown_log_prob(),
	    }
	};
	ModelSummary {
	    smoothing: self.smoothing(),
	    p_spam: self.p_spam(),
	    p_ham: self.p_ham(),
	    ham: summarize( Some( Label::Ham )),
	    spam: summarize( Some( Label::Spam )),
	    full: summarize( None ),
	    shared_vocabulary: self.shared_vocabulary_size(),
	}.serialize( serializer )
    }
}

fn join_lines( mut accumulator: String, addition: String ) -> String {
    accumulator.push_str( addition.as_str() );
    accumulator.push( '\n' );
    accumulator
}

impl NaiveBayesFormatter {
    pub fn new() -> NaiveBayesFormatter {
	NaiveBayesFormatter{
	    show_indicative: 0,
	}
    }

    /// Also lists the `n` most indicative tokens of each class (fewer if the vocabulary is smaller)
    pub fn show_indicative( &mut self, n: usize ) { self.show_indicative = n; }
}

impl Default for NaiveBayesFormatter {
    fn default() -> Self {
	NaiveBayesFormatter::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn model() -> NaiveBayes {
	NaiveBayes::new( &[ "a", "a", "b", "c" ], &[ "a", "b", "b", "b", "d" ], 1e-5 ).unwrap()
    }

    #[test]
    fn test_format_pretty() {
	let mut formatter = NaiveBayesFormatter::new();
	let plain = formatter.format_pretty( &model() );
	assert!( plain.starts_with( '\n' ));
	assert!( plain.contains( "P(spam) = 0.5556  P(ham) = 0.4444" ));
	assert!( plain.contains( "spam: 5 tokens, 3 distinct" ));
	assert!( plain.contains( "ham: 4 tokens, 3 distinct" ));
	assert!( !plain.contains( "  spam " ));

	// more than the two shared tokens are requested
	formatter.show_indicative( 5 );
	let ranked = formatter.format_pretty( &model() );
	assert_eq!( ranked.lines().filter( |line| line.starts_with( "  spam" )).count(), 2 );
	assert!( ranked.contains( "  ham +0.405 a" ));
    }

    #[test]
    fn test_serialize_summary() {
	let value = serde_json::to_value( model() ).unwrap();
	assert_eq!( value[ "spam" ][ "tokens" ], 5 );
	assert_eq!( value[ "ham" ][ "vocabulary" ], 3 );
	assert_eq!( value[ "full" ][ "vocabulary" ], 4 );
	assert_eq!( value[ "shared_vocabulary" ], 2 );
	assert_eq!( value[ "smoothing" ], 1e-5 );
    }
}
