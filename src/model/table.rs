
use rustc_hash::FxHashMap;
use tracing::*;

use crate::data::{count_tokens, Count, Token};
use crate::error::{Result, SpamError};

/// Laplace-smoothed natural-log probabilities of the tokens of one sequence.
///
/// A table built from a sequence with `n` tokens and `v` distinct tokens assigns
/// `ln((count + a) / (n + a * (v + 1)))` to each observed token and
/// `ln(a / (n + a * (v + 1)))` to every token it has never seen. The extra `+1`
/// in the denominator is the mass held back for unseen tokens, so the
/// probabilities of all observed tokens plus the unknown mass sum to one.
#[derive( Debug, Clone, PartialEq )]
pub struct LogProbTable {
    entries: FxHashMap<Token, f64>,
    /// log-probability of any token absent from `entries`
    unknown: f64,
    total: Count,
}

/// Accepts only finite smoothing strictly above zero
pub fn validate_smoothing( smoothing: f64 ) -> Result<f64> {
    if smoothing.is_finite() && smoothing > 0.0 {
	Ok( smoothing )
    } else {
	Err( SpamError::InvalidSmoothing( smoothing ))
    }
}

impl LogProbTable {

    /// Counts the tokens and turns the counts into smoothed log-probabilities
    pub fn build<'a, I>( tokens: I, smoothing: f64 ) -> Result<LogProbTable> where
	I: IntoIterator<Item = &'a str>,
    {
	let smoothing = validate_smoothing( smoothing )?;
	let counts = count_tokens( tokens );
	let total: Count = counts.values().sum();
	let vocabulary = counts.len();

	let log_denominator = f64::ln( total as f64 + smoothing * ( vocabulary as f64 + 1.0 ));
	let entries: FxHashMap<Token, f64> = counts.into_iter()
	    .map( |(token, count)| (token.to_string(), f64::ln( count as f64 + smoothing ) - log_denominator ))
	    .collect();
	let unknown = f64::ln( smoothing ) - log_denominator;

	debug!( "built table over {total} tokens ({vocabulary} distinct), unknown log-prob {unknown:.3}" );
	Ok( LogProbTable { entries, unknown, total } )
    }

    /// Log-probability of an observed token
    pub fn get( &self, token: &str ) -> Option<f64> {
	self.entries.get( token ).copied()
    }

    /// Log-probability of the token, or the unknown mass if it was never observed
    pub fn log_prob( &self, token: &str ) -> f64 {
	self.get( token ).unwrap_or( self.unknown )
    }

    pub fn unknown_log_prob( &self ) -> f64 {
	self.unknown
    }

    pub fn contains( &self, token: &str ) -> bool {
	self.entries.contains_key( token )
    }

    /// Number of distinct observed tokens
    pub fn vocabulary_size( &self ) -> usize {
	self.entries.len()
    }

    /// Length of the sequence the table was built from
    pub fn total_tokens( &self ) -> Count {
	self.total
    }

    /// Observed tokens with their log-probabilities, in no particular order
    pub fn iter( &self ) -> impl Iterator<Item = (&str, f64)> + '_ {
	self.entries.iter().map( |(token, log_prob)| (token.as_str(), *log_prob) )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! assert_approx {
	($real:expr, $expected:expr, $delta:expr) => {
	    if $real < $expected - $delta || $real > $expected + $delta {
		panic!( "Violate {:.9} == {:.9} (+-{:.9})", $real, $expected, $delta );
	    }
	}
    }

    fn total_probability( table: &LogProbTable ) -> f64 {
	table.iter().map( |(_, log_prob)| log_prob.exp() ).sum::<f64>() + table.unknown_log_prob().exp()
    }

    #[test]
    /// Check the smoothed values against hand computed fractions
    fn test_smoothed_values() {
	let table = LogProbTable::build( vec!( "a", "b", "a", "c" ), 1.0 ).unwrap();
	// n = 4, v = 3, denominator 4 + 1 * 4
	assert_eq!( table.total_tokens(), 4 );
	assert_eq!( table.vocabulary_size(), 3 );
	assert_approx!( table.log_prob( "a" ), f64::ln( 3.0 / 8.0 ), 1e-12 );
	assert_approx!( table.log_prob( "b" ), f64::ln( 2.0 / 8.0 ), 1e-12 );
	assert_approx!( table.log_prob( "c" ), f64::ln( 2.0 / 8.0 ), 1e-12 );
	assert_approx!( table.unknown_log_prob(), f64::ln( 1.0 / 8.0 ), 1e-12 );
	assert_eq!( table.log_prob( "missing" ), table.unknown_log_prob() );
	assert_eq!( table.get( "missing" ), None );
    }

    #[test]
    /// Observed probabilities plus unknown mass form a distribution
    fn test_probabilities_sum_to_one() {
	let text = "the quick brown fox jumps over the lazy dog the end";
	for smoothing in [ 1e-5, 0.1, 1.0, 7.5 ] {
	    let table = LogProbTable::build( text.split_whitespace(), smoothing ).unwrap();
	    assert_approx!( total_probability( &table ), 1.0, 1e-9 );
	}
    }

    #[test]
    fn test_empty_sequence() {
	let table = LogProbTable::build( std::iter::empty(), 1e-5 ).unwrap();
	assert_eq!( table.vocabulary_size(), 0 );
	assert_eq!( table.total_tokens(), 0 );
	assert_approx!( table.unknown_log_prob(), 0.0, 1e-12 );
	assert_approx!( total_probability( &table ), 1.0, 1e-9 );
    }

    #[test]
    /// Tokens are kept exactly as given
    fn test_no_normalization() {
	let table = LogProbTable::build( vec!( "Free", "free", "free!" ), 1e-5 ).unwrap();
	assert_eq!( table.vocabulary_size(), 3 );
	assert!( table.contains( "Free" ));
	assert!( !table.contains( "FREE" ));
    }

    #[test]
    fn test_invalid_smoothing() {
	for smoothing in [ 0.0, -1.0, f64::NAN, f64::INFINITY ] {
	    match LogProbTable::build( vec!( "a" ), smoothing ) {
		Err( SpamError::InvalidSmoothing( _ ) ) => {},
		other => panic!( "smoothing {smoothing} accepted: {:?}", other ),
	    }
	}
	assert!( validate_smoothing( 1e-300 ).is_ok() );
    }
}
