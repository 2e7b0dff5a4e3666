
mod serialize; // summary serialization and pretty printing of the model

use rayon::prelude::*;
use tracing::*;

use crate::data::{count_tokens, tokenize, Label, Token};
use crate::error::{Result, SpamError};
use crate::io::PrettyFormatter;
use crate::{Corpus, Loggable};

use super::*;

pub use serialize::NaiveBayesFormatter;

#[derive( Debug, Clone )]
/// Multinomial Naive Bayes over whitespace tokens with additive smoothing.
/// Immutable once trained.
pub struct NaiveBayes {
    ham: LogProbTable,
    spam: LogProbTable,
    /// table over ham and spam pooled together
    full: LogProbTable,
    p_spam: f64,
    p_ham: f64,
    smoothing: f64,
}

impl Model for NaiveBayes {

    fn score( &self, message: &str ) -> Verdict {
	let mut verdict = Verdict::new( self.p_spam.ln(), self.p_ham.ln() );
	for (token, count) in count_tokens( tokenize( message )) {
	    let count = count as f64;
	    verdict.spam += count * self.spam.log_prob( token );
	    verdict.ham += count * self.ham.log_prob( token );
	}
	trace!( "spam {:.3} ham {:.3} for {message:?}", verdict.spam, verdict.ham );
	verdict
    }
}

impl Loggable for NaiveBayes {
    fn log( &self, message: &str, level: Level ) {
	let summary = NaiveBayesFormatter::new().format_pretty( self );
	if level == Level::ERROR {
	    error!( "{message}{summary}" );
	} else if level == Level::WARN {
	    warn!( "{message}{summary}" );
	} else if level == Level::INFO {
	    info!( "{message}{summary}" );
	} else if level == Level::DEBUG {
	    debug!( "{message}{summary}" );
	} else {
	    trace!( "{message}{summary}" );
	}
    }
}

impl NaiveBayes {

    /// Trains on the ham and spam token sequences.
    ///
    /// Fails if the smoothing is not strictly positive or if both sequences are empty,
    /// since the class priors are undefined without any training tokens.
    pub fn new<S>( ham: &[S], spam: &[S], smoothing: f64 ) -> Result<NaiveBayes> where
	S: AsRef<str> + Sync,
    {
	let smoothing = validate_smoothing( smoothing )?;
	let total = ham.len() + spam.len();
	if total == 0 {
	    return Err( SpamError::EmptyCorpus );
	}

	let build = |tokens: &[S]| LogProbTable::build( tokens.iter().map( AsRef::as_ref ), smoothing );
	let ((ham_table, spam_table), full_table) = rayon::join(
	    || rayon::join( || build( ham ), || build( spam )),
	    || LogProbTable::build( ham.iter().chain( spam.iter() ).map( AsRef::as_ref ), smoothing ),
	);

	let model = NaiveBayes {
	    ham: ham_table?,
	    spam: spam_table?,
	    full: full_table?,
	    p_spam: spam.len() as f64 / total as f64,
	    p_ham: ham.len() as f64 / total as f64,
	    smoothing,
	};
	info!( "trained on {} ham and {} spam tokens (P(spam) = {:.4})", ham.len(), spam.len(), model.p_spam );
	Ok( model )
    }

    /// Trains on a loaded corpus
    pub fn train( corpus: &Corpus, smoothing: f64 ) -> Result<NaiveBayes> {
	NaiveBayes::new( corpus.ham(), corpus.spam(), smoothing )
    }

    /// Classifies many messages at once, in parallel
    pub fn classify_batch<S>( &self, messages: &[S] ) -> Vec<bool> where
	S: AsRef<str> + Sync,
    {
	messages.par_iter()
	    .map( |message| self.classify( message.as_ref() ))
	    .collect()
    }

    /// Scores many messages at once, in parallel. Order is preserved.
    pub fn score_batch<S>( &self, messages: &[S] ) -> Vec<Verdict> where
	S: AsRef<str> + Sync,
    {
	messages.par_iter()
	    .map( |message| self.score( message.as_ref() ))
	    .collect()
    }

    /// The `n` tokens most indicative of the class, with their scores, best first.
    ///
    /// Only tokens observed in both classes are eligible. A token's score is its
    /// log-probability under the class minus its log-probability under the pooled
    /// table. Equal scores are ordered by token. Asking for more tokens than are
    /// eligible is an error.
    pub fn indicative( &self, label: Label, n: usize ) -> Result<Vec<(&str, f64)>> {
	let (target, other) = match label {
	    Label::Spam => (&self.spam, &self.ham),
	    Label::Ham => (&self.ham, &self.spam),
	};
	let mut scored: Vec<(&str, f64)> = target.iter()
	    .filter( |(token, _)| other.contains( token ))
	    .map( |(token, log_prob)| (token, log_prob - self.full.log_prob( token )))
	    .collect();

	if n > scored.len() {
	    return Err( SpamError::InsufficientVocabulary { requested: n, available: scored.len() } );
	}
	scored.sort_unstable_by( |left, right| right.1.total_cmp( &left.1 ).then_with( || left.0.cmp( right.0 )));
	scored.truncate( n );
	Ok( scored )
    }

    pub fn most_indicative_spam( &self, n: usize ) -> Result<Vec<Token>> {
	self.indicative_tokens( Label::Spam, n )
    }

    pub fn most_indicative_ham( &self, n: usize ) -> Result<Vec<Token>> {
	self.indicative_tokens( Label::Ham, n )
    }

    fn indicative_tokens( &self, label: Label, n: usize ) -> Result<Vec<Token>> {
	let ranked = self.indicative( label, n )?;
	Ok( ranked.into_iter().map( |(token, _)| token.to_string() ).collect() )
    }

    /// Number of tokens eligible for ranking: those observed in both classes
    pub fn shared_vocabulary_size( &self ) -> usize {
	self.spam.iter().filter( |(token, _)| self.ham.contains( token )).count()
    }

    pub fn table( &self, label: Label ) -> &LogProbTable {
	match label {
	    Label::Ham => &self.ham,
	    Label::Spam => &self.spam,
	}
    }

    pub fn full_table( &self ) -> &LogProbTable {
	&self.full
    }

    pub fn prior( &self, label: Label ) -> f64 {
	match label {
	    Label::Ham => self.p_ham,
	    Label::Spam => self.p_spam,
	}
    }

    pub fn p_spam( &self ) -> f64 {
	self.p_spam
    }

    pub fn p_ham( &self ) -> f64 {
	self.p_ham
    }

    pub fn smoothing( &self ) -> f64 {
	self.smoothing
    }
}
