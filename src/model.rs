use serde::Serialize;

mod naive_bayes;
mod table;

pub use naive_bayes::{NaiveBayes, NaiveBayesFormatter};
pub use table::{LogProbTable, validate_smoothing};

/// Scores messages against the spam and ham classes
pub trait Model {
    /// Computes the log joint probability of the message under both classes
    fn score( &self, message: &str ) -> Verdict;

    /// True iff the message is strictly more likely to be spam than ham
    fn classify( &self, message: &str ) -> bool {
	self.score( message ).is_spam()
    }
}

/// Both class accumulators for one message.
#[derive( Debug, Clone, Copy, PartialEq, Serialize )]
pub struct Verdict {
    /// ln P(spam) + sum of the message's token log-likelihoods under spam
    pub spam: f64,
    /// same for ham
    pub ham: f64,
}

impl Verdict {
    pub fn new( spam: f64, ham: f64 ) -> Verdict {
	Verdict { spam, ham }
    }

    /// Log-odds of spam over ham; positive means spam
    pub fn margin( &self ) -> f64 {
	self.spam - self.ham
    }

    /// Ties are not spam
    pub fn is_spam( &self ) -> bool {
	self.spam > self.ham
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_verdict_ties_are_ham() {
	assert!( !Verdict::new( -2.0, -2.0 ).is_spam() );
	assert!( Verdict::new( -1.5, -2.0 ).is_spam() );
	assert_eq!( Verdict::new( -1.5, -2.0 ).margin(), 0.5 );
	assert!( !Verdict::new( f64::NEG_INFINITY, -2.0 ).is_spam() );
    }
}
