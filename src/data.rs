
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::*;

use crate::error::Result;
use crate::io::parse_labeled_line;

/// Whitespace-delimited piece of a message, compared exactly as split
pub type Token = String;
pub type TokenSequence = Vec<Token>;
pub type Count = u64;

/// Class a training message belongs to
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub enum Label {
    Ham,
    Spam,
}

/// Decides what happens to lines whose label is neither `ham` nor `spam`
#[derive( Debug, Clone, Copy, PartialEq, Eq, Default )]
pub enum LabelPolicy {
    /// Reject the corpus with a malformed label error
    #[default]
    Strict,
    /// Treat every label other than `ham` as spam
    Lenient,
}

/// Training material: the content tokens of all ham messages and all spam messages.
#[derive( Debug, Clone, Default, PartialEq )]
pub struct Corpus {
    ham: TokenSequence,
    spam: TokenSequence,
    ham_messages: Count,
    spam_messages: Count,
}

impl fmt::Display for Label {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
	match self {
	    Label::Ham => write!( f, "ham" ),
	    Label::Spam => write!( f, "spam" ),
	}
    }
}

impl Label {
    /// Parses the literal label of a corpus line
    pub fn parse( literal: &str, policy: LabelPolicy ) -> Option<Label> {
	match (literal, policy) {
	    ("ham", _) => Some( Label::Ham ),
	    ("spam", _) => Some( Label::Spam ),
	    (_, LabelPolicy::Lenient) => Some( Label::Spam ),
	    (_, LabelPolicy::Strict) => None,
	}
    }
}

impl Corpus {
    pub fn new() -> Corpus {
	Corpus::default()
    }

    /// Builds a corpus directly from the two token sequences.
    pub fn from_tokens<H, S>( ham: H, spam: S ) -> Corpus where
	H: IntoIterator,
	H::Item: Into<Token>,
	S: IntoIterator,
	S::Item: Into<Token>,
    {
	Corpus {
	    ham: ham.into_iter().map( Into::into ).collect(),
	    spam: spam.into_iter().map( Into::into ).collect(),
	    ham_messages: 0,
	    spam_messages: 0,
	}
    }

    /// Parses labeled lines (label first, content after) into a corpus.
    /// Line numbers in errors start at 1.
    pub fn from_lines<I, L>( lines: I, policy: LabelPolicy ) -> Result<Corpus> where
	I: IntoIterator<Item = L>,
	L: AsRef<str>,
    {
	let mut corpus = Corpus::new();
	for (index, line) in lines.into_iter().enumerate() {
	    if let Some( (label, tokens) ) = parse_labeled_line( line.as_ref(), index + 1, policy )? {
		corpus.add_message( label, tokens );
	    }
	}
	debug!( "parsed {} ham and {} spam messages", corpus.ham_messages, corpus.spam_messages );
	Ok( corpus )
    }

    /// Appends the content tokens of one message to its class
    pub fn add_message<I>( &mut self, label: Label, tokens: I ) where
	I: IntoIterator,
	I::Item: Into<Token>,
    {
	let tokens = tokens.into_iter().map( Into::into );
	match label {
	    Label::Ham => {
		self.ham.extend( tokens );
		self.ham_messages += 1;
	    },
	    Label::Spam => {
		self.spam.extend( tokens );
		self.spam_messages += 1;
	    },
	}
    }

    pub fn ham( &self ) -> &[Token] {
	&self.ham
    }

    pub fn spam( &self ) -> &[Token] {
	&self.spam
    }

    pub fn tokens( &self, label: Label ) -> &[Token] {
	match label {
	    Label::Ham => &self.ham,
	    Label::Spam => &self.spam,
	}
    }

    pub fn message_count( &self, label: Label ) -> Count {
	match label {
	    Label::Ham => self.ham_messages,
	    Label::Spam => self.spam_messages,
	}
    }

    /// Number of tokens over both classes
    pub fn len( &self ) -> usize {
	self.ham.len() + self.spam.len()
    }

    pub fn is_empty( &self ) -> bool {
	self.len() == 0
    }

    /// Concatenation of ham and spam tokens
    pub fn iter_all( &self ) -> impl Iterator<Item = &Token> + '_ {
	self.ham.iter().chain( self.spam.iter() )
    }
}

/// Splits a message into tokens on any whitespace. No normalization.
pub fn tokenize( message: &str ) -> impl Iterator<Item = &str> {
    message.split_whitespace()
}

/// Counts occurrences of every distinct token
pub fn count_tokens<'a, I>( tokens: I ) -> FxHashMap<&'a str, Count> where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: FxHashMap<&'a str, Count> = FxHashMap::default();
    for token in tokens {
	*counts.entry( token ).or_insert( 0 ) += 1;
    }
    counts
}
