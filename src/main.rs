
use std::io::{stdin, stdout, BufRead, Write};

use clap::Parser;
use tracing::*;

use spamfilter::{Config, Loggable, NaiveBayes};
use spamfilter::io::{read_corpus, write_json, write_text, Report};

fn main() -> Result<(), String> {
    let config = Config::parse();
    prepare_logging( &config );

    run( &config ).map_err( |err| err.to_string() )
}

fn run( config: &Config ) -> spamfilter::Result<()> {
    let model = {
	let corpus = read_corpus( &config.corpus, config.label_policy() )?;
	NaiveBayes::train( &corpus, config.smoothing )?
    };
    model.log( "trained model", Level::DEBUG );

    let messages: Vec<String> = if config.messages.is_empty() {
	debug!( "reading messages from stdin" );
	stdin().lock().lines().collect::<std::io::Result<_>>()?
    } else {
	config.messages.clone()
    };

    let mut report = Report::default();
    if config.top > 0 {
	report.most_indicative_spam = model.most_indicative_spam( config.top )?;
	report.most_indicative_ham = model.most_indicative_ham( config.top )?;
    }
    let verdicts = model.score_batch( &messages );
    for (message, verdict) in messages.iter().zip( &verdicts ) {
	report.add_verdict( message, verdict );
    }
    info!( "{} of {} messages classified as spam", verdicts.iter().filter( |v| v.is_spam() ).count(), verdicts.len() );

    let mut out = stdout().lock();
    if config.json {
	report.model = Some( &model );
	write_json( &report, &mut out )?;
    } else {
	write_text( &report, &mut out )?;
    }
    out.flush()?;
    Ok( () )
}

fn prepare_logging( config: &Config ) {
    let tracer = tracing_subscriber::fmt::fmt()
	.with_max_level( config.level_filter() )
	.with_writer( std::io::stderr )
	.finish();
    if tracing::subscriber::set_global_default( tracer ).is_err() {
	eprintln!( "a global tracing subscriber is already installed" );
    }
}
