//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs are populated from clap matches, ignoring hidden flags
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use batchfn_vm::Verbosity;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::eval::{BatchSource, EvalArgs};
use crate::commands::list::ListArgs;
use crate::commands::sig::SigArgs;
use crate::commands::trace::TraceArgs;

pub struct ListParams {
    pub color: ColorChoice,
}

impl ListParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            color: parse_color(m),
        }
    }
}

impl From<ListParams> for ListArgs {
    fn from(p: ListParams) -> Self {
        Self {
            color: p.color.should_colorize(),
        }
    }
}

pub struct SigParams {
    pub function: String,
    pub vectorize: Vec<String>,
    pub color: ColorChoice,
}

impl SigParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            function: parse_function(m),
            vectorize: parse_vectorize(m),
            color: parse_color(m),
        }
    }
}

impl From<SigParams> for SigArgs {
    fn from(p: SigParams) -> Self {
        Self {
            function: p.function,
            vectorize: p.vectorize,
            color: p.color.should_colorize(),
        }
    }
}

pub struct EvalParams {
    pub function: String,
    pub batch_path: Option<PathBuf>,
    pub batch_json: Option<String>,
    pub vectorize: Vec<String>,
    pub mask: Option<Vec<usize>>,
    pub compact: bool,
    // Note: verbose, no_result and color are parsed but not extracted (trace flags)
}

impl EvalParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            function: parse_function(m),
            batch_path: m.get_one::<PathBuf>("batch_path").cloned(),
            batch_json: m.get_one::<String>("batch_json").cloned(),
            vectorize: parse_vectorize(m),
            mask: parse_mask(m),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<EvalParams> for EvalArgs {
    fn from(p: EvalParams) -> Self {
        // Pretty by default when stdout is a TTY, unless --compact is passed
        let pretty = !p.compact && std::io::IsTerminal::is_terminal(&std::io::stdout());

        Self {
            function: p.function,
            batch: batch_source(p.batch_path, p.batch_json),
            vectorize: p.vectorize,
            mask: p.mask,
            pretty,
        }
    }
}

pub struct TraceParams {
    pub function: String,
    pub batch_path: Option<PathBuf>,
    pub batch_json: Option<String>,
    pub vectorize: Vec<String>,
    pub mask: Option<Vec<usize>>,
    pub verbose: u8,
    pub no_result: bool,
    pub color: ColorChoice,
    // Note: compact is parsed but not extracted (eval flag)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            function: parse_function(m),
            batch_path: m.get_one::<PathBuf>("batch_path").cloned(),
            batch_json: m.get_one::<String>("batch_json").cloned(),
            vectorize: parse_vectorize(m),
            mask: parse_mask(m),
            verbose: m.get_count("verbose"),
            no_result: m.get_flag("no_result"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            function: p.function,
            batch: batch_source(p.batch_path, p.batch_json),
            vectorize: p.vectorize,
            mask: p.mask,
            verbosity,
            no_result: p.no_result,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_function(m: &ArgMatches) -> String {
    m.get_one::<String>("function")
        .cloned()
        .expect("function is a required argument")
}

fn parse_vectorize(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("vectorize")
        .map(|names| names.cloned().collect())
        .unwrap_or_default()
}

fn parse_mask(m: &ArgMatches) -> Option<Vec<usize>> {
    m.get_many::<usize>("mask")
        .map(|indices| indices.copied().collect())
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn batch_source(path: Option<PathBuf>, json: Option<String>) -> Option<BatchSource> {
    match (path, json) {
        (Some(path), _) => Some(BatchSource::Path(path)),
        (None, Some(json)) => Some(BatchSource::Inline(json)),
        (None, None) => None,
    }
}
