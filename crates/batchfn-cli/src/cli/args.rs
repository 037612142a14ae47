//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so that eval and trace can share the
//! same definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Function key (positional).
pub fn function_arg() -> Arg {
    Arg::new("function")
        .value_name("FUNCTION")
        .required(true)
        .help("Function key, e.g. add_floats, switch.float3 or attribute.float.Size")
}

/// Batch file (--batch).
pub fn batch_path_arg() -> Arg {
    Arg::new("batch_path")
        .short('b')
        .long("batch")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("batch_json")
        .help("Batch JSON file ('-' for stdin)")
}

/// Inline batch (--batch-json).
pub fn batch_json_arg() -> Arg {
    Arg::new("batch_json")
        .long("batch-json")
        .value_name("JSON")
        .help("Inline batch JSON")
}

/// Vectorized parameters (--vectorize).
pub fn vectorize_arg() -> Arg {
    Arg::new("vectorize")
        .long("vectorize")
        .value_name("PARAMS")
        .value_delimiter(',')
        .help("Comma-separated input names to vectorize (each takes a list per element)")
}

/// Element subset (--mask).
pub fn mask_arg() -> Arg {
    Arg::new("mask")
        .long("mask")
        .value_name("INDICES")
        .value_delimiter(',')
        .value_parser(value_parser!(usize))
        .help("Comma-separated ascending element indices (default: every element)")
}

/// Compact JSON output (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for vectorization, -vv for masks and returns)")
}

/// Skip result output (--no-result).
pub fn no_result_arg() -> Arg {
    Arg::new("no_result")
        .long("no-result")
        .action(ArgAction::SetTrue)
        .help("Print the trace only")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
