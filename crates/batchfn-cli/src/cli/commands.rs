//! Command builders for the CLI.
//!
//! eval and trace accept the same flags; trace-only flags are hidden from
//! `eval --help`.

use clap::Command;

use super::args::*;

/// Add the batch input args shared by eval and trace.
fn with_batch_args(cmd: Command) -> Command {
    cmd.arg(function_arg())
        .arg(batch_path_arg())
        .arg(batch_json_arg())
        .arg(vectorize_arg())
        .arg(mask_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("batchfn")
        .about("Evaluate batch functions over element batches")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(list_command())
        .subcommand(sig_command())
        .subcommand(eval_command())
        .subcommand(trace_command())
}

/// List registered function keys.
pub fn list_command() -> Command {
    Command::new("list")
        .about("List registered functions")
        .arg(color_arg())
}

/// Show a function signature.
pub fn sig_command() -> Command {
    Command::new("sig")
        .about("Show the signature of a function")
        .after_help(
            r#"EXAMPLES:
  batchfn sig add_floats                  # plain signature
  batchfn sig add_floats --vectorize A    # vectorized signature
  batchfn sig attribute.float.Size        # attribute reader"#,
        )
        .arg(function_arg())
        .arg(vectorize_arg())
        .arg(color_arg())
}

/// Evaluate a function over a batch and output JSON.
pub fn eval_command() -> Command {
    let cmd = Command::new("eval")
        .about("Evaluate a function over a batch and output JSON")
        .override_usage(
            "\
  batchfn eval <FUNCTION> --batch <FILE>
  batchfn eval <FUNCTION> --batch-json <JSON>",
        )
        .after_help(
            r#"EXAMPLES:
  batchfn eval add_floats --batch-json '{"size": 2, "inputs": {"A": [1, 2], "B": 10}}'
  batchfn eval float_range --batch batch.json --mask 0,2
  batchfn eval add_floats --vectorize A --batch batch.json"#,
        );

    with_batch_args(cmd)
        .arg(compact_arg())
        .arg(verbose_arg().hide(true))
        .arg(no_result_arg().hide(true))
        .arg(color_arg().hide(true))
}

/// Evaluate a function and show the dispatch trace.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Evaluate a function and show the dispatch trace")
        .override_usage(
            "\
  batchfn trace <FUNCTION> --batch <FILE> [-v|-vv]
  batchfn trace <FUNCTION> --batch-json <JSON> [-v|-vv]",
        )
        .after_help(
            r#"EXAMPLES:
  batchfn trace vertex_position --batch batch.json     # calls and fallbacks
  batchfn trace add_floats --vectorize A -b b.json -v  # also vectorized sub-calls
  batchfn trace clamp -b b.json -vv --no-result        # mask indices, trace only"#,
        );

    with_batch_args(cmd)
        .arg(verbose_arg())
        .arg(no_result_arg())
        .arg(color_arg())
        .arg(compact_arg().hide(true))
}
