//! Human-readable signature dump.

use std::fmt::Write as _;

use crate::colors::Colors;
use crate::signature::Signature;

/// Render `signature` as a header line plus one line per parameter.
///
/// ```text
/// Map Range
///   0 single_in  float    Value
///   ...
/// ```
pub fn dump_signature(signature: &Signature, colors: Colors) -> String {
    let c = &colors;
    let mut out = String::new();

    writeln!(out, "{}{}{}", c.blue, signature.name(), c.reset).unwrap();
    let index_width = signature.len().saturating_sub(1).to_string().len();
    for (i, param) in signature.iter().enumerate() {
        let ty = param.param_type;
        // Pad before coloring so escape codes don't skew the columns.
        let category = format!("{:<10}", ty.category().as_str());
        let type_name = format!("{:<8}", ty.type_desc().name());
        writeln!(
            out,
            "  {i:>index_width$} {}{category}{} {}{type_name}{} {}{}{}",
            c.dim, c.reset, c.green, c.reset, c.blue, param.name, c.reset
        )
        .unwrap();
    }

    out
}
