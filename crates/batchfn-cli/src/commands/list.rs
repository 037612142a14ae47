use std::fmt::Write as _;

use batchfn_core::Colors;
use batchfn_lib::FunctionRegistry;

pub struct ListArgs {
    pub color: bool,
}

pub fn run(args: ListArgs) {
    print!("{}", render(&FunctionRegistry::builtins(), Colors::new(args.color)));
}

/// One line per function: key, then the signature name.
pub fn render(registry: &FunctionRegistry, colors: Colors) -> String {
    let c = &colors;
    let width = registry.keys().map(str::len).max().unwrap_or(0);
    let mut out = format!("Registered functions ({}):\n", registry.len());
    for (key, function) in registry.iter() {
        writeln!(
            out,
            "  {}{key:<width$}{}  {}{}{}",
            c.blue,
            c.reset,
            c.dim,
            function.name(),
            c.reset
        )
        .unwrap();
    }
    out
}
