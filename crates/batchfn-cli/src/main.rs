mod cli;
mod commands;

use cli::{EvalParams, ListParams, SigParams, TraceParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("list", m)) => {
            let params = ListParams::from_matches(m);
            commands::list::run(params.into());
        }
        Some(("sig", m)) => {
            let params = SigParams::from_matches(m);
            commands::sig::run(params.into());
        }
        Some(("eval", m)) => {
            let params = EvalParams::from_matches(m);
            commands::eval::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
