// #![warn(clippy::pedantic, clippy::nursery)]

use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use lsrs::cli::render_help;
use lsrs::dispatch::resolve_args;
use lsrs::display::print_listing;
use lsrs::options::OptionTable;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LSRS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let prog = args
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map_or_else(|| env!("CARGO_PKG_NAME").to_owned(), |name| name.to_string_lossy().into_owned());

    let resolution = match resolve_args(&prog, args, &mut io::stderr()) {
        Ok(resolution) => resolution,
        Err(error) => {
            tracing::debug!(kind = ?error.kind(), "option resolution failed");
            eprintln!("{prog}: {error}");
            return ExitCode::FAILURE;
        }
    };

    if resolution.flags.show_help {
        print!("{}", render_help(&OptionTable::builtin()));
        return ExitCode::SUCCESS;
    }

    match print_listing(&prog, &resolution.flags, &mut io::stdout().lock(), &mut io::stderr()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error printing entries: {error}");
            ExitCode::FAILURE
        }
    }
}
