//! git-hooks entry point
//!
//! This is the minimal main entry point that delegates to the library.

use githooks::error::{CommandError, EXIT_FAILURE};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Configure miette for error reporting
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    // Parse arguments, dispatching on the symlink name when run by git
    let cli = githooks::Cli::parse_invocation(std::env::args_os());

    match githooks::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<CommandError>()
                .map_or(EXIT_FAILURE, CommandError::exit_code);

            // Convert anyhow error to miette for display
            let miette_error = miette::Report::msg(format!("{e:#}"));
            eprintln!("{miette_error:?}");
            ExitCode::from(code)
        }
    }
}
