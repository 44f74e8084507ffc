use clap::Parser;
use minitools::cli::paths_or_current_dir;
use minitools::{handle_generate_config, logging, print_startup_error, LsCli, MiniLs};
use std::io;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = LsCli::parse();
    logging::init_logging(cli.common.verbose, cli.common.quiet);

    if cli.common.generate_config {
        return handle_generate_config(&cli.common);
    }

    let ls = match MiniLs::from_cli(&cli) {
        Ok(ls) => ls,
        Err(e) => {
            print_startup_error(&cli.common, &e);
            return e.exit_code();
        }
    };

    let result = paths_or_current_dir(&cli.files).and_then(|paths| ls.report(&paths, io::stdout().lock()));

    match result {
        Ok(_) => 0,
        Err(e) => {
            ls.context().handle_error(&e);
            e.exit_code()
        }
    }
}
