use clap::Parser;
use minitools::{handle_generate_config, logging, print_startup_error, GrepCli, MiniGrep};
use std::io;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = GrepCli::parse();
    logging::init_logging(cli.common.verbose, cli.common.quiet);

    if cli.common.generate_config {
        return handle_generate_config(&cli.common);
    }

    let grep = match MiniGrep::from_cli(&cli) {
        Ok(grep) => grep,
        Err(e) => {
            print_startup_error(&cli.common, &e);
            return e.exit_code();
        }
    };

    let mut source = grep.file_list_source();
    let result = grep
        .resolve_files(&cli.files, cli.pattern(), source.as_mut())
        .and_then(|files| grep.report(cli.pattern(), &files, io::stdout().lock()));

    match result {
        Ok(_) => 0,
        Err(e) => {
            grep.context().handle_error(&e);
            e.exit_code()
        }
    }
}
