//! appbundle - builds release bundles for front-end applications.

use appbundle_cli::{cli, commands, error, logger, ui};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    commands::build_execute(&args).map(|_| ()).map_err(|err| {
        ui::error("Release failed");
        error::cli_error_to_miette(err)
    })
}
