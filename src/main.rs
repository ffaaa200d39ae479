use clap::Parser;

use ffreel::cli::{self, SystemCli};
use ffreel::core::error::ReelError;
use ffreel::core::logging::{init_logging, LoggingConfig};

fn run(args: SystemCli) -> Result<(), ReelError> {
    let movie = cli::load_timeline(&args)?;

    if let Some(line) = cli::compact_command(&args, &movie)? {
        println!("{line}");
        return Ok(());
    }

    if let Some(job) = movie.execute()? {
        tracing::info!(status = ?job.status, output = %movie.options.output.display(), "done");
    }
    Ok(())
}

fn main() {
    let args = SystemCli::parse();
    init_logging(&LoggingConfig::verbose(args.verbose));

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
