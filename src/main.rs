mod args;
mod sidroid;

use clap::Parser;
use log::{info, warn};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::sidroid::Destination;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
    info!("args: {:?}", args);

    match sidroid::run_conversion(&args) {
        Ok(Destination::File(path)) => {
            info!("Lookup file written to {}", path.display());
        }
        Ok(Destination::Stdout) => {}
        Err(e) => {
            warn!("Error occurred {:?}", e);
            eprintln!("An error occurred: {}", e);
            for cause in ErrorCompat::iter_chain(&e).skip(1) {
                eprintln!("  caused by: {}", cause);
            }
            if let Some(bt) = ErrorCompat::backtrace(&e) {
                eprintln!("trace: {}", bt);
            }
            std::process::exit(1);
        }
    }
}
