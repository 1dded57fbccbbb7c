mod args;
mod borda;

use clap::Parser;
use log::LevelFilter;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = borda::run_election(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
