use clap::Parser;
use config::ArgCheck;
use cwas_categorize::{cli::Args, core::run};
use log::{error, info, Level};
use simple_logger::init_with_level;

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap_or_else(|e| {
        eprintln!("ERROR: could not start logger: {}", e);
    });

    let args: Args = Args::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .unwrap_or_else(|e| {
            error!("{}", e);
            std::process::exit(1);
        });

    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    run(args).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
