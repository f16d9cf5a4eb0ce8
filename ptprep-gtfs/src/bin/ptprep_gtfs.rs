//! converts a GTFS feed into a transit schedule, pseudo network and vehicle fleet.
use clap::Parser;
use ptprep_gtfs::app::GtfsApp;

fn main() {
    env_logger::init();
    let args = GtfsApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("ptprep_gtfs failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
