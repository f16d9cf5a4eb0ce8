//! trims a transit schedule to the routes and stops that lie outside an exclusion zone.
use clap::Parser;
use ptprep::app::TrimApp;

fn main() {
    env_logger::init();
    let args = TrimApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("ptprep_trim failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
