use super::GtfsOperation;
use clap::Parser;

/// command line tool for turning a GTFS feed into a simulation-ready transit supply
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GtfsApp {
    #[command(subcommand)]
    pub op: GtfsOperation,
}
