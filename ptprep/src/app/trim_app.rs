use super::TrimOperation;
use clap::Parser;

/// command line tool for cutting transit schedules down to a study area
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TrimApp {
    #[command(subcommand)]
    pub op: TrimOperation,
}
