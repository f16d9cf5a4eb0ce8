use super::TrimAppError;
use crate::{
    io,
    model::Schedule,
    pipeline::{self, TrimConfiguration},
    trim::ScheduleStatistics,
    zone::{ZoneMembership, ZoneSource},
};
use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum TrimOperation {
    /// trim a schedule against an exclusion zone
    Trim {
        /// TOML or JSON file with the trimming run configuration
        #[arg(long)]
        configuration_file: String,
    },
    /// count the routes of a schedule inside, outside and across an exclusion zone
    Summary {
        /// transit schedule (.json or .json.gz)
        #[arg(long)]
        schedule_file: String,
        /// exclusion zone polygons (.shp, .wkt or .geojson)
        #[arg(long)]
        zone_file: String,
    },
}

impl TrimOperation {
    pub fn run(&self) -> Result<(), TrimAppError> {
        match self {
            TrimOperation::Trim { configuration_file } => {
                log::info!("reading trim configuration from {configuration_file}");
                let config = TrimConfiguration::try_from(configuration_file)?;
                let output = pipeline::run_trim(&config)?;
                let last = output
                    .stages
                    .last()
                    .map(|s| s.statistics)
                    .unwrap_or(output.initial);
                eprintln!("finished. {last}");
                Ok(())
            }
            TrimOperation::Summary {
                schedule_file,
                zone_file,
            } => {
                let stats = summarize(schedule_file, zone_file)?;
                println!("{stats}");
                Ok(())
            }
        }
    }
}

fn summarize(schedule_file: &str, zone_file: &str) -> Result<ScheduleStatistics, TrimAppError> {
    let schedule: Schedule = io::read_json(schedule_file)?;
    let polygons = ZoneSource::try_from(zone_file)?.read()?;
    let zone = ZoneMembership::from_geometries(&schedule, &polygons);
    Ok(ScheduleStatistics::summarize(&schedule, &zone))
}
