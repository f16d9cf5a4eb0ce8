use crate::{
    convert::{self, ConversionOptions},
    crs,
    feed::GtfsFeed,
    fleet::{self, FleetConfiguration},
    network_filter, post_process, pseudo_network, GtfsConversionError,
    MissingStopLocationPolicy,
};
use chrono::NaiveDate;
use clap::{value_parser, Subcommand};
use ptprep::{
    cleanup, io,
    model::{Network, Schedule, Vehicles},
    validation,
};

const DAY: u32 = 24 * 3600;
const EARLY_MORNING: u32 = 6 * 3600;
const COPY_SUFFIX: &str = "copied";

#[derive(Debug, Clone, Subcommand)]
pub enum GtfsOperation {
    /// convert a GTFS feed into a schedule, pseudo network and vehicles for one service date
    Convert {
        /// GTFS archive (.zip) or directory
        #[arg(long)]
        gtfs_file: String,
        /// service date, such as a typical weekday without construction work
        #[arg(long, value_parser = value_parser!(NaiveDate))]
        date: NaiveDate,
        /// existing network to add the pseudo transit network to
        #[arg(long)]
        network_file: Option<String>,
        /// TOML or JSON file with vehicle types and speeds per transit mode
        #[arg(long)]
        fleet_configuration_file: Option<String>,
        /// prefix of pseudo network ids. existing links and nodes containing it are removed
        #[arg(long, default_value_t = String::from("pt_"))]
        pt_network_identifier: String,
        #[arg(long, value_enum, default_value_t = MissingStopLocationPolicy::Fail)]
        missing_stop_location_policy: MissingStopLocationPolicy,
        /// CRS of the network file, such as EPSG:31468. stop locations are transformed
        /// from WGS84 into it. requires the `proj` feature
        #[arg(long)]
        target_crs: Option<String>,
        #[arg(long)]
        output_schedule_file: String,
        #[arg(long)]
        output_network_file: String,
        #[arg(long)]
        output_vehicles_file: String,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
}

impl GtfsOperation {
    pub fn run(&self) -> Result<(), GtfsConversionError> {
        match self {
            GtfsOperation::Convert {
                gtfs_file,
                date,
                network_file,
                fleet_configuration_file,
                pt_network_identifier,
                missing_stop_location_policy,
                target_crs,
                output_schedule_file,
                output_network_file,
                output_vehicles_file,
                overwrite,
            } => {
                let fleet_config = match fleet_configuration_file {
                    None => Ok(FleetConfiguration::default()),
                    Some(f) => {
                        log::info!("reading fleet configuration from {f}");
                        FleetConfiguration::try_from(f)
                    }
                }?;
                let network: Network = match network_file {
                    None => Network::default(),
                    Some(f) => io::read_json(f)?,
                };
                let feed = GtfsFeed::read(gtfs_file)?;
                let options = ConversionOptions {
                    missing_stop_location_policy: *missing_stop_location_policy,
                    target_crs: target_crs.clone(),
                    ..Default::default()
                };
                let run = run_conversion(
                    &feed,
                    *date,
                    &network,
                    &fleet_config,
                    &options,
                    pt_network_identifier,
                )?;

                io::write_json(&run.network, output_network_file, *overwrite)?;
                io::write_json(&run.schedule, output_schedule_file, *overwrite)?;
                io::write_json(&run.vehicles, output_vehicles_file, *overwrite)?;
                eprintln!("finished.");
                Ok(())
            }
        }
    }
}

/// the transit supply produced from a GTFS feed
pub struct ConversionRun {
    pub schedule: Schedule,
    pub network: Network,
    pub vehicles: Vehicles,
}

/// converts a feed and equips it: copies night departures, replaces the transit part of
/// `network` with a pseudo network, creates the fleet and validates the result. an
/// invalid schedule is an error, warnings are logged.
pub fn run_conversion(
    feed: &GtfsFeed,
    date: NaiveDate,
    network: &Network,
    fleet_config: &FleetConfiguration,
    options: &ConversionOptions,
    pt_network_identifier: &str,
) -> Result<ConversionRun, GtfsConversionError> {
    let transform = options
        .target_crs
        .as_deref()
        .map(crs::from_wgs84)
        .transpose()?;
    let schedule = convert::convert_feed(feed, date, options)?;
    let schedule = cleanup::remove_unused_stops(&schedule);

    // cover the schedule from about 00:00 to 30:00
    let schedule = post_process::copy_late_departures_to_start_of_day(&schedule, DAY, COPY_SUFFIX);
    let schedule =
        post_process::copy_early_departures_to_following_night(&schedule, EARLY_MORNING, COPY_SUFFIX);

    let network = network_filter::remove_links_and_nodes(network, pt_network_identifier);
    let (schedule, network) = pseudo_network::create(
        &schedule,
        &network,
        pt_network_identifier,
        transform.as_deref(),
    )?;
    let (schedule, network, vehicles) = fleet::equip(&schedule, &network, fleet_config)?;

    let result = validation::validate_all(&schedule, Some(&network));
    if !result.is_valid() {
        result.log_issues();
        return Err(GtfsConversionError::InvalidSchedule(result.errors.len()));
    }
    log::info!("transit schedule and network valid");
    result.log_issues();

    Ok(ConversionRun {
        schedule,
        network,
        vehicles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::tests::{test_feed, test_feed_path};
    use geo::Coord;
    use ptprep::model::{Link, LinkId, LineId, Node, NodeId, RouteId, StopId};

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()
    }

    #[test]
    fn test_run_conversion() {
        let mut network = Network::default();
        for id in ["n1", "n2", "pt_old"] {
            network.add_node(Node::new(NodeId::from(id), Coord { x: 0.0, y: 0.0 }));
        }
        network.add_link(Link::new(LinkId::from("road"), NodeId::from("n1"), NodeId::from("n2")));
        network.add_link(Link::new(LinkId::from("pt_old"), NodeId::from("pt_old"), NodeId::from("pt_old")));

        let run = run_conversion(
            &test_feed(),
            thursday(),
            &network,
            &FleetConfiguration::default(),
            &ConversionOptions::default(),
            "pt_",
        )
        .expect("conversion should succeed");

        assert!(run.network.get_link(&LinkId::from("road")).is_some());
        assert!(run.network.get_link(&LinkId::from("pt_old")).is_none());

        // the 25:00 S1 departure also runs at 01:00
        let backward = &run.schedule.lines[&LineId::from("S1")].routes[&RouteId::from("S1_1")];
        let times: Vec<u32> = backward.departures.values().map(|d| d.departure_time).collect();
        assert_eq!(times, vec![25 * 3600, 3600]);

        // the 05:30 bus also runs at 29:30
        let bus = &run.schedule.lines[&LineId::from("B10")].routes[&RouteId::from("B10_0")];
        assert_eq!(bus.departures.len(), 2);

        let n_departures: usize = run.schedule.routes().map(|(_, r)| r.departures.len()).sum();
        assert_eq!(run.vehicles.vehicles.len(), n_departures);
        assert!(run.schedule.get_stop(&StopId::from("E")).is_none());
        let delta = run.schedule.get_stop(&StopId::from("D")).unwrap();
        assert_eq!(delta.link_id, Some(LinkId::from("pt_D")));
    }

    #[test]
    fn test_convert_operation_writes_outputs() {
        let dir = tempfile::tempdir().expect("test invariant failed: unable to create temp dir");
        let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
        let op = GtfsOperation::Convert {
            gtfs_file: test_feed_path(),
            date: thursday(),
            network_file: None,
            fleet_configuration_file: None,
            pt_network_identifier: String::from("pt_"),
            missing_stop_location_policy: MissingStopLocationPolicy::Fail,
            target_crs: None,
            output_schedule_file: path("schedule.json.gz"),
            output_network_file: path("network.json.gz"),
            output_vehicles_file: path("vehicles.json"),
            overwrite: false,
        };
        op.run().expect("conversion should succeed");

        let schedule: Schedule = io::read_json(&path("schedule.json.gz")).unwrap();
        let network: Network = io::read_json(&path("network.json.gz")).unwrap();
        let vehicles: Vehicles = io::read_json(&path("vehicles.json")).unwrap();
        assert_eq!(schedule.lines.len(), 3);
        assert!(validation::validate_all(&schedule, Some(&network)).is_valid());
        assert!(!vehicles.vehicles.is_empty());
    }

    #[cfg(not(feature = "proj"))]
    #[test]
    fn test_target_crs_without_proj_fails_before_conversion() {
        let options = ConversionOptions {
            target_crs: Some(String::from("EPSG:31468")),
            ..Default::default()
        };
        let result = run_conversion(
            &test_feed(),
            thursday(),
            &Network::default(),
            &FleetConfiguration::default(),
            &options,
            "pt_",
        );
        assert!(matches!(
            result,
            Err(GtfsConversionError::CoordinateTransformError(_))
        ));
    }

    #[cfg(feature = "proj")]
    #[test]
    fn test_run_conversion_into_gauss_krueger() {
        let options = ConversionOptions {
            target_crs: Some(String::from("EPSG:31468")),
            ..Default::default()
        };
        let run = run_conversion(
            &test_feed(),
            thursday(),
            &Network::default(),
            &FleetConfiguration::default(),
            &options,
            "pt_",
        )
        .expect("conversion should succeed");
        let node = &run.network.nodes[&NodeId::from("pt_A")];
        assert!(node.coord.x > 4_500_000.0 && node.coord.x < 4_700_000.0);
        assert!(node.coord.y > 5_700_000.0 && node.coord.y < 5_900_000.0);
        let stop = run.schedule.get_stop(&StopId::from("A")).unwrap();
        assert_eq!(stop.coord, node.coord);
    }
}
