use crate::GtfsConversionError;
use gtfs_structures::{Gtfs, RouteType};
use serde::Deserialize;
use std::{collections::HashMap, fs::File, io::Read, path::Path};
use zip::ZipArchive;

/// a parsed GTFS feed along with the exact `route_type` code of every route. the
/// [`RouteType`] enum folds extended codes into broad categories, so rail (100) and
/// suburban rail (109) can only be told apart by the code itself.
pub struct GtfsFeed {
    pub gtfs: Gtfs,
    route_type_codes: HashMap<String, i16>,
}

#[derive(Debug, Deserialize)]
struct RouteTypeRow {
    route_id: String,
    route_type: i16,
}

impl GtfsFeed {
    /// reads a GTFS feed from a zip archive or a directory
    pub fn read(path: &str) -> Result<GtfsFeed, GtfsConversionError> {
        log::info!("reading GTFS feed from {path}");
        let gtfs = Gtfs::new(path)?;
        let route_type_codes = read_route_type_codes(Path::new(path))?;
        Ok(GtfsFeed {
            gtfs,
            route_type_codes,
        })
    }

    pub fn from_parts(gtfs: Gtfs, route_type_codes: HashMap<String, i16>) -> GtfsFeed {
        GtfsFeed {
            gtfs,
            route_type_codes,
        }
    }

    /// the `route_type` code of a route as written in routes.txt
    pub fn route_type_code(&self, route_id: &str) -> Option<i16> {
        match self.route_type_codes.get(route_id) {
            Some(code) => Some(*code),
            None => self
                .gtfs
                .routes
                .get(route_id)
                .map(|r| basic_route_type_code(&r.route_type)),
        }
    }
}

/// basic GTFS code of a route type category
pub fn basic_route_type_code(route_type: &RouteType) -> i16 {
    match route_type {
        RouteType::Tramway => 0,
        RouteType::Subway => 1,
        RouteType::Rail => 2,
        RouteType::Bus => 3,
        RouteType::Ferry => 4,
        RouteType::CableCar => 5,
        RouteType::Gondola => 6,
        RouteType::Funicular => 7,
        RouteType::Coach => 200,
        RouteType::Air => 1100,
        RouteType::Taxi => 1500,
        RouteType::Other(code) => *code,
    }
}

fn read_route_type_codes(path: &Path) -> Result<HashMap<String, i16>, GtfsConversionError> {
    let err = |e: String| GtfsConversionError::RouteTypeReadError(path.display().to_string(), e);
    if path.is_dir() {
        let file = File::open(path.join("routes.txt")).map_err(|e| err(e.to_string()))?;
        return parse_route_types(file).map_err(err);
    }

    let file = File::open(path).map_err(|e| err(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| err(e.to_string()))?;
    let routes_name = archive
        .file_names()
        .find(|name| name.ends_with("routes.txt"))
        .map(String::from)
        .ok_or_else(|| err(String::from("archive does not contain routes.txt")))?;
    let routes_file = archive
        .by_name(&routes_name)
        .map_err(|e| err(e.to_string()))?;
    parse_route_types(routes_file).map_err(err)
}

fn parse_route_types<R: Read>(reader: R) -> Result<HashMap<String, i16>, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut codes = HashMap::new();
    for row in rdr.deserialize() {
        let row: RouteTypeRow = row.map_err(|e| e.to_string())?;
        codes.insert(row.route_id, row.route_type);
    }
    Ok(codes)
}
