use super::ZoneError;
use geo::{Geometry, MultiPolygon};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wkt::TryFromWkt;

/// source of the exclusion zone polygons
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ZoneSource {
    /// ESRI shapefile with polygon shapes
    Shapefile { file: String },
    /// text file containing a single WKT (multi)polygon
    Wkt { file: String },
    /// GeoJSON feature collection, feature or geometry
    GeoJson { file: String },
}

impl TryFrom<&str> for ZoneSource {
    type Error = ZoneError;

    /// picks the zone source by file extension
    fn try_from(file: &str) -> Result<Self, Self::Error> {
        let extension = Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        let file = file.to_string();
        match extension.as_str() {
            "shp" => Ok(ZoneSource::Shapefile { file }),
            "wkt" | "txt" => Ok(ZoneSource::Wkt { file }),
            "geojson" | "json" => Ok(ZoneSource::GeoJson { file }),
            _ => Err(ZoneError::UnsupportedFileType(file)),
        }
    }
}

impl ZoneSource {
    pub fn file(&self) -> &str {
        match self {
            ZoneSource::Shapefile { file } => file,
            ZoneSource::Wkt { file } => file,
            ZoneSource::GeoJson { file } => file,
        }
    }

    /// reads the zone polygons from this source
    pub fn read(&self) -> Result<Vec<MultiPolygon<f64>>, ZoneError> {
        let polygons = match self {
            ZoneSource::Shapefile { file } => read_shapefile(file),
            ZoneSource::Wkt { file } => read_wkt(file),
            ZoneSource::GeoJson { file } => read_geojson(file),
        }?;
        if polygons.is_empty() {
            return Err(ZoneError::EmptyZone(self.file().to_string()));
        }
        log::info!("read {} zone polygon(s) from {}", polygons.len(), self.file());
        Ok(polygons)
    }
}

fn read_shapefile(file: &str) -> Result<Vec<MultiPolygon<f64>>, ZoneError> {
    let rows =
        shapefile::read(file).map_err(|e| ZoneError::ReadError(file.to_string(), e.to_string()))?;
    let mut polygons = vec![];
    for (idx, (shape, _record)) in rows.into_iter().enumerate() {
        let mp: MultiPolygon<f64> = match shape {
            shapefile::Shape::Polygon(generic_polygon) => {
                generic_polygon.try_into().map_err(|e| {
                    let msg = format!("failed to convert shapefile polygon at row {idx}: {e}");
                    ZoneError::GeometryDecodeError(file.to_string(), msg)
                })?
            }
            shapefile::Shape::PolygonM(generic_polygon) => {
                generic_polygon.try_into().map_err(|e| {
                    let msg = format!("failed to convert shapefile polygon at row {idx}: {e}");
                    ZoneError::GeometryDecodeError(file.to_string(), msg)
                })?
            }
            other => {
                return Err(ZoneError::NonPolygonalGeometry(format!(
                    "{} at row {}",
                    other.shapetype(),
                    idx
                )))
            }
        };
        polygons.push(mp);
    }
    Ok(polygons)
}

fn read_wkt(file: &str) -> Result<Vec<MultiPolygon<f64>>, ZoneError> {
    let wkt_str = std::fs::read_to_string(file)
        .map_err(|e| ZoneError::ReadError(file.to_string(), e.to_string()))?;
    let geometry: Geometry<f64> = Geometry::try_from_wkt_str(wkt_str.trim())
        .map_err(|e| ZoneError::GeometryDecodeError(file.to_string(), e.to_string()))?;
    into_polygons(geometry)
}

fn read_geojson(file: &str) -> Result<Vec<MultiPolygon<f64>>, ZoneError> {
    let json_str = std::fs::read_to_string(file)
        .map_err(|e| ZoneError::ReadError(file.to_string(), e.to_string()))?;
    let geojson: geojson::GeoJson = json_str
        .parse()
        .map_err(|e: geojson::Error| ZoneError::GeometryDecodeError(file.to_string(), e.to_string()))?;
    let collection = geo::GeometryCollection::<f64>::try_from(&geojson)
        .map_err(|e| ZoneError::GeometryDecodeError(file.to_string(), e.to_string()))?;
    into_polygons(Geometry::GeometryCollection(collection))
}

/// flattens a geometry into its polygonal parts. any non-polygonal member is an error.
pub(crate) fn into_polygons(geometry: Geometry<f64>) -> Result<Vec<MultiPolygon<f64>>, ZoneError> {
    match geometry {
        Geometry::Polygon(p) => Ok(vec![MultiPolygon::new(vec![p])]),
        Geometry::MultiPolygon(mp) => Ok(vec![mp]),
        Geometry::Rect(r) => Ok(vec![MultiPolygon::new(vec![r.to_polygon()])]),
        Geometry::Triangle(t) => Ok(vec![MultiPolygon::new(vec![t.to_polygon()])]),
        Geometry::GeometryCollection(gc) => {
            let mut out = vec![];
            for g in gc.0.into_iter() {
                out.extend(into_polygons(g)?);
            }
            Ok(out)
        }
        Geometry::Point(_) => Err(ZoneError::NonPolygonalGeometry(String::from("Point"))),
        Geometry::Line(_) => Err(ZoneError::NonPolygonalGeometry(String::from("Line"))),
        Geometry::LineString(_) => Err(ZoneError::NonPolygonalGeometry(String::from("LineString"))),
        Geometry::MultiPoint(_) => Err(ZoneError::NonPolygonalGeometry(String::from("MultiPoint"))),
        Geometry::MultiLineString(_) => Err(ZoneError::NonPolygonalGeometry(String::from(
            "MultiLineString",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_source_from_extension() {
        assert_eq!(
            ZoneSource::try_from("input/zone.shp").unwrap(),
            ZoneSource::Shapefile {
                file: String::from("input/zone.shp")
            }
        );
        assert!(matches!(
            ZoneSource::try_from("zone.WKT").unwrap(),
            ZoneSource::Wkt { .. }
        ));
        assert!(matches!(
            ZoneSource::try_from("zone.geojson").unwrap(),
            ZoneSource::GeoJson { .. }
        ));
        assert!(matches!(
            ZoneSource::try_from("zone.gpkg"),
            Err(ZoneError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_read_wkt_polygon() {
        let mut file = tempfile::Builder::new().suffix(".wkt").tempfile().unwrap();
        writeln!(file, "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0))").unwrap();
        let source = ZoneSource::try_from(file.path().to_str().unwrap()).unwrap();
        let polygons = source.read().expect("wkt zone should be readable");
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].0.len(), 1);
    }

    #[test]
    fn test_read_geojson_feature_collection() {
        let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
        let doc = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[5,5],[6,5],[6,6],[5,6],[5,5]]]}}
            ]
        }"#;
        write!(file, "{doc}").unwrap();
        let source = ZoneSource::try_from(file.path().to_str().unwrap()).unwrap();
        let polygons = source.read().expect("geojson zone should be readable");
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn test_non_polygonal_geometry_rejected() {
        let g = Geometry::Point(geo::Point::new(1.0, 2.0));
        assert!(matches!(
            into_polygons(g),
            Err(ZoneError::NonPolygonalGeometry(_))
        ));
    }
}
