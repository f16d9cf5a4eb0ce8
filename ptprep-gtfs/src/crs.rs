//! moves GTFS lon,lat coordinates into the coordinate reference system of the network
//! the pseudo transit network is merged into.
use crate::GtfsConversionError;
use geo::Coord;

/// GTFS stop locations are always WGS84 lon,lat
pub const WGS84: &str = "EPSG:4326";

pub trait CoordinateTransform {
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, GtfsConversionError>;
}

/// a WGS84 to `target_crs` transformation backed by PROJ
#[cfg(feature = "proj")]
pub struct ProjTransform {
    proj: proj::Proj,
    target_crs: String,
}

#[cfg(feature = "proj")]
impl ProjTransform {
    pub fn from_wgs84(target_crs: &str) -> Result<ProjTransform, GtfsConversionError> {
        // known-crs transformations are normalized to x=lon, y=lat input order
        let proj = proj::Proj::new_known_crs(WGS84, target_crs, None).map_err(|e| {
            GtfsConversionError::CoordinateTransformError(format!(
                "failed to create transformation from {WGS84} to {target_crs}: {e}"
            ))
        })?;
        Ok(ProjTransform {
            proj,
            target_crs: target_crs.to_string(),
        })
    }
}

#[cfg(feature = "proj")]
impl CoordinateTransform for ProjTransform {
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, GtfsConversionError> {
        let (x, y) = self.proj.convert((coord.x, coord.y)).map_err(|e| {
            GtfsConversionError::CoordinateTransformError(format!(
                "failed to transform ({}, {}) into {}: {e}",
                coord.x, coord.y, self.target_crs
            ))
        })?;
        Ok(Coord { x, y })
    }
}

/// builds the transformation from GTFS lon,lat into `target_crs`.
#[cfg(feature = "proj")]
pub fn from_wgs84(target_crs: &str) -> Result<Box<dyn CoordinateTransform>, GtfsConversionError> {
    Ok(Box::new(ProjTransform::from_wgs84(target_crs)?))
}

#[cfg(not(feature = "proj"))]
pub fn from_wgs84(target_crs: &str) -> Result<Box<dyn CoordinateTransform>, GtfsConversionError> {
    Err(GtfsConversionError::CoordinateTransformError(format!(
        "cannot transform stop locations into {target_crs}, ptprep-gtfs was built without the `proj` feature"
    )))
}
