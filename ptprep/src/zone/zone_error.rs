use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("failed reading zone file '{0}': {1}")]
    ReadError(String, String),
    #[error("failed decoding zone geometry from '{0}': {1}")]
    GeometryDecodeError(String, String),
    #[error("unexpected geometry type {0} in zone file, must be polygonal")]
    NonPolygonalGeometry(String),
    #[error("zone file '{0}' does not contain any polygons")]
    EmptyZone(String),
    #[error("unsupported zone file type: {0}")]
    UnsupportedFileType(String),
}
