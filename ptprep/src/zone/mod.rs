mod zone_error;
mod zone_membership;
mod zone_source;

pub use zone_error::ZoneError;
pub use zone_membership::ZoneMembership;
pub use zone_source::ZoneSource;
