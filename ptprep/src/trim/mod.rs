//! zone-based route trimming. a [`TrimPolicy`] looks at which stops of a route lie in
//! the exclusion zone and decides what to keep. the [`RouteRebuilder`] reconstitutes a
//! route from that decision and [`transform`] applies both across a whole schedule.
mod in_out;
mod keep_mask;
mod line_scope;
mod link_alignment;
mod rebuild;
mod rebuild_error_policy;
mod statistics;
mod transform;
mod trim_policy;

pub use in_out::{classify, InOutSequence};
pub use keep_mask::{KeepDecision, KeepMask};
pub use line_scope::LineScope;
pub use link_alignment::LinkAlignment;
pub use rebuild::RouteRebuilder;
pub use rebuild_error_policy::RebuildErrorPolicy;
pub use statistics::ScheduleStatistics;
pub use transform::{transform, PassReport, TransformOptions, TransformOutput};
pub use trim_policy::{TrimOutcome, TrimPolicy};

#[cfg(test)]
pub(crate) mod test_fixtures;
