//! multi-pass schedule trimming: an ordered list of [`PipelineStage`]s, each applying a
//! trimming policy to a set of lines, folded over a schedule.
mod config;
mod run;

pub use config::{PipelineStage, TrimConfiguration};
pub use run::{run_stages, run_trim, PipelineOutput, StageReport};
