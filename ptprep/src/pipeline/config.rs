use crate::{
    app::TrimAppError,
    trim::{LineScope, LinkAlignment, RebuildErrorPolicy, TrimPolicy},
};
use serde::{Deserialize, Serialize};

/// one pass of the trimming pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub policy: TrimPolicy,
    #[serde(default)]
    pub lines: LineScope,
}

impl PipelineStage {
    pub fn new(policy: TrimPolicy) -> PipelineStage {
        PipelineStage {
            policy,
            lines: LineScope::All,
        }
    }
}

/// defines the inputs, outputs and passes of a schedule trimming run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimConfiguration {
    /// transit schedule to trim (.json or .json.gz)
    pub schedule_file: String,
    /// network the routes of the schedule drive on. when present, rebuilt routes and
    /// the final schedule are checked against it.
    #[serde(default)]
    pub network_file: Option<String>,
    /// exclusion zone polygons (.shp, .wkt or .geojson)
    pub zone_file: String,
    pub output_schedule_file: String,
    /// per-stage counts written as CSV
    #[serde(default)]
    pub report_file: Option<String>,
    #[serde(default = "default_remove_empty_lines")]
    pub remove_empty_lines: bool,
    #[serde(default)]
    pub link_alignment: LinkAlignment,
    #[serde(default)]
    pub require_connected_routes: bool,
    #[serde(default)]
    pub rebuild_error_policy: RebuildErrorPolicy,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_stages")]
    pub stages: Vec<PipelineStage>,
}

fn default_remove_empty_lines() -> bool {
    true
}

/// delete routes lying entirely within the zone, then trim the in-zone ends of the
/// remaining routes, then cut the longer outside end of what still enters the zone.
pub fn default_stages() -> Vec<PipelineStage> {
    vec![
        PipelineStage::new(TrimPolicy::DeleteRoutesEntirelyInside),
        PipelineStage::new(TrimPolicy::TrimEnds),
        PipelineStage::new(TrimPolicy::ChooseLongerEnd),
    ]
}

impl TrimConfiguration {
    pub fn new(schedule_file: &str, zone_file: &str, output_schedule_file: &str) -> Self {
        Self {
            schedule_file: schedule_file.to_string(),
            network_file: None,
            zone_file: zone_file.to_string(),
            output_schedule_file: output_schedule_file.to_string(),
            report_file: None,
            remove_empty_lines: default_remove_empty_lines(),
            link_alignment: LinkAlignment::default(),
            require_connected_routes: false,
            rebuild_error_policy: RebuildErrorPolicy::default(),
            overwrite: false,
            stages: default_stages(),
        }
    }
}

impl TryFrom<&String> for TrimConfiguration {
    type Error = TrimAppError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TrimAppError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                TrimAppError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                TrimAppError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                TrimAppError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(TrimAppError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
