use crate::model::LineId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// which lines of a schedule a trimming pass may modify. lines out of scope are
/// carried into the output unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "type", content = "ids")]
pub enum LineScope {
    #[default]
    All,
    Lines(BTreeSet<LineId>),
}

impl LineScope {
    pub fn includes(&self, line_id: &LineId) -> bool {
        match self {
            LineScope::All => true,
            LineScope::Lines(ids) => ids.contains(line_id),
        }
    }
}
