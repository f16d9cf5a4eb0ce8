use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// how the keep mask, which is sized to the stops of a route, is applied to the
/// link path, which holds one more entry than there are stops.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LinkAlignment {
    /// link `i` arrives at stop `i` and link `n` continues past the last stop. keeps the
    /// links of the kept stops plus the link following the last kept stop, so the path
    /// keeps one more link than stops.
    #[default]
    Aligned,
    /// link `i` is kept if and only if stop `i` is kept. the final link of the path is
    /// never considered, so the rebuilt path has one link per kept stop.
    Literal,
}
