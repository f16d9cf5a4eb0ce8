use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle
/// a route whose rebuild fails
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RebuildErrorPolicy {
    /// omit the route from the output line
    #[default]
    DropRoute,
    /// carry the untrimmed route into the output line
    KeepOriginal,
    /// abort the whole pass
    Fail,
}
