use super::{InOutSequence, KeepDecision, KeepMask};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Enumerates alternative ways to trim a route
/// that passes through the exclusion zone
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrimPolicy {
    /// drop routes whose stops are all inside the zone, leave every other route untouched
    DeleteRoutesEntirelyInside,
    /// discard every stop inside the zone, wherever it appears in the route
    DeleteAllStopsWithin,
    /// discard the in-zone runs at the start and at the end of the route
    TrimEnds,
    /// compare the out-of-zone runs at both ends and discard the one that is at least
    /// as long as the other (the leading run on ties)
    ChooseLongerEnd,
    /// keep only the longer out-of-zone run at either end and discard everything else
    KeepLongerOutsideEnd,
}

/// result of applying a [`TrimPolicy`] to a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimOutcome {
    /// nothing of the route survives
    DropRoute,
    /// rebuild the route from the stops kept by this mask
    Apply(KeepMask),
}

impl Display for TrimPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrimPolicy::DeleteRoutesEntirelyInside => "delete routes entirely inside",
            TrimPolicy::DeleteAllStopsWithin => "delete all stops within",
            TrimPolicy::TrimEnds => "trim ends",
            TrimPolicy::ChooseLongerEnd => "choose longer end",
            TrimPolicy::KeepLongerOutsideEnd => "keep longer outside end",
        };
        write!(f, "{name}")
    }
}

impl TrimPolicy {
    /// decides which stops of a route to keep given its in/out zone sequence.
    /// a decision that keeps no stop at all is reported as [`TrimOutcome::DropRoute`],
    /// except for [`TrimPolicy::DeleteRoutesEntirelyInside`], which only drops routes
    /// entirely inside the zone and keeps a route without stops as it is.
    pub fn decide(&self, in_out: &InOutSequence) -> TrimOutcome {
        let mask = match self {
            TrimPolicy::DeleteRoutesEntirelyInside => {
                if is_entirely_inside(in_out) {
                    return TrimOutcome::DropRoute;
                }
                return TrimOutcome::Apply(KeepMask::keep_all(in_out.len()));
            }
            TrimPolicy::DeleteAllStopsWithin => KeepMask(
                in_out
                    .0
                    .iter()
                    .map(|in_zone| match in_zone {
                        true => KeepDecision::Discard,
                        false => KeepDecision::Keep,
                    })
                    .collect(),
            ),
            TrimPolicy::TrimEnds => trim_ends(in_out),
            TrimPolicy::ChooseLongerEnd => choose_longer_end(in_out),
            TrimPolicy::KeepLongerOutsideEnd => keep_longer_outside_end(in_out),
        };
        if mask.keep_count() == 0 {
            TrimOutcome::DropRoute
        } else {
            TrimOutcome::Apply(mask)
        }
    }
}

/// true when every stop is in the zone. a route without stops is not entirely inside.
fn is_entirely_inside(in_out: &InOutSequence) -> bool {
    in_out.inside_ratio() == 1.0
}

fn trim_ends(in_out: &InOutSequence) -> KeepMask {
    let n = in_out.len();
    let mut mask = KeepMask::keep_all(n);
    let prefix = in_out.leading_run(true);
    let suffix = in_out.trailing_run(true);
    for idx in (0..prefix).chain(n - suffix..n) {
        mask.set(idx, KeepDecision::Discard);
    }
    mask
}

fn choose_longer_end(in_out: &InOutSequence) -> KeepMask {
    let n = in_out.len();
    let mut mask = KeepMask::keep_all(n);
    if !in_out.any_inside() {
        // never touches the zone
        return mask;
    }
    let begin = in_out.leading_run(false);
    let end = in_out.trailing_run(false);
    let discard = if begin >= end { 0..begin } else { n - end..n };
    for idx in discard {
        mask.set(idx, KeepDecision::Discard);
    }
    mask
}

fn keep_longer_outside_end(in_out: &InOutSequence) -> KeepMask {
    let n = in_out.len();
    let mut mask = KeepMask::discard_all(n);
    let begin = in_out.leading_run(false);
    let end = in_out.trailing_run(false);
    let keep = if begin >= end { 0..begin } else { n - end..n };
    for idx in keep {
        mask.set(idx, KeepDecision::Keep);
    }
    mask
}
