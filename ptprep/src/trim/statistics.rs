use super::classify;
use crate::{model::Schedule, zone::ZoneMembership};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// tally of routes by how they relate to the zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    /// every stop inside the zone
    pub inside: usize,
    /// every stop outside the zone
    pub outside: usize,
    /// stops on both sides of the zone boundary
    pub mixed: usize,
    /// routes without any stop. never expected on valid input
    pub degenerate: usize,
}

impl ScheduleStatistics {
    pub fn summarize(schedule: &Schedule, zone: &ZoneMembership) -> ScheduleStatistics {
        let mut stats = ScheduleStatistics::default();
        for (_, route) in schedule.routes() {
            let in_out = classify(route, zone);
            match (in_out.any_inside(), in_out.any_outside()) {
                (true, true) => stats.mixed += 1,
                (true, false) => stats.inside += 1,
                (false, true) => stats.outside += 1,
                (false, false) => stats.degenerate += 1,
            }
        }
        if stats.degenerate > 0 {
            log::warn!(
                "schedule contains {} route(s) without stops",
                stats.degenerate
            );
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.inside + self.outside + self.mixed + self.degenerate
    }
}

impl Display for ScheduleStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "in: {}, out: {}, half: {}, wrong: {}",
            self.inside, self.outside, self.mixed, self.degenerate
        )
    }
}
