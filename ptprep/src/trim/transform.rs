use super::{
    classify, LineScope, RebuildErrorPolicy, RouteRebuilder,
    TrimOutcome, TrimPolicy,
};
use crate::{
    model::{Route, Schedule, ScheduleError},
    zone::ZoneMembership,
};
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// settings shared by every line of a transformation pass
#[derive(Debug, Clone, Copy)]
pub struct TransformOptions<'a> {
    pub rebuilder: RouteRebuilder<'a>,
    /// omit lines left without routes from the output schedule
    pub remove_empty_lines: bool,
    pub rebuild_error_policy: RebuildErrorPolicy,
}

/// counts of what a single transformation pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub lines_in: usize,
    pub lines_out: usize,
    pub lines_dropped: usize,
    pub routes_unchanged: usize,
    pub routes_trimmed: usize,
    pub routes_dropped: usize,
    pub routes_failed: usize,
}

pub struct TransformOutput {
    pub schedule: Schedule,
    pub report: PassReport,
}

/// applies a trimming policy to every route of the lines in scope and assembles a
/// new schedule. the input schedule is left untouched: stops and out-of-scope lines
/// are shared with the output, modified lines are rebuilt.
///
/// # Arguments
///
/// * `schedule` - schedule to transform
/// * `scope` - lines that may be modified
/// * `zone` - stops inside the exclusion zone
/// * `policy` - how routes touching the zone are trimmed
/// * `options` - route rebuilding and empty line handling
///
/// # Returns
///
/// the new schedule with a report of the pass, or the first rebuild error when
/// the rebuild error policy is [`RebuildErrorPolicy::Fail`]
pub fn transform(
    schedule: &Schedule,
    scope: &LineScope,
    zone: &ZoneMembership,
    policy: &TrimPolicy,
    options: &TransformOptions,
) -> Result<TransformOutput, ScheduleError> {
    let mut output = schedule.with_stops_only();
    let mut report = PassReport {
        lines_in: schedule.lines.len(),
        ..Default::default()
    };

    let iter = tqdm!(
        schedule.lines.values(),
        desc = format!("apply '{policy}' policy"),
        total = schedule.lines.len()
    );
    for line in iter {
        if !scope.includes(&line.id) {
            output.add_line(line.clone());
            continue;
        }

        let mut line_new = line.empty_copy();
        for route in line.routes.values() {
            if let Some(route_new) = trim_route(route, zone, policy, options, &mut report)? {
                line_new.add_route(route_new);
            }
        }

        if line_new.routes.is_empty() && options.remove_empty_lines {
            log::info!(
                "{} does not contain routes. It will NOT be added to the schedule",
                line_new.id
            );
            report.lines_dropped += 1;
            continue;
        }
        output.add_line(Arc::new(line_new));
    }

    report.lines_out = output.lines.len();
    log::info!("Old schedule contained {} lines.", report.lines_in);
    log::info!("New schedule contains {} lines.", report.lines_out);
    Ok(TransformOutput {
        schedule: output,
        report,
    })
}

fn trim_route(
    route: &Arc<Route>,
    zone: &ZoneMembership,
    policy: &TrimPolicy,
    options: &TransformOptions,
    report: &mut PassReport,
) -> Result<Option<Arc<Route>>, ScheduleError> {
    let in_out = classify(route, zone);

    // whole routes pass through or disappear, nothing is rebuilt
    let outcome = policy.decide(&in_out);
    if *policy == TrimPolicy::DeleteRoutesEntirelyInside {
        if outcome == TrimOutcome::DropRoute {
            report.routes_dropped += 1;
            return Ok(None);
        }
        report.routes_unchanged += 1;
        return Ok(Some(route.clone()));
    }

    let mask = match outcome {
        TrimOutcome::DropRoute => {
            report.routes_dropped += 1;
            return Ok(None);
        }
        TrimOutcome::Apply(mask) => mask,
    };

    match options.rebuilder.rebuild(route, &mask) {
        Ok(Some(route_new)) => {
            if mask.keeps_all() {
                report.routes_unchanged += 1;
            } else {
                report.routes_trimmed += 1;
            }
            Ok(Some(Arc::new(route_new)))
        }
        Ok(None) => {
            report.routes_dropped += 1;
            Ok(None)
        }
        Err(e) => match options.rebuild_error_policy {
            RebuildErrorPolicy::Fail => Err(e),
            RebuildErrorPolicy::DropRoute => {
                log::warn!("dropping route after failed rebuild: {e}");
                report.routes_failed += 1;
                Ok(None)
            }
            RebuildErrorPolicy::KeepOriginal => {
                log::warn!("keeping original route after failed rebuild: {e}");
                report.routes_failed += 1;
                Ok(Some(route.clone()))
            }
        },
    }
}
