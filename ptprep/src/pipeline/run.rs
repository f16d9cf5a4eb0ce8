use super::{PipelineStage, TrimConfiguration};
use crate::{
    app::TrimAppError,
    cleanup, io,
    model::{Network, Schedule, ScheduleError},
    trim::{
        transform, PassReport, RouteRebuilder, ScheduleStatistics, TransformOptions, TrimPolicy,
    },
    validation,
    zone::{ZoneMembership, ZoneSource},
};
use csv::QuoteStyle;

/// what a single pipeline stage did, with the zone statistics of its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: usize,
    pub policy: TrimPolicy,
    pub pass: PassReport,
    pub statistics: ScheduleStatistics,
}

impl StageReport {
    const HEADER: [&'static str; 13] = [
        "stage",
        "policy",
        "lines_in",
        "lines_out",
        "lines_dropped",
        "routes_unchanged",
        "routes_trimmed",
        "routes_dropped",
        "routes_failed",
        "routes_inside",
        "routes_outside",
        "routes_mixed",
        "routes_degenerate",
    ];

    fn to_record(&self) -> Vec<String> {
        vec![
            self.stage.to_string(),
            format!("{:?}", self.policy),
            self.pass.lines_in.to_string(),
            self.pass.lines_out.to_string(),
            self.pass.lines_dropped.to_string(),
            self.pass.routes_unchanged.to_string(),
            self.pass.routes_trimmed.to_string(),
            self.pass.routes_dropped.to_string(),
            self.pass.routes_failed.to_string(),
            self.statistics.inside.to_string(),
            self.statistics.outside.to_string(),
            self.statistics.mixed.to_string(),
            self.statistics.degenerate.to_string(),
        ]
    }
}

pub struct PipelineOutput {
    pub schedule: Schedule,
    /// zone statistics of the input schedule
    pub initial: ScheduleStatistics,
    pub stages: Vec<StageReport>,
}

/// runs the stages in order, each one transforming the output of the previous stage.
pub fn run_stages(
    schedule: &Schedule,
    zone: &ZoneMembership,
    stages: &[PipelineStage],
    options: &TransformOptions,
) -> Result<PipelineOutput, ScheduleError> {
    let initial = ScheduleStatistics::summarize(schedule, zone);
    log::info!("before trimming: {initial}");

    let mut current = schedule.clone();
    let mut reports = Vec::with_capacity(stages.len());
    for (idx, stage) in stages.iter().enumerate() {
        let output = transform(&current, &stage.lines, zone, &stage.policy, options)?;
        let statistics = ScheduleStatistics::summarize(&output.schedule, zone);
        log::info!("after stage {} ({}): {statistics}", idx + 1, stage.policy);
        reports.push(StageReport {
            stage: idx + 1,
            policy: stage.policy,
            pass: output.report,
            statistics,
        });
        current = output.schedule;
    }

    Ok(PipelineOutput {
        schedule: current,
        initial,
        stages: reports,
    })
}

/// trims a schedule file against an exclusion zone as described by `config`: loads the
/// inputs, runs the stages, removes unused stops, validates and writes the result.
pub fn run_trim(config: &TrimConfiguration) -> Result<PipelineOutput, TrimAppError> {
    log::info!("reading schedule from {}", config.schedule_file);
    let schedule: Schedule = io::read_json(&config.schedule_file)?;
    let network: Option<Network> = match &config.network_file {
        None => None,
        Some(f) => {
            log::info!("reading network from {f}");
            Some(io::read_json(f)?)
        }
    };

    let zone_source = ZoneSource::try_from(config.zone_file.as_str())?;
    let polygons = zone_source.read()?;
    let zone = ZoneMembership::from_geometries(&schedule, &polygons);

    let options = TransformOptions {
        rebuilder: RouteRebuilder::new(
            network.as_ref(),
            config.link_alignment,
            config.require_connected_routes,
        ),
        remove_empty_lines: config.remove_empty_lines,
        rebuild_error_policy: config.rebuild_error_policy,
    };
    let output = run_stages(&schedule, &zone, &config.stages, &options)?;

    let cleaned = cleanup::remove_unused_stops(&output.schedule);
    let result = validation::validate_all(&cleaned, network.as_ref());
    result.log_issues();

    log::info!("writing schedule to {}", config.output_schedule_file);
    io::write_json(&cleaned, &config.output_schedule_file, config.overwrite)?;
    if let Some(report_file) = &config.report_file {
        write_stage_reports(&output.stages, report_file, config.overwrite)?;
    }

    Ok(PipelineOutput {
        schedule: cleaned,
        ..output
    })
}

fn write_stage_reports(
    reports: &[StageReport],
    file: &str,
    overwrite: bool,
) -> Result<(), TrimAppError> {
    let mut writer = io::create_csv_writer(file, true, QuoteStyle::Necessary, overwrite)?;
    writer
        .write_record(StageReport::HEADER)
        .map_err(|e| TrimAppError::ReportError(format!("{file}: {e}")))?;
    for report in reports.iter() {
        writer
            .write_record(report.to_record())
            .map_err(|e| TrimAppError::ReportError(format!("{file}: {e}")))?;
    }
    io::finish_csv_writer(writer, file)?;
    Ok(())
}
