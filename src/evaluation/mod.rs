use std::path::Path;
use crate::analyzer;
use crate::cohort::Cohort;
use crate::error::EvalError;
use crate::log_parser::log_events::LogLineGrammar;
use crate::result::{EvaluationReport, ExperimentResult};

pub const DEFAULT_COHORTS: usize = 10;

pub fn evaluate_cohort(
    root: &Path,
    cohort: &Cohort,
    grammar: &LogLineGrammar,
) -> Result<ExperimentResult, EvalError> {
    let files = cohort.log_files(root);
    let latency = analyzer::average_latency(&files, grammar)?;

    info!(
        "{}: {} requests, avg latency {}",
        cohort.dir_name(),
        latency.count,
        latency.avg
    );

    Ok(ExperimentResult {
        label: cohort.dir_name(),
        clients: cohort.size,
        latency,
    })
}

/// Evaluates the cohorts of one to `max_size` clients found below `root`.
/// The first failing cohort aborts the whole evaluation.
pub fn evaluate_cohorts(
    root: &Path,
    max_size: usize,
    grammar: &LogLineGrammar,
) -> Result<EvaluationReport, EvalError> {
    let mut report = EvaluationReport::default();

    for size in 1..=max_size {
        let experiment = evaluate_cohort(root, &Cohort::new(size), grammar)?;
        report.experiments.push(experiment);
    }

    Ok(report)
}

pub fn evaluate_files(
    filenames: &[String],
    grammar: &LogLineGrammar,
) -> Result<EvaluationReport, EvalError> {
    let latency = analyzer::average_latency(filenames, grammar)?;

    Ok(EvaluationReport {
        experiments: vec![ExperimentResult {
            label: String::from("custom"),
            clients: filenames.len(),
            latency,
        }],
    })
}
