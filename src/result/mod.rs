use crate::analyzer;

#[derive(PartialEq, Debug, Clone)]
pub struct ExperimentResult {
    /// Directory name of the cohort, or `custom` for an explicit file list.
    pub label: String,
    pub clients: usize,
    pub latency: analyzer::LatencyResult,
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct EvaluationReport {
    pub experiments: Vec<ExperimentResult>,
}
