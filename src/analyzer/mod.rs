use std::path::Path;
use crate::error::EvalError;
use crate::input;
use crate::log_parser::{self, log_events::LogLineGrammar};
use crate::request_matcher::{self, CompletedRequest};

#[derive(PartialEq, Debug, Clone)]
pub struct LatencyResult {
    pub count: usize,
    pub total: i128,
    pub avg: f64,
}

pub trait Timing {
    fn latency(&self) -> i64;
}

impl Timing for CompletedRequest {
    fn latency(&self) -> i64 {
        self.latency
    }
}

impl Timing for Box<dyn Timing> {
    fn latency(&self) -> i64 {
        (**self).latency()
    }
}

pub fn analyze_iterator<I, T>(timings: I) -> Option<LatencyResult>
where
    I: Iterator<Item = T>,
    T: Timing,
{
    let mut count: usize = 0;
    let mut total: i128 = 0;

    for timing in timings {
        count += 1;
        total += i128::from(timing.latency());
    }

    if count == 0 {
        return None;
    }

    Some(LatencyResult {
        count,
        total,
        avg: total as f64 / count as f64,
    })
}

/// Average search latency over every completed request in `files`.
///
/// Requests are matched per file and then pooled, so each request weighs
/// the same no matter which peer logged it.
pub fn average_latency<P: AsRef<Path>>(
    files: &[P],
    grammar: &LogLineGrammar,
) -> Result<LatencyResult, EvalError> {
    let mut completed: Vec<CompletedRequest> = Vec::new();

    for file in files {
        let path = file.as_ref();
        let source = path.display().to_string();

        let input = input::open_log_file(path)?;
        let events = log_parser::parse(input, &source, grammar)?;
        let records = request_matcher::match_requests(events);
        let requests = request_matcher::complete_requests(records, &source)?;

        info!("{}: {} completed search requests", source, requests.len());
        completed.extend(requests);
    }

    analyze_iterator(completed.into_iter())
        .ok_or(EvalError::NoQualifyingRequests { files: files.len() })
}
