use std::collections::BTreeMap;
use crate::error::EvalError;
use crate::log_parser::log_events::{EventKind, SearchEvent};

/// Why a record does not yield a latency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordError {
    Missing(EventKind),
    /// `end - start` does not fit an `i64`.
    Overflow { start: i64, end: i64 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestRecord {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl RequestRecord {
    pub fn update(&mut self, kind: EventKind, timestamp: i64) {
        match kind {
            EventKind::Start => self.start = Some(timestamp),
            EventKind::End => self.end = Some(timestamp),
        }
    }

    pub fn latency(&self) -> Result<i64, RecordError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end
                .checked_sub(start)
                .ok_or(RecordError::Overflow { start, end }),
            (None, _) => Err(RecordError::Missing(EventKind::Start)),
            (_, None) => Err(RecordError::Missing(EventKind::End)),
        }
    }
}

pub type RequestRecords = BTreeMap<String, RequestRecord>;

#[derive(Clone, Debug, PartialEq)]
pub struct CompletedRequest {
    pub request_id: String,
    pub source: String,
    pub latency: i64,
}

/// Folds the events of a single log into one record per request id.
pub fn match_requests<I>(events: I) -> RequestRecords
where
    I: IntoIterator<Item = SearchEvent>,
{
    let mut records = RequestRecords::new();

    for event in events {
        records
            .entry(event.request_id)
            .or_insert_with(RequestRecord::default)
            .update(event.kind, event.timestamp);
    }

    records
}

pub fn complete_requests(
    records: RequestRecords,
    source: &str,
) -> Result<Vec<CompletedRequest>, EvalError> {
    let mut completed = Vec::with_capacity(records.len());

    for (request_id, record) in records {
        match record.latency() {
            Ok(latency) => completed.push(CompletedRequest {
                request_id,
                source: source.to_string(),
                latency,
            }),
            Err(RecordError::Missing(missing)) => {
                return Err(EvalError::IncompleteRequestRecord {
                    path: source.to_string(),
                    request_id,
                    missing,
                })
            }
            Err(RecordError::Overflow { start, end }) => {
                return Err(EvalError::LatencyOverflow {
                    path: source.to_string(),
                    request_id,
                    start,
                    end,
                })
            }
        }
    }

    Ok(completed)
}
