use std::io;
use failure::Fail;
use crate::log_parser::log_events::EventKind;

#[derive(Debug, Fail)]
pub enum EvalError {
    #[fail(display = "log file not found: {}", path)]
    FileNotFound { path: String },

    #[fail(display = "could not read {}: {}", path, error)]
    Io {
        path: String,
        #[fail(cause)]
        error: io::Error,
    },

    #[fail(display = "uncomprehensible search request logline in {}:{}: {}", path, line_number, line)]
    MalformedLogLine {
        path: String,
        line_number: usize,
        line: String,
    },

    #[fail(display = "request {} in {} has no {} event", request_id, path, missing)]
    IncompleteRequestRecord {
        path: String,
        request_id: String,
        missing: EventKind,
    },

    #[fail(display = "request {} in {}: latency from {} to {} is out of range", request_id, path, start, end)]
    LatencyOverflow {
        path: String,
        request_id: String,
        start: i64,
        end: i64,
    },

    #[fail(display = "no search requests found in {} file(s)", files)]
    NoQualifyingRequests { files: usize },

    #[fail(display = "failed to start peer {}: {}", executable, error)]
    ProcessSpawnFailure {
        executable: String,
        #[fail(cause)]
        error: io::Error,
    },

    #[fail(display = "failed writing to peer {}: {}", port, error)]
    PipeWriteFailure {
        port: String,
        #[fail(cause)]
        error: io::Error,
    },

    #[fail(display = "failed waiting for peer {}: {}", port, error)]
    WaitFailure {
        port: String,
        #[fail(cause)]
        error: io::Error,
    },

    #[fail(display = "peer {} did not exit within {}ms", port, waited_ms)]
    ShutdownTimeout { port: String, waited_ms: u128 },

    #[fail(display = "driver thread for peer {} panicked", port)]
    PeerPanicked { port: String },
}

impl EvalError {
    pub fn from_open_error(path: &str, error: io::Error) -> EvalError {
        match error.kind() {
            io::ErrorKind::NotFound => EvalError::FileNotFound { path: path.to_string() },
            _ => EvalError::Io {
                path: path.to_string(),
                error,
            },
        }
    }
}
