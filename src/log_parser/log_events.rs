use std::fmt;
use regex::Regex;

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum EventKind {
    Start,
    End,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EventKind::Start => write!(f, "start"),
            EventKind::End => write!(f, "end"),
        }
    }
}

/// Which part of the first token identifies a request.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum RequestKey {
    /// The single character following `!`, as the peer logs have always
    /// been keyed.
    FirstChar,
    /// Everything following `!`.
    Token,
}

impl Default for RequestKey {
    fn default() -> RequestKey {
        RequestKey::FirstChar
    }
}

/// Grammar of a peer log line that records a search request event:
///
/// `!<request_id> [<timestamp>] <message> [<kind>]`
///
/// The brackets around timestamp and kind are optional sentinels and the
/// kind may carry a `:<value>` suffix, which is ignored. The kind must be
/// a token of its own.
pub struct LogLineGrammar {
    pattern: Regex,
    key: RequestKey,
}

impl LogLineGrammar {
    pub fn new() -> LogLineGrammar {
        LogLineGrammar::with_key(RequestKey::default())
    }

    pub fn with_key(key: RequestKey) -> LogLineGrammar {
        let pattern = Regex::new(
            r"^!(?P<request_id>\S+)\s+\[?(?P<timestamp>-?\d+)\]?\s+(?P<message>.*?)\s+\[?(?P<kind>start|end)(?::\S*)?\]\s*$",
        ).expect("search request grammar is a valid regex");

        LogLineGrammar { pattern, key }
    }

    fn request_id(&self, token: &str) -> String {
        match self.key {
            RequestKey::FirstChar => token.chars().take(1).collect(),
            RequestKey::Token => token.to_string(),
        }
    }
}

impl Default for LogLineGrammar {
    fn default() -> LogLineGrammar {
        LogLineGrammar::new()
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct SearchEvent {
    pub request_id: String,
    pub timestamp: i64,
    pub kind: EventKind,
    pub original_log_line: String,
}

impl SearchEvent {
    pub fn new_from_log_line(
        grammar: &LogLineGrammar,
        log_line: &str,
    ) -> Result<SearchEvent, &'static str> {
        let captures = match grammar.pattern.captures(log_line) {
            Some(captures) => captures,
            None => return Err("Uncomprehensible search request logline"),
        };

        if !captures["message"].contains(super::SEARCH_REQUEST_MARKER) {
            return Err("Uncomprehensible search request logline");
        }

        let timestamp: i64 = match captures["timestamp"].parse() {
            Ok(timestamp) => timestamp,
            Err(_) => return Err("Search request timestamp out of range"),
        };

        let kind = match &captures["kind"] {
            "start" => EventKind::Start,
            _ => EventKind::End,
        };

        Ok(SearchEvent {
            request_id: grammar.request_id(&captures["request_id"]),
            timestamp,
            kind,
            original_log_line: log_line.to_string(),
        })
    }
}
