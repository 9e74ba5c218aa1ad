use std::io::BufRead;
use crate::error::EvalError;

pub mod log_events;
use self::log_events::*;

pub const EVENT_MARKER: char = '!';
pub const SEARCH_REQUEST_MARKER: &str = "search request";

pub fn is_search_request_line(line: &str) -> bool {
    line.starts_with(EVENT_MARKER) && line.contains(SEARCH_REQUEST_MARKER)
}

/// Collects the search request events of one peer log, in file order.
///
/// Lines that are not search request events are skipped. A line that
/// claims to be one but does not follow the grammar aborts the parse.
pub fn parse<R: BufRead>(
    input: R,
    source: &str,
    grammar: &LogLineGrammar,
) -> Result<Vec<SearchEvent>, EvalError> {
    let mut events: Vec<SearchEvent> = Vec::new();
    let mut skipped: usize = 0;

    for (index, line) in input.lines().enumerate() {
        let line_value = line.map_err(|error| EvalError::Io {
            path: source.to_string(),
            error,
        })?;

        if !is_search_request_line(&line_value) {
            skipped += 1;
            continue;
        }

        match SearchEvent::new_from_log_line(grammar, &line_value) {
            Ok(event) => events.push(event),
            Err(err) => {
                debug!("{}:{}: {}", source, index + 1, err);
                return Err(EvalError::MalformedLogLine {
                    path: source.to_string(),
                    line_number: index + 1,
                    line: line_value,
                });
            }
        }
    }

    debug!("{}: {} search events, {} other lines", source, events.len(), skipped);

    Ok(events)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;
    use super::*;

    #[test]
    fn test_is_search_request_line() {
        assert!(is_search_request_line("!1 [10] search request sent [start]"));
        assert!(!is_search_request_line(" !1 [10] search request sent [start]"));
        assert!(!is_search_request_line("!1 [10] retrieve request sent [start]"));
        assert!(!is_search_request_line("request [(s)earch|(r)etrieve|(q)uit]: filename:"));
        assert!(!is_search_request_line(""));
    }

    #[test]
    fn test_parse_simple() {
        let input = BufReader::new(File::open("src/test/search-simple.log").unwrap());

        let events = parse(input, "search-simple.log", &LogLineGrammar::default()).unwrap();

        assert_eq!(events.len(), 6);
        assert_eq!(events[0].request_id, "a");
        assert_eq!(events[0].kind, EventKind::Start);
        assert_eq!(events[5].request_id, "c");
        assert_eq!(events[5].kind, EventKind::End);
    }

    #[test]
    fn test_parse_no_search_requests() {
        let input = BufReader::new(File::open("src/test/search-empty.log").unwrap());

        let events = parse(input, "search-empty.log", &LogLineGrammar::default()).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn test_parse_broken_line_is_fatal() {
        let input = BufReader::new(File::open("src/test/search-broken.log").unwrap());

        match parse(input, "search-broken.log", &LogLineGrammar::default()) {
            Err(EvalError::MalformedLogLine { path, line_number, line }) => {
                assert_eq!(path, "search-broken.log");
                assert_eq!(line_number, 3);
                assert_eq!(line, "!b search request sent [start]");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_parse_from_memory() {
        let log = "client connection: 127.0.0.1@55002\n\
                   !4 [7] search request sent [start]\n\
                   !4 [9] search request answered [end]\n";

        let events = parse(log.as_bytes(), "memory", &LogLineGrammar::default()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].timestamp, 9);
    }

    #[test]
    fn test_parse_with_whole_token_key() {
        let log = "!12 [0] search request sent [start]\n\
                   !1 [0] search request sent [start]\n";

        let first_char = parse(log.as_bytes(), "memory", &LogLineGrammar::default()).unwrap();
        let token = parse(
            log.as_bytes(),
            "memory",
            &LogLineGrammar::with_key(RequestKey::Token),
        )
        .unwrap();

        assert_eq!(first_char[0].request_id, "1");
        assert_eq!(first_char[1].request_id, "1");
        assert_eq!(token[0].request_id, "12");
        assert_eq!(token[1].request_id, "1");
    }
}
