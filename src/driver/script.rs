use std::io::{self, Write};

pub const DEFAULT_SEARCHES: usize = 500;
pub const DEFAULT_SEARCH_TERM: &str = "a.txt";

const SEARCH_COMMAND: &str = "s";
const QUIT_COMMAND: &str = "q";

#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    pub searches: usize,
    pub search_term: String,
}

impl Default for Script {
    fn default() -> Script {
        Script {
            searches: DEFAULT_SEARCHES,
            search_term: String::from(DEFAULT_SEARCH_TERM),
        }
    }
}

/// Writes the peer command sequence: `searches` times the search command
/// followed by the term, then the quit command. Every line is flushed so
/// the peer sees it immediately.
pub fn write_script<W: Write + ?Sized>(stream: &mut W, script: &Script) -> io::Result<()> {
    for _ in 0..script.searches {
        writeln!(stream, "{}", SEARCH_COMMAND)?;
        stream.flush()?;
        writeln!(stream, "{}", script.search_term)?;
        stream.flush()?;
    }

    writeln!(stream, "{}", QUIT_COMMAND)?;
    stream.flush()
}
