use failure::Error;
use crate::result;

pub mod prometheus;
pub mod terminal;

pub trait Renderer {
    fn render(&mut self, report: &result::EvaluationReport) -> Result<(), Error>;
}

#[cfg(test)]
pub mod tests {
    use std::io;
    use std::io::prelude::*;
    use std::str;
    use crate::analyzer::LatencyResult;
    use crate::result::{EvaluationReport, ExperimentResult};

    pub struct MockWrite {
        pub write_calls: Vec<String>,
    }

    impl Write for MockWrite {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.write_calls.push(str::from_utf8(buf).unwrap().to_string());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl MockWrite {
        pub fn output(&self) -> String {
            self.write_calls.concat()
        }
    }

    pub fn get_report_fixture() -> EvaluationReport {
        EvaluationReport {
            experiments: vec![
                ExperimentResult {
                    label: String::from("one_client"),
                    clients: 1,
                    latency: LatencyResult {
                        count: 500,
                        total: 6000,
                        avg: 12.0,
                    },
                },
                ExperimentResult {
                    label: String::from("two_clients"),
                    clients: 2,
                    latency: LatencyResult {
                        count: 1000,
                        total: 14500,
                        avg: 14.5,
                    },
                },
            ],
        }
    }
}
