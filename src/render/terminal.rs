use std::io::prelude::*;
use failure::Error;
use crate::render::Renderer;
use crate::result;

/// Prints the average latency of every experiment on a single line,
/// separated by spaces, in experiment order. Averages are always printed
/// as floats, `20.0` rather than `20`.
pub struct TerminalRenderer<'a> {
    stream: &'a mut dyn Write,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(stream: &'a mut dyn Write) -> TerminalRenderer {
        TerminalRenderer { stream }
    }
}

impl<'a> Renderer for TerminalRenderer<'a> {
    fn render(&mut self, report: &result::EvaluationReport) -> Result<(), Error> {
        if report.experiments.is_empty() {
            warn!("No experiments to report.");
        }

        let averages: Vec<String> = report
            .experiments
            .iter()
            .map(|experiment| format!("{:?}", experiment.latency.avg))
            .collect();

        writeln!(self.stream, "{}", averages.join(" "))?;
        self.stream.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::render::tests::{get_report_fixture, MockWrite};
    use crate::result::EvaluationReport;
    use super::*;

    #[test]
    fn test_terminal_renderer() {
        let mut mock_write = MockWrite { write_calls: vec![] };

        {
            let mut renderer = TerminalRenderer::new(&mut mock_write);
            renderer.render(&get_report_fixture()).unwrap();
        }

        assert_eq!(mock_write.output(), "12.0 14.5\n");
    }

    #[test]
    fn test_terminal_renderer_no_experiments() {
        let mut mock_write = MockWrite { write_calls: vec![] };

        {
            let mut renderer = TerminalRenderer::new(&mut mock_write);
            renderer.render(&EvaluationReport::default()).unwrap();
        }

        assert_eq!(mock_write.output(), "\n");
    }

    #[test]
    fn test_terminal_renderer_whole_average_keeps_fraction() {
        let mut mock_write = MockWrite { write_calls: vec![] };
        let mut report = get_report_fixture();
        report.experiments.truncate(1);
        report.experiments[0].latency.avg = 20.0;

        {
            let mut renderer = TerminalRenderer::new(&mut mock_write);
            renderer.render(&report).unwrap();
        }

        assert_eq!(mock_write.output(), "20.0\n");
    }
}
