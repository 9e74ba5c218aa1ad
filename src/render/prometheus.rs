use std::io::prelude::*;
use failure::Error;
use ::prometheus::{Encoder, GaugeVec, IntGaugeVec, Opts, Registry, TextEncoder};
use crate::render::Renderer;
use crate::result;

/// Renders the report in the Prometheus text exposition format, suitable
/// for the node exporter's textfile collector.
pub struct PrometheusRenderer<'a> {
    registry: Registry,
    encoder: TextEncoder,
    latency: GaugeVec,
    count: IntGaugeVec,
    stream: &'a mut dyn Write,
}

impl<'a> PrometheusRenderer<'a> {
    pub fn new(stream: &'a mut dyn Write) -> Result<PrometheusRenderer<'a>, Error> {
        let registry = Registry::new();

        let latency = GaugeVec::new(
            Opts::new(
                "search_request_latency_avg",
                "Average search request latency of all peers in the cohort",
            ),
            &["cohort", "clients"],
        )?;
        let count = IntGaugeVec::new(
            Opts::new(
                "search_request_count",
                "The number of completed search requests observed",
            ),
            &["cohort", "clients"],
        )?;

        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(count.clone()))?;

        Ok(PrometheusRenderer {
            registry,
            encoder: TextEncoder::new(),
            latency,
            count,
            stream,
        })
    }
}

impl<'a> Renderer for PrometheusRenderer<'a> {
    fn render(&mut self, report: &result::EvaluationReport) -> Result<(), Error> {
        for experiment in &report.experiments {
            let clients = experiment.clients.to_string();
            let labels = [experiment.label.as_str(), clients.as_str()];

            self.latency
                .with_label_values(&labels)
                .set(experiment.latency.avg);
            self.count
                .with_label_values(&labels)
                .set(experiment.latency.count as i64);
        }

        let metric_families = self.registry.gather();
        self.encoder.encode(&metric_families, &mut self.stream)?;
        self.stream.flush()?;

        Ok(())
    }
}
