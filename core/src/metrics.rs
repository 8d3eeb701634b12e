// core/src/metrics.rs
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Tellere for motoren. Eies av skallet og sendes inn per kall; ingen global tilstand her.
#[derive(Clone)]
pub struct EngineMetrics {
    registry: Registry,
    reports_computed: IntCounter,
    requests_rejected: IntCounterVec,
    series_points: IntCounter,
}

impl EngineMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let reports_computed = IntCounter::new(
            "jump_reports_computed_total",
            "Number of jump reports successfully computed",
        )?;
        let requests_rejected = IntCounterVec::new(
            Opts::new("jump_requests_rejected_total", "Rejected jump requests by reason"),
            &["reason"],
        )?;
        let series_points = IntCounter::new(
            "force_series_points_total",
            "Force-time points produced by the synthetic ramp model",
        )?;

        registry.register(Box::new(reports_computed.clone()))?;
        registry.register(Box::new(requests_rejected.clone()))?;
        registry.register(Box::new(series_points.clone()))?;

        Ok(Self { registry, reports_computed, requests_rejected, series_points })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

pub fn reports_computed_total(metrics: &EngineMetrics) -> &IntCounter {
    &metrics.reports_computed
}

pub fn requests_rejected_total(metrics: &EngineMetrics, reason: &str) -> IntCounter {
    metrics.requests_rejected.with_label_values(&[reason])
}

pub fn force_series_points_total(metrics: &EngineMetrics) -> &IntCounter {
    &metrics.series_points
}
