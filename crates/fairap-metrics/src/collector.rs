//! Measurement collector: accumulates RTT samples per access point.
//!
//! Samples are append-only. Nothing is aggregated until the optimizer
//! asks for baselines, so the arrival order of samples does not matter.

use serde::Serialize;
use tracing::{debug, info};

use fairap_core::{AccessPoint, MeasurementSample};

use crate::error::{MetricsError, MetricsResult};

/// Aggregate view of the samples recorded for one AP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RttSummary {
    pub ap_id: usize,
    pub count: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Collects RTT samples for a fixed set of access points.
#[derive(Debug, Clone)]
pub struct MeasurementCollector {
    ap_count: usize,
    samples: Vec<MeasurementSample>,
}

impl MeasurementCollector {
    /// Create a collector for APs `0..ap_count`.
    pub fn new(ap_count: usize) -> Self {
        Self {
            ap_count,
            samples: Vec::new(),
        }
    }

    pub fn ap_count(&self) -> usize {
        self.ap_count
    }

    /// Record one RTT sample for an AP.
    pub fn record_sample(&mut self, ap_id: usize, rtt_ms: f64) -> MetricsResult<()> {
        if ap_id >= self.ap_count {
            return Err(MetricsError::UnknownAccessPoint {
                ap_id,
                ap_count: self.ap_count,
            });
        }
        if !rtt_ms.is_finite() || rtt_ms <= 0.0 {
            return Err(MetricsError::InvalidRtt { ap_id, rtt_ms });
        }
        self.samples.push(MeasurementSample { ap_id, rtt_ms });
        debug!(ap_id, rtt_ms, "recorded RTT sample");
        Ok(())
    }

    /// Record a batch of samples, stopping at the first invalid one.
    pub fn extend<I>(&mut self, samples: I) -> MetricsResult<()>
    where
        I: IntoIterator<Item = MeasurementSample>,
    {
        for sample in samples {
            self.record_sample(sample.ap_id, sample.rtt_ms)?;
        }
        Ok(())
    }

    /// All samples in arrival order.
    pub fn samples(&self) -> &[MeasurementSample] {
        &self.samples
    }

    pub fn sample_count(&self, ap_id: usize) -> usize {
        self.samples.iter().filter(|s| s.ap_id == ap_id).count()
    }

    /// Summary for one AP, or `None` if it has no samples.
    pub fn summary(&self, ap_id: usize) -> Option<RttSummary> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min_ms = f64::INFINITY;
        let mut max_ms = f64::NEG_INFINITY;

        for sample in self.samples.iter().filter(|s| s.ap_id == ap_id) {
            count += 1;
            sum += sample.rtt_ms;
            min_ms = min_ms.min(sample.rtt_ms);
            max_ms = max_ms.max(sample.rtt_ms);
        }

        if count == 0 {
            return None;
        }

        Some(RttSummary {
            ap_id,
            count,
            mean_ms: sum / count as f64,
            min_ms,
            max_ms,
        })
    }

    /// Summaries for every AP that has at least one sample.
    pub fn summaries(&self) -> Vec<RttSummary> {
        (0..self.ap_count).filter_map(|ap| self.summary(ap)).collect()
    }

    /// Arithmetic mean RTT for an AP.
    pub fn mean_rtt(&self, ap_id: usize) -> Option<f64> {
        self.summary(ap_id).map(|s| s.mean_ms)
    }

    /// Overwrite each AP's baseline RTT with its measured mean. APs without
    /// samples keep their configured default.
    ///
    /// Returns the number of APs whose baseline was replaced.
    pub fn fold_into(&self, access_points: &mut [AccessPoint]) -> MetricsResult<usize> {
        if access_points.len() != self.ap_count {
            return Err(MetricsError::ApCountMismatch {
                expected: self.ap_count,
                actual: access_points.len(),
            });
        }

        let mut folded = 0;
        for ap in access_points.iter_mut() {
            match self.summary(ap.id) {
                Some(summary) => {
                    ap.set_baseline_rtt(summary.mean_ms);
                    folded += 1;
                    debug!(
                        ap = ap.id,
                        samples = summary.count,
                        mean_rtt_ms = summary.mean_ms,
                        throughput_kbps = ap.baseline_throughput_kbps,
                        "baseline folded from measurements"
                    );
                }
                None => {
                    debug!(
                        ap = ap.id,
                        rtt_ms = ap.baseline_rtt_ms,
                        "no samples, keeping configured baseline"
                    );
                }
            }
        }

        info!(
            folded,
            total = access_points.len(),
            samples = self.samples.len(),
            "measurement baselines applied"
        );
        Ok(folded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairap_core::TP_NUMERATOR;

    fn aps(rtts: &[f64]) -> Vec<AccessPoint> {
        rtts.iter()
            .enumerate()
            .map(|(id, &rtt)| AccessPoint::new(id, 10, rtt))
            .collect()
    }

    #[test]
    fn record_and_summarize() {
        let mut collector = MeasurementCollector::new(2);
        collector.record_sample(0, 10.0).unwrap();
        collector.record_sample(0, 30.0).unwrap();
        collector.record_sample(0, 20.0).unwrap();

        let summary = collector.summary(0).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean_ms, 20.0);
        assert_eq!(summary.min_ms, 10.0);
        assert_eq!(summary.max_ms, 30.0);

        assert!(collector.summary(1).is_none());
        assert_eq!(collector.summaries().len(), 1);
        assert_eq!(collector.sample_count(0), 3);
    }

    #[test]
    fn rejects_unknown_ap() {
        let mut collector = MeasurementCollector::new(2);
        let err = collector.record_sample(2, 10.0).unwrap_err();
        assert!(matches!(err, MetricsError::UnknownAccessPoint { ap_id: 2, ap_count: 2 }));
        assert!(collector.samples().is_empty());
    }

    #[test]
    fn rejects_invalid_rtt() {
        let mut collector = MeasurementCollector::new(1);
        assert!(collector.record_sample(0, f64::NAN).is_err());
        assert!(collector.record_sample(0, -1.0).is_err());
        assert!(collector.record_sample(0, 0.0).is_err());
        assert!(collector.samples().is_empty());
    }

    #[test]
    fn fold_replaces_only_measured_baselines() {
        let mut collector = MeasurementCollector::new(3);
        collector
            .extend([
                MeasurementSample { ap_id: 2, rtt_ms: 40.0 },
                MeasurementSample { ap_id: 0, rtt_ms: 11.0 },
                MeasurementSample { ap_id: 2, rtt_ms: 60.0 },
            ])
            .unwrap();

        let mut access_points = aps(&[20.0, 30.0, 32.0]);
        let folded = collector.fold_into(&mut access_points).unwrap();

        assert_eq!(folded, 2);
        assert_eq!(access_points[0].baseline_rtt_ms, 11.0);
        assert_eq!(access_points[1].baseline_rtt_ms, 30.0);
        assert_eq!(access_points[2].baseline_rtt_ms, 50.0);
        assert_eq!(access_points[2].baseline_throughput_kbps, TP_NUMERATOR / 50.0);
        assert_eq!(access_points[1].baseline_throughput_kbps, TP_NUMERATOR / 30.0);
    }

    #[test]
    fn fold_checks_ap_count() {
        let collector = MeasurementCollector::new(2);
        let mut access_points = aps(&[20.0]);
        assert!(matches!(
            collector.fold_into(&mut access_points),
            Err(MetricsError::ApCountMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let mut forward = MeasurementCollector::new(1);
        let mut backward = MeasurementCollector::new(1);
        let rtts = [12.0, 18.0, 25.0, 9.0];
        for rtt in rtts {
            forward.record_sample(0, rtt).unwrap();
        }
        for rtt in rtts.iter().rev() {
            backward.record_sample(0, *rtt).unwrap();
        }
        assert_eq!(forward.mean_rtt(0), backward.mean_rtt(0));
    }
}
