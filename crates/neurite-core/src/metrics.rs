//! Post-hoc stability metrics over a simulation record

use crate::ids::NeuronId;
use crate::record::SimulationRecord;

/// Target mean network activity for homeostatic deviation (mV)
const HOMEOSTATIC_TARGET: f32 = -65.0;

/// Stability statistics computed once from a finished run
///
/// Only `coefficient_of_variation` and `homeostatic_deviation` are derived
/// by the engine. The remaining fields are part of the reported structure
/// for downstream consumers but have no estimator; they are always 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityMetrics {
    /// Coefficient of variation of pooled inter-spike intervals
    pub coefficient_of_variation: f32,
    /// Always 0.0; no estimator implemented
    pub burst_coefficient: f32,
    /// Always 0.0; no estimator implemented
    pub synchrony_index: f32,
    /// Always 0.0; no estimator implemented
    pub entropy: f32,
    /// Always 0.0; no estimator implemented
    pub lyapunov_exponent: f32,
    /// Absolute distance of mean network activity from -65 mV
    pub homeostatic_deviation: f32,
    /// Always 0.0; no estimator implemented
    pub network_coherence: f32,
    /// Always 0.0; no estimator implemented
    pub critical_branching_ratio: f32,
}

impl StabilityMetrics {
    /// Compute metrics from a record over `neuron_count` neurons
    ///
    /// Inter-spike intervals are computed per neuron and pooled across the
    /// whole population; the CV is `sqrt(population variance) / mean`, or
    /// 0 when there are no intervals or the mean is 0. The homeostatic
    /// deviation is `|mean(network_activity) - (-65)|`.
    pub fn from_record(record: &SimulationRecord, neuron_count: usize) -> Self {
        let mut metrics = Self::default();

        if !record.spike_events.is_empty() {
            let mut intervals = Vec::new();
            for neuron in 0..neuron_count {
                let spikes = record.spikes_for_neuron(NeuronId::new(neuron as u32));
                for pair in spikes.windows(2) {
                    intervals.push((pair[1] - pair[0]) as f32);
                }
            }

            if !intervals.is_empty() {
                let mean = intervals.iter().sum::<f32>() / intervals.len() as f32;
                let variance = intervals
                    .iter()
                    .map(|i| (i - mean) * (i - mean))
                    .sum::<f32>()
                    / intervals.len() as f32;
                metrics.coefficient_of_variation =
                    if mean > 0.0 { variance.sqrt() / mean } else { 0.0 };
            }
        }

        if !record.network_activity.is_empty() {
            metrics.homeostatic_deviation = (record.mean_activity() - HOMEOSTATIC_TARGET).abs();
        }

        metrics
    }
}
