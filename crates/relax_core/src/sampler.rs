//! Fixed-resolution sampling of a model for plotting.

use crate::traits::AnalyticSolution;
use serde::Serialize;

/// Number of equal intervals the run duration is split into.
pub const SAMPLE_INTERVALS: usize = 100;
/// Points per series, both endpoints included.
pub const SAMPLE_COUNT: usize = SAMPLE_INTERVALS + 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub time: f64,
    pub value: f64,
}

/// Ordered samples of one run; frozen once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSeries {
    points: Vec<SamplePoint>,
}

impl SampleSeries {
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    /// Flattened `[t0, v0, t1, v1, ...]` for consumers that want a plain buffer.
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.points
            .iter()
            .flat_map(|point| [point.time, point.value])
            .collect()
    }
}

/// Evaluate `model` at `SAMPLE_COUNT` evenly spaced times over `[0, horizon]`.
pub fn sample<M: AnalyticSolution<f64>>(model: &M) -> SampleSeries {
    let horizon = model.horizon();
    let points = (0..=SAMPLE_INTERVALS)
        .map(|i| {
            // The final point lands exactly on the horizon.
            let time = if i == SAMPLE_INTERVALS {
                horizon
            } else {
                i as f64 / SAMPLE_INTERVALS as f64 * horizon
            };
            SamplePoint {
                time,
                value: model.value_at(time),
            }
        })
        .collect();
    SampleSeries { points }
}
