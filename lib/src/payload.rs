use serde::Serialize;

use crate::lttb::DownsampleError;
use crate::series::Series;

/// Point budget for a chart showing a single trace.
pub const SINGLE_TRACE_POINTS: usize = 15_000;

/// Per-trace point budget when several traces share one chart.
pub const MULTI_TRACE_POINTS: usize = 5_000;

/// Standard budget for `trace_count` traces sharing one chart.
pub fn budget_for(trace_count: usize) -> usize {
    if trace_count > 1 {
        MULTI_TRACE_POINTS
    } else {
        SINGLE_TRACE_POINTS
    }
}

/// One named curve, in the shape the charting client consumes.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Reduction bookkeeping reported alongside the traces.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DownsampleMeta {
    pub original_points: usize,
    pub downsampled_points: usize,
    pub compression_ratio: String,
}

impl DownsampleMeta {
    pub fn new() -> Self {
        DownsampleMeta {
            original_points: 0,
            downsampled_points: 0,
            compression_ratio: "1.0x".to_string(),
        }
    }

    fn add(&mut self, original: usize, downsampled: usize) {
        self.original_points += original;
        self.downsampled_points += downsampled;
        self.compression_ratio = if self.downsampled_points == 0 {
            "1.0x".to_string()
        } else {
            format!(
                "{:.1}x",
                self.original_points as f64 / self.downsampled_points as f64
            )
        };
    }
}

impl Default for DownsampleMeta {
    fn default() -> Self {
        Self::new()
    }
}

// PlotPayload is the full document a chart endpoint returns: downsampled
// traces plus the metadata describing how much was shaved off.
#[derive(Debug, Default, Serialize)]
pub struct PlotPayload {
    pub traces: Vec<Trace>,
    pub metadata: DownsampleMeta,
}

impl PlotPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Downsample `series` to `threshold` points and append it as a named
    /// trace, folding its point counts into the payload metadata.
    pub fn push_series(
        &mut self,
        name: impl Into<String>,
        series: &Series,
        threshold: usize,
    ) -> Result<(), DownsampleError> {
        let reduced = series.downsample(threshold)?;
        self.push_reduced(name, series.len(), reduced);
        Ok(())
    }

    /// Append an already-reduced series, recording how many points the
    /// source had.
    pub fn push_reduced(&mut self, name: impl Into<String>, original_points: usize, reduced: Series) {
        self.metadata.add(original_points, reduced.len());
        self.traces.push(Trace {
            name: name.into(),
            x: reduced.x,
            y: reduced.y,
        });
    }
}
