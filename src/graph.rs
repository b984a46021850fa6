//! Memory usage sparkline.
//!
//! A [`SampleBuffer`] keeps the most recent heap-usage ratios, one per graph
//! column, and [`MemoryGraph`] turns it into vertical line segments plus a
//! numeric `used/total MB` label.

use std::collections::VecDeque;

use bevy::{color::Color, math::Vec2};

use crate::{
    constants::{GRAPH_BASELINE_Y, GRAPH_HEIGHT, HEAP_UNAVAILABLE_LABEL},
    render::Surface,
};

/// Fixed-capacity FIFO of scalar samples.
///
/// Pushing into a full buffer evicts the oldest sample first, so the buffer
/// always holds the most recent `capacity` values with the newest at the
/// tail. A zero capacity buffer stays empty.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, value: f32) {
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Change the capacity; shrinking drops the oldest samples.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recently pushed sample
    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f32> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// One reading of the heap telemetry, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeapUsage {
    pub used_mb: f64,
    pub total_mb: f64,
}

impl HeapUsage {
    /// Fraction of the heap in use; zero when the total is unknown.
    pub fn ratio(&self) -> f64 {
        if self.total_mb > 0.0 {
            self.used_mb / self.total_mb
        } else {
            0.0
        }
    }

    /// `used/total MB` with both values rounded to two decimals.
    pub fn label(&self) -> String {
        format!(
            "{}/{} MB",
            round_to(self.used_mb, 2),
            round_to(self.total_mb, 2)
        )
    }
}

/// Round to `decimals` places; formatting the result drops trailing zeros.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Heap usage history and its sparkline rendering.
#[derive(Debug, Clone)]
pub struct MemoryGraph {
    samples: SampleBuffer,
    color: Color,
    label_color: Color,
}

impl MemoryGraph {
    pub fn new(color: Color, label_color: Color) -> Self {
        Self {
            samples: SampleBuffer::default(),
            color,
            label_color,
        }
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut SampleBuffer {
        &mut self.samples
    }

    /// Sample `heap` and draw the graph between `start_x` and `end_x`.
    ///
    /// The graph is one column per sample, so the buffer capacity follows
    /// the available width. Without telemetry only the placeholder label is
    /// drawn and the history is left untouched.
    pub fn draw(
        &mut self,
        surface: &mut impl Surface,
        start_x: f32,
        end_x: f32,
        heap: Option<HeapUsage>,
    ) {
        let label_at = Vec2::new(start_x, 5.0);
        let Some(heap) = heap else {
            surface.text(HEAP_UNAVAILABLE_LABEL, label_at, self.label_color);
            return;
        };

        let width = (end_x - start_x).max(0.0) as usize;
        self.samples.set_capacity(width);
        self.samples
            .push((heap.ratio() * f64::from(GRAPH_HEIGHT)) as f32);

        // Newest sample at the right edge, walking left towards the oldest.
        for (age, sample) in self.samples.iter().rev().enumerate() {
            let x = end_x - age as f32;
            surface.line(
                Vec2::new(x, GRAPH_BASELINE_Y),
                Vec2::new(x, GRAPH_BASELINE_Y - sample),
                self.color,
            );
        }

        surface.text(&heap.label(), label_at, self.label_color);
    }
}
