//! Signal mixing
//!
//! The mixer owns the ordered list of active components and the running
//! maximum duration, and combines independently-sized rendered buffers
//! into one aggregate signal on a common timeline.

use serde::{Deserialize, Serialize};

use crate::synth::component::WaveComponent;

/// What `clear()` does to the running maximum duration
///
/// The observed behavior of the tool this engine models keeps the
/// session's maximum duration across resets; some callers instead want
/// a clean slate. Both are supported, preserve is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearPolicy {
    /// Keep the current maximum duration for the rest of the session
    Preserve,
    /// Drop back to zero so the next component starts a fresh timeline
    Reset,
}

/// One mix result: the master time axis, the aggregate signal, and
/// (when retention is enabled) each component's padded buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MixOutput {
    /// Time in seconds for each sample index, over [0, max_duration)
    pub time_axis: Vec<f32>,
    /// Elementwise sum of all padded component buffers
    pub aggregate: Vec<f32>,
    /// Padded per-component buffers, in add order; `None` unless
    /// per-component retention is enabled
    pub components: Option<Vec<Vec<f32>>>,
}

/// Accumulates waveform components into a single aggregate signal
///
/// State is session-scoped: components are appended in order, and
/// `max_duration_secs` only ever grows while components are present
/// (removing the longest component via `clear` does not shrink the
/// timeline under [`ClearPolicy::Preserve`]).
#[derive(Debug, Clone)]
pub struct SignalMixer {
    components: Vec<WaveComponent>,
    max_duration_secs: u32,
    sample_rate: u32,
    keep_component_buffers: bool,
    clear_policy: ClearPolicy,
}

impl SignalMixer {
    /// Create a mixer with the given fixed sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self::with_clear_policy(sample_rate, ClearPolicy::Preserve)
    }

    /// Create a mixer with an explicit clear policy
    pub fn with_clear_policy(sample_rate: u32, clear_policy: ClearPolicy) -> Self {
        Self {
            components: Vec::new(),
            max_duration_secs: 0,
            sample_rate,
            keep_component_buffers: false,
            clear_policy,
        }
    }

    /// Append a component, growing the timeline if it is the longest so far
    pub fn add(&mut self, component: WaveComponent) {
        if component.duration_secs() > self.max_duration_secs {
            self.max_duration_secs = component.duration_secs();
        }
        self.components.push(component);
    }

    /// Remove all components
    ///
    /// Under [`ClearPolicy::Reset`] the running maximum duration also
    /// drops to zero; under [`ClearPolicy::Preserve`] it is kept for the
    /// rest of the session.
    pub fn clear(&mut self) {
        self.components.clear();
        if self.clear_policy == ClearPolicy::Reset {
            self.max_duration_secs = 0;
        }
    }

    /// Enable or disable retention of padded per-component buffers
    ///
    /// Affects future `mix()` calls only; every mix re-renders all
    /// components, so there is no stale history to recompute.
    pub fn set_keep_component_buffers(&mut self, keep: bool) {
        self.keep_component_buffers = keep;
    }

    /// Whether per-component buffers are retained by `mix()`
    pub fn keeps_component_buffers(&self) -> bool {
        self.keep_component_buffers
    }

    /// Components currently in the mix, in add order
    pub fn components(&self) -> &[WaveComponent] {
        &self.components
    }

    /// Number of components currently in the mix
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when no components have been added (or after `clear`)
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Running maximum duration in seconds
    pub fn max_duration_secs(&self) -> u32 {
        self.max_duration_secs
    }

    /// Fixed sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Render and sum all components on the master timeline
    ///
    /// Returns `None` when the mixer is empty: there is nothing to
    /// render, and callers must not attempt playback or analysis.
    ///
    /// Each component renders at the mixer's sample rate; buffers
    /// shorter than the master length are right-padded with silence.
    /// Nothing is ever truncated - no component can outgrow
    /// `max_duration_secs` by construction. The result is deterministic:
    /// mixing twice with unchanged state is bit-identical.
    pub fn mix(&self) -> Option<MixOutput> {
        if self.components.is_empty() {
            return None;
        }

        let master_len = self.max_duration_secs as usize * self.sample_rate as usize;
        let rate = self.sample_rate as f64;
        let time_axis: Vec<f32> = (0..master_len).map(|i| (i as f64 / rate) as f32).collect();

        let mut aggregate = vec![0.0f32; master_len];
        let mut retained: Option<Vec<Vec<f32>>> = if self.keep_component_buffers {
            Some(Vec::with_capacity(self.components.len()))
        } else {
            None
        };

        for component in &self.components {
            let mut buffer = component.render(self.sample_rate);
            debug_assert!(buffer.len() <= master_len);
            buffer.resize(master_len, 0.0);

            for (acc, s) in aggregate.iter_mut().zip(buffer.iter()) {
                *acc += s;
            }
            if let Some(parts) = retained.as_mut() {
                parts.push(buffer);
            }
        }

        Some(MixOutput {
            time_axis,
            aggregate,
            components: retained,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
