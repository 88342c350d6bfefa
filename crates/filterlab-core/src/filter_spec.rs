//! Shared Filter Specification
//!
//! The single source of truth the views read from: transfer-function
//! coefficients, sample rate, display range, frequency unit, plus the phase
//! axis label/unit that the phase view publishes for its sibling views.
//! The owning window hands every view the same [`SharedFilterSpec`]; locks
//! are held only for the few reads or writes a repaint needs.
//!
//! Filters enter the application as named presets with precomputed
//! coefficients. Designing coefficients from a specification (cutoff, ripple,
//! order) is a separate concern and deliberately absent here.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::phase::PhaseUnit;
use crate::response::DisplayRange;

/// Filter implementation class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterClass {
    /// Finite impulse response, denominator is just [1]
    Fir,
    /// Infinite impulse response, feedback taps present
    Iir,
}

impl FilterClass {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            FilterClass::Fir => "FIR",
            FilterClass::Iir => "IIR",
        }
    }
}

/// Frequency-domain behavior of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseKind {
    #[default]
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
    Allpass,
}

impl ResponseKind {
    /// Abbreviated name for compact labels
    pub fn short_name(&self) -> &'static str {
        match self {
            ResponseKind::Lowpass => "LP",
            ResponseKind::Highpass => "HP",
            ResponseKind::Bandpass => "BP",
            ResponseKind::Bandstop => "BS",
            ResponseKind::Allpass => "AP",
        }
    }

    /// Full name
    pub fn name(&self) -> &'static str {
        match self {
            ResponseKind::Lowpass => "Lowpass",
            ResponseKind::Highpass => "Highpass",
            ResponseKind::Bandpass => "Bandpass",
            ResponseKind::Bandstop => "Bandstop",
            ResponseKind::Allpass => "Allpass",
        }
    }
}

/// Display unit for the shared frequency axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FreqUnit {
    #[default]
    Hz,
    KHz,
    MHz,
    /// Frequencies divided by the sample rate, axis 0..1
    Normalized,
}

impl FreqUnit {
    /// Short name for combo boxes
    pub fn name(&self) -> &'static str {
        match self {
            FreqUnit::Hz => "Hz",
            FreqUnit::KHz => "kHz",
            FreqUnit::MHz => "MHz",
            FreqUnit::Normalized => "f/fS",
        }
    }

    /// X-axis label for the response plots
    pub fn axis_label(&self) -> &'static str {
        match self {
            FreqUnit::Hz => "Frequency (Hz)",
            FreqUnit::KHz => "Frequency (kHz)",
            FreqUnit::MHz => "Frequency (MHz)",
            FreqUnit::Normalized => "Normalized Frequency (f/fS)",
        }
    }

    /// Divisor mapping a frequency in Hz onto this unit's axis
    pub fn divisor(&self, sample_rate: f64) -> f64 {
        match self {
            FreqUnit::Hz => 1.0,
            FreqUnit::KHz => 1e3,
            FreqUnit::MHz => 1e6,
            FreqUnit::Normalized => sample_rate,
        }
    }

    /// All variants, in combo-box order
    pub const ALL: [FreqUnit; 4] = [
        FreqUnit::Hz,
        FreqUnit::KHz,
        FreqUnit::MHz,
        FreqUnit::Normalized,
    ];
}

/// A named, precomputed coefficient set.
#[derive(Debug, Clone, Copy)]
pub struct FilterPreset {
    pub name: &'static str,
    pub class: FilterClass,
    pub kind: ResponseKind,
    pub b: &'static [f64],
    pub a: &'static [f64],
}

// Biquad constants: RBJ cookbook sections at f_c = 0.1 fs, Q = 1/sqrt(2),
// normalized so a[0] = 1.
const BIQUAD_LP_B: [f64; 3] = [0.06745527388907189, 0.13491054777814377, 0.06745527388907189];
const BIQUAD_HP_B: [f64; 3] = [0.6389423264300367, -1.2778846528600735, 0.6389423264300367];
const BIQUAD_A: [f64; 3] = [1.0, -1.1429805025399011, 0.4128015980961886];
const BIQUAD_AP_B: [f64; 3] = [0.4128015980961886, -1.1429805025399011, 1.0];

const MA5_B: [f64; 5] = [0.2, 0.2, 0.2, 0.2, 0.2];
const FIR_A: [f64; 1] = [1.0];

const PRESETS: [FilterPreset; 4] = [
    FilterPreset {
        name: "Moving Average (5 taps)",
        class: FilterClass::Fir,
        kind: ResponseKind::Lowpass,
        b: &MA5_B,
        a: &FIR_A,
    },
    FilterPreset {
        name: "Biquad Lowpass",
        class: FilterClass::Iir,
        kind: ResponseKind::Lowpass,
        b: &BIQUAD_LP_B,
        a: &BIQUAD_A,
    },
    FilterPreset {
        name: "Biquad Highpass",
        class: FilterClass::Iir,
        kind: ResponseKind::Highpass,
        b: &BIQUAD_HP_B,
        a: &BIQUAD_A,
    },
    FilterPreset {
        name: "Biquad Allpass",
        class: FilterClass::Iir,
        kind: ResponseKind::Allpass,
        b: &BIQUAD_AP_B,
        a: &BIQUAD_A,
    },
];

/// Built-in filter presets, in menu order.
pub fn presets() -> &'static [FilterPreset] {
    &PRESETS
}

/// Everything the views need to know about the current filter and how to
/// display it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Display name of the loaded filter
    pub name: String,
    pub class: FilterClass,
    pub kind: ResponseKind,
    /// Numerator (feedforward) coefficients
    pub b: Vec<f64>,
    /// Denominator (feedback) coefficients, a[0] = 1
    pub a: Vec<f64>,
    /// Linear gain applied to the numerator
    pub gain: f64,
    /// Sample rate f_S in Hz
    pub sample_rate: f64,
    /// Which part of the frequency axis the plots show
    pub display_range: DisplayRange,
    /// Unit of the shared frequency axis
    pub freq_unit: FreqUnit,
    /// Phase axis label, written by the phase view for its siblings
    pub phase_label: String,
    /// Phase unit, written by the phase view for its siblings
    pub phase_unit: PhaseUnit,
}

impl Default for FilterSpec {
    fn default() -> Self {
        let mut spec = Self {
            name: String::new(),
            class: FilterClass::Fir,
            kind: ResponseKind::Lowpass,
            b: Vec::new(),
            a: Vec::new(),
            gain: 1.0,
            sample_rate: 48_000.0,
            display_range: DisplayRange::Half,
            freq_unit: FreqUnit::Hz,
            phase_label: PhaseUnit::Rad.axis_label().to_string(),
            phase_unit: PhaseUnit::Rad,
        };
        spec.apply_preset(&PRESETS[0]);
        spec
    }
}

impl FilterSpec {
    /// Load a preset's coefficients, keeping the display state (sample rate,
    /// range, units) the user already chose. The gain resets to unity.
    pub fn apply_preset(&mut self, preset: &FilterPreset) {
        self.name = preset.name.to_string();
        self.class = preset.class;
        self.kind = preset.kind;
        self.b = preset.b.to_vec();
        self.a = preset.a.to_vec();
        self.gain = 1.0;
    }

    /// Numerator with the gain folded in.
    pub fn numerator(&self) -> Vec<f64> {
        self.b.iter().map(|&x| x * self.gain).collect()
    }

    /// Denominator coefficients.
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// X-axis label for the current frequency unit.
    pub fn freq_label(&self) -> &'static str {
        self.freq_unit.axis_label()
    }

    /// Divisor mapping Hz onto the current frequency unit.
    pub fn freq_divisor(&self) -> f64 {
        self.freq_unit.divisor(self.sample_rate)
    }

    /// Displayed x-axis span for the current range mode, in the current unit.
    pub fn freq_span(&self) -> (f64, f64) {
        let (lo, hi) = self.display_range.span(self.sample_rate);
        let div = self.freq_divisor();
        (lo / div, hi / div)
    }
}

/// The spec as shared between the window and its views.
pub type SharedFilterSpec = Arc<RwLock<FilterSpec>>;

/// Wrap a spec for sharing.
pub fn shared(spec: FilterSpec) -> SharedFilterSpec {
    Arc::new(RwLock::new(spec))
}
