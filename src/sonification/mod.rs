// src/sonification/mod.rs

//! Turns measured bitstrings into chords and lays chords out on a timeline.
//!
//! Every `'1'` in a bitstring sounds one scale degree above the base pitch;
//! the qubit position picks the degree. A [`PlaybackSchedule`] holds tasks at
//! absolute offsets from the start of playback and shares a single
//! [`CancellationToken`] among all of them: cancelling the schedule silences
//! every task at once, there is no per-task unwinding.

mod schedule;

pub use schedule::{CancellationToken, PlaybackSchedule, ScheduledTask};

use crate::core::{Bitstring, DEFAULT_BASE_HZ};
use crate::distribution::DistributionTable;
use crate::sampling::WeightedSampler;
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// Scale used to map qubit positions to pitches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scale {
    /// Major pentatonic: 0, 2, 4, 7, 9 semitones.
    #[default]
    Pentatonic,
    /// Major: 0, 2, 4, 5, 7, 9, 11 semitones.
    Major,
    /// Every semitone.
    Chromatic,
}

impl Scale {
    fn steps(&self) -> &'static [u32] {
        match self {
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// Semitones above the root for scale degree `degree`, wrapping into
    /// higher octaves.
    pub fn semitones(&self, degree: usize) -> u32 {
        let steps = self.steps();
        let octave = (degree / steps.len()) as u32;
        octave * 12 + steps[degree % steps.len()]
    }
}

/// Pitch and timing settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SonificationConfig {
    /// Frequency of scale degree 0.
    pub base_hz: f64,
    pub scale: Scale,
    /// How long each chord sounds.
    pub note_duration: Duration,
    /// Silence between consecutive chords.
    pub gap: Duration,
}

impl Default for SonificationConfig {
    fn default() -> Self {
        Self {
            base_hz: DEFAULT_BASE_HZ,
            scale: Scale::default(),
            note_duration: Duration::from_millis(400),
            gap: Duration::from_millis(100),
        }
    }
}

/// One oscillator voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f64,
    /// Linear gain in `[0, 1]`.
    pub amplitude: f64,
}

/// A set of tones sounded together. Empty for the all-zero bitstring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chord {
    pub tones: Vec<Tone>,
}

impl Chord {
    pub fn is_silent(&self) -> bool {
        self.tones.is_empty()
    }

    /// Sum of tone amplitudes.
    pub fn loudness(&self) -> f64 {
        self.tones.iter().map(|t| t.amplitude).sum()
    }

    /// Multiplies every amplitude by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for tone in &mut self.tones {
            tone.amplitude *= factor;
        }
        self
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tones.is_empty() {
            return write!(f, "(rest)");
        }
        let parts: Vec<String> = self
            .tones
            .iter()
            .map(|t| format!("{:.1}Hz@{:.2}", t.frequency_hz, t.amplitude))
            .collect();
        write!(f, "{}", parts.join(" + "))
    }
}

/// Chord for one bitstring: a tone per set bit, bit 0 (leftmost) on scale
/// degree 0. Amplitudes are `1/k` for `k` set bits so every chord has unit
/// loudness.
pub fn chord_for(bits: &Bitstring, config: &SonificationConfig) -> Chord {
    let set = bits.count_ones();
    if set == 0 {
        return Chord::default();
    }
    let amplitude = 1.0 / set as f64;
    let tones = bits
        .bits()
        .enumerate()
        .filter(|(_, on)| *on)
        .map(|(position, _)| Tone {
            frequency_hz: config.base_hz * 2f64.powf(config.scale.semitones(position) as f64 / 12.0),
            amplitude,
        })
        .collect();
    Chord { tones }
}

/// One chord per table entry, scaled so the most frequent outcome is
/// loudest (factor `count / max_count`).
pub fn chords_from_distribution(table: &DistributionTable, config: &SonificationConfig) -> Vec<(Bitstring, Chord)> {
    let max_count = table.weights().max().unwrap_or(0).max(1) as f64;
    table
        .entries()
        .iter()
        .map(|(key, count)| (key.clone(), chord_for(key, config).scaled(*count as f64 / max_count)))
        .collect()
}

/// Draws `ticks` samples from `sampler` and schedules one chord per draw,
/// back to back.
pub fn sonify_samples<R: Rng + ?Sized>(
    sampler: &WeightedSampler<'_>,
    ticks: usize,
    config: &SonificationConfig,
    rng: &mut R,
) -> PlaybackSchedule {
    let chords = (0..ticks).map(|_| chord_for(sampler.sample(rng).key(), config));
    PlaybackSchedule::sequence(chords, config)
}
