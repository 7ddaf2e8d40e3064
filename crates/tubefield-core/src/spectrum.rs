use crate::playback::PlaybackSnapshot;

/// Fixed-length array of synthetic "frequency" samples in the [0, 1] range.
///
/// Nothing here is measured: every sample is a deterministic function of the
/// playback time and volume fed to [`SignalGenerator::update`].
#[derive(Clone, Debug, PartialEq)]
pub struct PseudoSpectrum {
    samples: Vec<f32>,
}

impl PseudoSpectrum {
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, or 0 when the index is out of range.
    #[inline]
    pub fn sample(&self, index: usize) -> f32 {
        self.samples.get(index).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Mean amplitude; 0 for an empty spectrum.
    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    pub(crate) fn release(&mut self) {
        self.samples = Vec::new();
    }
}

/// Owns the pseudo-spectrum and rewrites it from playback snapshots.
#[derive(Clone, Debug)]
pub struct SignalGenerator {
    spectrum: PseudoSpectrum,
    updates: u64,
}

impl SignalGenerator {
    pub fn new(len: usize) -> Self {
        Self {
            spectrum: PseudoSpectrum::new(len),
            updates: 0,
        }
    }

    pub fn spectrum(&self) -> &PseudoSpectrum {
        &self.spectrum
    }

    /// Number of snapshots that actually rewrote the spectrum.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Rewrite the spectrum in place. Returns `false` (and leaves every
    /// sample untouched) while paused or when the snapshot carries
    /// non-finite readings.
    pub fn update(&mut self, snapshot: &PlaybackSnapshot) -> bool {
        if !snapshot.is_playing {
            return false;
        }
        if !snapshot.current_time_seconds.is_finite() || !snapshot.volume_fraction.is_finite() {
            log::debug!("[spectrum] ignoring non-finite snapshot {:?}", snapshot);
            return false;
        }
        fill_spectrum(
            &mut self.spectrum.samples,
            snapshot.current_time_seconds,
            snapshot.volume_fraction.clamp(0.0, 1.0),
        );
        self.updates += 1;
        true
    }

    pub(crate) fn release(&mut self) {
        self.spectrum.release();
    }
}

/// Pure sample formula. `samples.len()` is K.
pub fn fill_spectrum(samples: &mut [f32], time_sec: f64, volume_fraction: f32) {
    let k = samples.len() as f64;
    for (i, out) in samples.iter_mut().enumerate() {
        let i = i as f64;
        let frequency_factor = i / k;
        let amplitude = (time_sec * (frequency_factor + 1.0) * 5.0).sin().abs();
        let carrier = (time_sec * 2.0 + i * 0.1).sin() * 0.5 + 0.5;
        *out = (carrier * amplitude) as f32 * volume_fraction;
    }
}
