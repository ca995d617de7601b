//! Energy-based speech endpointing
//!
//! Decides when an utterance has finished: the capture loop feeds fixed-size
//! windows of samples through [`SpeechGate`], which waits for enough
//! above-threshold energy and then for a run of trailing silence. The gate
//! is pure state over RMS values so it can be tested without a device.

/// Root-mean-square energy of a sample window.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Derive the speech-energy threshold from a measured ambient level.
///
/// The threshold scales with the ambient RMS so the gate adapts to the room,
/// with a floor so a dead-quiet room does not trigger on numeric noise.
pub fn derive_threshold(ambient_rms: f32, margin: f32, floor: f32) -> f32 {
    (ambient_rms * margin).max(floor)
}

/// Gate state after observing a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No speech heard yet.
    AwaitingSpeech,
    /// Speech in progress.
    InSpeech,
    /// Utterance complete: speech followed by the required trailing silence.
    Complete,
}

/// End-of-speech detector over per-window RMS values.
pub struct SpeechGate {
    threshold: f32,
    min_speech_windows: usize,
    close_silence_windows: usize,
    speech_windows: usize,
    silence_run: usize,
    state: GateState,
}

impl SpeechGate {
    /// Create a gate.
    ///
    /// * `threshold` - RMS level separating speech from silence.
    /// * `min_speech_windows` - windows of speech required before trailing
    ///   silence may close the utterance (filters out clicks).
    /// * `close_silence_windows` - consecutive silent windows that end it.
    pub fn new(threshold: f32, min_speech_windows: usize, close_silence_windows: usize) -> Self {
        Self {
            threshold,
            min_speech_windows: min_speech_windows.max(1),
            close_silence_windows: close_silence_windows.max(1),
            speech_windows: 0,
            silence_run: 0,
            state: GateState::AwaitingSpeech,
        }
    }

    /// Feed one window's RMS and return the updated state.
    pub fn observe(&mut self, window_rms: f32) -> GateState {
        if self.state == GateState::Complete {
            return self.state;
        }

        let is_speech = window_rms >= self.threshold;

        match self.state {
            GateState::AwaitingSpeech => {
                if is_speech {
                    self.speech_windows = 1;
                    self.silence_run = 0;
                    self.state = GateState::InSpeech;
                }
            }
            GateState::InSpeech => {
                if is_speech {
                    self.speech_windows += 1;
                    self.silence_run = 0;
                } else {
                    self.silence_run += 1;
                    if self.silence_run >= self.close_silence_windows
                        && self.speech_windows >= self.min_speech_windows
                    {
                        self.state = GateState::Complete;
                    }
                }
            }
            GateState::Complete => {}
        }

        self.state
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Reset for the next utterance.
    pub fn reset(&mut self) {
        self.speech_windows = 0;
        self.silence_run = 0;
        self.state = GateState::AwaitingSpeech;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rms_of_silence_is_zero() {
        assert_relative_eq!(rms(&[0.0; 160]), 0.0);
        assert_relative_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn rms_of_constant_signal() {
        assert_relative_eq!(rms(&[0.5; 64]), 0.5, epsilon = 1e-6);
        assert_relative_eq!(rms(&[-0.25; 64]), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn threshold_scales_with_ambient_level() {
        assert_relative_eq!(derive_threshold(0.02, 2.0, 0.01), 0.04, epsilon = 1e-6);
    }

    #[test]
    fn threshold_respects_floor_in_quiet_rooms() {
        assert_relative_eq!(derive_threshold(0.001, 2.0, 0.01), 0.01, epsilon = 1e-6);
    }

    #[test]
    fn gate_completes_after_speech_then_silence() {
        let mut gate = SpeechGate::new(0.1, 2, 3);

        assert_eq!(gate.observe(0.01), GateState::AwaitingSpeech);
        assert_eq!(gate.observe(0.5), GateState::InSpeech);
        assert_eq!(gate.observe(0.4), GateState::InSpeech);
        assert_eq!(gate.observe(0.02), GateState::InSpeech);
        assert_eq!(gate.observe(0.02), GateState::InSpeech);
        assert_eq!(gate.observe(0.02), GateState::Complete);
    }

    #[test]
    fn short_blip_does_not_close_the_gate() {
        // One speech window with min_speech_windows = 2: trailing silence
        // must not complete the utterance.
        let mut gate = SpeechGate::new(0.1, 2, 2);
        gate.observe(0.5);
        gate.observe(0.01);
        assert_eq!(gate.observe(0.01), GateState::InSpeech);
    }

    #[test]
    fn silence_run_resets_when_speech_resumes() {
        let mut gate = SpeechGate::new(0.1, 1, 3);
        gate.observe(0.5);
        gate.observe(0.01);
        gate.observe(0.01);
        // Speech resumes before the third silent window.
        assert_eq!(gate.observe(0.6), GateState::InSpeech);
        gate.observe(0.01);
        gate.observe(0.01);
        assert_eq!(gate.observe(0.01), GateState::Complete);
    }

    #[test]
    fn complete_state_is_terminal_until_reset() {
        let mut gate = SpeechGate::new(0.1, 1, 1);
        gate.observe(0.5);
        assert_eq!(gate.observe(0.0), GateState::Complete);
        assert_eq!(gate.observe(0.9), GateState::Complete);

        gate.reset();
        assert_eq!(gate.state(), GateState::AwaitingSpeech);
    }
}
