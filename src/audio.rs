//! Sound effects, synthesized with fundsp and played through rodio.
//!
//! Every sound is a short one-shot: the unit graph is rendered to a sample
//! buffer up front and handed to the output stream fire-and-forget. All
//! gain envelopes end at zero so the buffers cut off cleanly. A machine
//! with no audio device gets a silent game, not a crash.

use fundsp::prelude32::*;
use log::warn;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle};

const SAMPLE_RATE: u32 = 44_100;

pub struct Audio {
    // The stream must stay alive for queued sounds to keep playing.
    device: Option<(OutputStream, OutputStreamHandle)>,
}

impl Audio {
    /// Open the default output device. `mute` skips the device entirely;
    /// a missing device downgrades to silence with a logged warning.
    pub fn open(mute: bool) -> Audio {
        if mute {
            return Audio { device: None };
        }
        match OutputStream::try_default() {
            Ok(pair) => Audio { device: Some(pair) },
            Err(err) => {
                warn!("no audio device, continuing silent: {err}");
                Audio { device: None }
            }
        }
    }

    /// Short rising chirp for a flap.
    pub fn flap(&self) {
        self.play(flap_chirp(), 0.1);
    }

    /// Bright two-step blip when a pair is cleared.
    pub fn score(&self) {
        self.play(score_blip(), 0.12);
    }

    /// Falling saw sweep on collision.
    pub fn death(&self) {
        self.play(death_sweep(), 0.5);
    }

    fn play(&self, mut unit: Box<dyn AudioUnit>, seconds: f32) {
        let Some((_, handle)) = &self.device else {
            return;
        };
        let samples = render(unit.as_mut(), seconds);
        if let Err(err) = handle.play_raw(SamplesBuffer::new(1, SAMPLE_RATE, samples)) {
            warn!("sound dropped: {err}");
        }
    }
}

fn flap_chirp() -> Box<dyn AudioUnit> {
    let freq = lfo(|t: f32| lerp(500.0, 880.0, (t / 0.08).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.12, 0.0, (t / 0.1).min(1.0)));
    Box::new((freq >> sine()) * gain)
}

fn score_blip() -> Box<dyn AudioUnit> {
    let freq = lfo(|t: f32| if t < 0.05 { 1046.0 } else { 1318.0 });
    let gain = lfo(|t: f32| lerp(0.1, 0.0, (t / 0.12).min(1.0)));
    Box::new((freq >> sine()) * gain)
}

fn death_sweep() -> Box<dyn AudioUnit> {
    let freq = lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
    let gain = lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
    Box::new((freq >> saw()) * gain)
}

fn render(unit: &mut dyn AudioUnit, seconds: f32) -> Vec<f32> {
    let frames = (SAMPLE_RATE as f32 * seconds) as usize;
    let mut samples = Vec::with_capacity(frames);
    for _ in 0..frames {
        samples.push(unit.get_mono());
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects() -> [(Box<dyn AudioUnit>, f32); 3] {
        [
            (flap_chirp(), 0.1),
            (score_blip(), 0.12),
            (death_sweep(), 0.5),
        ]
    }

    #[test]
    fn effects_render_bounded_finite_samples() {
        for (mut unit, seconds) in effects() {
            let samples = render(unit.as_mut(), seconds);
            assert_eq!(samples.len(), (SAMPLE_RATE as f32 * seconds) as usize);
            assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
            assert!(
                samples.iter().any(|s| s.abs() > 0.01),
                "effect rendered silence"
            );
        }
    }

    #[test]
    fn envelopes_end_silent() {
        for (mut unit, seconds) in effects() {
            let samples = render(unit.as_mut(), seconds);
            let tail = samples.last().copied().unwrap_or(1.0);
            assert!(tail.abs() < 1e-3, "tail sample {tail} would click");
        }
    }

    #[test]
    fn mute_skips_playback() {
        let audio = Audio::open(true);
        audio.flap();
        audio.score();
        audio.death();
    }
}
