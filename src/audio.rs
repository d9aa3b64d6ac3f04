//! Audio cues
//!
//! Every sound in the game is a short sine tone with an exponential fade.
//! Tones are synthesized once at startup into in-memory WAV files and handed
//! to macroquad's audio backend, which works the same on native and WASM.
//!
//! The simulation never touches audio. The host maps drained game events to
//! `AudioCue`s and fires them at an `AudioSink`.

use std::collections::HashMap;
use macroquad::audio::{load_sound_from_bytes, play_sound_once, Sound};

/// Sample rate for synthesized tones
pub const SAMPLE_RATE: u32 = 44100;

/// Gain at the start of every tone
const START_GAIN: f32 = 0.3;
/// Gain the tone fades down to by its end
const END_GAIN: f32 = 0.01;

/// Fire-and-forget sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Jump,
    Dash,
    Collectible,
    LevelComplete,
    Damage,
}

impl AudioCue {
    pub const ALL: [AudioCue; 5] = [
        AudioCue::Jump,
        AudioCue::Dash,
        AudioCue::Collectible,
        AudioCue::LevelComplete,
        AudioCue::Damage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::Jump => "jump",
            AudioCue::Dash => "dash",
            AudioCue::Collectible => "collectible",
            AudioCue::LevelComplete => "levelComplete",
            AudioCue::Damage => "damage",
        }
    }

    /// Tone pitch in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            AudioCue::Jump => 400.0,
            AudioCue::Dash => 600.0,
            AudioCue::Collectible => 800.0,
            AudioCue::LevelComplete => 1000.0,
            AudioCue::Damage => 200.0,
        }
    }

    /// Tone length in seconds
    pub fn duration(&self) -> f32 {
        match self {
            AudioCue::Jump | AudioCue::Dash => 0.1,
            AudioCue::Collectible => 0.2,
            AudioCue::LevelComplete => 0.5,
            AudioCue::Damage => 0.3,
        }
    }
}

/// Anything that can play cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

// =============================================================================
// Synthesis
// =============================================================================

/// Sine tone with the fade applied, as 16-bit samples
pub fn tone_samples(frequency: f32, duration: f32) -> Vec<i16> {
    let count = (SAMPLE_RATE as f32 * duration.max(0.0)).round() as usize;
    let ratio = END_GAIN / START_GAIN;

    (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let progress = if duration > 0.0 { t / duration } else { 1.0 };
            let gain = START_GAIN * ratio.powf(progress);
            let value = (std::f32::consts::TAU * frequency * t).sin() * gain;
            (value * i16::MAX as f32) as i16
        })
        .collect()
}

/// Encode mono 16-bit samples as a PCM WAV file
pub fn encode_wav(samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = SAMPLE_RATE * 2;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Complete WAV file for a cue
pub fn synthesize_wav(cue: AudioCue) -> Vec<u8> {
    encode_wav(&tone_samples(cue.frequency(), cue.duration()))
}

// =============================================================================
// macroquad backend
// =============================================================================

/// Plays cues through macroquad. Cues that failed to load are skipped.
pub struct GameAudio {
    sounds: HashMap<AudioCue, Sound>,
    pub enabled: bool,
}

impl GameAudio {
    /// Synthesize and upload every cue
    pub async fn load() -> Self {
        let mut sounds = HashMap::new();
        for cue in AudioCue::ALL {
            match load_sound_from_bytes(&synthesize_wav(cue)).await {
                Ok(sound) => {
                    sounds.insert(cue, sound);
                }
                Err(e) => tracing::warn!("Audio cue {} unavailable: {:?}", cue.name(), e),
            }
        }
        tracing::info!("Loaded {}/{} audio cues", sounds.len(), AudioCue::ALL.len());
        Self { sounds, enabled: true }
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

impl AudioSink for GameAudio {
    fn play(&mut self, cue: AudioCue) {
        if !self.enabled {
            return;
        }
        if let Some(sound) = self.sounds.get(&cue) {
            play_sound_once(sound);
        }
    }
}
