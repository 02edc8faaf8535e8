use crate::cli::CliArgs;
use crate::errors::AppError;
use crate::sound::{AlertPlayer, AssetPlayer, PipedTonePlayer};
use crate::tone::{SAMPLE_RATE, ToneParams};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub enum SoundStrategy {
    /// Detached external player on a fixed sound file.
    Wav { file: PathBuf },
    /// Synthesized tone piped into the external player.
    Beep(ToneParams),
    /// Synthesized tone written to an audio output device.
    Alsa { device: String, tone: ToneParams },
}

impl SoundStrategy {
    pub fn tone(&self) -> Option<&ToneParams> {
        match self {
            SoundStrategy::Wav { .. } => None,
            SoundStrategy::Beep(t) => Some(t),
            SoundStrategy::Alsa { tone, .. } => Some(tone),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub sound: SoundStrategy,
    pub player: String,
}

impl Config {
    pub fn from_cli(args: &CliArgs) -> Result<Self, AppError> {
        if !(0.0..=1.0).contains(&args.volume) {
            return Err(AppError::Config(format!("volume {} outside 0.0-1.0", args.volume)));
        }
        if args.freq == 0 {
            return Err(AppError::Config("tone frequency must be > 0".into()));
        }
        if args.player.trim().is_empty() {
            return Err(AppError::Config("player program is empty".into()));
        }

        let tone = ToneParams {
            freq_hz: args.freq,
            duration_ms: args.duration,
            volume: args.volume,
            sample_rate: SAMPLE_RATE,
        };
        let sound = match args.sound.to_ascii_lowercase().as_str() {
            "wav" => SoundStrategy::Wav { file: args.wav_file.clone() },
            "beep" => SoundStrategy::Beep(tone),
            "alsa" => SoundStrategy::Alsa { device: args.device.clone(), tone },
            other => {
                return Err(AppError::Config(format!("unknown sound mode {:?} (wav|beep|alsa)", other)));
            }
        };

        Ok(Self { port: args.port, sound, player: args.player.clone() })
    }

    pub fn build_player(&self) -> Result<Box<dyn AlertPlayer>, AppError> {
        match &self.sound {
            SoundStrategy::Wav { file } => Ok(Box::new(AssetPlayer::new(&self.player, file.clone()))),
            SoundStrategy::Beep(tone) => Ok(Box::new(PipedTonePlayer::new(&self.player, *tone))),
            #[cfg(feature = "device")]
            SoundStrategy::Alsa { device, tone } => {
                Ok(Box::new(crate::sound::DeviceTonePlayer::new(device, *tone)))
            }
            #[cfg(not(feature = "device"))]
            SoundStrategy::Alsa { .. } => Err(AppError::Config(
                "alsa mode needs a build with the `device` feature".into(),
            )),
        }
    }
}
