use crate::errors::AppError;
use crate::tone::{self, ToneParams};
use log::{debug, warn};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub trait AlertPlayer {
    fn play_alert(&mut self) -> Result<(), AppError>;
    /// One-line description for the startup banner.
    fn describe(&self) -> String;
}

/// Plays and swallows any failure as a warning; the caller never sees it.
pub fn play_or_warn(player: &mut dyn AlertPlayer) {
    if let Err(e) = player.play_alert() {
        warn!("alert playback skipped: {}", e);
    }
}

/// External program plus its fixed leading arguments.
#[derive(Clone, Debug)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command(&self) -> Command {
        let mut c = Command::new(&self.program);
        c.args(&self.args);
        c
    }
}

/// Fires `<program> -q <file>` and returns without waiting.
pub struct AssetPlayer {
    command: PlayerCommand,
    file: PathBuf,
    running: Vec<Child>,
}

impl AssetPlayer {
    pub fn new(program: &str, file: PathBuf) -> Self {
        Self::with_command(PlayerCommand::new(program, ["-q"]), file)
    }

    pub fn with_command(command: PlayerCommand, file: PathBuf) -> Self {
        Self { command, file, running: Vec::new() }
    }

    /// Collects players that have exited so they do not linger as zombies.
    fn reap(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    warn!("{} returned error ({})", self.command.program, status);
                }
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!("waiting on {}: {}", self.command.program, e);
                false
            }
        });
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.running.len()
    }
}

impl AlertPlayer for AssetPlayer {
    fn play_alert(&mut self) -> Result<(), AppError> {
        self.reap();
        let child = self
            .command
            .command()
            .arg(&self.file)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| AppError::Audio(format!("spawn {}: {}", self.command.program, e)))?;
        debug!("spawned {} pid={} for {}", self.command.program, child.id(), self.file.display());
        self.running.push(child);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("WAV file via {} ({})", self.command.program, self.file.display())
    }
}

/// Synthesizes the tone and streams raw PCM to the player's stdin, then waits.
pub struct PipedTonePlayer {
    command: PlayerCommand,
    tone: ToneParams,
}

impl PipedTonePlayer {
    pub fn new(program: &str, tone: ToneParams) -> Self {
        let rate = tone.sample_rate.to_string();
        let args = ["-q", "-t", "raw", "-f", "S16_LE", "-r", rate.as_str(), "-c", "1"];
        Self::with_command(PlayerCommand::new(program, args), tone)
    }

    pub fn with_command(command: PlayerCommand, tone: ToneParams) -> Self {
        Self { command, tone }
    }
}

impl AlertPlayer for PipedTonePlayer {
    fn play_alert(&mut self) -> Result<(), AppError> {
        let pcm = tone::to_le_bytes(&tone::generate(&self.tone));
        let mut child = self
            .command
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::Audio(format!("spawn {}: {}", self.command.program, e)))?;

        // stdin must be closed before waiting or the player never sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&pcm),
            None => Ok(()),
        };
        let status = child
            .wait()
            .map_err(|e| AppError::Audio(format!("wait {}: {}", self.command.program, e)))?;

        written.map_err(|e| AppError::Audio(format!("pipe to {}: {}", self.command.program, e)))?;
        if !status.success() {
            return Err(AppError::Audio(format!("{} returned error ({})", self.command.program, status)));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("synthesised tone via {} (no file needed)", self.command.program)
    }
}

#[cfg(feature = "device")]
pub use device::DeviceTonePlayer;

#[cfg(feature = "device")]
mod device {
    use super::AlertPlayer;
    use crate::errors::AppError;
    use crate::tone::{self, ToneParams};
    use log::debug;
    use rodio::cpal::traits::{DeviceTrait, HostTrait};
    use rodio::{OutputStream, OutputStreamBuilder, Sink};
    use rodio::buffer::SamplesBuffer;

    /// Writes the tone straight to an audio output device and blocks until drained.
    pub struct DeviceTonePlayer {
        device: String,
        tone: ToneParams,
    }

    impl DeviceTonePlayer {
        pub fn new(device: &str, tone: ToneParams) -> Self {
            Self { device: device.to_string(), tone }
        }

        fn open(&self) -> Result<OutputStream, AppError> {
            if self.device == "default" {
                return OutputStreamBuilder::open_default_stream()
                    .map_err(|e| AppError::Audio(format!("open default device: {}", e)));
            }
            let host = rodio::cpal::default_host();
            let devices = host
                .output_devices()
                .map_err(|e| AppError::Audio(format!("list output devices: {}", e)))?;
            for dev in devices {
                if dev.name().map(|n| n == self.device).unwrap_or(false) {
                    return OutputStreamBuilder::from_device(dev)
                        .and_then(|b| b.open_stream())
                        .map_err(|e| AppError::Audio(format!("open {}: {}", self.device, e)));
                }
            }
            Err(AppError::Audio(format!("no output device named {:?}", self.device)))
        }
    }

    impl AlertPlayer for DeviceTonePlayer {
        fn play_alert(&mut self) -> Result<(), AppError> {
            let mut stream = self.open()?;
            stream.log_on_drop(false);

            let samples: Vec<f32> = tone::generate(&self.tone)
                .into_iter()
                .map(|s| s as f32 / 32768.0)
                .collect();
            debug!("writing {} samples to {}", samples.len(), self.device);

            let sink = Sink::connect_new(stream.mixer());
            sink.append(SamplesBuffer::new(1, self.tone.sample_rate, samples));
            sink.sleep_until_end();
            Ok(())
        }

        fn describe(&self) -> String {
            format!("synthesised tone via audio device {:?}", self.device)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::SAMPLE_RATE;
    use std::time::{Duration, Instant};

    fn short_tone() -> ToneParams {
        ToneParams { freq_hz: 440, duration_ms: 50, volume: 0.5, sample_rate: SAMPLE_RATE }
    }

    #[test]
    fn test_asset_player_spawns_and_reaps() {
        let dir = tempfile::tempdir().unwrap();
        let wav = dir.path().join("bell.wav");
        std::fs::write(&wav, b"RIFF").unwrap();

        let mut p = AssetPlayer::with_command(PlayerCommand::new("true", Vec::<String>::new()), wav);
        p.play_alert().expect("spawn true");
        assert_eq!(p.in_flight(), 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while p.in_flight() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            p.reap();
        }
        assert_eq!(p.in_flight(), 0);
    }

    #[test]
    fn test_asset_player_missing_program_is_error() {
        let mut p = AssetPlayer::new("no-such-player-xyz", PathBuf::from("./handbell.wav"));
        assert!(matches!(p.play_alert(), Err(AppError::Audio(_))));
        // swallowed by the wrapper
        play_or_warn(&mut p);
    }

    #[test]
    fn test_piped_player_streams_whole_tone() {
        let tone = short_tone();
        let expected = tone.num_samples() * 2;
        let script = format!("test $(wc -c) -eq {}", expected);
        let mut p = PipedTonePlayer::with_command(PlayerCommand::new("sh", ["-c", script.as_str()]), tone);
        p.play_alert().expect("player should receive every byte");
    }

    #[test]
    fn test_piped_player_failure_is_error() {
        let mut p = PipedTonePlayer::with_command(PlayerCommand::new("false", Vec::<String>::new()), short_tone());
        assert!(p.play_alert().is_err());
    }

    #[test]
    fn test_piped_player_args() {
        let p = PipedTonePlayer::new("aplay", short_tone());
        assert_eq!(p.command.args.join(" "), "-q -t raw -f S16_LE -r 44100 -c 1");
        assert!(p.describe().contains("aplay"));
    }

    #[test]
    fn test_describe_asset() {
        let p = AssetPlayer::new("aplay", PathBuf::from("./handbell.wav"));
        assert_eq!(p.describe(), "WAV file via aplay (./handbell.wav)");
    }
}
