use argparse::{ArgumentParser, Store};
use std::path::PathBuf;

pub const LISTEN_PORT: u16 = 12060;
pub const WAV_FILE: &str = "./handbell.wav";
pub const BEEP_FREQ_HZ: u32 = 880;
pub const BEEP_DURATION_MS: u32 = 400;
pub const BEEP_VOLUME: f64 = 0.6;
pub const AUDIO_DEVICE: &str = "default";
pub const PLAYER: &str = "aplay";

pub struct CliArgs {
    pub port: u16,
    pub sound: String,
    pub wav_file: PathBuf,
    pub freq: u32,
    pub duration: u32,
    pub volume: f64,
    pub device: String,
    pub player: String,
    pub log_level: String,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            port: LISTEN_PORT,
            sound: "wav".into(),
            wav_file: PathBuf::from(WAV_FILE),
            freq: BEEP_FREQ_HZ,
            duration: BEEP_DURATION_MS,
            volume: BEEP_VOLUME,
            device: AUDIO_DEVICE.into(),
            player: PLAYER.into(),
            log_level: "essential".into(),
        }
    }
}

pub fn parse_cli() -> CliArgs {
    let mut args = CliArgs::default();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("DXLog multiplier listener: beeps on new QSOs that carry a multiplier");
        ap.refer(&mut args.port)
            .add_option(&["-p", "--port"], Store, "UDP port to listen on");
        ap.refer(&mut args.sound)
            .add_option(&["-s", "--sound"], Store, "Sound: wav|beep|alsa");
        ap.refer(&mut args.wav_file)
            .add_option(&["--wav-file"], Store, "WAV file played in wav mode");
        ap.refer(&mut args.freq)
            .add_option(&["--freq"], Store, "Tone frequency (Hz)");
        ap.refer(&mut args.duration)
            .add_option(&["--duration"], Store, "Tone duration (ms)");
        ap.refer(&mut args.volume)
            .add_option(&["--volume"], Store, "Tone volume 0.0-1.0");
        ap.refer(&mut args.device)
            .add_option(&["--device"], Store, "Audio output device for alsa mode");
        ap.refer(&mut args.player)
            .add_option(&["--player"], Store, "External player program");
        ap.refer(&mut args.log_level)
            .add_option(&["--log"], Store, "Log level (essential|debug|trace|warn|error)");
        ap.parse_args_or_exit();
    }
    args
}
