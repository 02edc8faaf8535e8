use std::f64::consts::PI;

pub const SAMPLE_RATE: u32 = 44100;

/// Parameters of the synthesized alert beep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneParams {
    pub freq_hz: u32,
    pub duration_ms: u32,
    /// 0.0 – 1.0
    pub volume: f64,
    pub sample_rate: u32,
}

impl ToneParams {
    pub fn num_samples(&self) -> usize {
        (self.sample_rate as u64 * self.duration_ms as u64 / 1000) as usize
    }

    /// Linear ramp length at each end, 20 ms.
    pub fn fade_len(&self) -> usize {
        (self.sample_rate / 50) as usize
    }
}

/// Mono signed 16-bit sine tone with a linear fade in and out.
pub fn generate(params: &ToneParams) -> Vec<i16> {
    let n = params.num_samples();
    let fadelen = params.fade_len();
    let rate = params.sample_rate as f64;

    (0..n)
        .map(|i| {
            let fade = if fadelen == 0 {
                1.0
            } else if i < fadelen {
                i as f64 / fadelen as f64
            } else if i + fadelen > n {
                (n - i) as f64 / fadelen as f64
            } else {
                1.0
            };
            let t = i as f64 / rate;
            let s = params.volume * fade * (2.0 * PI * params.freq_hz as f64 * t).sin();
            (s * 32767.0).round() as i16
        })
        .collect()
}

/// Raw S16_LE byte stream, as fed to `aplay -t raw -f S16_LE`.
pub fn to_le_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beep() -> ToneParams {
        ToneParams { freq_hz: 880, duration_ms: 400, volume: 0.6, sample_rate: SAMPLE_RATE }
    }

    #[test]
    fn test_length_and_fade_len() {
        let p = beep();
        assert_eq!(p.num_samples(), 17640);
        assert_eq!(p.fade_len(), 882);
        assert_eq!(generate(&p).len(), 17640);
    }

    #[test]
    fn test_deterministic() {
        let a = generate(&beep());
        let b = generate(&beep());
        assert_eq!(a, b);
        assert_eq!(to_le_bytes(&a), to_le_bytes(&b));
    }

    #[test]
    fn test_starts_silent_and_stays_within_volume() {
        let p = beep();
        let s = generate(&p);
        assert_eq!(s[0], 0);
        let limit = (p.volume * 32767.0).round() as i32;
        assert!(s.iter().all(|v| (*v as i32).abs() <= limit));
        let peak = s.iter().map(|v| (*v as i32).abs()).max().unwrap();
        assert!(peak > limit - 50, "peak {} too far below {}", peak, limit);
    }

    #[test]
    fn test_fade_edges_are_quiet() {
        let p = beep();
        let s = generate(&p);
        let n = s.len();
        let edge = 10;
        let loud = (p.volume * 32767.0 * 10.0 / p.fade_len() as f64).ceil() as i32;
        assert!(s[..edge].iter().all(|v| (*v as i32).abs() <= loud));
        assert!(s[n - edge..].iter().all(|v| (*v as i32).abs() <= loud));
    }

    #[test]
    fn test_sample_matches_formula() {
        let p = beep();
        let s = generate(&p);
        let i = 5000;
        let t = i as f64 / 44100.0;
        let expected = (0.6 * (2.0 * PI * 880.0 * t).sin() * 32767.0).round() as i16;
        assert_eq!(s[i], expected);
    }

    #[test]
    fn test_zero_volume_is_silence() {
        let p = ToneParams { volume: 0.0, ..beep() };
        assert!(generate(&p).iter().all(|v| *v == 0));
    }

    #[test]
    fn test_short_tone_with_overlapping_fades() {
        let p = ToneParams { duration_ms: 10, ..beep() };
        let s = generate(&p);
        assert_eq!(s.len(), 441);
        assert!(s.iter().all(|v| (*v as i32).abs() <= 32767));
        assert!(generate(&ToneParams { duration_ms: 0, ..beep() }).is_empty());
    }

    #[test]
    fn test_le_bytes_layout() {
        assert_eq!(to_le_bytes(&[1, -2, 0x1234]), vec![0x01, 0x00, 0xFE, 0xFF, 0x34, 0x12]);
    }
}
