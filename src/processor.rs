use crate::errors::AppError;
use crate::model::ContactInfo;
use crate::sound::{play_or_warn, AlertPlayer};
use chrono::Local;
use log::{debug, trace};
use regex::bytes::Regex;
use std::io::Write;
use std::net::SocketAddr;

pub const TRIGGER_MARKER: &str = "  *** MULT → SOUND ***";

/// What happened to one datagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// No `<contactinfo>` marker; nothing printed.
    Ignored,
    Logged,
    Triggered,
}

pub struct DatagramProcessor {
    marker: Regex,
    player: Box<dyn AlertPlayer>,
}

#[inline]
fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

impl DatagramProcessor {
    pub fn new(player: Box<dyn AlertPlayer>) -> Result<Self, AppError> {
        let marker = Regex::new(r"(?i-u)<contactinfo>")
            .map_err(|e| AppError::Config(format!("marker regex: {}", e)))?;
        Ok(Self { marker, player })
    }

    pub fn player(&self) -> &dyn AlertPlayer {
        self.player.as_ref()
    }

    /// Inspects one datagram and writes its summary line to `out`.
    ///
    /// Datagrams without `<contactinfo>` (any case) are dropped before any
    /// field is looked at. When the record is a new QSO with a multiplier the
    /// marker is written and flushed, the alert plays, then the line ends.
    pub fn process<W: Write>(
        &mut self,
        out: &mut W,
        datagram: &[u8],
        src: SocketAddr,
    ) -> Result<Disposition, AppError> {
        if !self.marker.is_match(datagram) {
            trace!("ignoring {} bytes from {}: no <contactinfo>", datagram.len(), src);
            return Ok(Disposition::Ignored);
        }

        let info = ContactInfo::from_document(datagram);
        debug!("contactinfo from {}: {:?}", src, info);

        let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(
            out,
            "[{}] PKT from {:<15} call={:<8} band={:<3} mode={:<3} mult1={:<2}  mult2={:<2}  mult3={:<2} newqso={:<5}",
            ts,
            src.ip().to_string(),
            or_dash(&info.call),
            or_dash(&info.band),
            or_dash(&info.mode),
            or_dash(&info.mult1),
            or_dash(&info.mult2),
            or_dash(&info.mult3),
            or_dash(&info.newqso),
        )?;

        let disposition = if info.is_trigger() {
            out.write_all(TRIGGER_MARKER.as_bytes())?;
            out.flush()?;
            play_or_warn(self.player.as_mut());
            Disposition::Triggered
        } else {
            Disposition::Logged
        };

        writeln!(out)?;
        out.flush()?;
        Ok(disposition)
    }
}
