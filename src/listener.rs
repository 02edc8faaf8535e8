use crate::config::Config;
use crate::errors::AppError;
use crate::processor::DatagramProcessor;
use log::{error, info, trace};
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

const MAX_DATAGRAM: usize = 65535;

/// Owns the bound socket and the receive buffer reused for every datagram.
pub struct Listener {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl Listener {
    /// Binds `0.0.0.0:port` with SO_REUSEADDR.
    pub fn bind(port: u16) -> Result<Self, AppError> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(|e| AppError::Socket(format!("socket: {}", e)))?;
        socket
            .set_reuse_address(true)
            .map_err(|e| AppError::Socket(format!("SO_REUSEADDR: {}", e)))?;

        let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port));
        socket
            .bind(&addr.into())
            .map_err(|e| AppError::Socket(format!("bind {}: {}", addr, e)))?;

        Ok(Self { socket: socket.into(), buf: vec![0u8; MAX_DATAGRAM] })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, AppError> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocks for one datagram and runs it through `processor`.
    /// Receive and write failures are logged; the caller just keeps going.
    pub fn receive_once<W: Write>(&mut self, processor: &mut DatagramProcessor, out: &mut W) {
        let (n, src) = match self.socket.recv_from(&mut self.buf) {
            Ok(v) => v,
            Err(e) => {
                error!("recvfrom: {}", e);
                return;
            }
        };
        trace!("{} bytes from {}", n, src);
        if let Err(e) = processor.process(out, &self.buf[..n], src) {
            error!("datagram from {}: {}", src, e);
        }
    }

    /// Serves forever; only process termination stops it.
    pub fn run<W: Write>(&mut self, processor: &mut DatagramProcessor, out: &mut W) -> ! {
        info!("entering receive loop on {:?}", self.socket.local_addr().ok());
        loop {
            self.receive_once(processor, out);
        }
    }
}

pub fn write_banner<W: Write>(out: &mut W, cfg: &Config, processor: &DatagramProcessor) -> io::Result<()> {
    writeln!(out, "=== DXLog Multiplier Listener ===")?;
    writeln!(out, "Port      : UDP {}", cfg.port)?;
    writeln!(out, "Trigger   : mult1/mult2/mult3 non-empty AND newqso=true")?;
    writeln!(out, "Sound     : {}", processor.player().describe())?;
    if let Some(t) = cfg.sound.tone() {
        writeln!(
            out,
            "Tone      : {} Hz, {} ms, volume {:.0}%",
            t.freq_hz,
            t.duration_ms,
            t.volume * 100.0
        )?;
    }
    writeln!(out)?;
    out.flush()
}

pub fn write_listening<W: Write>(out: &mut W, port: u16) -> io::Result<()> {
    writeln!(out, "Listening on 0.0.0.0:{} …\n", port)?;
    out.flush()
}
