//! SPIDriver device implementation
//!
//! This module provides the main `SpiDriver` struct that implements the
//! bridge's command protocol on top of a [`Transport`].

use crate::error::{Result, SpiDriverError};
use crate::protocol::*;
use crate::transport::Transport;

/// Rounds of the `@\r\n` parser-flush preamble sent at connect
const FLUSH_ROUNDS: usize = 64;

/// Maximum drain attempts before the device is considered stuck
const DRAIN_ROUNDS: usize = 64;

/// SPIDriver bridge handle
///
/// Created via [`SpiDriver::new`], which performs the connect handshake:
/// parser flush, input drain, echo probes, status query.
pub struct SpiDriver<T: Transport> {
    transport: T,
    status: Status,
}

impl<T: Transport> SpiDriver<T> {
    /// Connect to the bridge over the given transport
    pub fn new(mut transport: T) -> Result<Self> {
        // Bring the device's command parser to a known state. The device
        // treats '@', CR and LF as no-ops in every parser state.
        let mut preamble = [0u8; FLUSH_ROUNDS * 3];
        for chunk in preamble.chunks_exact_mut(3) {
            chunk.copy_from_slice(&[CMD_NOP, b'\r', b'\n']);
        }
        transport.write(&preamble)?;
        transport.flush()?;

        // Drain whatever the device had queued for us
        let mut scratch = [0u8; 256];
        let mut drained = false;
        for _ in 0..DRAIN_ROUNDS {
            if transport.read_nonblock(&mut scratch, 50)? == 0 {
                drained = true;
                break;
            }
        }
        if !drained {
            log::error!("spidriver: device keeps streaming data, giving up");
            return Err(SpiDriverError::HandshakeFailed);
        }

        // Echo probes confirm the link is byte-clean in both directions
        for &probe in &ECHO_PROBES {
            transport.write(&[CMD_ECHO, probe])?;
            let mut back = [0u8];
            transport.read(&mut back)?;
            if back[0] != probe {
                return Err(SpiDriverError::EchoMismatch {
                    sent: probe,
                    received: back[0],
                });
            }
        }
        log::debug!("spidriver: echo probes OK");

        transport.write(&[CMD_STATUS])?;
        let mut raw = [0u8; STATUS_LEN];
        transport.read(&mut raw)?;
        let status = Status::parse(&raw)?;

        log::info!(
            "spidriver: connected to {} (serial {}), {:.2} V, up {} s",
            status.product,
            status.serial,
            status.voltage_v,
            status.uptime_secs
        );

        Ok(Self { transport, status })
    }

    /// Status captured during the connect handshake
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Clock out `data` over SPI
    ///
    /// The stream is split into bursts of up to 64 bytes, each preceded by
    /// its count-encoded header byte. Empty input writes nothing.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        for burst in data.chunks(MAX_BURST_LEN) {
            self.transport.write(&[burst_header(burst.len())])?;
            self.transport.write(burst)?;
        }
        self.transport.flush()?;
        log::trace!(
            "spidriver: wrote {} bytes in {} bursts",
            data.len(),
            data.len().div_ceil(MAX_BURST_LEN)
        );
        Ok(())
    }

    /// Assert chip-select (drive CS low)
    pub fn sel(&mut self) -> Result<()> {
        self.transport.write(&[CMD_SEL])?;
        self.transport.flush()?;
        log::debug!("spidriver: chip select asserted");
        Ok(())
    }

    /// Deassert chip-select (release CS high)
    pub fn unsel(&mut self) -> Result<()> {
        self.transport.write(&[CMD_UNSEL])?;
        self.transport.flush()?;
        log::debug!("spidriver: chip select released");
        Ok(())
    }
}
