//! spisend-spidriver - SPIDriver bridge protocol support
//!
//! This crate implements the serial protocol spoken by SPIDriver-style
//! USB-to-SPI bridge adapters.
//!
//! # Protocol Overview
//!
//! The bridge accepts single-byte ASCII commands over a 460800-baud serial
//! link: `e` echoes a probe byte, `?` returns an 80-byte status report,
//! `s`/`u` assert/release chip-select, and data is clocked out in bursts of
//! up to 64 bytes framed by a count-encoded header byte.
//!
//! # Example
//!
//! ```no_run
//! use spisend_spidriver::{SerialTransport, SpiDriver};
//!
//! let transport = SerialTransport::open("/dev/ttyUSB0", None)?;
//! let mut driver = SpiDriver::new(transport)?;
//!
//! driver.write(&[0xDE, 0xAD, 0xBE, 0xEF])?;
//! driver.unsel()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod device;
pub mod error;
pub mod protocol;
pub mod transport;

// Re-exports
pub use device::SpiDriver;
pub use error::{Result, SpiDriverError};
pub use protocol::Status;
pub use transport::serial::SerialTransport;
pub use transport::{Transport, DEFAULT_BAUD};

/// Open a bridge connected via serial port
pub fn open_serial(device: &str, baud: Option<u32>) -> Result<SpiDriver<SerialTransport>> {
    let transport = SerialTransport::open(device, baud)?;
    SpiDriver::new(transport)
}
