//! Error types for SPIDriver operations

use thiserror::Error;

/// SPIDriver-specific errors
#[derive(Debug, Error)]
pub enum SpiDriverError {
    /// Failed to connect to the bridge
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Bridge never reached a known command-parser state
    #[error("Device handshake failed")]
    HandshakeFailed,

    /// Echo probe byte came back wrong
    #[error("Echo probe mismatch: sent 0x{sent:02X}, received 0x{received:02X}")]
    EchoMismatch { sent: u8, received: u8 },

    /// Status report could not be parsed
    #[error("Malformed status report: {0}")]
    BadStatus(String),

    /// I/O error during communication
    #[error("I/O error: {0}")]
    Io(String),

    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

/// Result type for SPIDriver operations
pub type Result<T> = core::result::Result<T, SpiDriverError>;

impl From<std::io::Error> for SpiDriverError {
    fn from(e: std::io::Error) -> Self {
        SpiDriverError::Io(e.to_string())
    }
}
