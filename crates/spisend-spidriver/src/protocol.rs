//! SPIDriver protocol constants and types
//!
//! The SPIDriver bridge speaks single-byte ASCII commands over a fixed-rate
//! serial link. Commands that carry no payload get no reply; the echo and
//! status commands reply inline.

use crate::error::{Result, SpiDriverError};

/// Echo probe: the device repeats the byte that follows
pub const CMD_ECHO: u8 = b'e';
/// Status query: the device replies with an 80-byte bracketed report
pub const CMD_STATUS: u8 = b'?';
/// Assert chip-select (drive CS low)
pub const CMD_SEL: u8 = b's';
/// Deassert chip-select (release CS high)
pub const CMD_UNSEL: u8 = b'u';
/// No-operation, used to flush the device's command parser
pub const CMD_NOP: u8 = b'@';

/// Burst header base: header byte is `BURST_BASE + (len - 1)`
pub const BURST_BASE: u8 = 0xC0;
/// Maximum payload bytes in a single burst
pub const MAX_BURST_LEN: usize = 64;

/// Length of the raw status report in bytes
pub const STATUS_LEN: usize = 80;

/// Bytes echoed during the connect handshake
pub const ECHO_PROBES: [u8; 3] = [0x55, 0x00, 0xFF];

/// Encode the header byte for a burst of `len` payload bytes
///
/// `len` must be in `1..=MAX_BURST_LEN`.
pub fn burst_header(len: usize) -> u8 {
    debug_assert!((1..=MAX_BURST_LEN).contains(&len));
    BURST_BASE + (len - 1) as u8
}

/// Device self-report returned by the status query
///
/// The raw report is an 80-byte ASCII record of the form
/// `[product serial uptime voltage current temp a b cs crc ]`,
/// padded with spaces or NULs to its fixed length.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    /// Product tag, e.g. "spidriver2"
    pub product: String,
    /// Device serial number
    pub serial: String,
    /// Seconds since the bridge powered up
    pub uptime_secs: u64,
    /// USB supply voltage in volts
    pub voltage_v: f32,
    /// Current draw in milliamps
    pub current_ma: f32,
    /// Board temperature in degrees Celsius
    pub temp_c: f32,
    /// Auxiliary pin A level
    pub pin_a: u8,
    /// Auxiliary pin B level
    pub pin_b: u8,
    /// Chip-select line level (active low)
    pub cs: u8,
    /// Running CCITT CRC of all transmitted data
    pub crc: u16,
}

impl Status {
    /// Parse a raw status report
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let text = core::str::from_utf8(raw)
            .map_err(|_| SpiDriverError::BadStatus("report is not valid UTF-8".into()))?;
        let text = text.trim_end_matches(['\0', ' ', '\r', '\n']);

        let inner = text
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| SpiDriverError::BadStatus(format!("report not bracketed: {text:?}")))?;

        let fields: Vec<&str> = inner.split_whitespace().collect();
        if fields.len() != 10 {
            return Err(SpiDriverError::BadStatus(format!(
                "expected 10 fields, got {}",
                fields.len()
            )));
        }

        Ok(Status {
            product: fields[0].to_string(),
            serial: fields[1].to_string(),
            uptime_secs: field("uptime", fields[2])?,
            voltage_v: field("voltage", fields[3])?,
            current_ma: field("current", fields[4])?,
            temp_c: field("temperature", fields[5])?,
            pin_a: field("pin A", fields[6])?,
            pin_b: field("pin B", fields[7])?,
            cs: field("chip-select", fields[8])?,
            crc: u16::from_str_radix(fields[9], 16)
                .map_err(|_| SpiDriverError::BadStatus(format!("bad crc field: {:?}", fields[9])))?,
        })
    }
}

/// Parse one numeric status field, naming it in the error
fn field<T: core::str::FromStr>(name: &str, s: &str) -> Result<T> {
    s.parse()
        .map_err(|_| SpiDriverError::BadStatus(format!("bad {name} field: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report(body: &str) -> Vec<u8> {
        let mut raw = body.as_bytes().to_vec();
        raw.resize(STATUS_LEN, b' ');
        raw
    }

    #[test]
    fn burst_header_encoding() {
        assert_eq!(burst_header(1), 0xC0);
        assert_eq!(burst_header(2), 0xC1);
        assert_eq!(burst_header(64), 0xFF);
    }

    #[test]
    fn parse_status_report() {
        let raw = make_report("[spidriver2 SD1A2B3C 296 4.971 23.5 28.1 1 1 1 01a4 ]");
        let status = Status::parse(&raw).unwrap();
        assert_eq!(status.product, "spidriver2");
        assert_eq!(status.serial, "SD1A2B3C");
        assert_eq!(status.uptime_secs, 296);
        assert!((status.voltage_v - 4.971).abs() < 0.001);
        assert!((status.current_ma - 23.5).abs() < 0.001);
        assert!((status.temp_c - 28.1).abs() < 0.001);
        assert_eq!(status.pin_a, 1);
        assert_eq!(status.pin_b, 1);
        assert_eq!(status.cs, 1);
        assert_eq!(status.crc, 0x01A4);
    }

    #[test]
    fn parse_status_nul_padding() {
        let mut raw = b"[spidriver2 SD1A2B3C 0 5.0 0 25.0 0 0 1 0000 ]".to_vec();
        raw.resize(STATUS_LEN, 0);
        let status = Status::parse(&raw).unwrap();
        assert_eq!(status.uptime_secs, 0);
        assert_eq!(status.crc, 0);
    }

    #[test]
    fn parse_status_rejects_unbracketed() {
        let raw = make_report("spidriver2 SD1A2B3C 296 4.971 23.5 28.1 1 1 1 01a4");
        assert!(matches!(
            Status::parse(&raw),
            Err(SpiDriverError::BadStatus(_))
        ));
    }

    #[test]
    fn parse_status_rejects_wrong_field_count() {
        let raw = make_report("[spidriver2 SD1A2B3C 296 ]");
        assert!(matches!(
            Status::parse(&raw),
            Err(SpiDriverError::BadStatus(_))
        ));
    }

    #[test]
    fn parse_status_rejects_bad_number() {
        let raw = make_report("[spidriver2 SD1A2B3C xyz 4.971 23.5 28.1 1 1 1 01a4 ]");
        assert!(matches!(
            Status::parse(&raw),
            Err(SpiDriverError::BadStatus(_))
        ));
    }
}
