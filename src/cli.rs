//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spisend")]
#[command(author, version, about = "Send a binary file over an SPIDriver SPI bridge", long_about = None)]
pub struct Cli {
    /// Serial port of the SPIDriver bridge (e.g. /dev/ttyUSB0 or COM3)
    pub device: String,

    /// Binary file to transmit
    pub file: PathBuf,

    /// Serial baud rate
    #[arg(short, long, default_value_t = spisend_spidriver::DEFAULT_BAUD)]
    pub baud: u32,

    /// Suppress the transfer progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_and_file() {
        let cli = Cli::try_parse_from(["spisend", "/dev/ttyUSB0", "image.bin"]).unwrap();
        assert_eq!(cli.device, "/dev/ttyUSB0");
        assert_eq!(cli.file, PathBuf::from("image.bin"));
        assert_eq!(cli.baud, spisend_spidriver::DEFAULT_BAUD);
        assert!(!cli.quiet);
    }

    #[test]
    fn rejects_missing_file_argument() {
        assert!(Cli::try_parse_from(["spisend", "/dev/ttyUSB0"]).is_err());
    }

    #[test]
    fn rejects_no_arguments() {
        assert!(Cli::try_parse_from(["spisend"]).is_err());
    }

    #[test]
    fn rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["spisend", "/dev/ttyUSB0", "a.bin", "b.bin"]).is_err());
    }

    #[test]
    fn accepts_baud_override() {
        let cli = Cli::try_parse_from(["spisend", "-b", "115200", "COM3", "image.bin"]).unwrap();
        assert_eq!(cli.baud, 115_200);
    }
}
