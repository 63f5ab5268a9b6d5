//! spisend - send a binary file to an SPI device through an SPIDriver bridge
//!
//! One-shot forwarding tool: open the bridge, read the file, clock the
//! bytes out over SPI, release chip-select, clock out 49 zero bytes, and
//! assert chip-select again. Any failure aborts with exit code 1.

mod cli;
mod commands;

use clap::error::ErrorKind;
use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Bad invocation: print clap's usage text but keep the same
            // exit code as runtime failures
            let _ = e.print();
            std::process::exit(1);
        }
    };

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Read the image before touching the port: a missing file must not
    // cause any device traffic.
    let data = std::fs::read(&cli.file)
        .map_err(|e| format!("could not read {}: {}", cli.file.display(), e))?;
    log::debug!("Read {} bytes from {}", data.len(), cli.file.display());

    let mut driver = spisend_spidriver::open_serial(&cli.device, Some(cli.baud))?;

    commands::send::run_send(&mut driver, &data, &cli.file, &cli.device, cli.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_fails_before_any_device_access() {
        let cli = Cli {
            device: "/dev/tty-no-such-port".into(),
            file: PathBuf::from("/no/such/image.bin"),
            baud: spisend_spidriver::DEFAULT_BAUD,
            quiet: true,
            verbose: 0,
        };

        // The file is read before the port is opened, so the failure names
        // the file rather than the (equally bogus) device.
        let err = run(&cli).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("could not read"), "unexpected error: {msg}");
        assert!(msg.contains("/no/such/image.bin"), "unexpected error: {msg}");
    }
}
