//! Send command implementation

use indicatif::{ProgressBar, ProgressStyle};
use spisend_spidriver::{SpiDriver, SpiDriverError, Transport};
use std::path::Path;

/// Chunk size for progress reporting; a multiple of the bridge's 64-byte
/// burst length, so chunking never changes the framed byte stream
const SEND_CHUNK_SIZE: usize = 4096;

/// Zero bytes clocked out after the image with chip-select released
const PAD_LEN: usize = 49;

/// Run the send sequence: image bytes, unsel, zero padding, sel
pub fn run_send<T: Transport>(
    driver: &mut SpiDriver<T>,
    data: &[u8],
    input: &Path,
    device: &str,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    write_with_progress(driver, data, quiet)?;
    println!(
        "Successfully wrote {} bytes from {} to {}",
        data.len(),
        input.display(),
        device
    );

    driver.unsel()?;
    driver.write(&[0u8; PAD_LEN])?;
    driver.sel()?;
    println!("Successfully wrote {PAD_LEN} padding bytes to the SPI device");

    Ok(())
}

/// Write the image with a progress bar
///
/// The bridge runs at 460800 baud, so multi-megabyte images take long
/// enough to be worth a bar. Small transfers stay silent.
fn write_with_progress<T: Transport>(
    driver: &mut SpiDriver<T>,
    data: &[u8],
    quiet: bool,
) -> Result<(), SpiDriverError> {
    let pb = if quiet || data.len() < SEND_CHUNK_SIZE {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(data.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    };

    for chunk in data.chunks(SEND_CHUNK_SIZE) {
        driver.write(chunk)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(())
}
