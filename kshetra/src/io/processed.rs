//! ProcessedBag persistence.
//!
//! ```text
//! [magic "KPRB":4][version:u16 LE][reserved:2][postcard ProcessedBag]
//! ```

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{KshetraError, Result};
use crate::pipeline::ProcessedBag;

/// Magic bytes at start of a processed bag file.
pub const PROCESSED_MAGIC: [u8; 4] = *b"KPRB";

/// Current processed bag format version.
pub const PROCESSED_VERSION: u16 = 1;

const PREFIX_SIZE: usize = 8;

/// `<save_dir>/<bag>/<bag>.processed`
pub fn processed_path(save_dir: &Path, bag_name: &str) -> PathBuf {
    save_dir.join(bag_name).join(format!("{}.processed", bag_name))
}

/// Write `bag` under `save_dir`, creating its directory. Returns the file path.
pub fn save_processed(bag: &ProcessedBag, save_dir: &Path) -> Result<PathBuf> {
    let path = processed_path(save_dir, bag.bag_name());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_processed(bag, &path)?;
    log::info!("Saved processed bag to {}", path.display());
    Ok(path)
}

/// Write `bag` to exactly `path`.
pub fn write_processed(bag: &ProcessedBag, path: &Path) -> Result<()> {
    let body = postcard::to_allocvec(bag)?;

    let mut prefix = [0u8; PREFIX_SIZE];
    prefix[..4].copy_from_slice(&PROCESSED_MAGIC);
    prefix[4..6].copy_from_slice(&PROCESSED_VERSION.to_le_bytes());

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&prefix)?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Read a processed bag file.
pub fn load_processed(path: &Path) -> Result<ProcessedBag> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut prefix = [0u8; PREFIX_SIZE];
    reader.read_exact(&mut prefix)?;

    if prefix[..4] != PROCESSED_MAGIC {
        return Err(KshetraError::Serialize(format!(
            "{} is not a processed bag file",
            path.display()
        )));
    }
    let version = u16::from_le_bytes([prefix[4], prefix[5]]);
    if version != PROCESSED_VERSION {
        return Err(KshetraError::Serialize(format!(
            "unsupported processed bag version {} (expected {})",
            version, PROCESSED_VERSION
        )));
    }

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    Ok(postcard::from_bytes(&body)?)
}
