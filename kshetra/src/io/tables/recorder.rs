//! Tables file writer.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::Result;
use super::types::{HEADER_SIZE, TABLES_MAGIC, TABLES_VERSION, TableRecord, TablesHeader, TablesInfo};

/// Writes extracted samples to a tables file.
///
/// Records are length-prefixed postcard payloads following a 64-byte header
/// that is filled in by [`TablesRecorder::finish`].
///
/// # Example
///
/// ```ignore
/// use kshetra::io::tables::{TableRecord, TablesRecorder};
///
/// let mut recorder = TablesRecorder::create("run_01.tables")?;
/// recorder.record(&TableRecord::new("sim", "all_robot_positions", 0.0, vec![10.0, 20.0, 0.0]))?;
/// let info = recorder.finish()?;
/// println!("Wrote {} records", info.record_count);
/// ```
pub struct TablesRecorder {
    writer: BufWriter<File>,
    path: PathBuf,
    record_count: u64,
    topics: BTreeSet<(String, String)>,
    first_timestamp: Option<f64>,
    last_timestamp: f64,
}

impl TablesRecorder {
    /// Create the file and reserve header space.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&[0u8; HEADER_SIZE])?;

        Ok(Self {
            writer,
            path,
            record_count: 0,
            topics: BTreeSet::new(),
            first_timestamp: None,
            last_timestamp: 0.0,
        })
    }

    /// Append one record.
    pub fn record(&mut self, record: &TableRecord) -> Result<()> {
        let t = record.timestamp;
        // Records need not arrive in time order
        self.first_timestamp = Some(self.first_timestamp.map_or(t, |f| f.min(t)));
        self.last_timestamp = if self.record_count == 0 {
            t
        } else {
            self.last_timestamp.max(t)
        };

        let bytes = postcard::to_allocvec(record)?;
        let len = bytes.len() as u32;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;

        self.topics
            .insert((record.namespace.clone(), record.topic.clone()));
        self.record_count += 1;
        Ok(())
    }

    /// Append a sequence of `(timestamp, values)` samples on one topic.
    pub fn record_topic<I>(&mut self, namespace: &str, topic: &str, samples: I) -> Result<()>
    where
        I: IntoIterator<Item = (f64, Vec<f64>)>,
    {
        for (timestamp, values) in samples {
            self.record(&TableRecord::new(namespace, topic, timestamp, values))?;
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Write the final header and close the file.
    pub fn finish(mut self) -> Result<TablesInfo> {
        self.writer.flush()?;
        let file_size = self.writer.stream_position()?;
        self.writer.seek(SeekFrom::Start(0))?;

        let header = TablesHeader {
            magic: TABLES_MAGIC,
            version: TABLES_VERSION,
            flags: 0,
            first_timestamp: self.first_timestamp.unwrap_or(0.0),
            last_timestamp: self.last_timestamp,
            record_count: self.record_count,
            reserved: [0; 16],
        };
        let header_bytes = postcard::to_allocvec(&header)?;
        let mut header_buffer = [0u8; HEADER_SIZE];
        let copy_len = header_bytes.len().min(HEADER_SIZE);
        header_buffer[..copy_len].copy_from_slice(&header_bytes[..copy_len]);
        self.writer.write_all(&header_buffer)?;
        self.writer.flush()?;

        let info = TablesInfo {
            path: self.path,
            record_count: self.record_count,
            topic_count: self.topics.len(),
            file_size_bytes: file_size,
        };
        log::info!(
            "Wrote {} records on {} topics to {} ({:.2} MB)",
            info.record_count,
            info.topic_count,
            info.path.display(),
            info.file_size_mb()
        );
        Ok(info)
    }
}
