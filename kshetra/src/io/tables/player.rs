//! Tables file reader.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use super::types::{HEADER_SIZE, MAX_RECORD_BYTES, TableRecord, TablesHeader};
use super::{Result, TablesError};

/// Sequential reader over a tables file.
pub struct TablesPlayer {
    reader: BufReader<File>,
    header: TablesHeader,
    records_read: u64,
}

impl TablesPlayer {
    /// Open a tables file and validate its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header_buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_buffer)?;

        let header: TablesHeader = postcard::from_bytes(&header_buffer).map_err(|e| {
            TablesError::InvalidFormat(format!("Failed to parse header: {}", e))
        })?;

        if !header.is_valid() {
            return Err(TablesError::InvalidFormat(
                "Invalid tables file magic bytes".to_string(),
            ));
        }

        Ok(Self {
            reader,
            header,
            records_read: 0,
        })
    }

    /// File header.
    pub fn header(&self) -> &TablesHeader {
        &self.header
    }

    /// Record count stored in the header.
    pub fn record_count(&self) -> u64 {
        self.header.record_count
    }

    /// Records read since open or the last rewind.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Read the next record, `None` at end of file.
    pub fn next_record(&mut self) -> Result<Option<TableRecord>> {
        let mut len_bytes = [0u8; 4];
        match self.reader.read_exact(&mut len_bytes) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_bytes) as usize;
        if len > MAX_RECORD_BYTES {
            return Err(TablesError::InvalidFormat(format!(
                "Record too large: {} bytes",
                len
            )));
        }

        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload)?;
        let record: TableRecord = postcard::from_bytes(&payload)?;

        self.records_read += 1;
        Ok(Some(record))
    }

    /// Reset to the first record.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        self.records_read = 0;
        Ok(())
    }
}

impl Iterator for TablesPlayer {
    type Item = Result<TableRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
