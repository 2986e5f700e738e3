use std::io::{self, Write};

use thiserror::Error;

use crate::config::RunHeader;
use crate::data::StdhepRecord;
use crate::xdr;

/// File format version written into the file header
pub const FORMAT_VERSION: &str = "2.00";
/// Version of the HEPEVT event block layout
pub const HEPEVT_VERSION: &str = "1.00";
/// Name of the only event block type
pub const HEPEVT_NAME: &str = "HEPEVT";

pub const BLOCK_FILE_HEADER: i32 = 1;
pub const BLOCK_HEPEVT: i32 = 101;
pub const BLOCK_END: i32 = 107;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(
        "Mismatch between NHEP and length of at least one of \
         ISTHEP, IDHEP, JMOHEP, JDAHEP, PHEP, VHEP in event {0}"
    )]
    MismatchedParticles(i32),
    #[error("Attempt to write more than the {declared} declared records")]
    TooManyRecords { declared: usize },
    #[error("Declared {declared} records, but only {written} were written")]
    MissingRecords { declared: usize, written: usize },
}

/// Writer for binary StdHep files
///
/// Every block starts with its ID and the length of the following payload
/// in bytes. The file header declares the number of event records, which
/// has to match the number of calls to [`write`](Writer::write).
#[derive(Debug)]
pub struct Writer<Stream: Write> {
    stream: Stream,
    declared: usize,
    written: usize,
    // payload buffer, reused between blocks
    block: Vec<u8>,
}

impl<Stream: Write> Writer<Stream> {
    /// Start a new StdHep file that will hold `record_count` events
    ///
    /// # Example
    ///
    /// ```rust
    /// use lhe2stdhep::{RunHeader, Writer};
    ///
    /// let mut output = Vec::new();
    /// let mut writer = Writer::new(&mut output, &RunHeader::default(), 0).unwrap();
    /// writer.finish().unwrap();
    /// ```
    pub fn new(
        stream: Stream,
        header: &RunHeader,
        record_count: usize,
    ) -> Result<Self, WriteError> {
        let mut writer = Self {
            stream,
            declared: record_count,
            written: 0,
            block: Vec::new(),
        };
        let count = i32::try_from(record_count).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "too many records")
        })?;
        let block = &mut writer.block;
        xdr::write_string(block, FORMAT_VERSION)?;
        xdr::write_string(block, &header.title)?;
        xdr::write_string(block, &header.comment)?;
        xdr::write_i32(block, count)?;
        xdr::write_i32(block, 1)?;
        xdr::write_i32(block, BLOCK_HEPEVT)?;
        xdr::write_string(block, HEPEVT_NAME)?;
        writer.flush_block(BLOCK_FILE_HEADER)?;
        Ok(writer)
    }

    fn flush_block(&mut self, id: i32) -> Result<(), io::Error> {
        xdr::write_i32(&mut self.stream, id)?;
        xdr::write_len(&mut self.stream, self.block.len())?;
        self.stream.write_all(&self.block)?;
        self.block.clear();
        Ok(())
    }

    /// Write the next event record
    pub fn write(&mut self, record: &StdhepRecord) -> Result<(), WriteError> {
        if !record.is_consistent() {
            return Err(WriteError::MismatchedParticles(record.NEVHEP));
        }
        if self.written == self.declared {
            return Err(WriteError::TooManyRecords {
                declared: self.declared,
            });
        }
        let block = &mut self.block;
        xdr::write_string(block, HEPEVT_VERSION)?;
        xdr::write_i32(block, record.NEVHEP)?;
        xdr::write_i32(block, record.NHEP)?;
        xdr::write_i32_array(block, &record.ISTHEP)?;
        xdr::write_i32_array(block, &record.IDHEP)?;
        xdr::write_i32_array(block, &record.JMOHEP)?;
        xdr::write_i32_array(block, &record.JDAHEP)?;
        xdr::write_f64_array(block, &record.PHEP)?;
        xdr::write_f64_array(block, &record.VHEP)?;
        self.flush_block(BLOCK_HEPEVT)?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Write the end block and flush the output
    pub fn finish(&mut self) -> Result<(), WriteError> {
        if self.written != self.declared {
            return Err(WriteError::MissingRecords {
                declared: self.declared,
                written: self.written,
            });
        }
        // `written` fits, it is bounded by the declared count
        xdr::write_i32(&mut self.block, self.written as i32)?;
        self.flush_block(BLOCK_END)?;
        self.stream.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, ByteOrder};

    fn record() -> StdhepRecord {
        StdhepRecord {
            NEVHEP: 3,
            NHEP: 2,
            ISTHEP: vec![3, 1],
            IDHEP: vec![11, 11],
            JMOHEP: vec![0, 0, 1, 1],
            JDAHEP: vec![0, 0, 0, 0],
            PHEP: vec![0., 0., 4., 4., 5.11e-4, 0.1, 0.2, 3.9, 3.91, 5.11e-4],
            VHEP: vec![1., 2., 0.1, 0., 1., 2., 0.1, 0.],
        }
    }

    #[test]
    fn write() {
        let mut output = Vec::new();
        {
            let mut writer =
                Writer::new(&mut output, &RunHeader::default(), 1).unwrap();
            writer.write(&record()).unwrap();
            assert_eq!(writer.written(), 1);
            writer.finish().unwrap();
        }
        assert_eq!(BigEndian::read_i32(&output[0..4]), BLOCK_FILE_HEADER);
        let header_len = BigEndian::read_i32(&output[4..8]) as usize;
        let event_start = 8 + header_len;
        assert_eq!(
            BigEndian::read_i32(&output[event_start..event_start + 4]),
            BLOCK_HEPEVT
        );
        let end = &output[output.len() - 12..];
        assert_eq!(BigEndian::read_i32(&end[0..4]), BLOCK_END);
        assert_eq!(BigEndian::read_i32(&end[4..8]), 4);
        assert_eq!(BigEndian::read_i32(&end[8..12]), 1);
    }

    #[test]
    fn record_count_is_enforced() {
        let header = RunHeader::default();
        let mut writer = Writer::new(io::sink(), &header, 1).unwrap();
        assert!(matches!(
            writer.finish(),
            Err(WriteError::MissingRecords { declared: 1, written: 0 })
        ));
        writer.write(&record()).unwrap();
        assert!(matches!(
            writer.write(&record()),
            Err(WriteError::TooManyRecords { declared: 1 })
        ));
        writer.finish().unwrap();
    }

    #[test]
    fn inconsistent_record() {
        let mut writer = Writer::new(io::sink(), &RunHeader::default(), 1).unwrap();
        let mut bad = record();
        bad.PHEP.pop();
        assert!(matches!(
            writer.write(&bad),
            Err(WriteError::MismatchedParticles(3))
        ));
        assert_eq!(writer.written(), 0);
    }
}
