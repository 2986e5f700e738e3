use std::io::{self, Read};

use thiserror::Error;

use crate::config::RunHeader;
use crate::data::StdhepRecord;
use crate::writer::{
    BLOCK_END, BLOCK_FILE_HEADER, BLOCK_HEPEVT, FORMAT_VERSION, HEPEVT_NAME,
};
use crate::xdr;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Expected block {expected}, found {found}")]
    UnexpectedBlock { expected: i32, found: i32 },
    #[error("Unsupported format version '{0}'")]
    UnsupportedVersion(String),
    #[error("Unsupported block type {id} '{name}'")]
    UnsupportedBlockType { id: i32, name: String },
    #[error("Block {id} declares {declared} bytes, but {read} were read")]
    BadBlockLength { id: i32, declared: usize, read: usize },
    #[error("Inconsistent array lengths in event {0}")]
    MismatchedParticles(i32),
    #[error("File declares {declared} records, but contains {found}")]
    RecordCountMismatch { declared: usize, found: usize },
}

/// File header of a StdHep file
#[derive(Debug, Clone, PartialEq)]
pub struct FileHeader {
    pub run: RunHeader,
    pub record_count: usize,
}

/// Reader for binary StdHep files written by [`Writer`](crate::Writer)
#[derive(Debug)]
pub struct Reader<T> {
    stream: T,
    header: FileHeader,
    read: usize,
    done: bool,
}

impl<T: Read> Reader<T> {
    pub fn new(mut stream: T) -> Result<Self, ReadError> {
        let block = read_block(&mut stream, BLOCK_FILE_HEADER)?;
        let mut payload = block.as_slice();
        let version = xdr::read_string(&mut payload)?;
        if version != FORMAT_VERSION {
            return Err(ReadError::UnsupportedVersion(version));
        }
        let title = xdr::read_string(&mut payload)?;
        let comment = xdr::read_string(&mut payload)?;
        let record_count = xdr::read_i32(&mut payload)?;
        let nblocks = xdr::read_i32(&mut payload)?;
        for _ in 0..nblocks {
            let id = xdr::read_i32(&mut payload)?;
            let name = xdr::read_string(&mut payload)?;
            if id != BLOCK_HEPEVT || name != HEPEVT_NAME {
                return Err(ReadError::UnsupportedBlockType { id, name });
            }
        }
        check_consumed(BLOCK_FILE_HEADER, &block, payload)?;
        let record_count = usize::try_from(record_count).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "negative record count")
        })?;
        let header = FileHeader {
            run: RunHeader { title, comment },
            record_count,
        };
        Ok(Self {
            stream,
            header,
            read: 0,
            done: false,
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Get the next event record
    ///
    /// Returns `None` after the end block, which has to confirm the number
    /// of records declared in the file header.
    pub fn next_record(&mut self) -> Result<Option<StdhepRecord>, ReadError> {
        if self.done {
            return Ok(None);
        }
        let id = xdr::read_i32(&mut self.stream)?;
        let block = read_payload(&mut self.stream)?;
        let mut payload = block.as_slice();
        match id {
            BLOCK_HEPEVT => {
                let _version = xdr::read_string(&mut payload)?;
                let record = StdhepRecord {
                    NEVHEP: xdr::read_i32(&mut payload)?,
                    NHEP: xdr::read_i32(&mut payload)?,
                    ISTHEP: xdr::read_i32_array(&mut payload)?,
                    IDHEP: xdr::read_i32_array(&mut payload)?,
                    JMOHEP: xdr::read_i32_array(&mut payload)?,
                    JDAHEP: xdr::read_i32_array(&mut payload)?,
                    PHEP: xdr::read_f64_array(&mut payload)?,
                    VHEP: xdr::read_f64_array(&mut payload)?,
                };
                check_consumed(id, &block, payload)?;
                if !record.is_consistent() {
                    return Err(ReadError::MismatchedParticles(record.NEVHEP));
                }
                self.read += 1;
                Ok(Some(record))
            }
            BLOCK_END => {
                let written = xdr::read_i32(&mut payload)?;
                check_consumed(id, &block, payload)?;
                self.done = true;
                let declared = self.header.record_count;
                if usize::try_from(written) != Ok(declared) || self.read != declared {
                    return Err(ReadError::RecordCountMismatch {
                        declared,
                        found: self.read,
                    });
                }
                Ok(None)
            }
            found => Err(ReadError::UnexpectedBlock {
                expected: BLOCK_HEPEVT,
                found,
            }),
        }
    }
}

fn read_block<T: Read>(stream: &mut T, expected: i32) -> Result<Vec<u8>, ReadError> {
    let found = xdr::read_i32(stream)?;
    if found != expected {
        return Err(ReadError::UnexpectedBlock { expected, found });
    }
    Ok(read_payload(stream)?)
}

fn read_payload<T: Read>(stream: &mut T) -> io::Result<Vec<u8>> {
    let len = xdr::read_i32(stream)?;
    let len = usize::try_from(len).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidData, "negative block length")
    })?;
    let mut payload = vec![0; len];
    stream.read_exact(&mut payload)?;
    Ok(payload)
}

fn check_consumed(id: i32, block: &[u8], rest: &[u8]) -> Result<(), ReadError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ReadError::BadBlockLength {
            id,
            declared: block.len(),
            read: block.len() - rest.len(),
        })
    }
}
