use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::writer::WriteError;

/// Malformed event table
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Event table is empty")]
    MissingHeader,
    #[error("Missing entry '{field}' on line {line}")]
    MissingEntry { line: usize, field: &'static str },
    #[error("Failed to convert '{text}' in entry '{field}' on line {line} to a number")]
    ConversionError {
        line: usize,
        field: &'static str,
        text: String,
    },
    #[error("Event {event_number} declares {declared} particles, expected a positive number")]
    BadParticleCount { event_number: i32, declared: i32 },
    #[error(
        "Event {event_number} declares {declared} particles, \
         but {found} particle lines follow"
    )]
    ParticleCountMismatch {
        event_number: i32,
        declared: i32,
        found: usize,
    },
    #[error(
        "Particle {particle} in event {event_number} has daughters \
         ({daughter1}, {daughter2}), only 0 is supported"
    )]
    NonZeroDaughter {
        event_number: i32,
        particle: usize,
        daughter1: i32,
        daughter2: i32,
    },
}

/// Failure to convert one input file
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read '{}'", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to decompress '{}'", .path.display())]
    Decompression { path: PathBuf, source: io::Error },
    #[error("Malformed LHE document")]
    Xml(#[from] xmltree::ParseError),
    #[error("Invalid event block {index}")]
    Schema { index: usize, source: SchemaError },
    #[error("Failed to write '{}'", .path.display())]
    Write { path: PathBuf, source: WriteError },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
