use std::io::{self, Read};

use flate2::read::GzDecoder;
use log::{debug, warn};

use crate::data::{ParsedEvent, ParsedParticle};
use crate::error::SchemaError;
use crate::tags::*;

pub type XmlTree = xmltree::Element;

const NUP_COLUMN: usize = 0;
const EVENT_NUMBER_COLUMN: usize = 1;

const PDG_ID_COLUMN: usize = 1;
const STATUS_COLUMN: usize = 2;
const MOTHER1_COLUMN: usize = 3;
const MOTHER2_COLUMN: usize = 4;
const DAUGHTER1_COLUMN: usize = 5;
const DAUGHTER2_COLUMN: usize = 6;
const MOMENTUM_COLUMNS: [(usize, &str); 5] =
    [(7, "px"), (8, "py"), (9, "pz"), (10, "energy"), (11, "mass")];

/// Decompress a complete gzip stream into memory
pub fn decompress<R: Read>(stream: R) -> io::Result<Vec<u8>> {
    let mut document = Vec::new();
    GzDecoder::new(stream).read_to_end(&mut document)?;
    Ok(document)
}

/// Extract the trimmed text of each `<event>` in document order
///
/// Only direct children of the root element are considered. The document
/// is not validated beyond being well-formed XML.
pub fn event_blocks(document: &[u8]) -> Result<Vec<String>, xmltree::ParseError> {
    let root = XmlTree::parse(document)?;
    if root.name != LHEF_ROOT {
        warn!(
            "Unexpected root element '{}', expected '{}'",
            root.name, LHEF_ROOT
        );
    }
    let blocks = root
        .children
        .iter()
        .filter_map(|node| node.as_element())
        .filter(|element| element.name == EVENT)
        .map(|event| {
            event
                .get_text()
                .map(|text| text.trim().to_owned())
                .unwrap_or_default()
        })
        .collect();
    Ok(blocks)
}

/// Parser for the particle table inside an `<event>` block
#[derive(Debug, Copy, Clone, Default)]
pub struct EventParser {
    verbose: bool,
}

impl EventParser {
    /// Create a new parser
    ///
    /// With `verbose` set, every parsed event and particle is logged at
    /// debug level. Parsing itself is unaffected.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Parse the text of one `<event>` block
    ///
    /// The first non-empty line holds the number of particles and the event
    /// number, followed by exactly that many particle lines. Lines starting
    /// with `#` carry optional event information and are skipped wherever
    /// they appear.
    ///
    /// # Example
    ///
    /// ```rust
    /// let text = "1 7
    ///     11 1 0 0 0 0 0.0 0.0 4.0 4.0 0.000511";
    /// let event = lhe2stdhep::EventParser::default().parse(text).unwrap();
    /// assert_eq!(event.event_number, 7);
    /// assert_eq!(event.particles[0].pdg_id, 11);
    /// ```
    pub fn parse(&self, text: &str) -> Result<ParsedEvent, SchemaError> {
        let mut lines = text
            .trim()
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with(INFO_LINE_START)
            });

        let (header_nr, header) = lines.next().ok_or(SchemaError::MissingHeader)?;
        let entries = columns(header);
        let particle_count =
            parse_int(header_nr, "NUP", entry(&entries, NUP_COLUMN))?;
        let event_number = parse_int(
            header_nr,
            "event number",
            entry(&entries, EVENT_NUMBER_COLUMN),
        )?;
        if particle_count <= 0 {
            return Err(SchemaError::BadParticleCount {
                event_number,
                declared: particle_count,
            });
        }
        let particle_lines: Vec<_> = lines.collect();
        if particle_lines.len() != particle_count as usize {
            return Err(SchemaError::ParticleCountMismatch {
                event_number,
                declared: particle_count,
                found: particle_lines.len(),
            });
        }
        if self.verbose {
            debug!("Event: {event_number}");
            debug!("Number of particles: {particle_count}");
        }

        let mut particles = Vec::with_capacity(particle_lines.len());
        for (line_nr, line) in particle_lines {
            let particle = parse_particle(line_nr, line)?;
            if particle.daughter1 != 0 || particle.daughter2 != 0 {
                return Err(SchemaError::NonZeroDaughter {
                    event_number,
                    particle: particles.len() + 1,
                    daughter1: particle.daughter1,
                    daughter2: particle.daughter2,
                });
            }
            if self.verbose {
                debug!(
                    "Particle {}: PDG ID {}, status {}, mothers ({}, {}), \
                     p = ({}, {}, {}), E = {}, m = {}",
                    particles.len() + 1,
                    particle.pdg_id,
                    particle.status,
                    particle.mother1,
                    particle.mother2,
                    particle.px,
                    particle.py,
                    particle.pz,
                    particle.energy,
                    particle.mass
                );
            }
            particles.push(particle);
        }
        Ok(ParsedEvent {
            event_number,
            particle_count,
            particles,
        })
    }
}

/// Split a line into columns separated by runs of whitespace
///
/// An indented line starts with an empty column. Event generators indent
/// all particle lines, so the PDG ID ends up in column 1.
fn columns(line: &str) -> Vec<&str> {
    let line = line.trim_end();
    let mut columns = Vec::with_capacity(14);
    if line.starts_with(char::is_whitespace) {
        columns.push("");
    }
    columns.extend(line.split_whitespace());
    columns
}

fn entry<'a>(columns: &[&'a str], idx: usize) -> Option<&'a str> {
    columns.get(idx).copied()
}

fn parse_particle(line_nr: usize, line: &str) -> Result<ParsedParticle, SchemaError> {
    let entries = columns(line);
    let int = |field, idx| parse_int(line_nr, field, entry(&entries, idx));
    let pdg_id = int("pdg_id", PDG_ID_COLUMN)?;
    let status = int("status", STATUS_COLUMN)?;
    let mother1 = int("mother1", MOTHER1_COLUMN)?;
    let mother2 = int("mother2", MOTHER2_COLUMN)?;
    let daughter1 = int("daughter1", DAUGHTER1_COLUMN)?;
    let daughter2 = int("daughter2", DAUGHTER2_COLUMN)?;
    let mut p = [0.; 5];
    for (p, (idx, field)) in p.iter_mut().zip(MOMENTUM_COLUMNS) {
        *p = parse_float(line_nr, field, entry(&entries, idx))?;
    }
    let [px, py, pz, energy, mass] = p;
    Ok(ParsedParticle {
        pdg_id,
        status,
        mother1,
        mother2,
        daughter1,
        daughter2,
        px,
        py,
        pz,
        energy,
        mass,
    })
}

fn parse_int(
    line: usize,
    field: &'static str,
    text: Option<&str>,
) -> Result<i32, SchemaError> {
    let text = text.ok_or(SchemaError::MissingEntry { line, field })?;
    text.parse().map_err(|_| SchemaError::ConversionError {
        line,
        field,
        text: text.to_owned(),
    })
}

fn parse_float(
    line: usize,
    field: &'static str,
    text: Option<&str>,
) -> Result<f64, SchemaError> {
    let text = text.ok_or(SchemaError::MissingEntry { line, field })?;
    fast_float::parse(text).map_err(|_| SchemaError::ConversionError {
        line,
        field,
        text: text.to_owned(),
    })
}
