//! Conversion of complete LHE files
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::Rng;

use crate::config::{ConvertOptions, RunHeader};
use crate::data::ParsedEvent;
use crate::error::Error;
use crate::reader::{self, EventParser};
use crate::transcode::transcode;
use crate::vertex::VertexSampler;
use crate::writer::{WriteError, Writer};

/// Suffix removed from input file names
pub const LHE_GZ_SUFFIX: &str = ".lhe.gz";
/// Suffix of output file names
pub const STDHEP_SUFFIX: &str = ".stdhep";

/// Output file for `input`, placed in `output_dir`
///
/// The name is the base name of `input` with a trailing `.lhe.gz`
/// replaced by `.stdhep`. Other names just get `.stdhep` appended.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = name.strip_suffix(LHE_GZ_SUFFIX).unwrap_or(&name);
    output_dir.join(format!("{stem}{STDHEP_SUFFIX}"))
}

/// Read a list of input files, one path per line
///
/// Blank lines are ignored.
pub fn read_list(path: &Path) -> io::Result<Vec<PathBuf>> {
    let file = BufReader::new(File::open(path)?);
    let mut files = Vec::new();
    for line in file.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            files.push(PathBuf::from(line));
        }
    }
    Ok(files)
}

/// Parse all events of an uncompressed LHE document
pub fn parse_events(
    document: &[u8],
    parser: EventParser,
) -> Result<Vec<ParsedEvent>, Error> {
    reader::event_blocks(document)?
        .iter()
        .enumerate()
        .map(|(index, text)| {
            parser.parse(text).map_err(|source| Error::Schema {
                index: index + 1,
                source,
            })
        })
        .collect()
}

/// Transcode `events` and write them as a complete StdHep file
///
/// One vertex is drawn from `sampler` for each event, in input order.
/// With `verbose` set, each vertex is logged at debug level.
pub fn write_events<W: Write, R: Rng>(
    stream: W,
    events: &[ParsedEvent],
    header: &RunHeader,
    sampler: &mut VertexSampler<R>,
    verbose: bool,
) -> Result<(), WriteError> {
    let mut writer = Writer::new(stream, header, events.len())?;
    for event in events {
        let vertex = sampler.sample();
        if verbose {
            debug!(
                "Event {}: vertex ({}, {}, {})",
                event.event_number, vertex.x, vertex.y, vertex.z
            );
        }
        writer.write(&transcode(event, vertex))?;
    }
    writer.finish()
}

/// Convert the gzip-compressed LHE file `input` into the StdHep file `output`
///
/// Returns the number of converted events. All events are parsed before
/// `output` is created, and `output` is removed again if writing fails, so
/// there are never partial output files.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<usize, Error> {
    info!("Processing {}", input.display());
    let file = File::open(input).map_err(|source| Error::Io {
        path: input.to_owned(),
        source,
    })?;
    let document = reader::decompress(BufReader::new(file)).map_err(|source| {
        Error::Decompression {
            path: input.to_owned(),
            source,
        }
    })?;
    let events = parse_events(&document, EventParser::new(options.verbose))?;
    info!("A total of {} events will be processed", events.len());
    info!("Events will be written to {}", output.display());

    match options.seed {
        Some(seed) => {
            debug!("Vertex smearing seed: {seed}");
            let sampler = VertexSampler::seeded(&options.target, seed)?;
            write_file(output, &events, options, sampler)?;
        }
        None => {
            let sampler = VertexSampler::new(&options.target)?;
            write_file(output, &events, options, sampler)?;
        }
    }
    Ok(events.len())
}

fn write_file<R: Rng>(
    output: &Path,
    events: &[ParsedEvent],
    options: &ConvertOptions,
    mut sampler: VertexSampler<R>,
) -> Result<(), Error> {
    let write_error = |source: WriteError| Error::Write {
        path: output.to_owned(),
        source,
    };
    let file = File::create(output).map_err(|err| write_error(err.into()))?;
    let stream = BufWriter::new(file);
    write_events(stream, events, &options.header, &mut sampler, options.verbose)
        .map_err(|source| {
            let _ = fs::remove_file(output);
            write_error(source)
        })
}
