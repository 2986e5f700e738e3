//! Convert Les Houches Event files into binary StdHep files
//!
//! Each `<event>` block of a gzip-compressed LHE file is parsed with
//! [`EventParser`], turned into a HEPEVT-style [`StdhepRecord`] by
//! [`transcode()`], and written with [`Writer`]. All particles of an event
//! share one primary vertex drawn uniformly inside the target by
//! [`VertexSampler`].
pub mod config;
pub mod convert;
pub mod data;
pub mod error;
pub mod reader;
pub mod status;
pub mod stdhep_reader;
pub mod transcode;
pub mod vertex;
pub mod writer;
mod tags;
mod xdr;

pub use config::{Config, ConfigError, ConvertOptions, RunHeader};
pub use convert::{convert_file, output_path, read_list};
pub use data::*;
pub use error::{Error, SchemaError};
pub use reader::{decompress, event_blocks, EventParser};
pub use stdhep_reader::{FileHeader, ReadError, Reader as StdhepReader};
pub use transcode::transcode;
pub use vertex::{TargetConfig, VertexSampler};
pub use writer::{WriteError, Writer};

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const LHE: &str = r#"<LesHouchesEvents version="1.0">
<header>
<MGVersion>
#3.5.0
</MGVersion>
</header>
<init>
11 623 4.000000e+00 0.000000e+00 0 0 0 0 3 1
1.0e-03 1.0e-05 1.0e-03 1
</init>
<event>
4 1 +1.0e-03 4.0e+00 7.5e-03 1.1e-01
       11 -1    0    0    0    0 +0.0e+00 +0.0e+00 +4.0e+00 4.0e+00 5.11e-04 0. 1.
      623 -1    0    0    0    0 +0.0e+00 +0.0e+00 +0.0e+00 1.7e+02 1.7e+02 0. 1.
       11  1    1    2    0    0 +2.1e-02 -1.3e-02 +3.1e-01 3.1e-01 5.11e-04 0. 1.
      622  1    1    2    0    0 -2.1e-02 +1.3e-02 +3.7e+00 3.7e+00 1.0e-01 0. 1.
</event>
<event>
3 2 +1.0e-03 4.0e+00 7.5e-03 1.1e-01
       11 -1    0    0    0    0 +0.0e+00 +0.0e+00 +4.0e+00 4.0e+00 5.11e-04 0. 1.
      623 -1    0    0    0    0 +0.0e+00 +0.0e+00 +0.0e+00 1.7e+02 1.7e+02 0. 1.
       11  1    1    2    0    0 +1.0e-02 -2.0e-02 +3.9e+00 3.9e+00 5.11e-04 0. 1.
</event>
</LesHouchesEvents>
"#;

    #[test]
    fn test_convert_read_back() {
        let mut gz = GzEncoder::new(Vec::new(), Compression::default());
        gz.write_all(LHE.as_bytes()).unwrap();
        let compressed = gz.finish().unwrap();

        let document = decompress(compressed.as_slice()).unwrap();
        let events =
            convert::parse_events(&document, EventParser::new(true)).unwrap();
        assert_eq!(events.len(), 2);

        let mut output = Vec::new();
        let mut sampler =
            VertexSampler::seeded(&TargetConfig::default(), 1).unwrap();
        convert::write_events(
            &mut output,
            &events,
            &RunHeader::default(),
            &mut sampler,
            true,
        )
        .unwrap();

        let mut reader = StdhepReader::new(output.as_slice()).unwrap();
        assert_eq!(reader.header().record_count, 2);
        let mut records = Vec::new();
        while let Some(record) = reader.next_record().unwrap() {
            records.push(record);
        }
        assert_eq!(records.len(), 2);
        for (record, event) in records.iter().zip(&events) {
            assert_eq!(record.NEVHEP, event.event_number);
            assert_eq!(record.NHEP as usize, event.particles.len());
            assert!(record.JDAHEP.iter().all(|&d| d == 0));
            let vertex = &record.VHEP[..4];
            assert_eq!(vertex[3], 0.);
            for particle_vertex in record.VHEP.chunks(4) {
                assert_eq!(particle_vertex, vertex);
            }
        }
        assert_eq!(records[0].ISTHEP, [3, 3, 1, 1]);
        assert_eq!(records[0].IDHEP, [11, 623, 11, 622]);
        assert_eq!(records[0].JMOHEP, [0, 0, 0, 0, 1, 2, 1, 2]);
        assert_eq!(&records[1].PHEP[10..], [0.01, -0.02, 3.9, 3.9, 5.11e-4]);
        assert_ne!(records[0].VHEP[..3], records[1].VHEP[..3]);
    }
}
