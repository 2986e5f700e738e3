use crate::data::{ParsedEvent, StdhepRecord, VertexPoint};
use crate::status;

/// Build the StdHep record of an event
///
/// Incoming particles are turned into documentation entries, daughter
/// links are left empty, and all particles share the production vertex
/// `vertex` at time zero.
pub fn transcode(event: &ParsedEvent, vertex: VertexPoint) -> StdhepRecord {
    let n = event.particles.len();
    let mut record = StdhepRecord {
        NEVHEP: event.event_number,
        NHEP: event.particle_count,
        ISTHEP: Vec::with_capacity(n),
        IDHEP: Vec::with_capacity(n),
        JMOHEP: Vec::with_capacity(2 * n),
        JDAHEP: vec![0; 2 * n],
        PHEP: Vec::with_capacity(5 * n),
        VHEP: Vec::with_capacity(4 * n),
    };
    for particle in &event.particles {
        record.ISTHEP.push(status::to_stdhep(particle.status));
        record.IDHEP.push(particle.pdg_id);
        record.JMOHEP.extend([particle.mother1, particle.mother2]);
        record.PHEP.extend(particle.momentum());
        record.VHEP.extend([vertex.x, vertex.y, vertex.z, 0.]);
    }
    record
}
