/// One particle line of an LHE event table
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedParticle {
    /// PDG particle ID
    pub pdg_id: i32,
    /// LHE status
    pub status: i32,
    /// 1-based index of the first mother, 0 if there is none
    pub mother1: i32,
    /// 1-based index of the second mother, 0 if there is none
    pub mother2: i32,
    /// Always 0 in accepted input
    pub daughter1: i32,
    /// Always 0 in accepted input
    pub daughter2: i32,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub energy: f64,
    pub mass: f64,
}

impl ParsedParticle {
    /// Momentum in the StdHep order (px, py, pz, E, m)
    pub fn momentum(&self) -> [f64; 5] {
        [self.px, self.py, self.pz, self.energy, self.mass]
    }
}

/// Event table of one `<event>` block
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedEvent {
    pub event_number: i32,
    /// Declared number of particles, equal to `particles.len()`
    pub particle_count: i32,
    pub particles: Vec<ParsedParticle>,
}

/// Primary vertex position in mm, shared by all particles of an event
#[derive(PartialEq, Debug, Copy, Clone, Default)]
pub struct VertexPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One event in the layout of the HEPEVT common block
///
/// All per-particle arrays are flat, with `2`, `5`, or `4` consecutive
/// entries per particle for mothers/daughters, momenta, and vertices.
#[allow(non_snake_case)]
#[derive(PartialEq, Debug, Clone, Default)]
pub struct StdhepRecord {
    /// Event number
    pub NEVHEP: i32,
    /// Number of particles
    pub NHEP: i32,
    /// Particle status
    pub ISTHEP: Vec<i32>,
    /// PDG particle IDs
    pub IDHEP: Vec<i32>,
    /// Indices of the two mothers of each particle
    pub JMOHEP: Vec<i32>,
    /// Indices of the first and last daughter of each particle
    pub JDAHEP: Vec<i32>,
    /// Momentum (px, py, pz, E, m) in GeV
    pub PHEP: Vec<f64>,
    /// Production vertex (x, y, z, t) in mm
    pub VHEP: Vec<f64>,
}

impl StdhepRecord {
    /// Check that all arrays are sized for `NHEP` particles
    pub fn is_consistent(&self) -> bool {
        let Ok(n) = usize::try_from(self.NHEP) else {
            return false;
        };
        self.ISTHEP.len() == n
            && self.IDHEP.len() == n
            && self.JMOHEP.len() == 2 * n
            && self.JDAHEP.len() == 2 * n
            && self.PHEP.len() == 5 * n
            && self.VHEP.len() == 4 * n
    }
}
