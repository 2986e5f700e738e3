//! Particle status codes

/// LHE: incoming particle
pub const INCOMING: i32 = -1;
/// LHE: outgoing final state particle
pub const OUTGOING: i32 = 1;
/// LHE: intermediate resonance, mass should be preserved
pub const INTERMEDIATE_RESONANCE: i32 = 2;
/// StdHep: documentation line, used for the incoming beam particles
pub const DOCUMENTATION: i32 = 3;

/// Translate an LHE status code into the StdHep convention
///
/// Incoming particles become documentation entries, every other code is
/// kept as is.
pub fn to_stdhep(status: i32) -> i32 {
    if status == INCOMING {
        DOCUMENTATION
    } else {
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn incoming_is_documentation() {
        assert_eq!(to_stdhep(INCOMING), DOCUMENTATION);
        assert_eq!(to_stdhep(OUTGOING), OUTGOING);
        assert_eq!(to_stdhep(INTERMEDIATE_RESONANCE), INTERMEDIATE_RESONANCE);
        assert_eq!(to_stdhep(-2), -2);
        assert_eq!(to_stdhep(-9), -9);
    }

    proptest! {
        #[test]
        fn other_codes_pass_through(status in any::<i32>()) {
            prop_assume!(status != INCOMING);
            prop_assert_eq!(to_stdhep(status), status);
        }
    }
}
