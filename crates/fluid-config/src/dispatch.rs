//! The dispatcher/factory (spec.md §2 "Dispatcher / factory", §9
//! "Compile-time specialization over numeric types"): builds the single
//! `Engine<Num, Num, Num>` monomorphization the CLI runs, picking
//! concrete Float/Double/Fixed(N,K)/FastFixed(N,K) behavior at run time
//! from the parsed type tags (SPEC_FULL.md §3).
//!
//! This crate never registers a compile-time set of known `(N, K)`
//! pairs to match against (that half of spec.md §7 error kind 4 — "fall
//! back to the fully dynamic specialization" — is therefore always
//! satisfied: every `(N, K)` up to 128 bits already runs through `Num`),
//! so the only factory failure mode left is an unparseable type tag,
//! handled by [`crate::numeric_tag::parse_type_tag`] before this module
//! is reached.

use crate::error::ConfigError;
use fluid_engine::Engine;
use fluid_numeric::{Num, NumKind};

/// The three numeric kinds the CLI's `--p-type`/`--v-type`/`--v-flow-type`
/// flags select, already parsed and validated.
#[derive(Clone, Copy, Debug)]
pub struct TypeTriple {
    pub p: NumKind,
    pub v: NumKind,
    pub vf: NumKind,
}

pub fn build_engine(triple: TypeTriple, field: Vec<Vec<u8>>) -> Engine<Num, Num, Num> {
    Engine::new(field, triple.p.zero(), triple.v.zero(), triple.vf.zero())
}

pub fn build_engine_with_seed(
    triple: TypeTriple,
    field: Vec<Vec<u8>>,
    seed: u64,
) -> Engine<Num, Num, Num> {
    Engine::with_seed(field, triple.p.zero(), triple.v.zero(), triple.vf.zero(), seed)
}

/// spec.md §6: `--threads-count=<n>`, worker pool size, must be `>= 1`.
pub fn validate_thread_count(n: i64) -> Result<usize, ConfigError> {
    if n <= 0 {
        return Err(ConfigError::NonPositiveThreadCount(n));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric_tag::parse_type_tag;

    #[test]
    fn builds_an_engine_from_parsed_tags() {
        let triple = TypeTriple {
            p: parse_type_tag("DOUBLE").unwrap(),
            v: parse_type_tag("FIXED(32,16)").unwrap(),
            vf: parse_type_tag("FAST_FIXED(64,32)").unwrap(),
        };
        let field = vec![b"###".to_vec(), b"#.#".to_vec(), b"###".to_vec()];
        let engine = build_engine(triple, field);
        assert_eq!(engine.rows(), 3);
        assert_eq!(engine.cols(), 3);
        assert_eq!(engine.p(1, 1).kind(), NumKind::Double);
    }

    #[test]
    fn rejects_non_positive_thread_count() {
        assert!(validate_thread_count(0).is_err());
        assert!(validate_thread_count(-3).is_err());
        assert_eq!(validate_thread_count(8).unwrap(), 8);
    }
}
