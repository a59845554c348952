//! Cell geometry character classification (spec.md §3).

pub const WALL: u8 = b'#';
pub const AIR: u8 = b' ';
pub const SOURCE: u8 = b'.';

pub fn is_wall(c: u8) -> bool {
    c == WALL
}

/// Density for an unassigned cell character. `rho` is only specified by
/// the source for `' '` and `'.'`; every other character (a particle)
/// defaults to `1.0`, the sensible default spec.md §9's Open Questions
/// names as an alternative to leaving it zero-initialized (which would
/// divide by zero in Phases B and D).
pub const DEFAULT_RHO: f64 = 1.0;
pub const AIR_RHO: f64 = 0.01;
pub const SOURCE_RHO: f64 = 1000.0;

pub fn default_rho_for(c: u8) -> f64 {
    match c {
        AIR => AIR_RHO,
        SOURCE => SOURCE_RHO,
        _ => DEFAULT_RHO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_chars() {
        assert!(is_wall(WALL));
        assert!(!is_wall(AIR));
        assert_eq!(default_rho_for(AIR), AIR_RHO);
        assert_eq!(default_rho_for(SOURCE), SOURCE_RHO);
        assert_eq!(default_rho_for(b'o'), DEFAULT_RHO);
    }
}
