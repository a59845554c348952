//! Parses the `--p-type=`/`--v-type=`/`--v-flow-type=` configuration
//! strings (spec.md §6 "Numeric type tags") into a
//! [`fluid_numeric::NumKind`].

use crate::error::ConfigError;
use fluid_numeric::NumKind;

/// Parse one of `FLOAT`, `DOUBLE`, `FIXED(n,k)`, `FAST_FIXED(n,k)`.
///
/// Whitespace around the tag and around `n`/`k` is tolerated; the tag
/// name itself is matched case-sensitively, matching the original's
/// preprocessor-macro-derived tag set.
pub fn parse_type_tag(tag: &str) -> Result<NumKind, ConfigError> {
    let tag = tag.trim();
    match tag {
        "FLOAT" => return Ok(NumKind::Float),
        "DOUBLE" => return Ok(NumKind::Double),
        _ => {}
    }

    let (name, fast) = if let Some(rest) = tag.strip_prefix("FAST_FIXED") {
        (rest, true)
    } else if let Some(rest) = tag.strip_prefix("FIXED") {
        (rest, false)
    } else {
        return Err(ConfigError::UnknownTypeTag(tag.to_string()));
    };

    let inner = name
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| ConfigError::MalformedFixedTag(tag.to_string()))?;

    let mut parts = inner.splitn(2, ',');
    let n_str = parts
        .next()
        .ok_or_else(|| ConfigError::MalformedFixedTag(tag.to_string()))?;
    let k_str = parts
        .next()
        .ok_or_else(|| ConfigError::MalformedFixedTag(tag.to_string()))?;

    let n: u32 = n_str
        .trim()
        .parse()
        .map_err(|_| ConfigError::MalformedFixedTag(tag.to_string()))?;
    let k: u32 = k_str
        .trim()
        .parse()
        .map_err(|_| ConfigError::MalformedFixedTag(tag.to_string()))?;

    if n == 0 || n > 64 {
        return Err(ConfigError::FixedWidthTooWide { n });
    }
    if k >= n {
        return Err(ConfigError::FixedFractionOverflow { n, k });
    }

    Ok(NumKind::Fixed { n, k, fast })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_float_and_double() {
        assert_eq!(parse_type_tag("FLOAT").unwrap(), NumKind::Float);
        assert_eq!(parse_type_tag(" DOUBLE ").unwrap(), NumKind::Double);
    }

    #[test]
    fn parses_fixed_and_fast_fixed() {
        assert_eq!(
            parse_type_tag("FIXED(32,16)").unwrap(),
            NumKind::Fixed {
                n: 32,
                k: 16,
                fast: false
            }
        );
        assert_eq!(
            parse_type_tag("FAST_FIXED(64, 32)").unwrap(),
            NumKind::Fixed {
                n: 64,
                k: 32,
                fast: true
            }
        );
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!(matches!(
            parse_type_tag("INT32"),
            Err(ConfigError::UnknownTypeTag(_))
        ));
    }

    #[test]
    fn rejects_malformed_fixed_tag() {
        assert!(matches!(
            parse_type_tag("FIXED(32)"),
            Err(ConfigError::MalformedFixedTag(_))
        ));
        assert!(matches!(
            parse_type_tag("FIXED32,16)"),
            Err(ConfigError::MalformedFixedTag(_))
        ));
    }

    #[test]
    fn rejects_fraction_overflow() {
        assert!(matches!(
            parse_type_tag("FIXED(8,8)"),
            Err(ConfigError::FixedFractionOverflow { .. })
        ));
    }

    #[test]
    fn rejects_width_too_wide() {
        assert!(matches!(
            parse_type_tag("FIXED(256,4)"),
            Err(ConfigError::FixedWidthTooWide { .. })
        ));
    }
}
