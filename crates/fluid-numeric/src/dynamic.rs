//! A runtime-tagged numeric value, `Num`, and its type descriptor,
//! `NumKind`.
//!
//! spec.md §9 ("Compile-time specialization over numeric types") allows
//! "a single dynamic variant with virtual dispatch at the numeric-type
//! layer (slower but simpler)" as an alternative to monomorphizing per
//! `(N, K)` pair. `Num` is that variant: the CLI dispatcher builds exactly
//! one engine instantiation, `Engine<Num, Num, Num>`, and picks concrete
//! Float/Double/Fixed(N,K)/FastFixed(N,K) behavior at run time from the
//! parsed `--p-type=`/`--v-type=`/`--v-flow-type=` tags.
//!
//! `Num` still implements [`Numeric`]; arithmetic between two `Num`s of
//! different kinds is a precondition violation (spec.md §7 error kind 3)
//! and panics rather than silently coercing, since the engine never mixes
//! kinds within a single field.

use crate::numeric::Numeric;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Descriptor for one of the four numeric families spec.md §6 names as
/// configuration tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumKind {
    Float,
    Double,
    /// `fast = false` is `Fixed<n, k>`, `fast = true` is `FastFixed<n, k>`.
    Fixed { n: u32, k: u32, fast: bool },
}

impl NumKind {
    pub fn zero(self) -> Num {
        match self {
            NumKind::Float => Num::Float(0.0),
            NumKind::Double => Num::Double(0.0),
            NumKind::Fixed { n, k, fast } => Num::Fixed {
                raw: 0,
                n,
                k,
                fast,
            },
        }
    }

    pub fn from_f64(self, v: f64) -> Num {
        self.zero().from_f64_like(v)
    }

    pub fn from_i64(self, v: i64) -> Num {
        self.zero().from_i64_like(v)
    }
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NumKind::Float => write!(f, "FLOAT"),
            NumKind::Double => write!(f, "DOUBLE"),
            NumKind::Fixed {
                n,
                k,
                fast: false,
            } => write!(f, "FIXED({n},{k})"),
            NumKind::Fixed { n, k, fast: true } => write!(f, "FAST_FIXED({n},{k})"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Num {
    Float(f32),
    Double(f64),
    Fixed { raw: i128, n: u32, k: u32, fast: bool },
}

fn normalize_fixed(raw: i128, n: u32, fast: bool) -> i128 {
    if fast || n >= 128 {
        raw
    } else {
        let shift = 128 - n;
        (raw << shift) >> shift
    }
}

impl Num {
    pub fn kind(self) -> NumKind {
        match self {
            Num::Float(_) => NumKind::Float,
            Num::Double(_) => NumKind::Double,
            Num::Fixed { n, k, fast, .. } => NumKind::Fixed { n, k, fast },
        }
    }

    fn assert_same_kind(self, other: Self) {
        assert_eq!(
            self.kind(),
            other.kind(),
            "mismatched Num kinds in arithmetic: {:?} vs {:?}",
            self.kind(),
            other.kind()
        );
    }
}

impl Default for Num {
    fn default() -> Self {
        Num::Double(0.0)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Num::Float(a), Num::Float(b)) => a == b,
            (Num::Double(a), Num::Double(b)) => a == b,
            (Num::Fixed { raw: a, .. }, Num::Fixed { raw: b, .. }) => {
                self.assert_same_kind(*other);
                a == b
            }
            _ => false,
        }
    }
}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (*self, *other) {
            (Num::Float(a), Num::Float(b)) => a.partial_cmp(&b),
            (Num::Double(a), Num::Double(b)) => a.partial_cmp(&b),
            (Num::Fixed { raw: a, .. }, Num::Fixed { raw: b, .. }) => {
                self.assert_same_kind(*other);
                a.partial_cmp(&b)
            }
            _ => None,
        }
    }
}

impl Add for Num {
    type Output = Num;
    fn add(self, rhs: Num) -> Num {
        self.assert_same_kind(rhs);
        match (self, rhs) {
            (Num::Float(a), Num::Float(b)) => Num::Float(a + b),
            (Num::Double(a), Num::Double(b)) => Num::Double(a + b),
            (Num::Fixed { raw: a, n, k, fast }, Num::Fixed { raw: b, .. }) => Num::Fixed {
                raw: normalize_fixed(a + b, n, fast),
                n,
                k,
                fast,
            },
            _ => unreachable!("kind mismatch already asserted"),
        }
    }
}

impl Sub for Num {
    type Output = Num;
    fn sub(self, rhs: Num) -> Num {
        self.assert_same_kind(rhs);
        match (self, rhs) {
            (Num::Float(a), Num::Float(b)) => Num::Float(a - b),
            (Num::Double(a), Num::Double(b)) => Num::Double(a - b),
            (Num::Fixed { raw: a, n, k, fast }, Num::Fixed { raw: b, .. }) => Num::Fixed {
                raw: normalize_fixed(a - b, n, fast),
                n,
                k,
                fast,
            },
            _ => unreachable!("kind mismatch already asserted"),
        }
    }
}

impl Mul for Num {
    type Output = Num;
    fn mul(self, rhs: Num) -> Num {
        self.assert_same_kind(rhs);
        match (self, rhs) {
            (Num::Float(a), Num::Float(b)) => Num::Float(a * b),
            (Num::Double(a), Num::Double(b)) => Num::Double(a * b),
            (Num::Fixed { raw: a, n, k, fast }, Num::Fixed { raw: b, .. }) => Num::Fixed {
                raw: normalize_fixed((a * b) >> k, n, fast),
                n,
                k,
                fast,
            },
            _ => unreachable!("kind mismatch already asserted"),
        }
    }
}

impl Div for Num {
    type Output = Num;
    fn div(self, rhs: Num) -> Num {
        self.assert_same_kind(rhs);
        match (self, rhs) {
            (Num::Float(a), Num::Float(b)) => Num::Float(a / b),
            (Num::Double(a), Num::Double(b)) => Num::Double(a / b),
            (Num::Fixed { raw: a, n, k, fast }, Num::Fixed { raw: b, .. }) => Num::Fixed {
                raw: normalize_fixed((a << k) / b, n, fast),
                n,
                k,
                fast,
            },
            _ => unreachable!("kind mismatch already asserted"),
        }
    }
}

impl Neg for Num {
    type Output = Num;
    fn neg(self) -> Num {
        match self {
            Num::Float(a) => Num::Float(-a),
            Num::Double(a) => Num::Double(-a),
            Num::Fixed { raw, n, k, fast } => Num::Fixed {
                raw: normalize_fixed(-raw, n, fast),
                n,
                k,
                fast,
            },
        }
    }
}

impl AddAssign for Num {
    fn add_assign(&mut self, rhs: Num) {
        *self = *self + rhs;
    }
}

impl SubAssign for Num {
    fn sub_assign(&mut self, rhs: Num) {
        *self = *self - rhs;
    }
}

impl Numeric for Num {
    fn from_i64(v: i64) -> Self {
        Num::Double(v as f64)
    }

    fn from_f64(v: f64) -> Self {
        Num::Double(v)
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Float(v) => v as f64,
            Num::Double(v) => v,
            Num::Fixed { raw, k, .. } => raw as f64 / (1u128 << k) as f64,
        }
    }

    fn abs(self) -> Self {
        match self {
            Num::Float(v) => Num::Float(v.abs()),
            Num::Double(v) => Num::Double(v.abs()),
            Num::Fixed { raw, n, k, fast } => Num::Fixed {
                raw: normalize_fixed(raw.abs(), n, fast),
                n,
                k,
                fast,
            },
        }
    }

    fn from_i64_like(&self, v: i64) -> Self {
        match self.kind() {
            NumKind::Float => Num::Float(v as f32),
            NumKind::Double => Num::Double(v as f64),
            NumKind::Fixed { n, k, fast } => Num::Fixed {
                raw: normalize_fixed((v as i128) << k, n, fast),
                n,
                k,
                fast,
            },
        }
    }

    fn from_f64_like(&self, v: f64) -> Self {
        match self.kind() {
            NumKind::Float => Num::Float(v as f32),
            NumKind::Double => Num::Double(v),
            NumKind::Fixed { n, k, fast } => Num::Fixed {
                raw: normalize_fixed((v * (1u128 << k) as f64) as i128, n, fast),
                n,
                k,
                fast,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_arithmetic() {
        let a = Num::Float(1.5);
        let b = Num::Float(2.5);
        assert_eq!((a + b).to_f64(), 4.0);
    }

    #[test]
    fn fixed_arithmetic_round_trips() {
        let kind = NumKind::Fixed {
            n: 32,
            k: 16,
            fast: false,
        };
        let a = kind.from_f64(2.0);
        let b = kind.from_f64(0.5);
        assert!(((a * b).to_f64() - 1.0).abs() < 1e-3);
    }

    #[test]
    #[should_panic(expected = "mismatched Num kinds")]
    fn mismatched_kinds_panic() {
        let _ = Num::Float(1.0) + Num::Double(1.0);
    }

    #[test]
    fn like_constructors_preserve_kind() {
        let kind = NumKind::Fixed {
            n: 16,
            k: 8,
            fast: true,
        };
        let template = kind.zero();
        let built = template.from_f64_like(3.25);
        assert_eq!(built.kind(), kind);
    }
}
