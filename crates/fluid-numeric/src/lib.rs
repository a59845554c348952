//! Numeric kernel: the `Numeric` trait, fixed-point types, and the
//! runtime-tagged `Num`/`NumKind` pair used by the dispatcher.

pub mod dynamic;
pub mod fixed;
pub mod numeric;

pub use dynamic::{Num, NumKind};
pub use fixed::{FastFixed, Fixed, RawFixed};
pub use numeric::Numeric;
