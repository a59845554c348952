//! The "thin shell" external collaborators spec.md §1 calls out as
//! explicitly out of scope for the core: numeric type tag parsing, the
//! field-file loader, checkpoint save/restore, the dispatcher/factory
//! that builds an `Engine` from parsed tags, and an optional settings
//! file. None of this touches the tick algorithm itself.

pub mod checkpoint;
pub mod dispatch;
pub mod error;
pub mod field_file;
pub mod numeric_tag;
pub mod settings;

pub use checkpoint::{load_checkpoint, save_checkpoint};
pub use dispatch::{build_engine, build_engine_with_seed, validate_thread_count, TypeTriple};
pub use error::{ConfigError, FieldFileError};
pub use field_file::{load_field_file, FieldFile};
pub use numeric_tag::parse_type_tag;
pub use settings::{discover as discover_settings, load_from as load_settings, Settings};
