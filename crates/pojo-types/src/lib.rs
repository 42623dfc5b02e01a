//! Plain-form (POJO) conversions for SurrealDB value types.
//!
//! SurrealDB values such as record ids, UUIDs, durations, decimals, table
//! references and geometries do not survive a trip through JSON or any other
//! plain data channel. This crate maps them to a fixed plain shape and back.
//!
//! # Modules
//!
//! - [`forward`] - SurrealDB value → plain value conversion
//! - [`reverse`] - plain value → SurrealDB value conversion
//! - [`factories`] - plain-form constructors
//! - [`guards`] - plain-form recognizers
//! - [`geometry`] - typed plain geometries and their arity rules
//! - [`json`] - moving plain values across the JSON boundary
//!
//! # Plain forms
//!
//! | SurrealDB       | Plain                                         |
//! |-----------------|-----------------------------------------------|
//! | `Thing`         | `{ tb, id }`                                  |
//! | `Uuid`          | `{ type: "uuid", value }`                     |
//! | `Duration`      | `{ type: "duration", value }`                 |
//! | `Decimal`       | `{ type: "decimal", value }`                  |
//! | `Table`         | `{ type: "table", name }`                     |
//! | `Geometry`      | `{ type: <shape>, coordinates }`              |
//!
//! # Example
//!
//! ```rust
//! use pojo_types::{convert_to_pojo, convert_to_surreal};
//! use surrealdb::sql::{Thing, Value};
//!
//! let rich = Value::Thing(Thing::from(("user", "123")));
//! let plain = convert_to_pojo(&rich).unwrap();
//! assert!(pojo_types::is_record_id(&plain));
//! assert_eq!(convert_to_surreal(&plain).unwrap(), rich);
//! ```

pub mod config;
pub mod error;
pub mod factories;
pub mod forward;
pub mod geometry;
pub mod guards;
pub mod json;
pub mod kind;
pub mod reverse;

pub use config::{ConversionConfig, DEFAULT_MAX_DEPTH};
pub use error::{ArityError, ConversionError, Result};
pub use factories::{
    new_decimal, new_duration, new_geometry, new_record_id, new_table, new_uuid,
};
pub use forward::{convert_to_pojo, convert_to_pojo_with_config};
pub use geometry::{PlainGeometry, Position};
pub use guards::{
    classify, is_decimal, is_duration, is_geometry, is_record_id, is_table, is_uuid,
};
pub use json::{
    plain_from_json, plain_to_json, rich_from_json, rich_from_json_with_config, rich_to_json,
    rich_to_json_with_config,
};
pub use kind::{GeometryKind, PlainKind, RichKind};
pub use reverse::{convert_to_surreal, convert_to_surreal_with_config};
