//! Mapping between the environment and typed configuration records.
//!
//! This module handles:
//! - Field descriptors and the `env_record!` declaration macro
//! - Decoding tagged fields from an environment store with scalar coercion
//! - Encoding tagged fields back into env file lines

pub mod decode;
pub mod encode;
pub mod record;
pub mod scalar;

pub use decode::{decode, decode_any, decode_from};
pub use encode::{encode, encode_any, format_line};
pub use record::{EnvRecord, Field};
pub use scalar::{CoercionError, ScalarKind, parse_bool};
