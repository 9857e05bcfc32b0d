//! Enum-definition pipeline for API binding generators.
//!
//! Registry documents are read into an [`enums::EnumCollection`] by
//! [`reader::SpecReader`], then normalized by [`processor::EnumProcessor`]:
//! override documents rename enums and tokens, identifiers are folded into
//! the target convention, and aliases between enums are resolved.
pub mod config;
pub mod diagnostics;
pub mod enums;
pub mod model;
pub mod overrides;
pub mod processor;
pub mod reader;
mod select;
pub mod translate;
pub mod typemap;
