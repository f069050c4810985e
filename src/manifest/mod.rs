// src/manifest/mod.rs
//! Export manifest decoding — from raw markup to the page tree.

mod dom;
mod parser;

pub use parser::{derive_page_id, parse_export_index};
