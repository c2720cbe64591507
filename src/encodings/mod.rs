// encodings/mod.rs - Byte-level codecs.
// Identifiers arrive as UTF-8 byte buffers; utf8 is the only codec.

pub mod utf8;

pub use utf8::{decode, encode};
