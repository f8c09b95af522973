//! Audio I/O
//!
//! Decoded-sample buffering plus a Symphonia-based decoding front-end.

pub mod decoder;
pub mod sample_buffer;

pub use decoder::decode_file;
pub use sample_buffer::SampleBuffer;
