//! Core traits defined in `keyhub-core` and implemented by other crates.

pub mod key_generator;

pub use key_generator::KeyGenerator;
