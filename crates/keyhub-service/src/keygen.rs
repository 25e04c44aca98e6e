//! Random license key generation.

use uuid::Uuid;

use keyhub_core::traits::KeyGenerator;

/// Generates keys from random (version 4) UUIDs rendered in upper case,
/// e.g. `3F2504E0-4F89-41D3-9A0C-0305E82C3301`.
///
/// A v4 UUID carries 122 random bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeyGenerator;

impl UuidKeyGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }
}

impl KeyGenerator for UuidKeyGenerator {
    fn generate(&self) -> String {
        let mut buf = Uuid::encode_buffer();
        Uuid::new_v4()
            .hyphenated()
            .encode_upper(&mut buf)
            .to_string()
    }
}
