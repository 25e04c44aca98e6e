//! Key generator trait.

/// Source of fresh license keys.
///
/// Implementations must draw from a space large enough that collisions
/// across realistic issuance volumes are negligible (at least 122 bits of
/// randomness). Generating a key never touches the license store.
pub trait KeyGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Produce the text of a new key.
    fn generate(&self) -> String;
}
