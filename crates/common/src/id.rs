//! ID generation utilities.

use ulid::Ulid;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Shorter than UUIDs when represented as strings
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate `count` distinct IDs, one per row of a batch insert.
    #[must_use]
    pub fn generate_batch(&self, count: usize) -> Vec<String> {
        let mut generator = ulid::Generator::new();
        (0..count)
            .map(|_| {
                generator
                    .generate()
                    .map_or_else(|_| self.generate(), |id| id.to_string().to_lowercase())
            })
            .collect()
    }
}
