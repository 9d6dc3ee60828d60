//! Batch identifier allocation.
//!
//! Each identifier is [`BatchId::RAW_LEN`] bytes of entropy rendered as hex.
//! Collisions are astronomically unlikely with a healthy source, but a
//! duplicate inside one transcript would corrupt nesting on the client, so
//! the allocator remembers what it issued and draws again on a repeat.

use std::collections::HashSet;

use certinfo_proto::BatchId;

use crate::{env::Environment, error::DisclosureError};

/// Draws allowed after a collision before the source is declared broken.
pub const MAX_REDRAWS: usize = 8;

/// Draw one identifier from the environment.
pub fn generate<E: Environment>(env: &E) -> Result<BatchId, DisclosureError> {
    let mut raw = [0u8; BatchId::RAW_LEN];
    env.random_bytes(&mut raw)?;
    Ok(BatchId::from_bytes(raw))
}

/// Issues identifiers that are pairwise distinct for its lifetime.
///
/// One allocator lives for exactly one encoding call.
#[derive(Debug)]
pub struct BatchIdAllocator<E> {
    env: E,
    issued: HashSet<BatchId>,
}

impl<E: Environment> BatchIdAllocator<E> {
    /// Create an allocator with no identifiers issued.
    pub fn new(env: E) -> Self {
        Self { env, issued: HashSet::new() }
    }

    /// Issue a fresh identifier.
    ///
    /// # Errors
    ///
    /// `IdentifierGenerationFailed` if entropy is unavailable or keeps
    /// producing identifiers already issued.
    pub fn allocate(&mut self) -> Result<BatchId, DisclosureError> {
        for attempt in 0..=MAX_REDRAWS {
            let id = generate(&self.env)?;
            if self.issued.insert(id.clone()) {
                return Ok(id);
            }
            tracing::warn!(attempt, "batch identifier collision, drawing again");
        }

        Err(DisclosureError::IdentifierGenerationFailed(
            "entropy source keeps repeating identifiers".to_owned(),
        ))
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}
