//! Collaborator seams the sync engine depends on.
//!
//! The identity store, attribute persistence, and status display are owned
//! by the host application. The engine only borrows them for a run.

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::person::{AttributeValue, Person, PersonAliasId};

/// Resolves a person alias to the person it belongs to.
#[async_trait]
pub trait PersonResolver: Send + Sync {
    /// Look up the person behind `alias`. `Ok(None)` means no such person.
    async fn resolve_by_alias(&self, alias: PersonAliasId) -> Result<Option<Person>, StoreError>;
}

/// Persists person attribute values.
///
/// Every call must be durable on return. Implementations must treat the
/// write as "set `key` to `value`" with last-writer-wins semantics.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    async fn set_attribute(
        &self,
        person: &Person,
        key: &str,
        value: &AttributeValue,
    ) -> Result<(), StoreError>;
}

/// Fire-and-forget status text for an external display.
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str);
}
