//! Repository Layer - Core Traits
//!
//! Defines the abstract interface shared by all data access
//! implementations.

use crate::domain::{DomainResult, Entity};
use async_trait::async_trait;

/// Lookup/removal contract every repository satisfies.
/// All operations are async to keep the command layer non-blocking.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Delete entity by ID, cascading to owned children
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
