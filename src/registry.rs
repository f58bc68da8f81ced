//! Board Registry
//!
//! Id-keyed directory of container capabilities. A list column
//! registers its card store when it mounts and detaches on unmount, so
//! the board-level drag coordinator can mutate or refetch any sibling
//! list's cards without a direct reference graph between components.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type ReadFn<T> = Arc<dyn Fn() -> Vec<T> + Send + Sync>;
type MutateFn<T> = Arc<dyn Fn(Box<dyn FnOnce(&mut Vec<T>) + Send>) + Send + Sync>;
type RefetchFn = Arc<dyn Fn() + Send + Sync>;

/// Capability handle over one container's in-memory collection
pub struct ContainerHandle<T> {
    read: ReadFn<T>,
    mutate: MutateFn<T>,
    refetch: RefetchFn,
}

impl<T> Clone for ContainerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
            mutate: Arc::clone(&self.mutate),
            refetch: Arc::clone(&self.refetch),
        }
    }
}

impl<T: Send + 'static> ContainerHandle<T> {
    pub fn new(
        read: impl Fn() -> Vec<T> + Send + Sync + 'static,
        mutate: impl Fn(Box<dyn FnOnce(&mut Vec<T>) + Send>) + Send + Sync + 'static,
        refetch: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            read: Arc::new(read),
            mutate: Arc::new(mutate),
            refetch: Arc::new(refetch),
        }
    }

    /// Clone of the container's current members, in display order
    pub fn snapshot(&self) -> Vec<T> {
        (self.read)()
    }

    /// Apply an update function to the container's current array
    pub fn mutate(&self, f: impl FnOnce(&mut Vec<T>) + Send + 'static) {
        (self.mutate)(Box::new(f));
    }

    /// Restore a previously captured snapshot verbatim
    pub fn restore(&self, snapshot: Vec<T>) {
        self.mutate(move |members| *members = snapshot);
    }

    /// Reload the container's members from the persistence gateway
    pub fn refetch(&self) {
        (self.refetch)();
    }
}

/// Registry mapping container id to its capability handle
pub struct ContainerRegistry<T> {
    inner: Arc<Mutex<HashMap<u32, ContainerHandle<T>>>>,
}

impl<T> Clone for ContainerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ContainerRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: Send + 'static> ContainerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container's capability. Returns the detach closure
    /// the container must run on unmount (`on_cleanup`).
    pub fn register(
        &self,
        container_id: u32,
        handle: ContainerHandle<T>,
    ) -> impl FnOnce() + Send + Sync + 'static {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(container_id, handle);
        }
        let inner = Arc::clone(&self.inner);
        move || {
            if let Ok(mut map) = inner.lock() {
                map.remove(&container_id);
            }
        }
    }

    pub fn get(&self, container_id: u32) -> Option<ContainerHandle<T>> {
        self.inner.lock().ok()?.get(&container_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_handle(backing: Arc<Mutex<Vec<u32>>>) -> ContainerHandle<u32> {
        let read_store = Arc::clone(&backing);
        let mutate_store = Arc::clone(&backing);
        ContainerHandle::new(
            move || read_store.lock().unwrap().clone(),
            move |f| f(&mut mutate_store.lock().unwrap()),
            || {},
        )
    }

    #[test]
    fn test_register_get_detach() {
        let registry = ContainerRegistry::new();
        let backing = Arc::new(Mutex::new(vec![1, 2, 3]));
        let detach = registry.register(10, make_handle(backing));

        assert!(registry.get(10).is_some());
        assert!(registry.get(11).is_none());

        detach();
        assert!(registry.get(10).is_none());
    }

    #[test]
    fn test_mutate_through_handle() {
        let registry = ContainerRegistry::new();
        let backing = Arc::new(Mutex::new(vec![1, 2, 3]));
        let _detach = registry.register(10, make_handle(backing));

        let handle = registry.get(10).unwrap();
        handle.mutate(|members| members.retain(|&id| id != 2));
        assert_eq!(handle.snapshot(), vec![1, 3]);
    }

    #[test]
    fn test_restore_snapshot() {
        let registry = ContainerRegistry::new();
        let backing = Arc::new(Mutex::new(vec![1, 2, 3]));
        let _detach = registry.register(10, make_handle(backing));

        let handle = registry.get(10).unwrap();
        let snapshot = handle.snapshot();
        handle.mutate(|members| members.clear());
        assert!(handle.snapshot().is_empty());

        handle.restore(snapshot.clone());
        assert_eq!(handle.snapshot(), snapshot);
    }
}
