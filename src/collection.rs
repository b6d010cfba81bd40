//! Newest-first record collection.
//!
//! Records are inserted at the front and looked up by a linear front-to-back
//! scan on their key, so the first match always wins. The collection owns its
//! records outright: removing one drops it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Errors that can occur when adding to a collection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollectionError {
    /// The collection already holds its configured maximum.
    #[error("collection is full ({capacity} records)")]
    CapacityExceeded { capacity: usize },
}

/// Records that can be found by name.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Ordered, newest-first sequence of records with an optional size cap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    entries: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> Collection<T> {
    /// Create an empty collection. `None` means unbounded.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Link a record in at the front.
    ///
    /// Fails without touching the collection when it is already full.
    pub fn insert_front(&mut self, record: T) -> Result<(), CollectionError> {
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity {
                return Err(CollectionError::CapacityExceeded { capacity });
            }
        }
        self.entries.push_front(record);
        Ok(())
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Records front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn front(&self) -> Option<&T> {
        self.entries.front()
    }
}

impl<T: Keyed> Collection<T> {
    /// Index of the first record whose key equals `key` exactly.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|r| r.key() == key)
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|r| r.key() == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.iter_mut().find(|r| r.key() == key)
    }

    /// Unlink the first record matching `key`, keeping the others in order.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let index = self.position(key)?;
        self.entries.remove(index)
    }

    /// Keys front to back.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Keyed::key)
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
