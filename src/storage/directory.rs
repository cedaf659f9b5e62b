//! An in-memory directory of people
//!
//! The [`Directory`] maps each person's name, exactly as it was entered, to
//! their [`Person`] record. Lookups compare names by their normalized form,
//! so `"Ana"`, `" ana "` and `"ANA"` all refer to the same person.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{validate::normalize_name, Person};

/// The full collection of person records, keyed by name.
///
/// Iteration is always in lexicographic order of the stored names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    people: BTreeMap<String, Person>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            people: BTreeMap::new(),
        }
    }

    /// The number of people in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Whether some stored name normalizes to the same key as `name`.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.find_exact(name).is_some()
    }

    /// Returns the stored name, in its original casing, that matches `name`
    /// after normalization.
    #[must_use]
    pub fn find_exact(&self, name: &str) -> Option<&str> {
        let key = normalize_name(name);
        self.people
            .keys()
            .find(|stored| normalize_name(stored) == key)
            .map(String::as_str)
    }

    /// Returns every stored name whose normalized form contains the normalized
    /// fragment, sorted lexicographically.
    ///
    /// An empty fragment matches every name.
    #[must_use]
    pub fn search_fragment(&self, fragment: &str) -> Vec<String> {
        let fragment = normalize_name(fragment);
        self.people
            .keys()
            .filter(|stored| normalize_name(stored).contains(&fragment))
            .cloned()
            .collect()
    }

    /// Looks up a record by its exact stored name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    /// Inserts or overwrites the entry stored under exactly `name`.
    ///
    /// The name is stored as given; only comparisons are normalized. Callers
    /// are responsible for checking [`Directory::exists`] first where a
    /// duplicate would be a problem.
    ///
    /// Returns the record previously stored under `name`, if any.
    pub fn upsert(&mut self, name: impl Into<String>, person: Person) -> Option<Person> {
        let name = name.into();
        tracing::trace!("Upserting {name}");
        self.people.insert(name, person)
    }

    /// Removes the entry stored under exactly `name` (not normalized).
    ///
    /// Returns the removed record, if there was one.
    pub fn remove(&mut self, name: &str) -> Option<Person> {
        self.people.remove(name)
    }

    /// Iterates over every entry, sorted lexicographically by name.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Person)> {
        self.people.iter().map(|(name, person)| (name.as_str(), person))
    }
}

impl FromIterator<(String, Person)> for Directory {
    fn from_iter<T: IntoIterator<Item = (String, Person)>>(iter: T) -> Self {
        Self {
            people: iter.into_iter().collect(),
        }
    }
}
