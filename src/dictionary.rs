use crate::error::{Error, SeedError};
use crate::tag::{TypeLock, TypeTag, TypeTagged};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// A single key-value pair
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key and a value
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Splits the entry into a `(key, value)` tuple
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// Order in which a [`Dictionary`] hands out its entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IterationOrder {
    /// Hash-map order. `first` and `extract` return an arbitrary entry, and
    /// `keys`/`values` come back in no particular order.
    #[default]
    Unordered,
    /// Insertion order. `first` and `extract` return the oldest entry, and
    /// `keys`/`values` follow insertion order.
    Insertion,
}

/// Settings for a [`Dictionary`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub order: IterationOrder,
}

impl DictionaryConfig {
    /// Returns this config with the given iteration order
    pub fn with_order(mut self, order: IterationOrder) -> Self {
        self.order = order;
        self
    }
}

/// A unique-key map whose keys share one type and whose values share one type
///
/// The first entry added fixes both the key type and the value type. Adding an
/// existing key is an error, never an overwrite; use [`set`](Self::set) to
/// replace the value of a key that is already present.
///
/// Like [`Collection`](crate::Collection), a dictionary does no locking of its
/// own.
///
/// # Examples
///
/// ```
/// use sovran_datatypes::{Dictionary, Element, Error};
///
/// let mut ages = Dictionary::new();
/// ages.add(Element::from("alice"), Element::from(30u8))?;
/// ages.add(Element::from("bob"), Element::from(25u8))?;
///
/// assert_eq!(ages.element(&Element::from("alice"))?, &Element::from(30u8));
/// assert!(matches!(
///     ages.add(Element::from("carol"), Element::from("thirty")),
///     Err(Error::InvalidKeyValueType { .. })
/// ));
///
/// ages.set(Element::from("bob"), Element::from(26u8))?;
/// assert_eq!(ages.last()?.1, &Element::from(26u8));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Dictionary<K, V> {
    config: DictionaryConfig,
    lock: TypeLock<(TypeTag, TypeTag)>,
    entries: HashMap<K, V>,
    order: Vec<K>,
    last_key: Option<K>,
}

impl<K, V> Dictionary<K, V>
where
    K: TypeTagged + Eq + Hash + Clone + Debug,
    V: TypeTagged + PartialEq + Debug,
{
    /// Creates a new, empty, unordered dictionary
    pub fn new() -> Self {
        Self::with_config(DictionaryConfig::default())
    }

    /// Creates a new, empty dictionary with the given settings
    pub fn with_config(config: DictionaryConfig) -> Self {
        Self {
            config,
            lock: TypeLock::new(),
            entries: HashMap::new(),
            order: Vec::new(),
            last_key: None,
        }
    }

    /// Creates an unordered dictionary seeded with `entries`
    ///
    /// # Errors
    ///
    /// Seeding follows [`add_range`](Self::add_range): it stops at the first
    /// failing entry. The returned [`SeedError`] keeps the partially seeded
    /// dictionary alongside that entry's error.
    pub fn from_entries<I, E>(entries: I) -> Result<Self, SeedError<Self>>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<K, V>>,
    {
        Self::from_entries_with_config(entries, DictionaryConfig::default())
    }

    /// Same as [`from_entries`](Self::from_entries) with the given settings
    ///
    /// # Errors
    ///
    /// See [`from_entries`](Self::from_entries).
    pub fn from_entries_with_config<I, E>(
        entries: I,
        config: DictionaryConfig,
    ) -> Result<Self, SeedError<Self>>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<K, V>>,
    {
        let mut dictionary = Self::with_config(config);
        match dictionary.add_range(entries) {
            Ok(()) => Ok(dictionary),
            Err(source) => Err(SeedError {
                partial: dictionary,
                source,
            }),
        }
    }

    /// The settings this dictionary was created with
    pub fn config(&self) -> DictionaryConfig {
        self.config
    }

    fn check_types(&mut self, key: &K, value: &V, establish: bool) -> Result<(), Error> {
        let found = (key.type_tag(), value.type_tag());
        let outcome = if establish {
            self.lock.admit(found)
        } else {
            self.lock.check(found)
        };
        outcome.map_err(|(expected_key, expected_value)| Error::InvalidKeyValueType {
            expected_key,
            expected_value,
            found_key: found.0,
            found_value: found.1,
        })
    }

    fn not_found(key: &K) -> Error {
        Error::ElementNotFound(format!("{:?}", key))
    }

    /// Adds a key-value pair
    ///
    /// If no types have been established yet, the pair's key and value types
    /// become the dictionary's. A successful add makes `key` the one returned
    /// by [`last`](Self::last).
    ///
    /// # Errors
    ///
    /// - Returns `Error::InvalidKeyValueType` if the key or value type differs from the dictionary's
    /// - Returns `Error::DuplicateKey` if `key` is already present
    pub fn add(&mut self, key: K, value: V) -> Result<(), Error> {
        self.check_types(&key, &value, true)?;

        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateKey(format!("{:?}", key)));
        }

        if self.config.order == IterationOrder::Insertion {
            self.order.push(key.clone());
        }
        self.last_key = Some(key.clone());
        self.entries.insert(key, value);
        Ok(())
    }

    /// Adds a composed entry
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_entry(&mut self, entry: Entry<K, V>) -> Result<(), Error> {
        self.add(entry.key, entry.value)
    }

    /// Adds every entry in order, stopping at the first failure
    ///
    /// Entries added before the failure stay in the dictionary.
    ///
    /// # Errors
    ///
    /// Returns the error of the first entry that could not be added.
    pub fn add_range<I, E>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<K, V>>,
    {
        for (index, entry) in entries.into_iter().enumerate() {
            if let Err(err) = self.add_entry(entry.into()) {
                debug!(index, error = %err, "add_range stopped early");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Adds every entry in order, leaving the dictionary untouched if any of
    /// them fails
    ///
    /// # Errors
    ///
    /// Returns the error of the first entry that could not be added.
    pub fn add_range_atomic<I, E>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry<K, V>>,
        V: Clone,
    {
        let snapshot = self.clone();
        self.add_range(entries).inspect_err(|_| {
            debug!("add_range_atomic rolled back");
            *self = snapshot;
        })
    }

    /// Adds the entries of another dictionary; `other` is left unchanged
    ///
    /// Entries are taken in `other`'s iteration order.
    ///
    /// # Errors
    ///
    /// Same as [`add_range`](Self::add_range).
    pub fn add_dictionary(&mut self, other: &Dictionary<K, V>) -> Result<(), Error>
    where
        V: Clone,
    {
        self.add_range(
            other
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        )
    }

    /// Returns the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `Error::ElementNotFound` if `key` is absent.
    pub fn element(&self, key: &K) -> Result<&V, Error> {
        self.entries.get(key).ok_or_else(|| Self::not_found(key))
    }

    /// Read-only view of the whole key-value mapping
    pub fn elements(&self) -> &HashMap<K, V> {
        &self.entries
    }

    /// Iterates over the entries in the configured order
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        match self.config.order {
            IterationOrder::Unordered => Box::new(self.entries.iter()),
            IterationOrder::Insertion => Box::new(
                self.order
                    .iter()
                    .filter_map(|key| self.entries.get_key_value(key)),
            ),
        }
    }

    /// All keys, in the configured order
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    /// All values, in the configured order
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Returns an entry without removing it
    ///
    /// With [`IterationOrder::Unordered`] this is any entry and may differ
    /// between runs; with [`IterationOrder::Insertion`] it is the oldest one.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyContainer` if the dictionary is empty.
    pub fn first(&self) -> Result<(&K, &V), Error> {
        self.iter().next().ok_or(Error::EmptyContainer)
    }

    /// Returns the most recently added entry that is still present
    ///
    /// When that entry has been removed, an insertion-ordered dictionary falls
    /// back to the newest remaining entry, while an unordered one has nothing
    /// to report until the next successful add.
    ///
    /// # Errors
    ///
    /// - Returns `Error::EmptyContainer` if the dictionary is empty
    /// - Returns `Error::ElementNotFound` if the last added key has been removed from an unordered dictionary
    pub fn last(&self) -> Result<(&K, &V), Error> {
        if self.entries.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let key = self
            .last_key
            .as_ref()
            .ok_or_else(|| Error::ElementNotFound("last added key was removed".to_string()))?;
        self.entries
            .get_key_value(key)
            .ok_or_else(|| Self::not_found(key))
    }

    /// Removes and returns an entry, chosen as [`first`](Self::first) does
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyContainer` if the dictionary is empty.
    pub fn extract(&mut self) -> Result<Entry<K, V>, Error> {
        let key = self.first()?.0.clone();
        self.extract_key(&key)
    }

    /// Removes and returns the entry stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `Error::ElementNotFound` if `key` is absent.
    pub fn extract_key(&mut self, key: &K) -> Result<Entry<K, V>, Error> {
        self.remove_entry(key)
            .map(|(key, value)| Entry { key, value })
            .ok_or_else(|| Self::not_found(key))
    }

    /// Replaces the value of an existing key, returning the previous value
    ///
    /// `set` never inserts a new key and does not change what
    /// [`last`](Self::last) returns.
    ///
    /// # Errors
    ///
    /// - Returns `Error::InvalidKeyValueType` if the key or value type differs from the dictionary's
    /// - Returns `Error::ElementNotFound` if `key` is absent
    pub fn set(&mut self, key: K, value: V) -> Result<V, Error> {
        self.check_types(&key, &value, false)?;

        let slot = self
            .entries
            .get_mut(&key)
            .ok_or_else(|| Self::not_found(&key))?;
        Ok(std::mem::replace(slot, value))
    }

    /// Removes `key` and returns its value
    ///
    /// # Errors
    ///
    /// Returns `Error::ElementNotFound` if `key` is absent.
    pub fn delete(&mut self, key: &K) -> Result<V, Error> {
        self.remove_entry(key)
            .map(|(_, value)| value)
            .ok_or_else(|| Self::not_found(key))
    }

    /// Deletes every key in order, stopping at the first failure
    ///
    /// Keys deleted before the failure stay deleted.
    ///
    /// # Errors
    ///
    /// Returns the error of the first key that could not be deleted.
    pub fn delete_range<'a, I>(&mut self, keys: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        for (index, key) in keys.into_iter().enumerate() {
            if let Err(err) = self.delete(key) {
                debug!(index, error = %err, "delete_range stopped early");
                return Err(err);
            }
        }
        Ok(())
    }

    fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let removed = self.entries.remove_entry(key)?;

        if self.config.order == IterationOrder::Insertion {
            self.order.retain(|current| current != key);
        }
        if self.last_key.as_ref() == Some(key) {
            self.last_key = self.order.last().cloned();
        }
        Some(removed)
    }

    /// Check if `key` is present
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Check if any key maps to a value equal to `value`
    pub fn contains_value(&self, value: &V) -> bool {
        self.entries.values().any(|current| current == value)
    }

    /// Returns copies of the entries for which `predicate` holds
    pub fn filter<F>(&self, mut predicate: F) -> HashMap<K, V>
    where
        F: FnMut(&K, &V) -> bool,
        V: Clone,
    {
        self.entries
            .iter()
            .filter(|(key, value)| predicate(key, value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// The key type established by the first added entry, if any
    pub fn key_type(&self) -> Option<TypeTag> {
        self.lock.established().map(|(key, _)| key)
    }

    /// The value type established by the first added entry, if any
    pub fn value_type(&self) -> Option<TypeTag> {
        self.lock.established().map(|(_, value)| value)
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for Dictionary<K, V>
where
    K: TypeTagged + Eq + Hash + Clone + Debug,
    V: TypeTagged + PartialEq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
