use crate::element::Element;
use crate::error::{Error, SeedError};
use crate::generic;
use crate::tag::{TypeLock, TypeTag, TypeTagged};
use std::borrow::Borrow;
use std::fmt::Debug;
use tracing::debug;

/// A non-sorted list of unique elements of a single type
///
/// The first element added fixes the collection's type for the rest of its
/// life, even after every element has been deleted again. Elements are
/// compared with `PartialEq`, so duplicates are rejected by value rather than
/// by identity.
///
/// Positions are exposed for convenience only. Deleting an element may move
/// another element into its slot, so do not rely on positions staying put
/// across deletions.
///
/// A collection does no locking of its own. Wrap it in a `Mutex` to share it
/// between threads.
///
/// # Examples
///
/// ```
/// use sovran_datatypes::{Collection, Element, Error};
///
/// let mut names = Collection::new();
/// names.add(Element::from("alice"))?;
/// names.add(Element::from("bob"))?;
///
/// assert!(names.contains(&Element::from("bob")));
/// assert!(matches!(
///     names.add(Element::from("alice")),
///     Err(Error::DuplicateElement(_))
/// ));
/// assert!(matches!(
///     names.add(Element::from(42i32)),
///     Err(Error::InvalidElementType { .. })
/// ));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Collection<T> {
    lock: TypeLock<TypeTag>,
    elements: Vec<T>,
}

impl<T> Collection<T>
where
    T: TypeTagged + PartialEq + Debug,
{
    /// Creates a new, empty collection with no type established yet
    pub fn new() -> Self {
        Self {
            lock: TypeLock::new(),
            elements: Vec::new(),
        }
    }

    /// Creates a collection seeded with `elements`
    ///
    /// # Errors
    ///
    /// Seeding follows [`add_range`](Self::add_range): it stops at the first
    /// failing element. The returned [`SeedError`] keeps the partially seeded
    /// collection alongside that element's error.
    pub fn from_elements<I>(elements: I) -> Result<Self, SeedError<Self>>
    where
        I: IntoIterator<Item = T>,
    {
        let mut collection = Self::new();
        match collection.add_range(elements) {
            Ok(()) => Ok(collection),
            Err(source) => Err(SeedError {
                partial: collection,
                source,
            }),
        }
    }

    /// Adds a single element
    ///
    /// If no type has been established yet, the element's type becomes the
    /// collection's type.
    ///
    /// # Errors
    ///
    /// - Returns `Error::InvalidElementType` if the element's type differs from the collection's
    /// - Returns `Error::DuplicateElement` if an equal element is already stored
    pub fn add(&mut self, element: T) -> Result<(), Error> {
        let found = element.type_tag();
        self.lock
            .admit(found)
            .map_err(|expected| Error::InvalidElementType { expected, found })?;

        if self.contains(&element) {
            return Err(Error::DuplicateElement(format!("{:?}", element)));
        }

        self.elements.push(element);
        Ok(())
    }

    /// Adds every element in order, stopping at the first failure
    ///
    /// Elements added before the failure stay in the collection.
    ///
    /// # Errors
    ///
    /// Returns the error of the first element that could not be added.
    pub fn add_range<I>(&mut self, elements: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        for (index, element) in elements.into_iter().enumerate() {
            if let Err(err) = self.add(element) {
                debug!(index, error = %err, "add_range stopped early");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Adds every element in order, leaving the collection untouched if any of
    /// them fails
    ///
    /// # Errors
    ///
    /// Returns the error of the first element that could not be added.
    pub fn add_range_atomic<I>(&mut self, elements: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Clone,
    {
        let snapshot = self.clone();
        self.add_range(elements).inspect_err(|_| {
            debug!("add_range_atomic rolled back");
            *self = snapshot;
        })
    }

    /// Adds the elements of another collection; `other` is left unchanged
    ///
    /// # Errors
    ///
    /// Same as [`add_range`](Self::add_range).
    pub fn add_collection(&mut self, other: &Collection<T>) -> Result<(), Error>
    where
        T: Clone,
    {
        self.add_range(other.elements.iter().cloned())
    }

    /// Returns the first element without removing it
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if the collection is empty.
    pub fn first(&self) -> Result<&T, Error> {
        self.element_at(0)
    }

    /// Returns the last element without removing it
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if the collection is empty.
    pub fn last(&self) -> Result<&T, Error> {
        self.elements.last().ok_or(Error::IndexOutOfRange {
            index: 0,
            len: 0,
        })
    }

    /// Returns the element at `position`
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfRange` if `position` is not below `len()`.
    pub fn element_at(&self, position: usize) -> Result<&T, Error> {
        self.elements.get(position).ok_or(Error::IndexOutOfRange {
            index: position,
            len: self.elements.len(),
        })
    }

    /// Read-only view of every element
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Copies every element out of the collection
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.elements.clone()
    }

    /// Iterates over the elements in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Removes and returns the first element; the rest keep their order
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyContainer` if the collection is empty.
    pub fn extract_first(&mut self) -> Result<T, Error> {
        if self.elements.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(self.elements.remove(0))
    }

    /// Replaces the element at `position`, returning the previous one
    ///
    /// Only the type is checked: `set` can place a value equal to another
    /// stored element.
    ///
    /// # Errors
    ///
    /// - Returns `Error::InvalidElementType` if the element's type differs from the collection's
    /// - Returns `Error::IndexOutOfRange` if `position` is not below `len()`
    pub fn set(&mut self, position: usize, element: T) -> Result<T, Error> {
        let found = element.type_tag();
        self.lock
            .check(found)
            .map_err(|expected| Error::InvalidElementType { expected, found })?;

        let len = self.elements.len();
        let slot = self
            .elements
            .get_mut(position)
            .ok_or(Error::IndexOutOfRange {
                index: position,
                len,
            })?;
        Ok(std::mem::replace(slot, element))
    }

    /// Removes the element equal to `element` and returns the stored copy
    ///
    /// The last element is moved into the freed position.
    ///
    /// # Errors
    ///
    /// - Returns `Error::InvalidElementType` if the collection is non-empty and holds another type
    /// - Returns `Error::ElementNotFound` if no equal element is stored
    pub fn delete(&mut self, element: &T) -> Result<T, Error> {
        if !self.elements.is_empty() {
            let found = element.type_tag();
            self.lock
                .check(found)
                .map_err(|expected| Error::InvalidElementType { expected, found })?;
        }

        let position = self
            .elements
            .iter()
            .position(|current| current == element)
            .ok_or_else(|| Error::ElementNotFound(format!("{:?}", element)))?;
        Ok(self.elements.swap_remove(position))
    }

    /// Deletes every element in order, stopping at the first failure
    ///
    /// Elements deleted before the failure stay deleted.
    ///
    /// # Errors
    ///
    /// Returns the error of the first element that could not be deleted.
    pub fn delete_range<I>(&mut self, elements: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        for (index, element) in elements.into_iter().enumerate() {
            if let Err(err) = self.delete(element.borrow()) {
                debug!(index, error = %err, "delete_range stopped early");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Deletes the elements of another collection; `other` is left unchanged
    ///
    /// # Errors
    ///
    /// Same as [`delete_range`](Self::delete_range).
    pub fn delete_collection(&mut self, other: &Collection<T>) -> Result<(), Error> {
        self.delete_range(other.elements.iter())
    }

    /// Check if an equal element is stored
    pub fn contains(&self, element: &T) -> bool {
        self.elements.iter().any(|current| current == element)
    }

    /// Check if any of `elements` is stored
    pub fn contains_any<I>(&self, elements: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        elements
            .into_iter()
            .any(|element| self.contains(element.borrow()))
    }

    /// Returns copies of the elements for which `predicate` holds
    pub fn filter<F>(&self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
        T: Clone,
    {
        self.elements
            .iter()
            .filter(|element| predicate(element))
            .cloned()
            .collect()
    }

    /// The type established by the first added element, if any
    pub fn element_type(&self) -> Option<TypeTag> {
        self.lock.established()
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the collection holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Collection<Element> {
    /// Creates a collection seeded from a list element
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIterableInput` with an empty collection if
    /// `seed` is not a list; otherwise behaves like
    /// [`from_elements`](Self::from_elements).
    pub fn from_list(seed: &Element) -> Result<Self, SeedError<Self>> {
        match generic::to_elements(seed) {
            Ok(elements) => Self::from_elements(elements),
            Err(source) => Err(SeedError {
                partial: Self::new(),
                source,
            }),
        }
    }

    /// [`add_range`](Self::add_range) over a list element
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIterableInput` if `elements` is not a list,
    /// otherwise the first failing element's error.
    pub fn add_list(&mut self, elements: &Element) -> Result<(), Error> {
        self.add_range(generic::to_elements(elements)?)
    }

    /// [`delete_range`](Self::delete_range) over a list element
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidIterableInput` if `elements` is not a list,
    /// otherwise the first failing element's error.
    pub fn delete_list(&mut self, elements: &Element) -> Result<(), Error> {
        self.delete_range(generic::to_elements(elements)?)
    }

    /// [`contains_any`](Self::contains_any) over a list element
    ///
    /// Anything that is not a list simply yields `false`.
    pub fn contains_any_list(&self, elements: &Element) -> bool {
        generic::to_elements(elements)
            .map(|elements| self.contains_any(elements))
            .unwrap_or(false)
    }
}

impl<T> Default for Collection<T>
where
    T: TypeTagged + PartialEq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
