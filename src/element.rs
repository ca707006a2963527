use crate::tag::{TypeTag, TypeTagged};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

trait DynValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_boxed(&self) -> Box<dyn DynValue>;
    fn eq_dyn(&self, other: &dyn DynValue) -> bool;
}

impl<T> DynValue for T
where
    T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn DynValue> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn DynValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A type-erased value that remembers its type
///
/// `Element` is the fully dynamic element kind: a [`Collection<Element>`] or a
/// [`Dictionary<Element, Element>`] accepts values of any type at its boundary
/// and locks itself to whichever type arrives first.
///
/// Two elements are equal when they hold the same type and the held values
/// compare equal with that type's `PartialEq`, so structured records compare
/// field by field.
///
/// An element hashes by its type alone, so equal elements always hash alike no
/// matter how they were built. As a dictionary key this means every key of one
/// type shares a bucket and lookups compare keys one by one.
///
/// Equality is only as reflexive as the held type's. A float `NaN` never equals
/// itself, so a `NaN` key can be added to a dictionary but never found again.
///
/// [`Collection<Element>`]: crate::Collection
/// [`Dictionary<Element, Element>`]: crate::Dictionary
///
/// # Examples
///
/// ```
/// use sovran_datatypes::Element;
///
/// let a = Element::new(42i32);
/// assert!(a.is::<i32>());
/// assert_eq!(a.downcast_ref::<i32>(), Some(&42));
/// assert_eq!(a, Element::new(42i32));
/// assert_ne!(a, Element::new(42i64));
/// ```
pub struct Element {
    tag: TypeTag,
    value: Box<dyn DynValue>,
}

impl Element {
    /// Wraps a value
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
    {
        Self {
            tag: TypeTag::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Wraps a sequence of values as a single list element
    ///
    /// This is the shape [`to_elements`](crate::generic::to_elements) reads
    /// back as a sequence.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        Self::new(items.into_iter().map(Into::into).collect::<Vec<Element>>())
    }

    /// The tag of the held value
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Check if the held value is of type T
    pub fn is<T: 'static>(&self) -> bool {
        self.tag.is::<T>()
    }

    /// Get a reference to the held value if it is of type T
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref().as_any().downcast_ref::<T>()
    }

    /// Unwraps the held value if it is of type T
    pub fn into_inner<T: 'static>(self) -> Option<T> {
        self.value.into_any().downcast::<T>().ok().map(|value| *value)
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag,
            value: self.value.as_ref().clone_boxed(),
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.value.as_ref().eq_dyn(other.value.as_ref())
    }
}

impl Eq for Element {}

// The held value may not be `Hash`, and equal elements must hash alike.
impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl TypeTagged for Element {
    fn type_tag(&self) -> TypeTag {
        self.tag
    }
}

macro_rules! element_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::new(value)
                }
            }
        )+
    };
}

element_from!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        age: u8,
    }

    fn hash_of(element: &Element) -> u64 {
        let mut hasher = DefaultHasher::new();
        element.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_structural_equality() {
        let alice = Element::new(Person {
            name: "Alice".to_string(),
            age: 30,
        });
        let also_alice = Element::new(Person {
            name: "Alice".to_string(),
            age: 30,
        });
        let older_alice = Element::new(Person {
            name: "Alice".to_string(),
            age: 31,
        });

        assert_eq!(alice, also_alice);
        assert_ne!(alice, older_alice);
        assert_ne!(alice, Element::new("Alice".to_string()));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Element::new(vec![1, 2, 3]);
        let copy = original.clone();
        assert_eq!(original, copy);
        assert_eq!(copy.into_inner::<Vec<i32>>(), Some(vec![1, 2, 3]));
        assert_eq!(original.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_downcast_wrong_type() {
        let element = Element::new(7u16);
        assert!(element.downcast_ref::<u32>().is_none());
        assert!(!element.is::<u32>());
        assert_eq!(element.tag(), TypeTag::of::<u16>());
        assert_eq!(element.type_tag(), TypeTag::of::<u16>());
        assert!(element.into_inner::<u32>().is_none());
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        assert_eq!(hash_of(&Element::from("a")), hash_of(&Element::from("a")));
        assert_eq!(hash_of(&Element::new(1.5f64)), hash_of(&Element::new(2.5f64)));

        let set: HashSet<Element> = ["a", "b", "a"].into_iter().map(Element::from).collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Element::from("b")));
        assert!(!set.contains(&Element::from("b".to_string())));
    }

    #[test]
    fn test_hash_ignores_constructor() {
        let built = Element::new("k");
        let converted = Element::from("k");
        assert_eq!(built, converted);
        assert_eq!(hash_of(&built), hash_of(&converted));

        let listed = Element::list(["k"]);
        let items = listed.downcast_ref::<Vec<Element>>().unwrap();
        assert_eq!(items[0], built);
        assert_eq!(hash_of(&items[0]), hash_of(&built));

        let mut set = HashSet::new();
        assert!(set.insert(Element::new(7u32)));
        assert!(!set.insert(Element::from(7u32)));
        assert!(set.contains(&Element::from(7u32)));
        assert!(set.remove(&Element::from(7u32)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_nan_never_equals_itself() {
        let nan = Element::from(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert_eq!(hash_of(&nan), hash_of(&Element::from(1.0f64)));

        let set: HashSet<Element> = [nan.clone(), nan.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&nan));
    }

    #[test]
    fn test_list_and_debug() {
        let list = Element::list([1i32, 2, 3]);
        assert!(list.is::<Vec<Element>>());
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
        assert_eq!(format!("{:?}", Element::from("x")), "\"x\"");
    }
}
