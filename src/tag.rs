use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// An opaque, comparable descriptor of a value's type
///
/// Two tags are equal when they describe the same type. The type name is kept
/// only for error messages and never takes part in comparisons.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag describing `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying type identifier
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name, as reported by the compiler
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this tag describes `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Values that can report the type identity used by the homogeneity guard
///
/// The containers never inspect a value's fields; this is the only thing they
/// ask of it besides equality. Implement it for your own records with
/// [`type_tagged!`](crate::type_tagged), or by hand for sum types where each
/// variant should count as a distinct type:
///
/// ```
/// use sovran_datatypes::{Collection, Error, TypeTag, TypeTagged};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Reading {
///     Celsius(i32),
///     Label(String),
/// }
///
/// impl TypeTagged for Reading {
///     fn type_tag(&self) -> TypeTag {
///         match self {
///             Reading::Celsius(_) => TypeTag::of::<i32>(),
///             Reading::Label(_) => TypeTag::of::<String>(),
///         }
///     }
/// }
///
/// let mut readings = Collection::new();
/// readings.add(Reading::Celsius(21))?;
/// assert!(matches!(
///     readings.add(Reading::Label("warm".to_string())),
///     Err(Error::InvalidElementType { .. })
/// ));
/// # Ok::<(), Error>(())
/// ```
pub trait TypeTagged {
    fn type_tag(&self) -> TypeTag;
}

/// Implements [`TypeTagged`] for one or more concrete types, tagging every
/// value with the type itself
///
/// ```
/// use sovran_datatypes::{type_tagged, TypeTag, TypeTagged};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// type_tagged!(Point);
///
/// assert_eq!(Point { x: 1, y: 2 }.type_tag(), TypeTag::of::<Point>());
/// ```
#[macro_export]
macro_rules! type_tagged {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::TypeTagged for $ty {
                fn type_tag(&self) -> $crate::TypeTag {
                    $crate::TypeTag::of::<$ty>()
                }
            }
        )+
    };
}

type_tagged!(
    (),
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

impl<T: 'static> TypeTagged for Vec<T> {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl<T: 'static> TypeTagged for Option<T> {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl<T: ?Sized + 'static> TypeTagged for Box<T> {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl<A: 'static, B: 'static> TypeTagged for (A, B) {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl<A: 'static, B: 'static, C: 'static> TypeTagged for (A, B, C) {
    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<Self>()
    }
}

/// The homogeneity guard
///
/// Remembers the first signature it admits and rejects any other signature for
/// the rest of its life. `S` is a single [`TypeTag`] for collections and a
/// `(key, value)` pair for dictionaries. The lock is never released, even if
/// the owning container is drained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeLock<S> {
    established: Option<S>,
}

impl<S: Copy + PartialEq + fmt::Debug> TypeLock<S> {
    /// Creates an open lock
    pub fn new() -> Self {
        Self { established: None }
    }

    /// Establishes the lock with `found` if it is still open, otherwise checks
    /// `found` against it
    ///
    /// # Errors
    ///
    /// Returns the established signature when `found` differs from it.
    pub fn admit(&mut self, found: S) -> Result<(), S> {
        match self.established {
            None => {
                trace!(signature = ?found, "type lock established");
                self.established = Some(found);
                Ok(())
            }
            Some(_) => self.check(found),
        }
    }

    /// Checks `found` against the lock without establishing it
    ///
    /// An open lock accepts anything.
    pub fn check(&self, found: S) -> Result<(), S> {
        match self.established {
            Some(expected) if expected != found => Err(expected),
            _ => Ok(()),
        }
    }

    /// The established signature, if any
    pub fn established(&self) -> Option<S> {
        self.established
    }

    /// Whether a signature has been admitted yet
    pub fn is_established(&self) -> bool {
        self.established.is_some()
    }
}

impl<S: Copy + PartialEq + fmt::Debug> Default for TypeLock<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Dog {
        name: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Cat {
        name: String,
    }

    type_tagged!(Dog, Cat);

    #[test]
    fn test_tags_distinguish_records() {
        let dog = Dog {
            name: "Rover".to_string(),
        };
        let cat = Cat {
            name: "Whiskers".to_string(),
        };

        assert_ne!(dog.type_tag(), cat.type_tag());
        assert_eq!(dog.type_tag(), TypeTag::of::<Dog>());
        assert!(cat.type_tag().is::<Cat>());
        assert!(cat.type_tag().name().ends_with("Cat"));
    }

    #[test]
    fn test_tags_ignore_contents() {
        assert_eq!(1i32.type_tag(), 2i32.type_tag());
        assert_ne!(1i32.type_tag(), 1i64.type_tag());
        assert_eq!(vec![1u8].type_tag(), Vec::<u8>::new().type_tag());
        assert_ne!(vec![1u8].type_tag(), vec![1u16].type_tag());
        assert_ne!("a".type_tag(), "a".to_string().type_tag());
    }

    #[test]
    fn test_lock_first_admit_wins() {
        let mut lock = TypeLock::new();
        assert!(!lock.is_established());
        assert_eq!(lock.check(TypeTag::of::<i32>()), Ok(()));
        assert!(!lock.is_established());

        assert_eq!(lock.admit(TypeTag::of::<String>()), Ok(()));
        assert_eq!(lock.established(), Some(TypeTag::of::<String>()));
        assert_eq!(lock.admit(TypeTag::of::<String>()), Ok(()));
        assert_eq!(
            lock.admit(TypeTag::of::<i32>()),
            Err(TypeTag::of::<String>())
        );
        assert_eq!(lock.established(), Some(TypeTag::of::<String>()));
    }

    #[test]
    fn test_lock_over_pairs() {
        let mut lock = TypeLock::new();
        let pair = (TypeTag::of::<String>(), TypeTag::of::<u64>());
        lock.admit(pair).unwrap();

        let swapped = (TypeTag::of::<u64>(), TypeTag::of::<String>());
        assert_eq!(lock.check(swapped), Err(pair));
        assert_eq!(
            lock.check((TypeTag::of::<String>(), TypeTag::of::<u32>())),
            Err(pair)
        );
    }
}
