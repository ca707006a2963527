//! # sovran-datatypes
//!
//! Homogeneous, unique-element containers with runtime type locking.
//!
//! `sovran-datatypes` provides two containers that accept values of any type at
//! their boundary but hold only one type at a time:
//!
//! - [`Collection`]: a non-sorted list of unique elements
//! - [`Dictionary`]: a unique-key map with one key type and one value type
//!
//! The first value added to a container fixes its type (or its key/value type
//! pair) for the rest of its life. Later values of any other type are rejected
//! with an error, even after the container has been emptied again.
//!
//! ## Key Features
//!
//! - **Type-locked**: The first insertion decides the type; mismatches are errors, not panics
//! - **Unique**: Duplicates are detected by value, so structured records compare field by field
//! - **Dynamic or static**: Store type-erased [`Element`]s, your own enums, or plain Rust types
//! - **Predictable bulk operations**: Range operations stop at the first failure and keep what succeeded
//! - **No locking**: Containers are plain values; wrap them in a `Mutex` to share between threads
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_datatypes::{Collection, Element, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let mut collection = Collection::new();
//!
//!     // The first element decides the type
//!     collection.add(Element::from("first element"))?;
//!     collection.add(Element::from("second element"))?;
//!
//!     // Equal values are rejected
//!     match collection.add(Element::from("first element")) {
//!         Err(Error::DuplicateElement(element)) => println!("Already stored: {}", element),
//!         other => println!("Unexpected: {:?}", other),
//!     }
//!
//!     // So are values of another type
//!     match collection.add(Element::from(42i32)) {
//!         Err(Error::InvalidElementType { expected, found }) => {
//!             println!("Collection holds {}, got {}", expected, found)
//!         }
//!         other => println!("Unexpected: {:?}", other),
//!     }
//!
//!     for element in &collection {
//!         println!("{:?}", element);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Bulk Operations
//!
//! Range operations apply one element at a time and stop at the first error.
//! Whatever was applied before the error stays applied:
//!
//! ```rust
//! use sovran_datatypes::{Collection, Error};
//!
//! let mut collection = Collection::new();
//! let result = collection.add_range(["a", "b", "a"]);
//!
//! assert!(matches!(result, Err(Error::DuplicateElement(_))));
//! assert_eq!(collection.elements(), &["a", "b"]);
//!
//! // add_range_atomic rolls back instead
//! let result = collection.add_range_atomic(["c", "b"]);
//! assert!(result.is_err());
//! assert_eq!(collection.len(), 2);
//! ```
//!
//! ### Dictionaries
//!
//! ```rust
//! use sovran_datatypes::{Dictionary, DictionaryConfig, Error, IterationOrder};
//!
//! fn main() -> Result<(), Error> {
//!     let config = DictionaryConfig::default().with_order(IterationOrder::Insertion);
//!     let mut stock = Dictionary::<&str, u32>::with_config(config);
//!
//!     stock.add_range([("apples", 12), ("pears", 4), ("plums", 0)])?;
//!
//!     // Keys can't be added twice, but existing values can be replaced
//!     assert!(matches!(stock.add("pears", 9), Err(Error::DuplicateKey(_))));
//!     stock.set("pears", 9)?;
//!
//!     assert_eq!(stock.keys(), vec!["apples", "pears", "plums"]);
//!     assert_eq!(stock.last()?, (&"plums", &0));
//!
//!     let empty = stock.filter(|_, count| *count == 0);
//!     assert_eq!(empty.len(), 1);
//!
//!     // Insertion-ordered dictionaries extract oldest first
//!     assert_eq!(stock.extract()?.key, "apples");
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Your Own Types
//!
//! Anything implementing [`TypeTagged`] and `PartialEq` can be stored. The
//! [`type_tagged!`] macro covers plain records:
//!
//! ```rust
//! use sovran_datatypes::{type_tagged, Collection, Element, Error};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u8,
//! }
//!
//! type_tagged!(Person);
//!
//! let mut people = Collection::new();
//! people.add(Person { name: "Ada".to_string(), age: 36 }).unwrap();
//! assert!(people.contains(&Person { name: "Ada".to_string(), age: 36 }));
//!
//! // Type-erased elements lock to the record type as well
//! let mut anything = Collection::new();
//! anything.add(Element::new(Person { name: "Ada".to_string(), age: 36 })).unwrap();
//! assert!(matches!(
//!     anything.add(Element::from("Ada")),
//!     Err(Error::InvalidElementType { .. })
//! ));
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_datatypes::{Collection, Error};
//!
//! let mut queue = Collection::from_elements(["x", "y"]).unwrap();
//!
//! assert_eq!(queue.extract_first(), Ok("x"));
//! assert_eq!(queue.extract_first(), Ok("y"));
//!
//! match queue.extract_first() {
//!     Ok(value) => println!("Value: {}", value),
//!     Err(Error::EmptyContainer) => println!("Nothing left"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//!
//! match queue.element_at(3) {
//!     Err(Error::IndexOutOfRange { index, len }) => println!("{} is past {}", index, len),
//!     other => println!("Unexpected: {:?}", other),
//! }
//! ```

mod collection;
mod dictionary;
mod element;
mod error;
pub mod generic;
mod tag;

pub use collection::Collection;
pub use dictionary::{Dictionary, DictionaryConfig, Entry, IterationOrder};
pub use element::Element;
pub use error::{Error, SeedError};
pub use tag::{TypeLock, TypeTag, TypeTagged};
