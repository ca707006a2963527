//! Helpers for treating untyped values generically

use crate::element::Element;
use crate::error::Error;
use crate::tag::TypeTagged;

/// Reads an element as a sequence of elements
///
/// Only list elements (see [`Element::list`]) are sequences; anything else is
/// rejected rather than being treated as a one-item sequence.
///
/// # Errors
///
/// Returns `Error::InvalidIterableInput` if `value` does not hold a list.
///
/// # Examples
///
/// ```
/// use sovran_datatypes::{generic, Element, Error};
///
/// let items = generic::to_elements(&Element::list(["a", "b"]))?;
/// assert_eq!(items, vec![Element::from("a"), Element::from("b")]);
///
/// assert!(matches!(
///     generic::to_elements(&Element::from("a")),
///     Err(Error::InvalidIterableInput(_))
/// ));
/// # Ok::<(), Error>(())
/// ```
pub fn to_elements(value: &Element) -> Result<Vec<Element>, Error> {
    value
        .downcast_ref::<Vec<Element>>()
        .cloned()
        .ok_or_else(|| Error::InvalidIterableInput(format!("{:?}", value)))
}

/// Check if two values share a type identity
pub fn same_type<A, B>(first: &A, second: &B) -> bool
where
    A: TypeTagged + ?Sized,
    B: TypeTagged + ?Sized,
{
    first.type_tag() == second.type_tag()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_elements() {
        let list = Element::list(["first element", "second element"]);
        let items = to_elements(&list).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].downcast_ref::<&str>(), Some(&"second element"));

        let empty = Element::list(Vec::<Element>::new());
        assert!(to_elements(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_to_elements_rejects_scalars() {
        match to_elements(&Element::from("non-iterable object")) {
            Err(Error::InvalidIterableInput(shown)) => {
                assert_eq!(shown, "\"non-iterable object\"")
            }
            other => panic!("Should have gotten invalid iterable error, got {:?}", other),
        }

        // A typed vector is a single value, not a list of elements
        assert!(to_elements(&Element::new(vec![1, 2, 3])).is_err());
    }

    #[test]
    fn test_same_type() {
        assert!(same_type(&1u8, &2u8));
        assert!(!same_type(&1u8, &1i8));
        assert!(same_type(&Element::from("x"), &"y"));
        assert!(!same_type(&Element::from("x"), &"y".to_string()));
    }
}
