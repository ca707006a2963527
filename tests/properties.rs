use proptest::prelude::*;
use sovran_datatypes::{Collection, Dictionary, Element, Error};
use std::collections::HashSet;

fn mixed_element() -> impl Strategy<Value = Element> {
    prop_oneof![
        any::<i32>().prop_map(Element::from),
        "[a-z]{1,4}".prop_map(Element::from),
        any::<bool>().prop_map(Element::from),
    ]
}

proptest! {
    /// Once a type is established, every other type is rejected, even after draining.
    #[test]
    fn type_lock_outlives_contents(elements in proptest::collection::vec(mixed_element(), 1..40)) {
        let mut collection = Collection::new();
        let locked = elements[0].tag();

        for element in &elements {
            let result = collection.add(element.clone());
            if element.tag() != locked {
                let is_type_error = matches!(result, Err(Error::InvalidElementType { .. }));
                prop_assert!(is_type_error);
            }
        }

        let stored = collection.to_vec();
        collection.delete_range(&stored).unwrap();
        prop_assert!(collection.is_empty());

        for element in &elements {
            let admissible = element.tag() == locked && !collection.contains(element);
            let result = collection.add(element.clone());
            prop_assert_eq!(result.is_ok(), admissible);
        }
        prop_assert_eq!(collection.element_type(), Some(locked));
    }

    /// A successful add makes the element present, and repeating it changes nothing.
    #[test]
    fn no_duplicates(items in proptest::collection::vec(any::<u16>(), 0..60)) {
        let mut collection = Collection::new();
        let mut distinct = HashSet::new();

        for item in items {
            let len = collection.len();
            match collection.add(item) {
                Ok(()) => {
                    prop_assert!(distinct.insert(item));
                    prop_assert!(collection.contains(&item));
                    let is_duplicate = matches!(collection.add(item), Err(Error::DuplicateElement(_)));
                    prop_assert!(is_duplicate);
                    prop_assert_eq!(collection.len(), len + 1);
                }
                Err(err) => {
                    prop_assert_eq!(err, Error::DuplicateElement(format!("{:?}", item)));
                    prop_assert_eq!(collection.len(), len);
                }
            }
        }
        prop_assert_eq!(collection.len(), distinct.len());
    }

    /// Deleting a stored element removes exactly that element.
    #[test]
    fn delete_contains_duality(items in proptest::collection::hash_set(any::<i64>(), 1..40)) {
        let mut collection = Collection::from_elements(items.iter().copied()).unwrap();

        for item in &items {
            let len = collection.len();
            prop_assert_eq!(collection.delete(item), Ok(*item));
            prop_assert!(!collection.contains(item));
            prop_assert_eq!(collection.len(), len - 1);
        }
        prop_assert!(collection.is_empty());
    }

    /// A bulk add keeps everything before the first failure and nothing after it.
    #[test]
    fn bulk_fail_fast(items in proptest::collection::hash_set("[a-z]{1,6}", 1..20), repeat in any::<prop::sample::Index>()) {
        let items: Vec<String> = items.into_iter().collect();
        let duplicate = items[repeat.index(items.len())].clone();

        let mut input = items.clone();
        input.push(duplicate);
        input.push("NOT-ADDED".to_string());

        let mut collection = Collection::new();
        let result = collection.add_range(input);
        let is_duplicate = matches!(result, Err(Error::DuplicateElement(_)));
        prop_assert!(is_duplicate);
        prop_assert_eq!(collection.elements(), items.as_slice());
    }

    /// Filtering never changes the collection.
    #[test]
    fn filter_is_pure(items in proptest::collection::hash_set(any::<u8>(), 0..50), threshold: u8) {
        let collection = Collection::from_elements(items.iter().copied()).unwrap();
        let before = collection.to_vec();

        let kept = collection.filter(|item| *item >= threshold);
        prop_assert!(kept.iter().all(|item| *item >= threshold));
        prop_assert_eq!(collection.to_vec(), before);
    }

    /// Keys and values project exactly what was added.
    #[test]
    fn dictionary_projections(entries in proptest::collection::hash_map("[a-z]{1,5}", any::<i32>(), 0..30)) {
        let dictionary: Dictionary<String, i32> = Dictionary::from_entries(entries.clone()).unwrap();

        let keys: HashSet<String> = dictionary.keys().into_iter().collect();
        prop_assert_eq!(keys, entries.keys().cloned().collect::<HashSet<_>>());

        let mut values = dictionary.values();
        let mut expected: Vec<i32> = entries.values().copied().collect();
        values.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(values, expected);

        for (key, value) in &entries {
            prop_assert_eq!(dictionary.element(key), Ok(value));
        }
    }

    /// The predicate variant of contains_any never fails on non-list input.
    #[test]
    fn contains_any_is_lenient(elements in proptest::collection::vec(mixed_element(), 0..10), probe in mixed_element()) {
        let collection = Collection::from_elements(elements.clone()).unwrap_or_else(|err| err.partial);
        prop_assert!(!collection.contains_any_list(&probe));
        prop_assert_eq!(
            collection.contains_any_list(&Element::list(elements)),
            !collection.is_empty()
        );
    }
}
