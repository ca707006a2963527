use sovran_datatypes::{Dictionary, DictionaryConfig, Element, Error, IterationOrder};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    name: String,
    quantity: u32,
}

fn item(name: &str, quantity: u32) -> Element {
    Element::new(Item {
        name: name.to_string(),
        quantity,
    })
}

fn main() -> Result<(), Error> {
    // Create an inventory that remembers the order items were stocked in
    let config = DictionaryConfig::default().with_order(IterationOrder::Insertion);
    let mut inventory = Dictionary::with_config(config);

    // The first entry fixes the key type (&str) and the value type (Item)
    inventory.add(Element::from("A-100"), item("bolt", 250))?;
    inventory.add_range([
        (Element::from("A-200"), item("nut", 400)),
        (Element::from("B-100"), item("washer", 0)),
    ])?;

    println!("Keys in inventory: {:?}", inventory.keys());

    // Adding an existing key is an error, not an overwrite
    match inventory.add(Element::from("A-100"), item("bolt", 1)) {
        Ok(_) => println!("This shouldn't happen"),
        Err(Error::DuplicateKey(key)) => println!("{} is already stocked", key),
        Err(e) => println!("Unexpected error: {}", e),
    }

    // Values of another type are rejected
    match inventory.add(Element::from("C-100"), Element::from(12u32)) {
        Ok(_) => println!("This shouldn't happen"),
        Err(Error::InvalidKeyValueType {
            expected_value,
            found_value,
            ..
        }) => println!("Inventory holds {}, not {}", expected_value, found_value),
        Err(e) => println!("Unexpected error: {}", e),
    }

    // Restock an existing item
    let previous = inventory.set(Element::from("B-100"), item("washer", 75))?;
    println!("Restocked washers, previously {:?}", previous);

    // Find what is running low without touching the inventory
    let low = inventory.filter(|_, value| {
        value
            .downcast_ref::<Item>()
            .is_some_and(|item| item.quantity < 100)
    });
    println!("Running low: {:?}", low);

    // Ship the oldest stock first
    while let Ok(entry) = inventory.extract() {
        if let Some(item) = entry.value.downcast_ref::<Item>() {
            println!("Shipping {} x{} ({:?})", item.name, item.quantity, entry.key);
        }
    }

    println!("Inventory is empty: {}", inventory.is_empty());

    Ok(())
}
