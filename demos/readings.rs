use sovran_datatypes::{Collection, Error, TypeTag, TypeTagged};

// Example sum type: each variant counts as its own type
#[derive(Debug, Clone, PartialEq)]
enum Reading {
    Celsius(i32),
    Note(String),
}

impl TypeTagged for Reading {
    fn type_tag(&self) -> TypeTag {
        match self {
            Reading::Celsius(_) => TypeTag::of::<i32>(),
            Reading::Note(_) => TypeTag::of::<String>(),
        }
    }
}

fn main() -> Result<(), Error> {
    let mut readings = Collection::new();

    // A bulk add stops at the duplicate, keeping what came before it
    match readings.add_range([
        Reading::Celsius(18),
        Reading::Celsius(21),
        Reading::Celsius(18),
        Reading::Celsius(25),
    ]) {
        Ok(_) => println!("This shouldn't happen"),
        Err(e) => println!("Stopped early: {}", e),
    }
    println!("Stored {} readings: {:?}", readings.len(), readings.elements());

    // The collection is locked to temperatures now
    match readings.add(Reading::Note("sensor restarted".to_string())) {
        Ok(_) => println!("This shouldn't happen"),
        Err(Error::InvalidElementType { expected, found }) => {
            println!("Collection holds {}, got {}", expected, found)
        }
        Err(e) => println!("Unexpected error: {}", e),
    }

    // The atomic variant leaves nothing behind on failure
    if readings
        .add_range_atomic([Reading::Celsius(30), Reading::Celsius(21)])
        .is_err()
    {
        println!("Rolled back, still {} readings", readings.len());
    }

    let warm = readings.filter(|r| matches!(r, Reading::Celsius(t) if *t > 20));
    println!("Warm readings: {:?}", warm);

    // Drain in order
    while let Ok(reading) = readings.extract_first() {
        println!("Processed {:?}", reading);
    }

    // Even empty, the collection keeps its type
    println!(
        "Empty: {}, still typed as {:?}",
        readings.is_empty(),
        readings.element_type()
    );

    Ok(())
}
