use netdecker::Format;

pub fn run() -> Result<(), i32> {
    for format in Format::ALL {
        println!("{format}");
    }
    Ok(())
}
