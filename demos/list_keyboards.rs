use kbdump::{find_keyboards, KbdumpError};

fn main() -> Result<(), KbdumpError> {
    for keyboard in find_keyboards()? {
        println!("[{} @ {}]", keyboard.name, keyboard.path.display());
    }

    Ok(())
}
