//! shiftboard main entrypoint.

use shiftboard::run;
use shiftboard::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
