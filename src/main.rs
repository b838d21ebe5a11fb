//! Checador main entrypoint.

use checador::run;
use checador::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
