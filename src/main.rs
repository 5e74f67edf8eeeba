//! rcactus main entrypoint.

use rcactus::run;
use rcactus::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
