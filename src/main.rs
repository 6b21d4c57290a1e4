//! rdatalogger entrypoint.

use rdatalogger::run;
use rdatalogger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
