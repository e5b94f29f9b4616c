mod app;

use std::process;

fn main() {
    // Controlled by RUST_LOG, e.g. RUST_LOG=debug code2text -i .rs
    env_logger::init();

    if let Err(err) = app::run() {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
