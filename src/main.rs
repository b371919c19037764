// src/main.rs

use std::process::exit;

#[tokio::main]
async fn main() {
    match swarmherd::run().await {
        Ok(code) => exit(code),
        Err(e) => {
            // Fatal setup errors may happen before logging is up, so report
            // on stderr unconditionally.
            eprintln!("swarmherd: error: {e}");
            exit(1);
        }
    }
}
