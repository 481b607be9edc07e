//! metadoc - pass-through documentation pipeline stage

use std::process::ExitCode;

use metadoc::cli::Console;

fn main() -> ExitCode {
    if let Err(e) = metadoc::cli::run() {
        Console::default().fatal(&format!("Error: {:#}", e));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
