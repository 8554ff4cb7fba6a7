//! Line-based console front end

pub mod driver;
pub mod parser;

pub use driver::{process_console_line, run_console_loop, ConsoleSession};
pub use parser::{parse_console_command, ConsoleCommand};
