//! CLI styling components and the operator console.

pub mod console;
pub mod prompt;
mod spinner;
pub mod status;
mod table;

pub use self::console::{Console, TerminalConsole};
pub use spinner::Spinner;
pub use status::StatusLine;
pub use table::Table;
