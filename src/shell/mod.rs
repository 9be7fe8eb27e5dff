pub mod executor;
pub mod parser;
mod readline;
mod shell;
pub mod signals;

pub use shell::Shell;
