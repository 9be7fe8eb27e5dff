pub mod builtin;
pub mod environment;
pub mod launcher;

pub use builtin::{Builtin, Outcome};
pub use environment::{Environment, SystemEnvironment};
pub use launcher::launch;
