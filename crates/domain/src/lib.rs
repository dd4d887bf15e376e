pub mod entities;
pub mod value_objects;

pub use console_errors::{ConsoleError, ConsoleResult};
pub use entities::*;
pub use value_objects::*;
