pub mod catalogue;

pub use catalogue::{Command, CommandRequest};
