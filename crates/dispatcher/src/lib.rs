pub mod dispatcher;
pub mod transport;

pub use dispatcher::{CommandDispatcher, CommandFailure, DEFAULT_REQUEST_TIMEOUT};
pub use transport::{CommandTransport, HttpTransport};
