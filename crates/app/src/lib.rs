pub mod bootstrapper;
pub mod controller;
pub mod loader;
pub mod model;

pub use bootstrapper::{BootstrapState, Bootstrapper};
pub use controller::SchedulerController;
pub use loader::DataLoader;
pub use model::ApplicationModel;
