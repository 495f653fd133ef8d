pub mod cli;
pub mod controller;
pub mod logging;
pub mod scheduler;

pub use controller::GameController;
pub use scheduler::{Pacing, TransitionKind};
