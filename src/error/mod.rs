pub mod scheduler;

pub use scheduler::{ErrorKind, SchedulerError};
