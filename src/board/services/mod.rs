//! Services coordinating board state with the backend.

mod controller;

pub use controller::{BoardController, CreateContentError, SyncOutcome};
