pub mod controller;
pub mod handlers;

pub use controller::{GridController, GridError, GridOptions, GridSnapshot};
