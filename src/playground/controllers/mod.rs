//! # Controllers
//!
//! The event loop that drives the playground.

pub mod playground_controller;

pub use playground_controller::{PlaygroundController, PlaygroundSettings};
