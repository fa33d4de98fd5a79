//! Controller layer: UI events and the calls from form input into the engine.

pub mod events;
pub mod orchestration;
