//! Greeting tools.
//!
//! Small stateless tools, also useful as connectivity checks: a client that
//! can round-trip `greet` has a working transport, dispatcher, and validator.

mod full_name;
mod greet;
mod group;

pub use full_name::GreetFullNameTool;
pub use greet::GreetTool;
pub use group::GroupGreetingTool;
