//! Tool definitions.
//!
//! One module per tool (or tool family). Each definition exposes its name
//! and description as constants, a `schema()` describing its arguments, and
//! a `descriptor()` that packages the handler for registration.

pub mod cloud_run;
pub mod flights;
pub mod greeting;
pub mod hotels;
pub mod meta;

pub use cloud_run::CloudRunServicesTool;
pub use flights::{FlightSearchOneWayTool, FlightSearchRoundTripTool};
pub use greeting::{GreetFullNameTool, GreetTool, GroupGreetingTool};
pub use hotels::HotelSearchTool;
pub use meta::ServerMetaTool;
