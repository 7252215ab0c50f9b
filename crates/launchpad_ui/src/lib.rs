//! Headless view state for every launchpad screen. A rendering shell reads
//! these structs and forwards user actions to their methods.

pub mod components;
pub mod format;
pub mod panels;
pub mod routes;

pub use routes::Route;
