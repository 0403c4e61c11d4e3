//! Client-side capability checks over a rendered page payload.
//!
//! Everything here is advisory UI gating. The server middleware remains the
//! enforcement point.

#![forbid(unsafe_code)]

mod affordances;
mod capabilities;
mod navigation;

pub use affordances::ResourceAffordances;
pub use capabilities::{Capabilities, can};
pub use navigation::{NavigationItem, main_navigation};
