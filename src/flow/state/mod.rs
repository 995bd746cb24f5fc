// SPDX-License-Identifier: MIT

//! State management for the flow collection
//!
//! This module provides:
//! - `Action` - the closed set of mutations
//! - `reduce` - the pure transition function
//! - `FlowStore` - the owned container that commits transitions

mod reducer;
mod store;

pub use reducer::{reduce, Action};
pub use store::FlowStore;
