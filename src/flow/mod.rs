// SPDX-License-Identifier: MIT

pub mod agent;
pub mod codec;
pub mod config;
pub mod export;
pub mod state;
pub mod sync;
pub mod template;
pub mod types;
