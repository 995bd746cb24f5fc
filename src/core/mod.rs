// SPDX-License-Identifier: MIT

//! Shared building blocks: the error type and the injected UI capabilities.

pub mod error;
pub mod navigate;
pub mod notify;
