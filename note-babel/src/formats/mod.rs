//! Format implementations
//!
//! This module contains the formats that convert between block sequences and
//! text representations.

pub mod html;
pub mod json;

pub use html::{HtmlFormat, HtmlOptions};
pub use json::JsonFormat;
