//! Small helpers shared by the DOM, the behaviors and the CLI.

pub mod css;
pub mod html;
