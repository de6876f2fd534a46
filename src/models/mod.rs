//! Data models

mod employee;
mod organization;
mod tender;

pub use employee::*;
pub use organization::*;
pub use tender::*;
