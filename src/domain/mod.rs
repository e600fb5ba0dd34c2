pub mod manifest;
pub mod quote;

pub use manifest::*;
pub use quote::*;
