pub mod comparison;
pub mod currency;
pub mod render;

pub use comparison::*;
pub use currency::*;
pub use render::*;
