pub mod health;
pub mod manifests;
pub mod services;

pub use health::*;
pub use manifests::*;
pub use services::*;
