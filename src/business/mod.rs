pub mod directory;
pub mod manifest_service;
pub mod provider;
pub mod scan;
pub mod session;
pub mod submit;
pub mod validation;
pub mod workflow;

pub use directory::*;
pub use manifest_service::*;
pub use provider::*;
pub use scan::*;
pub use session::*;
pub use submit::*;
pub use validation::*;
pub use workflow::*;
