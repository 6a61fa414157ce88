pub mod doc;
pub mod error;
pub mod openapi;
pub mod route;
pub mod walk;

pub use doc::Documentation;
pub use error::{ModelError, WalkError};
pub use openapi::OpenApi;
pub use route::{Handler, Registry, Route, RouteTable};
pub use walk::WalkOptions;
