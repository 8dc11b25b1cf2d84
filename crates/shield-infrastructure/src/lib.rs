//! Infrastructure for the Crowd Shield console: the HTTP session gateway,
//! configuration loading and path resolution.

pub mod config_service;
pub mod http_gateway;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http_gateway::HttpSessionGateway;
pub use crate::paths::ShieldPaths;
