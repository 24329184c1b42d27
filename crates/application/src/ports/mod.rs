//! Application Ports
//!
//! Abstractions the facade depends on. Implementations belong to whoever
//! assembles the application.

pub mod connector;
pub mod session_flow;

pub use connector::Connector;
pub use session_flow::SessionFlow;

#[cfg(test)]
pub use connector::MockConnector;
