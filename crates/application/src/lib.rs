//! # Application Layer
//!
//! Storefront data-access facade:
//! - **Ports** - the [`Connector`](ports::Connector) capability contract the
//!   backend fulfils, and the [`SessionFlow`](ports::SessionFlow) tracker it
//!   receives
//! - **Services** - [`StoreFacade`](services::StoreFacade), the typed seam
//!   between business logic and the connector
//! - **Testing** - a recording connector for exercising the facade without a
//!   backend
//!
//! ## Dependency Direction
//!
//! ```text
//! Application Layer → Domain Layer (query objects, document types, config)
//! Connector implementations → Application Layer (implement ports)
//! ```
//!
//! The facade adds no retries, caching, batching or validation. Whatever
//! the connector returns, success or failure, reaches the caller unchanged.

pub mod errors;
pub mod ports;
pub mod services;
pub mod testing;

pub use errors::{ApplicationError, ConnectorError, ConnectorResult};
pub use ports::{Connector, SessionFlow};
pub use services::{StoreFacade, StoreFacadeBuilder};

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;
