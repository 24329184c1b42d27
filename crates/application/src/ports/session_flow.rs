//! Session Flow Port
//!
//! The caller's session tracker. Connectors persist what it collects; the
//! facade only hands it over.

use domain::Payload;

/// Tracks the routes and clicks of one device session
pub trait SessionFlow: Send + Sync {
    fn device_id(&self) -> &str;

    fn session_id(&self) -> &str;

    /// Routes visited so far, oldest first
    fn visited_routes(&self) -> Vec<String>;

    /// Recorded click events
    fn clicks(&self) -> Vec<Payload>;
}
