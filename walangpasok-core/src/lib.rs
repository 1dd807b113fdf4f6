//! Core types and service wiring for the walangpasok class-suspension aggregator.

/// Keyword classifier turning article text into a status and a reason.
pub mod classify;
/// Environment-driven configuration shared by the binaries.
pub mod config;
/// Static city tables: coordinates and emergency contacts.
pub mod directory;
/// Domain models shared by all providers.
pub mod model;
/// Traits describing upstream clients and announcement sources.
pub mod ports;
/// Periodic and on-demand refresh of a selected city.
pub mod refresh;
/// High-level service facade used by clients.
pub mod service;
/// Announcement source adapters built on top of the ports.
pub mod sources;
/// Weather lookup by city name.
pub mod weather;

pub use classify::*;
pub use config::*;
pub use directory::*;
pub use model::*;
pub use ports::*;
pub use refresh::*;
pub use service::*;
pub use sources::*;
pub use weather::*;
