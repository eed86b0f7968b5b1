//! Core logic for a pass-the-device spy party game.
//!
//! One secret location is shared by everyone except a handful of spies, who
//! must deduce it from the discussion. The crate validates a session's
//! configuration, deals the hidden roles, walks the device around the table
//! one private reveal at a time, and runs the discussion countdown.
//!
//! Rendering and input are a presentation concern. A front end drives the
//! types here (configure, reveal, acknowledge, tick) and re-renders from the
//! returned state; nothing in this crate blocks on user input.

pub mod cache;
pub mod config;
pub mod countdown;
pub mod locations;
pub mod reveal;
pub mod roles;
pub mod session;
pub mod store;
pub mod telemetry;

pub use cache::{CacheError, PlayerCache};
pub use countdown::{pace, Countdown, CountdownEvent, Discussion, Tick};
pub use locations::{LocationError, LocationPool, LocationRegistry, BUILTIN_LOCATIONS};
pub use reveal::{RevealError, RevealSequencer, RevealState, RoleCard};
pub use roles::{Role, RoleAssignment};
pub use session::{normalize_names, ConfigError, Session, SessionConfig};
pub use store::{JsonFile, MemoryStore, Storage, StoreError};
