//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/worker layers. It implements the
//! event-driven architecture that powers the interactive dashboard.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Text-search and brand filter predicate evaluation
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode and load phase state machine types
//! - [`pager`]: Page arithmetic over the filtered section set
//! - [`section`]: Brand section records and visibility state
//! - [`state`]: Central application state container
//! - [`transitions`]: Two-phase fade scheduler with render generations

pub mod actions;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod pager;
pub mod section;
pub mod state;
pub mod transitions;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, LoadPhase};
pub use section::{BrandSection, ProductRow, Visibility};
pub use state::AppState;
