//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! system events. Actions bridge pure state transformations and effectful
//! operations like fetching the report, arming timers, or communicating with
//! the background worker.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The plugin runtime
//! executes these actions in sequence via the action processor.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
///
/// Actions are produced by the event handler and executed by the action
/// processor. They represent the boundary between the pure view-state engine
/// and effectful host operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    ///
    /// Sent when the user explicitly requests to exit the plugin.
    CloseFocus,

    /// Starts an HTTP fetch of the report payload.
    ///
    /// The response arrives back as a web-request event; the raw body is then
    /// handed to the worker for parsing.
    FetchReport,

    /// Arms a host timer that fires back after the given delay.
    ///
    /// The transition scheduler runs on a logical clock; this action maps its
    /// next pending step onto a real timeout.
    SetTimeout {
        /// Delay until the timer event, in milliseconds.
        delay_ms: u64,
    },

    /// Posts a message to the background worker thread.
    ///
    /// Keeps payload parsing off the render loop.
    PostToWorker(WorkerMessage),
}
