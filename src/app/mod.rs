// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Workflow controller: session model, messages, update and runtime.

pub mod document;
pub mod message;
pub mod model;
pub mod runtime;
pub mod task;
pub mod update;
pub mod view;

pub use message::AppMessage;
pub use model::{Session, WorkflowStep};
pub use runtime::Runtime;
