//! Bridge between the UI thread and the backend worker that talks to the Screening Service.

pub mod commands;
pub mod runtime;
