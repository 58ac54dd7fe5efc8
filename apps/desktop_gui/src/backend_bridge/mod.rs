//! Backend bridge: the worker thread that owns the async runtime and the
//! commands it accepts from the UI.

pub mod commands;
pub mod runtime;
