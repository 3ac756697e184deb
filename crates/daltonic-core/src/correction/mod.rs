//! Correction — the Daltonization engine and the active-mode state machine.

pub mod engine;
pub mod mode;
