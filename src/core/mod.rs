//! Blinding engine and the collaborators it drives

pub mod diagnostics;
pub mod engine;
pub mod fs_ops;
pub mod naming;

pub use engine::{BlindingEngine, RunOutcome, RunReport, RunRequest};
