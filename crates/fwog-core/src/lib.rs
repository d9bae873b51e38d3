//! Core types and definitions for the FwogSurvivors simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, input, render snapshots, events, and constants.
//! It has no dependency on the physics backend or any window framework.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
