// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step-by-step playback of graph traversals.
//!
//! This crate provides:
//! - Per-node animation state (pending / active / visited)
//! - The [`RenderSurface`] trait the sequencer writes through
//! - A cooperative [`CancellationToken`]
//! - The frame-driven [`AnimationSequencer`]
//!
//! ## Architecture
//!
//! The sequencer owns at most one live run. Starting a new run while one is
//! playing cancels the live run, lets it settle, waits out a short grace
//! delay and only then resets the surface for the new run.

pub mod cancel;
pub mod state;
pub mod surface;
pub mod sequencer;

pub use cancel::CancellationToken;
pub use state::{AnimationState, NodeState, NodeVisual};
pub use surface::RenderSurface;
pub use sequencer::{
    AnimationSequencer, CurrentStep, RunId, SequencerConfig, SequencerEvent, SequencerPhase,
    MAX_SPEED, MIN_SPEED,
};
