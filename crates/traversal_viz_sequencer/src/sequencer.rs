// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-driven playback of a traversal order.
//!
//! The sequencer is a small state machine:
//!
//! ```text
//! Idle --play--> Playing --(exhausted | cancelled)--> Idle
//!                   |
//!                   +--play while playing--> (settle old run) --> Settling --grace--> Playing
//! ```
//!
//! The host calls [`AnimationSequencer::update`] once per frame. Each step
//! marks a node active, holds it for the dwell interval, then marks it
//! visited. The run's [`CancellationToken`] is polled before a node is
//! marked active and at every update during and after the dwell, so a
//! cancelled node is never marked visited.

use crate::cancel::CancellationToken;
use crate::surface::RenderSurface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use traversal_viz_graph::{NodeId, TraversalOrder};
use uuid::Uuid;

/// Slowest allowed playback speed
pub const MIN_SPEED: f32 = 0.25;
/// Fastest allowed playback speed
pub const MAX_SPEED: f32 = 4.0;

/// Unique identifier for a playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Timing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// How long each node stays active
    pub dwell: Duration,
    /// Pause between a superseded run settling and the next run starting
    pub grace: Duration,
    /// Playback speed multiplier applied to the dwell
    pub speed: f32,
    /// Ask the surface to focus each newly active node
    pub focus: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(1000),
            grace: Duration::from_millis(100),
            speed: 1.0,
            focus: true,
        }
    }
}

/// Observable phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerPhase {
    /// Nothing playing
    Idle,
    /// A run is live
    Playing,
    /// A superseded run has settled; waiting out the grace delay
    Settling,
}

/// Notifications for the host, drained with [`AnimationSequencer::take_events`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerEvent {
    /// A run reset the surface and began
    Started {
        /// Run
        run: RunId,
        /// Number of steps
        total: usize,
    },
    /// A node became active
    StepActivated {
        /// Run
        run: RunId,
        /// Zero-based step
        index: usize,
        /// Node
        node: NodeId,
    },
    /// A node was marked visited
    StepVisited {
        /// Run
        run: RunId,
        /// Zero-based step
        index: usize,
        /// Node
        node: NodeId,
    },
    /// Every step was played
    Completed {
        /// Run
        run: RunId,
    },
    /// The run stopped early
    Cancelled {
        /// Run
        run: RunId,
        /// Last step the run reached
        at_index: usize,
    },
}

/// The step currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentStep<'a> {
    /// Run
    pub run: RunId,
    /// Zero-based step
    pub index: usize,
    /// Active node
    pub node: &'a NodeId,
    /// Number of steps in the run
    pub total: usize,
}

struct ActiveRun {
    id: RunId,
    order: TraversalOrder,
    index: usize,
    hold: Duration,
    token: CancellationToken,
}

#[derive(Default)]
enum Phase {
    #[default]
    Idle,
    Playing(ActiveRun),
    Settling { remaining: Duration },
}

/// Plays traversal orders one node at a time against a [`RenderSurface`]
pub struct AnimationSequencer {
    config: SequencerConfig,
    phase: Phase,
    /// Run waiting for the live one to settle
    queued: Option<(RunId, TraversalOrder)>,
    /// Events produced since the last drain
    pending_events: Vec<SequencerEvent>,
}

impl AnimationSequencer {
    /// Create an idle sequencer
    pub fn new(config: SequencerConfig) -> Self {
        let mut sequencer = Self {
            config,
            phase: Phase::Idle,
            queued: None,
            pending_events: Vec::new(),
        };
        sequencer.set_speed(config.speed);
        sequencer
    }

    /// Current configuration
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Change playback speed; applies from the next step
    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
    }

    /// Current phase
    pub fn phase(&self) -> SequencerPhase {
        match self.phase {
            Phase::Idle => SequencerPhase::Idle,
            Phase::Playing(_) => SequencerPhase::Playing,
            Phase::Settling { .. } => SequencerPhase::Settling,
        }
    }

    /// Whether a run is live, settling, or queued
    pub fn is_busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle) || self.queued.is_some()
    }

    /// The step currently active, if playing
    pub fn current_step(&self) -> Option<CurrentStep<'_>> {
        let Phase::Playing(run) = &self.phase else {
            return None;
        };
        Some(CurrentStep {
            run: run.id,
            index: run.index,
            node: run.order.get(run.index)?,
            total: run.order.len(),
        })
    }

    /// Token of the live run, for cancelling from elsewhere
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        match &self.phase {
            Phase::Playing(run) => Some(run.token.clone()),
            Phase::Idle | Phase::Settling { .. } => None,
        }
    }

    /// Get pending events and clear them
    pub fn take_events(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Play `order`.
    ///
    /// When idle the run starts at once. Otherwise the live run is cancelled
    /// and `order` waits until that run has settled and the grace delay has
    /// passed; a later `play` replaces a still-waiting order, which is
    /// reported as cancelled.
    pub fn play(&mut self, order: TraversalOrder, surface: &mut impl RenderSurface) -> RunId {
        let id = RunId::new();
        if let Phase::Playing(run) = &self.phase {
            tracing::debug!(superseded = %run.id, next = %id, "Queueing run behind live playback");
            run.token.cancel();
        }

        if matches!(self.phase, Phase::Idle) {
            self.start_run(id, order, surface);
        } else {
            self.drop_queued();
            self.queued = Some((id, order));
        }
        id
    }

    /// Cancel the live run and drop any queued one
    pub fn cancel(&mut self) {
        self.drop_queued();
        if let Phase::Playing(run) = &self.phase {
            run.token.cancel();
        }
        if matches!(self.phase, Phase::Settling { .. }) {
            self.phase = Phase::Idle;
        }
    }

    /// Advance playback by `dt` of wall time
    pub fn update(&mut self, dt: Duration, surface: &mut impl RenderSurface) {
        let mut budget = dt;

        loop {
            match std::mem::take(&mut self.phase) {
                Phase::Idle => break,
                Phase::Settling { remaining } => {
                    if remaining > budget {
                        self.phase = Phase::Settling {
                            remaining: remaining - budget,
                        };
                        break;
                    }
                    budget -= remaining;
                    if let Some((id, order)) = self.queued.take() {
                        self.start_run(id, order, surface);
                    }
                }
                Phase::Playing(mut run) => {
                    if run.token.is_cancelled() {
                        self.settle_cancelled(run, surface);
                        continue;
                    }
                    if run.hold > budget {
                        run.hold -= budget;
                        self.phase = Phase::Playing(run);
                        break;
                    }
                    budget -= run.hold;
                    self.finish_step(run, surface);
                }
            }
        }
    }

    /// Discard the waiting run; it never touched the surface
    fn drop_queued(&mut self) {
        if let Some((id, _)) = self.queued.take() {
            tracing::info!(run = %id, "Queued traversal playback dropped");
            self.pending_events.push(SequencerEvent::Cancelled { run: id, at_index: 0 });
        }
    }

    fn dwell(&self) -> Duration {
        self.config.dwell.div_f32(self.config.speed)
    }

    fn start_run(&mut self, id: RunId, order: TraversalOrder, surface: &mut impl RenderSurface) {
        surface.reset();
        tracing::info!(run = %id, steps = order.len(), "Traversal playback started");
        self.pending_events.push(SequencerEvent::Started {
            run: id,
            total: order.len(),
        });

        let run = ActiveRun {
            id,
            order,
            index: 0,
            hold: Duration::ZERO,
            token: CancellationToken::new(),
        };
        self.activate(run, 0, surface);
    }

    fn activate(&mut self, mut run: ActiveRun, index: usize, surface: &mut impl RenderSurface) {
        if run.token.is_cancelled() {
            self.settle_cancelled(run, surface);
            return;
        }

        let Some(node) = run.order.get(index).cloned() else {
            self.complete(run, surface);
            return;
        };

        surface.mark_active(&node, index);
        if self.config.focus {
            surface.focus(&node);
        }
        tracing::debug!(run = %run.id, step = index + 1, node = %node, "Node active");
        self.pending_events.push(SequencerEvent::StepActivated {
            run: run.id,
            index,
            node,
        });

        run.index = index;
        run.hold = self.dwell();
        self.phase = Phase::Playing(run);
    }

    fn finish_step(&mut self, run: ActiveRun, surface: &mut impl RenderSurface) {
        if let Some(node) = run.order.get(run.index).cloned() {
            surface.mark_visited(&node);
            self.pending_events.push(SequencerEvent::StepVisited {
                run: run.id,
                index: run.index,
                node,
            });
        }

        let next = run.index + 1;
        self.activate(run, next, surface);
    }

    fn complete(&mut self, run: ActiveRun, surface: &mut impl RenderSurface) {
        surface.clear_active();
        tracing::info!(run = %run.id, "Traversal playback completed");
        self.pending_events.push(SequencerEvent::Completed { run: run.id });
        self.phase = Phase::Idle;
    }

    fn settle_cancelled(&mut self, run: ActiveRun, surface: &mut impl RenderSurface) {
        surface.clear_active();
        tracing::info!(run = %run.id, step = run.index + 1, "Traversal playback cancelled");
        self.pending_events.push(SequencerEvent::Cancelled {
            run: run.id,
            at_index: run.index,
        });

        self.phase = if self.queued.is_some() {
            Phase::Settling {
                remaining: self.config.grace,
            }
        } else {
            Phase::Idle
        };
    }
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AnimationState, NodeState};
    use traversal_viz_graph::{compute, demo_graph, demo_start, TraversalMode};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Reset,
        Active(String, usize),
        Visited(String),
        ClearActive,
        Focus(String),
    }

    /// Records every surface call and mirrors it into an `AnimationState`
    struct RecordingSurface {
        calls: Vec<Call>,
        state: AnimationState,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                state: AnimationState::new(demo_graph().node_ids().cloned()),
            }
        }

        fn resets(&self) -> Vec<usize> {
            self.calls
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == Call::Reset)
                .map(|(i, _)| i)
                .collect()
        }
    }

    impl RenderSurface for RecordingSurface {
        fn reset(&mut self) {
            self.calls.push(Call::Reset);
            self.state.reset();
        }

        fn mark_active(&mut self, node_id: &NodeId, step: usize) {
            assert!(self.state.active().is_none(), "two nodes active at once");
            self.calls.push(Call::Active(node_id.to_string(), step));
            self.state.mark_active(node_id, step);
        }

        fn mark_visited(&mut self, node_id: &NodeId) {
            self.calls.push(Call::Visited(node_id.to_string()));
            self.state.mark_visited(node_id);
        }

        fn clear_active(&mut self) {
            self.calls.push(Call::ClearActive);
            self.state.clear_active();
        }

        fn focus(&mut self, node_id: &NodeId) {
            self.calls.push(Call::Focus(node_id.to_string()));
        }
    }

    fn order(labels: &[&str]) -> TraversalOrder {
        labels.iter().map(|l| NodeId::from(*l)).collect()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn sequencer() -> AnimationSequencer {
        AnimationSequencer::new(SequencerConfig {
            focus: false,
            ..SequencerConfig::default()
        })
    }

    fn expected_playback(labels: &[&str]) -> Vec<Call> {
        let mut calls = vec![Call::Reset];
        for (i, label) in labels.iter().enumerate() {
            calls.push(Call::Active(label.to_string(), i));
            calls.push(Call::Visited(label.to_string()));
        }
        calls.push(Call::ClearActive);
        calls
    }

    #[test]
    fn test_full_playback_in_order() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        let order = compute(&demo_graph(), &demo_start(), TraversalMode::DepthFirst);
        let labels: Vec<&str> = order.iter().map(NodeId::as_str).collect();
        let expected = expected_playback(&labels);

        let run = seq.play(order.clone(), &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Playing);
        for _ in 0..order.len() {
            seq.update(ms(1000), &mut surface);
        }

        assert_eq!(seq.phase(), SequencerPhase::Idle);
        assert_eq!(surface.calls, expected);
        assert_eq!(surface.state.count(NodeState::Visited), 20);
        assert!(surface.state.active().is_none());

        let events = seq.take_events();
        assert_eq!(events.first(), Some(&SequencerEvent::Started { run, total: 20 }));
        assert_eq!(events.last(), Some(&SequencerEvent::Completed { run }));
    }

    #[test]
    fn test_dwell_holds_node_active() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["1", "2"]), &mut surface);

        seq.update(ms(999), &mut surface);
        assert_eq!(surface.state.state(&"1".into()), NodeState::Active);
        let step = seq.current_step().unwrap();
        assert_eq!((step.index, step.node.as_str(), step.total), (0, "1", 2));

        seq.update(ms(1), &mut surface);
        assert_eq!(surface.state.state(&"1".into()), NodeState::Visited);
        assert_eq!(surface.state.state(&"2".into()), NodeState::Active);
    }

    #[test]
    fn test_large_frame_keeps_step_order() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["a", "b", "c"]), &mut surface);
        seq.update(ms(10_000), &mut surface);
        assert_eq!(surface.calls, expected_playback(&["a", "b", "c"]));
    }

    #[test]
    fn test_cancel_stops_without_visiting_active_node() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        let run = seq.play(order(&["a", "b", "c", "d", "e"]), &mut surface);

        seq.update(ms(2500), &mut surface);
        assert_eq!(seq.current_step().map(|s| s.index), Some(2));

        seq.cancel();
        seq.update(ms(10_000), &mut surface);

        assert_eq!(seq.phase(), SequencerPhase::Idle);
        assert!(!seq.is_busy());
        assert_eq!(
            surface.calls,
            vec![
                Call::Reset,
                Call::Active("a".into(), 0),
                Call::Visited("a".into()),
                Call::Active("b".into(), 1),
                Call::Visited("b".into()),
                Call::Active("c".into(), 2),
                Call::ClearActive,
            ]
        );
        assert_eq!(surface.state.state(&"c".into()), NodeState::Pending);
        assert!(seq
            .take_events()
            .contains(&SequencerEvent::Cancelled { run, at_index: 2 }));
    }

    #[test]
    fn test_external_token_cancels_run() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["a", "b"]), &mut surface);

        let token = seq.cancellation_token().unwrap();
        token.cancel();
        seq.update(Duration::ZERO, &mut surface);

        assert_eq!(seq.phase(), SequencerPhase::Idle);
        assert_eq!(surface.calls.last(), Some(&Call::ClearActive));
        assert!(!surface.calls.contains(&Call::Visited("a".into())));
    }

    #[test]
    fn test_replay_supersedes_live_run() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        let first = seq.play(order(&["a", "b", "c"]), &mut surface);
        seq.update(ms(1500), &mut surface);

        let second = seq.play(order(&["x", "y"]), &mut surface);
        assert_ne!(first, second);
        // Nothing touches the surface until the next frame
        let calls_before = surface.calls.len();
        assert_eq!(seq.phase(), SequencerPhase::Playing);

        for _ in 0..100 {
            seq.update(ms(50), &mut surface);
        }
        assert_eq!(seq.phase(), SequencerPhase::Idle);

        let resets = surface.resets();
        assert_eq!(resets.len(), 2);
        // Between the old run and the new reset only the active highlight is cleared
        assert_eq!(&surface.calls[calls_before..resets[1]], &[Call::ClearActive]);
        assert_eq!(&surface.calls[resets[1]..], expected_playback(&["x", "y"]).as_slice());

        let events = seq.take_events();
        let cancelled = events
            .iter()
            .position(|e| matches!(e, SequencerEvent::Cancelled { run, .. } if *run == first))
            .unwrap();
        let started = events
            .iter()
            .position(|e| matches!(e, SequencerEvent::Started { run, .. } if *run == second))
            .unwrap();
        assert!(cancelled < started);
        assert!(events[started..].iter().all(|e| match e {
            SequencerEvent::Started { run, .. }
            | SequencerEvent::StepActivated { run, .. }
            | SequencerEvent::StepVisited { run, .. }
            | SequencerEvent::Completed { run }
            | SequencerEvent::Cancelled { run, .. } => *run == second,
        }));
    }

    #[test]
    fn test_grace_delay_before_next_run() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["a", "b"]), &mut surface);
        seq.update(ms(300), &mut surface);
        seq.play(order(&["x"]), &mut surface);

        seq.update(Duration::ZERO, &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Settling);
        assert!(seq.is_busy());
        assert_eq!(surface.resets().len(), 1);

        seq.update(ms(99), &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Settling);

        seq.update(ms(1), &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Playing);
        assert_eq!(surface.resets().len(), 2);
        assert_eq!(seq.current_step().map(|s| s.node.as_str()), Some("x"));
    }

    #[test]
    fn test_latest_queued_order_wins() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["a", "b"]), &mut surface);
        seq.play(order(&["x"]), &mut surface);
        seq.play(order(&["y"]), &mut surface);
        seq.update(ms(5000), &mut surface);

        assert!(surface.calls.contains(&Call::Active("y".into(), 0)));
        assert!(!surface.calls.iter().any(|c| matches!(c, Call::Active(n, _) if n == "x")));
    }

    #[test]
    fn test_cancel_during_grace_drops_queued_run() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["a"]), &mut surface);
        let queued = seq.play(order(&["x"]), &mut surface);
        seq.update(Duration::ZERO, &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Settling);

        seq.take_events();

        seq.cancel();
        assert!(!seq.is_busy());
        assert_eq!(
            seq.take_events(),
            vec![SequencerEvent::Cancelled {
                run: queued,
                at_index: 0
            }]
        );

        seq.update(ms(1000), &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Idle);
        assert_eq!(surface.resets().len(), 1);
        assert!(seq.take_events().is_empty());
    }

    #[test]
    fn test_replaced_queued_run_reports_cancelled() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.play(order(&["a", "b"]), &mut surface);
        let replaced = seq.play(order(&["x"]), &mut surface);
        seq.take_events();

        let latest = seq.play(order(&["y"]), &mut surface);
        assert_eq!(
            seq.take_events(),
            vec![SequencerEvent::Cancelled {
                run: replaced,
                at_index: 0
            }]
        );

        seq.update(ms(5000), &mut surface);
        let events = seq.take_events();
        assert!(events.contains(&SequencerEvent::Completed { run: latest }));
        assert!(!events.iter().any(|e| matches!(e, SequencerEvent::Started { run, .. } if *run == replaced)));
    }

    #[test]
    fn test_empty_order_completes_immediately() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        let run = seq.play(TraversalOrder::default(), &mut surface);
        assert_eq!(seq.phase(), SequencerPhase::Idle);
        assert_eq!(surface.calls, vec![Call::Reset, Call::ClearActive]);
        assert_eq!(
            seq.take_events(),
            vec![
                SequencerEvent::Started { run, total: 0 },
                SequencerEvent::Completed { run },
            ]
        );
    }

    #[test]
    fn test_speed_scales_dwell() {
        let mut surface = RecordingSurface::new();
        let mut seq = sequencer();
        seq.set_speed(2.0);
        seq.play(order(&["a", "b"]), &mut surface);
        seq.update(ms(500), &mut surface);
        assert_eq!(surface.state.state(&"a".into()), NodeState::Visited);

        seq.set_speed(100.0);
        assert_eq!(seq.config().speed, MAX_SPEED);
    }

    #[test]
    fn test_focus_follows_activation() {
        let mut surface = RecordingSurface::new();
        let mut seq = AnimationSequencer::default();
        seq.play(order(&["a"]), &mut surface);
        assert_eq!(
            &surface.calls[..3],
            &[Call::Reset, Call::Active("a".into(), 0), Call::Focus("a".into())]
        );
    }
}
