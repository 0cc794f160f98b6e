//! Path rebuild scheduling and waypoint following.
//!
//! Full grid searches are expensive, so agents take turns: the scheduler
//! counts ticks and each agent only rebuilds on the tick matching its
//! phase slot, bounding searches per tick. Rebuilds are further gated by
//! a per-agent cooldown and a minimum target displacement. Following an
//! already-computed path is a cheap per-tick operation that never
//! re-enters the search.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_REBUILD_COOLDOWN, DEFAULT_REBUILD_DISPLACEMENT, DEFAULT_REBUILD_SPREAD,
};
use crate::geometry::WorldPos;

/// An agent's assigned rebuild phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSlot {
    phase: u32,
}

/// Round-robin rate limiter spreading path rebuilds across ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathScheduler {
    tick: u64,
    spread: u32,
    next_phase: u32,
}

impl PathScheduler {
    /// Create a scheduler spreading rebuilds over `spread` ticks
    pub fn new(spread: u32) -> Self {
        Self {
            tick: 0,
            spread: spread.max(1),
            next_phase: 0,
        }
    }

    /// Assign the next phase slot, round-robin
    pub fn register(&mut self) -> AgentSlot {
        let phase = self.next_phase;
        self.next_phase = (self.next_phase + 1) % self.spread;
        AgentSlot { phase }
    }

    /// Advance the tick counter; call once per simulation step
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Whether this tick belongs to the given slot
    pub fn is_rebuild_turn(&self, slot: AgentSlot) -> bool {
        self.tick % self.spread as u64 == slot.phase as u64
    }
}

impl Default for PathScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REBUILD_SPREAD)
    }
}

/// Per-agent navigation state: rebuild gating plus the waypoint stack
/// being followed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentNav {
    slot: AgentSlot,

    /// Seconds until the next rebuild is allowed
    cooldown: f32,

    /// Configured cooldown applied after each rebuild
    rebuild_cooldown: f32,

    /// Target must move at least this far to justify a rebuild
    rebuild_displacement: f32,

    /// Target position the current path was built for
    last_target: Option<WorldPos>,

    /// Waypoint stack; the next waypoint is at the end
    path: Vec<WorldPos>,

    active: bool,
}

impl AgentNav {
    pub fn new(slot: AgentSlot) -> Self {
        Self {
            slot,
            cooldown: 0.0,
            rebuild_cooldown: DEFAULT_REBUILD_COOLDOWN,
            rebuild_displacement: DEFAULT_REBUILD_DISPLACEMENT,
            last_target: None,
            path: Vec::new(),
            active: false,
        }
    }

    /// Override the rebuild cooldown
    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.rebuild_cooldown = seconds.max(0.0);
        self
    }

    /// Override the rebuild displacement threshold
    pub fn with_displacement(mut self, distance: f32) -> Self {
        self.rebuild_displacement = distance.max(0.0);
        self
    }

    /// Advance timers; call once per simulation step
    pub fn update(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Check every rebuild gate: the scheduler granted this tick to the
    /// agent's slot, the cooldown has expired, and the target has moved
    /// far enough from where the current path was built to.
    pub fn wants_rebuild(&self, scheduler: &PathScheduler, target: WorldPos) -> bool {
        scheduler.is_rebuild_turn(self.slot) && self.cooldown <= 0.0 && self.target_moved(target)
    }

    fn target_moved(&self, target: WorldPos) -> bool {
        match self.last_target {
            None => true,
            Some(last) => last.distance(target) > self.rebuild_displacement,
        }
    }

    /// Start following a freshly built waypoint stack, superseding any
    /// follow already in progress; at most one is active per agent.
    /// Arms the rebuild cooldown and records the target the path was
    /// built for.
    pub fn start_follow(&mut self, path: Vec<WorldPos>, target: WorldPos) {
        if self.active {
            log::debug!("agent path follow superseded");
        }
        self.active = !path.is_empty();
        self.path = path;
        self.last_target = Some(target);
        self.cooldown = self.rebuild_cooldown;
    }

    /// Drop the current path and go idle
    pub fn stop(&mut self) {
        self.path.clear();
        self.active = false;
        self.last_target = None;
    }

    pub fn is_following(&self) -> bool {
        self.active
    }

    /// The waypoint on top of the stack. The first value after a rebuild
    /// is the agent's own start cell; pop it with `waypoint_reached`.
    pub fn next_waypoint(&self) -> Option<WorldPos> {
        self.path.last().copied()
    }

    /// Pop the reached waypoint; the follow ends when the stack empties
    pub fn waypoint_reached(&mut self) -> Option<WorldPos> {
        let reached = self.path.pop();
        if self.path.is_empty() {
            self.active = false;
        }
        reached
    }
}
