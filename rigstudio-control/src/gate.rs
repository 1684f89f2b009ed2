//! Dependency gate
//!
//! Pure policy deciding whether a job start is currently permitted, given
//! the remote-leader flag and the last cached leader state. Never touches
//! the network; callable at any time.

use rigstudio_core::domain::job::JobKind;
use rigstudio_core::domain::leader::LeaderState;

/// Whether job starts are currently permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Any job may start
    Open,
    /// Leader-bound kinds may not start
    Closed,
}

/// Per-kind capability table: which jobs need a live leader link.
///
/// Teleoperate and record drive the follower from the leader arm in real
/// time; train and replay work from recorded data and never touch the link.
const LEADER_BOUND: [(JobKind, bool); 4] = [
    (JobKind::Teleoperate, true),
    (JobKind::Record, true),
    (JobKind::Train, false),
    (JobKind::Replay, false),
];

/// Whether `kind` requires the leader service to be reachable.
pub fn requires_leader(kind: JobKind) -> bool {
    LEADER_BOUND
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, bound)| *bound)
        .unwrap_or(false)
}

/// Evaluate the gate from cached state only.
///
/// With the remote leader disabled the gate is always open; otherwise it is
/// open exactly when the last poll saw the leader running. `Unknown` closes
/// the gate just like `Stopped` does, but the two are never conflated in
/// the cached state itself.
pub fn evaluate(remote_leader_enabled: bool, leader: LeaderState) -> GateState {
    if !remote_leader_enabled {
        return GateState::Open;
    }
    if leader == LeaderState::Running {
        GateState::Open
    } else {
        GateState::Closed
    }
}

/// Whether a start of `kind` is permitted under `gate`.
pub fn permits(gate: GateState, kind: JobKind) -> bool {
    match gate {
        GateState::Open => true,
        GateState::Closed => !requires_leader(kind),
    }
}
