//! Mutation state tracking and user-facing notices.

use std::fmt;

/// The three mutation kinds, tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Lifecycle of a single mutation invocation.
///
/// Terminal states describe the latest invocation only; a new call of
/// the same kind resets to `InFlight`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Per-kind mutation states. Independent kinds never serialize against
/// each other; a concurrent delete and create are both legal.
#[derive(Debug, Default)]
pub struct MutationTracker {
    create: MutationState,
    update: MutationState,
    delete: MutationState,
}

impl MutationTracker {
    pub fn state(&self, kind: MutationKind) -> MutationState {
        match kind {
            MutationKind::Create => self.create,
            MutationKind::Update => self.update,
            MutationKind::Delete => self.delete,
        }
    }

    pub(crate) fn begin(&mut self, kind: MutationKind) {
        *self.slot(kind) = MutationState::InFlight;
    }

    pub(crate) fn finish(&mut self, kind: MutationKind, ok: bool) {
        *self.slot(kind) = if ok {
            MutationState::Succeeded
        } else {
            MutationState::Failed
        };
    }

    fn slot(&mut self, kind: MutationKind) -> &mut MutationState {
        match kind {
            MutationKind::Create => &mut self.create,
            MutationKind::Update => &mut self.update,
            MutationKind::Delete => &mut self.delete,
        }
    }

    /// Whether a create or update is in flight. UIs use this to disable
    /// form submission.
    pub fn is_submitting(&self) -> bool {
        self.create == MutationState::InFlight || self.update == MutationState::InFlight
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing notification emitted by the mutation coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_tracked_independently() {
        let mut tracker = MutationTracker::default();
        tracker.begin(MutationKind::Create);
        tracker.begin(MutationKind::Delete);
        tracker.finish(MutationKind::Delete, true);

        assert_eq!(tracker.state(MutationKind::Create), MutationState::InFlight);
        assert_eq!(tracker.state(MutationKind::Delete), MutationState::Succeeded);
        assert_eq!(tracker.state(MutationKind::Update), MutationState::Idle);
    }

    #[test]
    fn new_invocation_resets_terminal_state() {
        let mut tracker = MutationTracker::default();
        tracker.begin(MutationKind::Update);
        tracker.finish(MutationKind::Update, false);
        assert_eq!(tracker.state(MutationKind::Update), MutationState::Failed);

        tracker.begin(MutationKind::Update);
        assert_eq!(tracker.state(MutationKind::Update), MutationState::InFlight);
    }

    #[test]
    fn submitting_covers_create_and_update_only() {
        let mut tracker = MutationTracker::default();
        tracker.begin(MutationKind::Delete);
        assert!(!tracker.is_submitting());

        tracker.begin(MutationKind::Update);
        assert!(tracker.is_submitting());
    }
}
