#![forbid(unsafe_code)]

//! Pure state transitions for the toast queue.
//!
//! [`reduce`] is the only way the queue's contents change. It has no side
//! effects: scheduling removal timers and notifying subscribers belong to
//! [`Toaster`](crate::Toaster).
//!
//! # Invariants
//!
//! 1. `len() <= limit` after every transition.
//! 2. The list is ordered most-recent-first.
//! 3. No transition changes a toast's id.
//! 4. Unknown ids are ignored.

use crate::toast::{Toast, ToastId, ToastPatch};

/// The queue's contents plus its capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastState {
    toasts: Vec<Toast>,
    limit: usize,
}

impl ToastState {
    /// Empty state holding at most `limit` toasts.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            toasts: Vec::new(),
            limit,
        }
    }

    /// Toasts, most recent first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// The toast with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| &t.id == id)
    }

    /// Whether a toast with `id` is present.
    #[must_use]
    pub fn contains(&self, id: &ToastId) -> bool {
        self.get(id).is_some()
    }

    /// Number of toasts listed (open or closing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Whether nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Capacity.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// A requested transition.
#[derive(Debug, Clone)]
pub enum QueueAction {
    /// Prepend a toast and truncate to the limit.
    Add(Toast),
    /// Merge `patch` into the toast with `id`.
    Update { id: ToastId, patch: ToastPatch },
    /// Mark one toast (or all, for `None`) as closed.
    Dismiss(Option<ToastId>),
    /// Delete one toast (or all, for `None`).
    Remove(Option<ToastId>),
}

impl QueueAction {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Update { .. } => "update",
            Self::Dismiss(_) => "dismiss",
            Self::Remove(_) => "remove",
        }
    }
}

/// Apply `action` to `state`, returning the next state.
#[must_use]
pub fn reduce(state: &ToastState, action: QueueAction) -> ToastState {
    let mut next = state.clone();
    match action {
        QueueAction::Add(toast) => {
            next.toasts.insert(0, toast);
            next.toasts.truncate(next.limit);
        }
        QueueAction::Update { id, patch } => {
            if let Some(toast) = next.toasts.iter_mut().find(|t| t.id == id) {
                patch.apply(toast);
            }
        }
        QueueAction::Dismiss(target) => {
            for toast in next
                .toasts
                .iter_mut()
                .filter(|t| target.as_ref().is_none_or(|id| &t.id == id))
            {
                toast.open = false;
            }
        }
        QueueAction::Remove(Some(id)) => next.toasts.retain(|t| t.id != id),
        QueueAction::Remove(None) => next.toasts.clear(),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastProps;

    fn toast(id: &str, title: &str) -> Toast {
        Toast::from_props(ToastId::from(id), ToastProps::new().title(title))
    }

    fn titles(state: &ToastState) -> Vec<&str> {
        state.toasts().iter().filter_map(Toast::title).collect()
    }

    #[test]
    fn add_prepends_and_truncates() {
        let state = ToastState::with_limit(2);
        let state = reduce(&state, QueueAction::Add(toast("1", "A")));
        let state = reduce(&state, QueueAction::Add(toast("2", "B")));
        let state = reduce(&state, QueueAction::Add(toast("3", "C")));
        assert_eq!(titles(&state), vec!["C", "B"]);
    }

    #[test]
    fn default_limit_keeps_latest_only() {
        let state = ToastState::with_limit(1);
        let state = reduce(&state, QueueAction::Add(toast("1", "A")));
        let state = reduce(&state, QueueAction::Add(toast("2", "B")));
        assert_eq!(titles(&state), vec!["B"]);
        assert!(!state.contains(&ToastId::from("1")));
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let before = reduce(&ToastState::with_limit(1), QueueAction::Add(toast("1", "A")));
        let snapshot = before.clone();
        let _after = reduce(&before, QueueAction::Remove(None));
        assert_eq!(before, snapshot);
    }

    #[test]
    fn update_merges_by_id() {
        let state = reduce(&ToastState::with_limit(3), QueueAction::Add(toast("1", "A")));
        let state = reduce(
            &state,
            QueueAction::Update {
                id: ToastId::from("1"),
                patch: ToastPatch::new().description("details"),
            },
        );
        let t = state.get(&ToastId::from("1")).unwrap();
        assert_eq!(t.title(), Some("A"));
        assert_eq!(t.description(), Some("details"));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let state = reduce(&ToastState::with_limit(3), QueueAction::Add(toast("1", "A")));
        let next = reduce(
            &state,
            QueueAction::Update {
                id: ToastId::from("9"),
                patch: ToastPatch::new().title("X"),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn dismiss_one_or_all() {
        let mut state = ToastState::with_limit(3);
        for (id, title) in [("1", "A"), ("2", "B"), ("3", "C")] {
            state = reduce(&state, QueueAction::Add(toast(id, title)));
        }

        let one = reduce(&state, QueueAction::Dismiss(Some(ToastId::from("2"))));
        let open: Vec<bool> = one.toasts().iter().map(Toast::is_open).collect();
        assert_eq!(open, vec![true, false, true]);
        assert_eq!(one.len(), 3);

        let all = reduce(&state, QueueAction::Dismiss(None));
        assert!(all.toasts().iter().all(|t| !t.is_open()));
    }

    #[test]
    fn remove_one_or_all() {
        let mut state = ToastState::with_limit(3);
        for (id, title) in [("1", "A"), ("2", "B")] {
            state = reduce(&state, QueueAction::Add(toast(id, title)));
        }
        let one = reduce(&state, QueueAction::Remove(Some(ToastId::from("1"))));
        assert_eq!(titles(&one), vec!["B"]);

        let unknown = reduce(&state, QueueAction::Remove(Some(ToastId::from("42"))));
        assert_eq!(unknown, state);

        let all = reduce(&state, QueueAction::Remove(None));
        assert!(all.is_empty());
        assert_eq!(all.limit(), 3);
    }

    #[test]
    fn zero_limit_holds_nothing() {
        let state = reduce(&ToastState::with_limit(0), QueueAction::Add(toast("1", "A")));
        assert!(state.is_empty());
    }
}
