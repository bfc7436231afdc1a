// src/model/selection.rs
//! Ordered, capacity-bounded atom selection.
//!
//! The selection drives which alignment actions are available: one atom
//! enables translation, two enable direction alignment and three enable plane
//! alignment. Insertion order is significant because the alignment direction is
//! `p[1] - p[0]`.

pub const MAX_SELECTION: usize = 3;

/// Derived state of the selection (its size as a state machine)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Single,
    Pair,
    Triple,
}

impl SelectionState {
    pub fn from_len(len: usize) -> Self {
        match len {
            0 => SelectionState::Empty,
            1 => SelectionState::Single,
            2 => SelectionState::Pair,
            _ => SelectionState::Triple,
        }
    }

    pub fn can_translate(self) -> bool {
        self == SelectionState::Single
    }

    pub fn can_align_axis(self) -> bool {
        self == SelectionState::Pair
    }

    pub fn can_align_plane(self) -> bool {
        self == SelectionState::Triple
    }

    /// Transient helper drawn by the viewer while in this state
    pub fn aid(self) -> Option<VisualAid> {
        match self {
            SelectionState::Pair => Some(VisualAid::Line),
            SelectionState::Triple => Some(VisualAid::Triangle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualAid {
    Line,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    Ignored,
    Cleared,
}

/// Report handed back to the caller after every selection mutation so it can
/// re-enable actions and add/remove the line or triangle helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub outcome: ToggleOutcome,
    pub size: usize,
    pub state: SelectionState,
    pub retract: Option<VisualAid>,
    pub show: Option<VisualAid>,
}

impl SelectionChange {
    fn between(
        outcome: ToggleOutcome,
        before: SelectionState,
        after: SelectionState,
        size: usize,
    ) -> Self {
        let (retract, show) = if before == after {
            (None, None)
        } else {
            (before.aid(), after.aid())
        };
        Self { outcome, size, state: after, retract, show }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, index: usize) -> SelectionChange {
        let before = self.state();

        let outcome = if let Some(pos) = self.indices.iter().position(|&i| i == index) {
            self.indices.remove(pos);
            ToggleOutcome::Removed
        } else if self.indices.len() < MAX_SELECTION {
            self.indices.push(index);
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Ignored
        };

        SelectionChange::between(outcome, before, self.state(), self.len())
    }

    pub fn clear(&mut self) -> SelectionChange {
        let before = self.state();
        self.indices.clear();
        SelectionChange::between(ToggleOutcome::Cleared, before, SelectionState::Empty, 0)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Selected indices in insertion order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn state(&self) -> SelectionState {
        SelectionState::from_len(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_preserves_order() {
        let mut sel = SelectionSet::new();
        sel.toggle(5);
        sel.toggle(2);
        sel.toggle(9);
        assert_eq!(sel.indices(), &[5, 2, 9]);

        sel.toggle(2);
        assert_eq!(sel.indices(), &[5, 9]);
        sel.toggle(2);
        assert_eq!(sel.indices(), &[5, 9, 2]);
    }

    #[test]
    fn test_fourth_atom_ignored() {
        let mut sel = SelectionSet::new();
        for i in 0..3 {
            sel.toggle(i);
        }
        let change = sel.toggle(7);
        assert_eq!(change.outcome, ToggleOutcome::Ignored);
        assert_eq!(change.size, 3);
        assert_eq!(sel.indices(), &[0, 1, 2]);
        assert_eq!(change.retract, None);
        assert_eq!(change.show, None);
    }

    #[test]
    fn test_toggle_selected_always_removes() {
        let mut sel = SelectionSet::new();
        for i in 0..3 {
            sel.toggle(i);
        }
        let change = sel.toggle(1);
        assert_eq!(change.outcome, ToggleOutcome::Removed);
        assert_eq!(sel.indices(), &[0, 2]);

        let mut single = SelectionSet::new();
        single.toggle(4);
        assert_eq!(single.toggle(4).size, 0);
    }

    #[test]
    fn test_visual_aid_transitions() {
        let mut sel = SelectionSet::new();
        assert_eq!(sel.toggle(0).show, None);

        let change = sel.toggle(1);
        assert_eq!(change.state, SelectionState::Pair);
        assert_eq!(change.show, Some(VisualAid::Line));
        assert_eq!(change.retract, None);

        let change = sel.toggle(2);
        assert_eq!(change.retract, Some(VisualAid::Line));
        assert_eq!(change.show, Some(VisualAid::Triangle));

        let change = sel.clear();
        assert_eq!(change.retract, Some(VisualAid::Triangle));
        assert_eq!(change.show, None);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_enabled_actions() {
        assert!(SelectionState::Single.can_translate());
        assert!(!SelectionState::Pair.can_translate());
        assert!(SelectionState::Pair.can_align_axis());
        assert!(!SelectionState::Triple.can_align_axis());
        assert!(SelectionState::Triple.can_align_plane());
        assert!(!SelectionState::Empty.can_align_plane());
    }
}
