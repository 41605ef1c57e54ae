//! Tri-state membership.

/// Membership of a group of candidates in a selection.
///
/// Drives "select all" checkboxes: every candidate selected, some of them,
/// or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// No candidate is selected.
    #[default]
    Unchecked,
    /// Some, but not all, candidates are selected.
    PartiallyChecked,
    /// Every candidate is selected.
    Checked,
}

impl CheckState {
    /// Derive the state from `any` / `every` membership tests.
    pub fn from_membership(any: bool, every: bool) -> Self {
        if every {
            CheckState::Checked
        } else if any {
            CheckState::PartiallyChecked
        } else {
            CheckState::Unchecked
        }
    }

    /// Check whether the state is `Checked`.
    pub fn is_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Check whether the state is `Unchecked`.
    pub fn is_unchecked(&self) -> bool {
        matches!(self, CheckState::Unchecked)
    }

    /// Check whether the state is `PartiallyChecked`.
    pub fn is_partially_checked(&self) -> bool {
        matches!(self, CheckState::PartiallyChecked)
    }

    /// Convert to the nullable boolean used by tri-state toggle controls.
    ///
    /// `PartiallyChecked` maps to `None`.
    pub fn to_option(&self) -> Option<bool> {
        match self {
            CheckState::Checked => Some(true),
            CheckState::Unchecked => Some(false),
            CheckState::PartiallyChecked => None,
        }
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}
