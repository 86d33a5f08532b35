// LedgerState is the value every command is applied to.
//
// Notes
// - `Empty` exists before registration or hydration. Only `SetState` moves it to `Loaded`.
// - The state is passed around explicitly; nothing in the core holds it globally.

use crate::modules::ledger::core::model::{Owner, Property};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LedgerState {
    #[default]
    Empty,
    Loaded(Owner),
}

impl LedgerState {
    pub fn owner(&self) -> Option<&Owner> {
        match self {
            LedgerState::Empty => None,
            LedgerState::Loaded(owner) => Some(owner),
        }
    }

    pub fn active_property(&self) -> Option<&Property> {
        self.owner().and_then(Owner::active_property)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LedgerState::Loaded(_))
    }
}

#[cfg(test)]
mod ledger_state_tests {
    use super::*;
    use crate::test_support::fixtures::{OwnerBuilder, PropertyBuilder};
    use rstest::rstest;

    #[rstest]
    fn it_should_create_the_blank_state() {
        let state = LedgerState::default();
        assert_eq!(state, LedgerState::Empty);
        assert!(state.owner().is_none());
        assert!(state.active_property().is_none());
    }

    #[rstest]
    fn it_should_expose_the_active_property() {
        let owner = OwnerBuilder::new("owner-1")
            .property(PropertyBuilder::new("p1").build())
            .property(PropertyBuilder::new("p2").build())
            .active("p2")
            .build();
        let state = LedgerState::Loaded(owner);
        assert!(state.is_loaded());
        assert_eq!(state.active_property().map(|p| p.id.as_str()), Some("p2"));
    }
}
