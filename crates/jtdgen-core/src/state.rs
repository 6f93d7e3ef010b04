//! Per-type generation state machine

use crate::error::{CodegenError, CodegenResult};

/// Generation states of a single definition (or inline type) in one pass
///
/// State transitions:
/// ```text
/// Unvisited → Mapping → StrategySelected → NameReserved → Emitted
/// ```
///
/// There is no re-entry. A definition reached again while it is being
/// mapped (a ref cycle) is not restarted; the mapper reuses the type it
/// already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefinitionState {
    /// Not reached yet
    #[default]
    Unvisited,
    /// Structure is being resolved
    Mapping,
    /// Default or custom serialization has been decided
    StrategySelected,
    /// Identifiers for the type, its members and converter are reserved
    NameReserved,
    /// Declaration text has been rendered
    Emitted,
}

impl DefinitionState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: DefinitionState) -> bool {
        use DefinitionState::*;
        matches!(
            (self, target),
            (Unvisited, Mapping)
                | (Mapping, StrategySelected)
                | (StrategySelected, NameReserved)
                | (NameReserved, Emitted)
        )
    }

    /// Move to `target`, reporting an illegal transition against `definition`
    pub fn advance(&mut self, target: DefinitionState, definition: &str) -> CodegenResult<()> {
        if !self.can_transition_to(target) {
            return Err(CodegenError::invariant(
                definition,
                format!("illegal state transition {self} -> {target}"),
            ));
        }
        *self = target;
        Ok(())
    }

    /// Whether the type is ready to be rendered
    pub fn is_renderable(&self) -> bool {
        matches!(self, DefinitionState::NameReserved)
    }

    /// Check if the state is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, DefinitionState::Emitted)
    }
}

impl std::fmt::Display for DefinitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefinitionState::Unvisited => write!(f, "Unvisited"),
            DefinitionState::Mapping => write!(f, "Mapping"),
            DefinitionState::StrategySelected => write!(f, "StrategySelected"),
            DefinitionState::NameReserved => write!(f, "NameReserved"),
            DefinitionState::Emitted => write!(f, "Emitted"),
        }
    }
}
