//! Serialization strategy selection.
//!
//! Decides, per generated type, whether member-wise default serialization
//! reproduces the type's JSON representation or whether a custom converter
//! must be emitted. Policy, in priority order:
//!
//! 1. Wrappers are custom: default layout would write `{"Value": <inner>}`
//!    where the JSON must look exactly like the inner value.
//! 2. Discriminated unions are custom: tag dispatch is not structural.
//! 3. Everything else is default.
//!
//! Choosing custom creates exactly one [`ConverterUnit`] for the owner.

use crate::ir::{ConverterUnit, ReadLogic, TypeId, TypeKind, WriteLogic};

/// How values of a generated type are (de)serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializationStrategy {
    /// Member-wise serialization provided by the target's JSON library
    Default,
    /// A generated converter nested in the type
    Custom,
}

impl std::fmt::Display for SerializationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationStrategy::Default => write!(f, "default"),
            SerializationStrategy::Custom => write!(f, "custom"),
        }
    }
}

/// Which policy rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyReason {
    TransparentWrapper,
    TagDispatch,
    Structural,
}

/// Outcome of strategy selection for one type.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub strategy: SerializationStrategy,
    pub reason: StrategyReason,
    /// Present exactly when `strategy` is custom; its identifier is still the
    /// unreserved candidate
    pub converter: Option<ConverterUnit>,
}

/// Applies the strategy policy.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    converter_name: String,
}

impl StrategySelector {
    /// `converter_name` is the candidate identifier for nested converters.
    pub fn new(converter_name: impl Into<String>) -> Self {
        Self {
            converter_name: converter_name.into(),
        }
    }

    /// Decide the strategy for `owner`, building its converter when custom.
    pub fn select(&self, owner: TypeId, kind: &TypeKind) -> Selection {
        let selection = match kind {
            TypeKind::Wrapper { member } => Selection {
                strategy: SerializationStrategy::Custom,
                reason: StrategyReason::TransparentWrapper,
                converter: Some(ConverterUnit {
                    owner,
                    identifier: self.converter_name.clone(),
                    read: ReadLogic::UnwrapInner {
                        inner: member.ty.clone(),
                        member: member.identifier.clone(),
                    },
                    write: WriteLogic::DelegateToInner {
                        inner: member.ty.clone(),
                        member: member.identifier.clone(),
                    },
                }),
            },
            TypeKind::Union { tag_json, variants } => Selection {
                strategy: SerializationStrategy::Custom,
                reason: StrategyReason::TagDispatch,
                converter: Some(ConverterUnit {
                    owner,
                    identifier: self.converter_name.clone(),
                    read: ReadLogic::DispatchOnTag {
                        tag_json: tag_json.clone(),
                        variants: variants.clone(),
                    },
                    write: WriteLogic::DispatchOnRuntimeType,
                }),
            },
            TypeKind::Record { .. } | TypeKind::Enum { .. } => Selection {
                strategy: SerializationStrategy::Default,
                reason: StrategyReason::Structural,
                converter: None,
            },
        };

        tracing::debug!(
            owner = owner.index(),
            kind = kind.label(),
            strategy = %selection.strategy,
            reason = ?selection.reason,
            "Selected serialization strategy"
        );
        selection
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new("JsonConverter")
    }
}
