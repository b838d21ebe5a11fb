use serde::Serialize;
use std::fmt;

/// The two attendance actions. A persona alternates between them: the next
/// kind is always derived from the latest stored registro, never from a
/// persisted state flag.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ActionKind {
    Entrada,
    Salida,
}

impl ActionKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ActionKind::Entrada => "Entrada",
            ActionKind::Salida => "Salida",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Entrada" => Some(ActionKind::Entrada),
            "Salida" => Some(ActionKind::Salida),
            _ => None,
        }
    }

    /// The action that follows this one in the check-in cycle.
    pub fn flip(&self) -> Self {
        match self {
            ActionKind::Entrada => ActionKind::Salida,
            ActionKind::Salida => ActionKind::Entrada,
        }
    }

    pub fn is_entrada(&self) -> bool {
        matches!(self, ActionKind::Entrada)
    }

    pub fn is_salida(&self) -> bool {
        matches!(self, ActionKind::Salida)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
