//! Use-case scenario model
//!
//! A scenario is an ordered list of [`Step`]s. Each step is either a
//! primary action performed by one actor, or a group of branches
//! (alternatives or exceptions) hanging off the main flow at that point.

use std::fmt;

/// Mapping key that introduces alternative branches
pub const ALTERNATIVES_KEY: &str = "Alternatives";

/// Mapping key that introduces exception branches
pub const EXCEPTIONS_KEY: &str = "Exceptions";

/// Kind of a branch group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// Optional path off the main flow
    Alternative,
    /// Error or failure path off the main flow
    Exception,
}

impl BranchKind {
    /// Resolve a step key into a branch kind
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            ALTERNATIVES_KEY => Some(Self::Alternative),
            EXCEPTIONS_KEY => Some(Self::Exception),
            _ => None,
        }
    }

    /// Name used in labels, identical to the document key
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alternative => ALTERNATIVES_KEY,
            Self::Exception => EXCEPTIONS_KEY,
        }
    }

    /// Single-letter prefix for step numbers (`A`, `E`)
    #[inline]
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Alternative => 'A',
            Self::Exception => 'E',
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One actor performing one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Acting participant
    pub actor: String,
    /// What the actor does
    pub text: String,
}

impl Action {
    /// Create new action
    #[inline]
    #[must_use]
    pub fn new(actor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            text: text.into(),
        }
    }
}

/// A named branch off the main flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Human readable summary
    pub description: String,
    /// Where the flow resumes; free text, never resolved
    pub goto: String,
    /// Actions in order
    pub actions: Vec<Action>,
}

/// A single entry of the scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Numbered step of the main flow
    Primary(Action),
    /// Alternatives or exceptions declared at this point of the flow
    Branches {
        /// Which counter the branches advance
        kind: BranchKind,
        /// Branches in declaration order
        branches: Vec<Branch>,
    },
}

/// A loaded use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseCase {
    /// Identifier, taken from the file name
    pub name: String,
    /// Column order of every table
    pub actors: Vec<String>,
    /// Scenario steps in document order
    pub steps: Vec<Step>,
    /// Pattern locating the LaTeX insertion point, if any
    pub anchor: Option<String>,
}

/// Derive a use-case name from a file name: everything before the first `.`
///
/// `UC01.checkout.yaml` becomes `UC01`.
#[must_use]
pub fn use_case_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}
