//! Scenario flattening
//!
//! Turns the step sequence into one main table and one table per branch.
//! Every row has exactly one slot per actor, and at most one of them is
//! filled (the trailing `Go To` row of a branch uses the first slot).
//!
//! Numbering:
//! - main steps: `1.`, `2.`, ... in document order
//! - alternatives and exceptions each have their own counter (`A1`, `A2`,
//!   `E1`, ...) no matter how they interleave
//! - branch steps continue from the main-step count reached at the point
//!   the branch is declared: `A1.2.`, `A1.3.`, ...

use crate::error::FlattenError;
use crate::scenario::{Action, Branch, BranchKind, Step, UseCase};

/// One table row, one slot per actor
pub type Row = Vec<String>;

/// Table produced for one alternative or exception
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTable {
    /// Branch kind
    pub kind: BranchKind,
    /// 1-based index within its kind
    pub index: usize,
    /// Branch description
    pub description: String,
    /// Branch steps followed by the `Go To` row
    pub rows: Vec<Row>,
}

impl SpecialTable {
    /// Short identifier such as `A1` or `E2`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{}", self.kind.letter(), self.index)
    }

    /// Heading such as `Alternatives 1: Out of stock`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}: {}", self.kind.name(), self.index, self.description)
    }
}

/// Flattened scenario
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    /// One row per primary step
    pub main: Vec<Row>,
    /// Branch tables in declaration order
    pub special: Vec<SpecialTable>,
}

impl Tables {
    /// Iterate every row of every table
    pub fn all_rows(&self) -> impl Iterator<Item = &Row> {
        self.main
            .iter()
            .chain(self.special.iter().flat_map(|t| t.rows.iter()))
    }
}

/// Running counters threaded through one flattening pass
#[derive(Debug, Default)]
struct Counters {
    main: usize,
    alternatives: usize,
    exceptions: usize,
}

impl Counters {
    fn next_branch(&mut self, kind: BranchKind) -> usize {
        let counter = match kind {
            BranchKind::Alternative => &mut self.alternatives,
            BranchKind::Exception => &mut self.exceptions,
        };
        *counter += 1;
        *counter
    }
}

/// Flatten `steps` into tables with one column per entry of `actors`
///
/// # Errors
/// - `FlattenError::UnknownActor` if an action names an undeclared actor
/// - `FlattenError::NoActors` if branches exist but there are no columns
pub fn flatten(steps: &[Step], actors: &[String]) -> Result<Tables, FlattenError> {
    let mut counters = Counters::default();
    let mut tables = Tables::default();

    for step in steps {
        match step {
            Step::Primary(action) => {
                counters.main += 1;
                let label = format!("{}. {}", counters.main, action.text);
                tables
                    .main
                    .push(place(actors, action, label, || format!("main step {}", counters.main))?);
            }
            Step::Branches { kind, branches } => {
                for branch in branches {
                    let index = counters.next_branch(*kind);
                    tables
                        .special
                        .push(flatten_branch(actors, *kind, index, counters.main, branch)?);
                }
            }
        }
    }

    tracing::debug!(
        "Flattened {} main rows and {} branch tables",
        tables.main.len(),
        tables.special.len()
    );

    Ok(tables)
}

fn flatten_branch(
    actors: &[String],
    kind: BranchKind,
    index: usize,
    start: usize,
    branch: &Branch,
) -> Result<SpecialTable, FlattenError> {
    if actors.is_empty() {
        return Err(FlattenError::NoActors);
    }

    let mut rows = Vec::with_capacity(branch.actions.len() + 1);
    for (sub, action) in (start..).zip(&branch.actions) {
        let label = format!("{}{}.{}. {}", kind.letter(), index, sub, action.text);
        rows.push(place(actors, action, label, || format!("{} {}", kind.name(), index))?);
    }

    let mut goto = vec![String::new(); actors.len()];
    goto[0] = format!("Go To: {}", branch.goto);
    rows.push(goto);

    Ok(SpecialTable {
        kind,
        index,
        description: branch.description.clone(),
        rows,
    })
}

/// Build a row with `label` in the acting actor's column
fn place(
    actors: &[String],
    action: &Action,
    label: String,
    context: impl FnOnce() -> String,
) -> Result<Row, FlattenError> {
    let column = actors
        .iter()
        .position(|a| *a == action.actor)
        .ok_or_else(|| FlattenError::unknown_actor(&action.actor, context()))?;

    let mut row = vec![String::new(); actors.len()];
    row[column] = label;
    Ok(row)
}

impl UseCase {
    /// Flatten this use case's scenario
    ///
    /// # Errors
    /// See [`flatten`].
    pub fn flatten(&self) -> Result<Tables, FlattenError> {
        flatten(&self.steps, &self.actors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn actors(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn primary(actor: &str, text: &str) -> Step {
        Step::Primary(Action::new(actor, text))
    }

    fn branches(kind: BranchKind, items: Vec<Branch>) -> Step {
        Step::Branches { kind, branches: items }
    }

    fn branch(description: &str, goto: &str, actions: Vec<Action>) -> Branch {
        Branch {
            description: description.to_string(),
            goto: goto.to_string(),
            actions,
        }
    }

    #[test]
    fn main_rows_are_numbered_and_placed() {
        let tables = flatten(
            &[primary("Buyer", "Places order"), primary("Seller", "Confirms order")],
            &actors(&["Buyer", "Seller"]),
        )
        .unwrap();

        assert_eq!(
            tables.main,
            vec![
                vec!["1. Places order".to_string(), String::new()],
                vec![String::new(), "2. Confirms order".to_string()],
            ]
        );
        assert!(tables.special.is_empty());
    }

    #[test]
    fn branch_numbering_continues_from_main_count() {
        let tables = flatten(
            &[
                primary("Buyer", "Places order"),
                primary("Seller", "Checks stock"),
                branches(
                    BranchKind::Alternative,
                    vec![branch(
                        "Out of stock",
                        "5",
                        vec![
                            Action::new("Seller", "Suggests substitute"),
                            Action::new("Buyer", "Accepts substitute"),
                        ],
                    )],
                ),
                primary("Seller", "Ships order"),
            ],
            &actors(&["Buyer", "Seller"]),
        )
        .unwrap();

        assert_eq!(tables.main.len(), 3);
        assert_eq!(tables.main[2][1], "3. Ships order");

        let alt = &tables.special[0];
        assert_eq!(alt.label(), "Alternatives 1: Out of stock");
        assert_eq!(alt.id(), "A1");
        assert_eq!(
            alt.rows,
            vec![
                vec![String::new(), "A1.2. Suggests substitute".to_string()],
                vec!["A1.3. Accepts substitute".to_string(), String::new()],
                vec!["Go To: 5".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn kinds_are_counted_independently() {
        let tables = flatten(
            &[
                branches(BranchKind::Alternative, vec![branch("a", "1", vec![])]),
                branches(BranchKind::Exception, vec![branch("e", "1", vec![])]),
                branches(BranchKind::Alternative, vec![branch("b", "1", vec![])]),
            ],
            &actors(&["Buyer"]),
        )
        .unwrap();

        let ids: Vec<_> = tables.special.iter().map(SpecialTable::id).collect();
        assert_eq!(ids, vec!["A1", "E1", "A2"]);
    }

    #[test]
    fn empty_branch_has_single_goto_row() {
        let tables = flatten(
            &[branches(BranchKind::Exception, vec![branch("Declined", "end", vec![])])],
            &actors(&["Buyer", "Seller"]),
        )
        .unwrap();

        assert_eq!(
            tables.special[0].rows,
            vec![vec!["Go To: end".to_string(), String::new()]]
        );
    }

    #[test]
    fn duplicate_actor_uses_first_column() {
        let tables = flatten(&[primary("A", "Acts")], &actors(&["A", "B", "A"])).unwrap();
        assert_eq!(
            tables.main[0],
            vec!["1. Acts".to_string(), String::new(), String::new()]
        );
    }

    #[test]
    fn unknown_actor_in_main_flow() {
        let err = flatten(&[primary("Courier", "Delivers")], &actors(&["Buyer"])).unwrap_err();
        assert_eq!(err, FlattenError::unknown_actor("Courier", "main step 1"));
    }

    #[test]
    fn unknown_actor_in_branch() {
        let err = flatten(
            &[branches(
                BranchKind::Exception,
                vec![branch("x", "1", vec![Action::new("Courier", "Loses parcel")])],
            )],
            &actors(&["Buyer"]),
        )
        .unwrap_err();
        assert_eq!(err, FlattenError::unknown_actor("Courier", "Exceptions 1"));
    }

    #[test]
    fn branches_without_actors() {
        let err = flatten(
            &[branches(BranchKind::Alternative, vec![branch("x", "1", vec![])])],
            &[],
        )
        .unwrap_err();
        assert_eq!(err, FlattenError::NoActors);
    }
}
