//! Testing utilities for the usecase-tables workspace
//!
//! Shared fixtures: sample use-case documents, a sample LaTeX document and
//! helpers that lay them out in temporary directories.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uct_model::{DocumentParser, UseCase, YamlParser};

/// Two actors, two main steps, no branches
pub const ORDER_YAML: &str = r#"
Actors:
  - Buyer
  - Seller
Scenario:
  - Buyer: Places order
  - Seller: Confirms order
"#;

/// Interleaved alternatives and exceptions with a LaTeX anchor
pub const CHECKOUT_YAML: &str = r#"
Actors:
  - Customer
  - Shop
  - Bank
Regex: "UC02 Checkout"
Scenario:
  - Customer: Opens the cart
  - Shop: Shows the total
  - Alternatives:
      - Description: Cart is empty
        Goto: "1"
        Actions:
          - Shop: Shows an empty cart notice
  - Customer: Pays with card
  - Exceptions:
      - Description: Card declined
        Goto: "4"
        Actions:
          - Bank: Declines the payment
          - Shop: Asks for another card
  - Alternatives:
      - Description: Voucher applied
        Goto: "5"
        Actions:
          - Customer: Enters voucher code
  - Shop: Confirms the order
"#;

/// Branch action by an actor missing from `Actors`
pub const UNKNOWN_ACTOR_YAML: &str = r#"
Actors: [Buyer, Seller]
Scenario:
  - Buyer: Places order
  - Exceptions:
      - Description: Lost in transit
        Goto: end
        Actions:
          - Courier: Loses the parcel
"#;

/// LaTeX document with anchors for the checkout fixture
pub const REPORT_TEX: &str = r"\documentclass{article}
\usepackage{longtable}
\begin{document}
\section{UC01 Order}
Ordering goods.
\section{UC02 Checkout}
Paying for goods.
\end{document}
";

/// Parse a YAML fixture under `name`
pub fn parse_fixture(name: &str, yaml: &str) -> UseCase {
    YamlParser.parse(name, yaml).unwrap()
}

/// Write `files` (name, content) into a fresh temporary directory
pub fn data_dir_with(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        write_file(dir.path(), name, content);
    }
    dir
}

/// Write one file below `dir`, returning its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Read a file as UTF-8
pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}
