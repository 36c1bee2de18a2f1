//! Marked block replacement
//!
//! A marked block is a run of lines opened by a start sentinel line and
//! closed by an end sentinel line. Generated content is always written
//! inside such a block so a later run can find and replace it instead of
//! adding a second copy.

use std::ops::Range;

/// Start/end sentinel pair delimiting generated content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedBlock {
    start: String,
    end: String,
}

impl MarkedBlock {
    /// Create block delimited by the exact `start` and `end` lines
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Start sentinel line
    #[inline]
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End sentinel line
    #[inline]
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Line range of the first complete block, sentinels included
    ///
    /// A start sentinel without a matching end sentinel is not a block.
    #[must_use]
    pub fn find(&self, lines: &[String]) -> Option<Range<usize>> {
        let first = lines
            .iter()
            .position(|line| line.trim_end() == self.start)?;
        let last = lines[first + 1..]
            .iter()
            .position(|line| line.trim_end() == self.end)?;
        Some(first..first + 1 + last + 1)
    }

    /// Remove the first complete block; returns whether one was found
    pub fn excise(&self, lines: &mut Vec<String>) -> bool {
        match self.find(lines) {
            Some(range) => {
                lines.drain(range);
                true
            }
            None => false,
        }
    }

    /// Surround `body` with the sentinels
    #[must_use]
    pub fn wrap(&self, body: Vec<String>) -> Vec<String> {
        let mut block = Vec::with_capacity(body.len() + 2);
        block.push(self.start.clone());
        block.extend(body);
        block.push(self.end.clone());
        block
    }

    /// Insert the wrapped `body` on the line after `index`
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn insert_after(&self, lines: &mut Vec<String>, index: usize, body: Vec<String>) {
        assert!(index < lines.len(), "insertion index {index} out of bounds");
        lines.splice(index + 1..index + 1, self.wrap(body));
    }
}
