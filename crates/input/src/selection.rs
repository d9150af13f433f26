//! Circular option cursor with a single held commitment.

use core::fmt;

use heapless::Vec;
use platform::config::MAX_OPTIONS;
use platform::{label, ConfigError, Label};

/// `commit()` was called while a commitment is already held.
///
/// An expected outcome rather than a failure: the commitment is left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlreadyCommitted {
    /// The commitment that is still held
    pub held: Label,
}

impl fmt::Display for AlreadyCommitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is already committed", self.held)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AlreadyCommitted {}

/// Cursor over a fixed, non-empty option list.
///
/// The index wraps in both directions. A commitment, once made, survives any
/// cursor movement until [`clear_commit`](Self::clear_commit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCursor {
    options: Vec<Label, MAX_OPTIONS>,
    index: usize,
    committed: Option<Label>,
}

impl OptionCursor {
    /// Cursor at the first of `options`.
    pub fn new(options: Vec<Label, MAX_OPTIONS>) -> Result<Self, ConfigError> {
        if options.is_empty() {
            return Err(ConfigError::EmptyOptions);
        }
        Ok(Self {
            options,
            index: 0,
            committed: None,
        })
    }

    /// Cursor over string labels.
    pub fn from_labels(labels: &[&str]) -> Result<Self, ConfigError> {
        let mut options = Vec::new();
        for text in labels {
            let l = label(text).ok_or(ConfigError::LabelTooLong)?;
            options.push(l).map_err(|_| ConfigError::TooManyOptions)?;
        }
        Self::new(options)
    }

    /// Move by `delta` options, wrapping around the ends. Returns the new index.
    pub fn apply_step(&mut self, delta: i32) -> usize {
        let len = i64::try_from(self.options.len()).unwrap_or(i64::MAX);
        let index = i64::try_from(self.index).unwrap_or(0);
        self.index = index
            .saturating_add(i64::from(delta))
            .checked_rem_euclid(len)
            .and_then(|i| usize::try_from(i).ok())
            .unwrap_or(0);
        self.index
    }

    /// Highlighted option.
    #[allow(clippy::indexing_slicing)] // index < len, and len >= 1 since construction
    pub fn current_option(&self) -> &Label {
        &self.options[self.index]
    }

    /// Highlighted position.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// All options in order.
    pub fn options(&self) -> &[Label] {
        &self.options
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Commit the highlighted option unless a commitment is already held.
    pub fn commit(&mut self) -> Result<Label, AlreadyCommitted> {
        if let Some(held) = &self.committed {
            return Err(AlreadyCommitted { held: held.clone() });
        }
        let chosen = self.current_option().clone();
        self.committed = Some(chosen.clone());
        Ok(chosen)
    }

    /// Release the commitment, returning it.
    pub fn clear_commit(&mut self) -> Option<Label> {
        self.committed.take()
    }

    /// The held commitment.
    pub fn committed(&self) -> Option<&Label> {
        self.committed.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kiosk() -> OptionCursor {
        OptionCursor::from_labels(&["Option A", "Option B", "Option C", "Option D"]).unwrap()
    }

    #[test]
    fn test_three_steps_then_wrap() {
        let mut c = kiosk();
        for _ in 0..3 {
            c.apply_step(1);
        }
        assert_eq!(c.index(), 3);
        assert_eq!(c.current_option(), "Option D");
        assert_eq!(c.apply_step(1), 0);
        assert_eq!(c.current_option(), "Option A");
    }

    #[test]
    fn test_negative_step_wraps_to_end() {
        let mut c = kiosk();
        assert_eq!(c.apply_step(-1), 3);
        assert_eq!(c.apply_step(-6), 1);
    }

    #[test]
    fn test_large_steps() {
        let mut c = kiosk();
        assert_eq!(c.apply_step(i32::MAX), (i32::MAX % 4) as usize);
        c.apply_step(i32::MIN);
        assert!(c.index() < 4);
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(
            OptionCursor::from_labels(&[]).unwrap_err(),
            ConfigError::EmptyOptions
        );
    }

    #[test]
    fn test_commit_once_until_cleared() {
        let mut c = kiosk();
        c.apply_step(1);
        assert_eq!(c.commit().unwrap(), "Option B");

        c.apply_step(1);
        let err = c.commit().unwrap_err();
        assert_eq!(err.held, "Option B");
        assert_eq!(c.committed().unwrap(), "Option B");

        assert_eq!(c.clear_commit().unwrap(), "Option B");
        assert_eq!(c.clear_commit(), None);
        assert_eq!(c.commit().unwrap(), "Option C");
    }

    #[test]
    fn test_movement_keeps_commitment() {
        let mut c = kiosk();
        c.commit().unwrap();
        c.apply_step(2);
        c.apply_step(-7);
        assert_eq!(c.committed().unwrap(), "Option A");
    }

    #[test]
    fn test_already_committed_display() {
        let err = AlreadyCommitted {
            held: label("Option A").unwrap(),
        };
        assert_eq!(err.to_string(), "\"Option A\" is already committed");
    }
}
