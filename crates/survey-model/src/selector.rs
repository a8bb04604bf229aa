//! Age-group filter selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu label that selects every age group.
pub const ALL_AGES_LABEL: &str = "all";

/// Which rows the age-group filter keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgeGroupSelector {
    /// Keep every row.
    #[default]
    All,
    /// Keep rows whose age group equals this value.
    Group(String),
}

impl AgeGroupSelector {
    /// Maps a menu label to a selector.
    ///
    /// `None` and [`ALL_AGES_LABEL`] both mean [`AgeGroupSelector::All`]. A
    /// category literally named `"all"` can only be reached by constructing
    /// [`AgeGroupSelector::Group`] directly.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None => Self::All,
            Some(value) if value == ALL_AGES_LABEL => Self::All,
            Some(value) => Self::Group(value.to_string()),
        }
    }

    pub fn group(value: impl Into<String>) -> Self {
        Self::Group(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The label shown in menus and logs.
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_AGES_LABEL,
            Self::Group(value) => value,
        }
    }
}

impl fmt::Display for AgeGroupSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
