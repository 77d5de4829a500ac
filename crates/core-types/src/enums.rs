use serde::{Deserialize, Serialize};

/// How rankings and best-of queries order students whose values are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first student encountered in the input collection wins.
    #[default]
    InputOrder,
    /// The lexicographically smallest matricule wins.
    Matricule,
}

impl TieBreak {
    /// Returns the short name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::InputOrder => "input_order",
            TieBreak::Matricule => "matricule",
        }
    }
}
