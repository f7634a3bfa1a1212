use std::fmt;

use serde::{Deserialize, Serialize};

/// The upstream platform a record was fetched from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    LeetCode,
    GitHub,
}

impl Source {
    /// Stable lowercase label, used as the cache key prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeetCode => "leetcode",
            Self::GitHub => "github",
        }
    }

    /// Human-facing platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LeetCode => "LeetCode",
            Self::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
