use serde::{Deserialize, Serialize};

/// Profile and contribution statistics for a GitHub user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStats {
    /// The account login.
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub contributions: ContributionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    /// Contributions in the current calendar year.
    pub total: u32,
    /// The raw daily sequence as reported upstream.
    pub last_year: Vec<ContributionDay>,
    /// `last_year` reshaped into 53 weeks of 7 days.
    pub weeks: Vec<[CalendarDay; 7]>,
}

/// One day of the upstream contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    pub count: u32,
    /// Upstream intensity bucket (0-4).
    #[serde(default)]
    pub level: u8,
}

/// A cell in the reshaped week grid. Padding cells have no date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: Option<String>,
    pub count: u32,
}

impl CalendarDay {
    /// The zero-filled cell used past the end of the input sequence.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<&ContributionDay> for CalendarDay {
    fn from(day: &ContributionDay) -> Self {
        Self {
            date: Some(day.date.clone()),
            count: day.count,
        }
    }
}
