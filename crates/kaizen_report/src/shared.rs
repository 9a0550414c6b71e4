use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Schedule tasks
// ---------------------------------------------------------------------------

/// One bar of a Gantt schedule. Dates are `YYYY-MM-DD`.
///
/// `duration` is supplied upstream and is rendered verbatim; it is never
/// recomputed from `start`/`end`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTask {
    #[serde(rename = "task")]
    pub label: String,
    pub start: String,
    pub end: String,
    pub duration: u32,
}

/// An inconsistency found in a schedule task. Reported, never corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleIssue {
    UnparseableDate { field: &'static str, value: String },
    EndBeforeStart,
    DurationMismatch { declared: u32, span: i64 },
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableDate { field, value } => {
                write!(f, "{field} date '{value}' is not YYYY-MM-DD")
            }
            Self::EndBeforeStart => write!(f, "end date precedes start date"),
            Self::DurationMismatch { declared, span } => {
                write!(f, "duration {declared} differs from inclusive span {span}")
            }
        }
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ScheduleTask {
    pub fn new(label: &str, start: &str, end: &str, duration: u32) -> Self {
        Self {
            label: label.into(),
            start: start.into(),
            end: end.into(),
            duration,
        }
    }

    fn parse_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start.trim(), DATE_FORMAT).ok()?;
        let end = NaiveDate::parse_from_str(self.end.trim(), DATE_FORMAT).ok()?;
        Some((start, end))
    }

    /// Inclusive number of calendar days between `start` and `end`.
    pub fn span_days(&self) -> Option<i64> {
        let (start, end) = self.parse_dates()?;
        Some((end - start).num_days() + 1)
    }

    pub fn check(&self) -> Vec<ScheduleIssue> {
        let mut issues = Vec::new();
        for (field, value) in [("start", &self.start), ("end", &self.end)] {
            if NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).is_err() {
                issues.push(ScheduleIssue::UnparseableDate {
                    field,
                    value: value.clone(),
                });
            }
        }
        if let Some(span) = self.span_days() {
            if span < 1 {
                issues.push(ScheduleIssue::EndBeforeStart);
            } else if span != i64::from(self.duration) {
                issues.push(ScheduleIssue::DurationMismatch {
                    declared: self.duration,
                    span,
                });
            }
        }
        issues
    }
}

// ---------------------------------------------------------------------------
// Fishbone
// ---------------------------------------------------------------------------

/// Fixed cause-and-effect categories, in canonical rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FishboneCategory {
    Human,
    Machine,
    Method,
    Material,
    Environment,
}

impl FishboneCategory {
    pub const ALL: [FishboneCategory; 5] = [
        Self::Human,
        Self::Machine,
        Self::Method,
        Self::Material,
        Self::Environment,
    ];

    /// Heading printed above the category's causes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Human => "Manusia",
            Self::Machine => "Mesin",
            Self::Method => "Metode",
            Self::Material => "Material",
            Self::Environment => "Lingkungan",
        }
    }
}

/// Category name to ordered cause list. Categories may be empty; renderers
/// must skip those entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fishbone {
    #[serde(rename = "manusia")]
    pub human: Vec<String>,
    #[serde(rename = "mesin")]
    pub machine: Vec<String>,
    #[serde(rename = "metode")]
    pub method: Vec<String>,
    pub material: Vec<String>,
    #[serde(rename = "lingkungan", skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,
}

impl Fishbone {
    pub fn causes(&self, category: FishboneCategory) -> &[String] {
        match category {
            FishboneCategory::Human => &self.human,
            FishboneCategory::Machine => &self.machine,
            FishboneCategory::Method => &self.method,
            FishboneCategory::Material => &self.material,
            FishboneCategory::Environment => &self.environment,
        }
    }

    /// Categories with at least one cause, in canonical order.
    pub fn populated(&self) -> impl Iterator<Item = (FishboneCategory, &[String])> {
        FishboneCategory::ALL
            .into_iter()
            .map(|c| (c, self.causes(c)))
            .filter(|(_, causes)| !causes.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.populated().next().is_none()
    }
}
