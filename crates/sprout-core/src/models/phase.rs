//! Phase model: one day-bounded stage of a crop's routine.

use serde::{Deserialize, Serialize};

/// Guidance attached to a phase, either free text or discrete steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Protocol {
    /// A single guidance paragraph
    Text(String),
    /// Ordered list of discrete steps
    Steps(Vec<String>),
}

impl Protocol {
    /// Returns the protocol as a list of lines.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Protocol::Text(text) => vec![text.as_str()],
            Protocol::Steps(steps) => steps.iter().map(String::as_str).collect(),
        }
    }
}

/// A named, day-bounded stage within a crop's schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phase {
    /// Short label, e.g. "Flowering"
    pub title: String,

    /// Human label for the phase window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// First day of the phase, counted from sowing
    pub start_day: u32,

    /// Last day of the phase, inclusive
    pub end_day: u32,

    /// Free-text description
    #[serde(default)]
    pub desc: String,

    /// Guidance for the whole phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,

    /// Subtasks to tick off every day while the phase is active
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub daily_routine: Vec<String>,

    /// Risk warning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

impl Phase {
    /// Creates a phase with only a title and a day window.
    pub fn new(title: impl Into<String>, start_day: u32, end_day: u32) -> Self {
        Self {
            title: title.into(),
            period: None,
            start_day,
            end_day,
            desc: String::new(),
            protocol: None,
            daily_routine: Vec::new(),
            risk: None,
        }
    }

    /// The explicit period label, or one derived from the day window.
    pub fn period_label(&self) -> String {
        self.period
            .clone()
            .unwrap_or_else(|| format!("Day {}-{}", self.start_day, self.end_day))
    }

    /// Whether `day` falls inside this phase's window.
    pub fn contains(&self, day: u32) -> bool {
        self.start_day <= day && day <= self.end_day
    }

    /// The checklist shown for a day in this phase.
    ///
    /// Falls back to the protocol when no daily routine is defined.
    pub fn daily_subtasks(&self) -> Vec<String> {
        if !self.daily_routine.is_empty() {
            return self.daily_routine.clone();
        }
        match &self.protocol {
            Some(Protocol::Steps(steps)) => steps.clone(),
            _ => Vec::new(),
        }
    }
}
