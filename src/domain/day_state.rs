use serde::{Deserialize, Serialize};

/// Semantic availability of one calendar day cell, read from its aria-label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarDayState {
    Unavailable,
    CheckinAvailable,
    CheckoutOnly,
    Selected,
    Other,
}

impl CalendarDayState {
    /// Only these two states carry information for range merging.
    pub fn is_range_relevant(self) -> bool {
        matches!(self, Self::CheckinAvailable | Self::CheckoutOnly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::CheckinAvailable => "checkin_available",
            Self::CheckoutOnly => "checkout_only",
            Self::Selected => "selected",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for CalendarDayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const CHECKIN_SPELLINGS: &[&str] = &["checkin", "check-in", "check in"];

/// Classify a day cell from its accessible label. Rules are checked in order,
/// first match wins.
pub fn classify_day_label(label: &str) -> CalendarDayState {
    let text = normalize_label(label);

    if text.contains("unavailable") {
        return CalendarDayState::Unavailable;
    }
    if text.contains("only available for checkout") {
        return CalendarDayState::CheckoutOnly;
    }
    if text.contains("available") && CHECKIN_SPELLINGS.iter().any(|s| text.contains(s)) {
        return CalendarDayState::CheckinAvailable;
    }
    if text.contains("selected check-in date")
        || text.contains("selected checkout date")
        || text.ends_with("selected.")
    {
        return CalendarDayState::Selected;
    }
    CalendarDayState::Other
}

/// Lower-case, trim, and fold "check-out" / "check out" into "checkout".
fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .replace("check-out", "checkout")
        .replace("check out", "checkout")
}
