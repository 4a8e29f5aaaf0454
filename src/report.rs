use chrono::NaiveDate;

use crate::app::batch::{BatchOutcome, ListingFailure};
use crate::domain::availability::ListingResult;
use crate::domain::listing_url::with_dates;
use crate::domain::window::AvailabilityWindow;

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(NaiveDate::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Console summary: window header, one block per listing, then failures.
pub fn render_console(outcome: &BatchOutcome, window: &AvailabilityWindow) -> String {
    let mut out = format!("Window: {} → {}\n", window.start(), window.end());
    for (name, res) in &outcome.results {
        out.push_str(&format!("\n{name} ({} → {})\n", res.start, res.end));
        out.push_str(&console_body(res));
    }
    for ListingFailure { name, error } in &outcome.failures {
        out.push_str(&format!("\n✗ {name}: {error}\n"));
    }
    out
}

fn console_body(res: &ListingResult) -> String {
    let end_line = format!("  End date is also available for move-in: {}\n", res.end);
    let mut out = String::new();
    if res.all_move_in {
        out.push_str(&format!(
            "  All days are check-in (ready for move-in): {} → {}\n",
            res.start, res.end
        ));
    } else if !res.ranges.is_empty() {
        for range in &res.ranges {
            out.push_str(&format!(
                "   {range} {}\n",
                with_dates(&res.url, range.checkin, range.checkout)
            ));
        }
        if res.end_day_available {
            out.push_str(&end_line);
        }
    } else if !res.checkins.is_empty() {
        out.push_str(&format!(
            "  Ready for move-in on: {}\n",
            join_dates(&res.checkins)
        ));
        if res.end_day_available {
            out.push_str(&end_line);
        }
    } else {
        out.push_str("  (no ranges and no check-in days found)\n");
    }
    out
}

/// Message text announcing availability, one block per listing.
pub fn render_message(outcome: &BatchOutcome) -> String {
    let mut lines = vec![
        "===== EMAIL PREVIEW =====".to_string(),
        String::new(),
        "Dear Client,".to_string(),
        String::new(),
        "We have availabilities on the following properties:".to_string(),
        String::new(),
    ];
    for (name, res) in &outcome.results {
        lines.push(format!("{name} ({} → {}):", res.start, res.end));
        let end_line = format!("  • End date available to start: {}", res.end);
        if res.all_move_in {
            lines.push(format!(
                "  • {} → {}  ({})",
                res.start,
                res.end,
                with_dates(&res.url, res.start, res.end)
            ));
        } else if !res.ranges.is_empty() {
            for range in &res.ranges {
                lines.push(format!(
                    "  • {range}  ({})",
                    with_dates(&res.url, range.checkin, range.checkout)
                ));
            }
            if res.end_day_available {
                lines.push(end_line);
            }
        } else if !res.checkins.is_empty() {
            lines.push(format!("  • Ready for move-in on: {}", join_dates(&res.checkins)));
            if res.end_day_available {
                lines.push(end_line);
            }
        } else {
            lines.push("  • No qualifying availability in this window.".to_string());
        }
        lines.push(String::new());
    }
    lines.push("Best,".to_string());
    lines.push("Your Availability Bot".to_string());
    lines.join("\n")
}
