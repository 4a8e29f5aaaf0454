use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::ports::page_renderer::PageRenderer;

type SnapshotFn = Box<dyn Fn(&str, &str) -> Result<String> + Send + Sync>;

pub struct MockPageRenderer {
    snapshot_fn: Mutex<SnapshotFn>,
    calls: Mutex<Vec<(String, String)>>,
}

impl Default for MockPageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPageRenderer {
    pub fn new() -> Self {
        Self {
            snapshot_fn: Mutex::new(Box::new(|_, _| Ok(calendar_page("June 2025", &[])))),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_snapshot(
        self,
        f: impl Fn(&str, &str) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        *self.snapshot_fn.lock().unwrap() = Box::new(f);
        self
    }

    /// `(url, target_month)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageRenderer for MockPageRenderer {
    async fn fetch_snapshot(&self, url: &str, target_month: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), target_month.to_string()));
        let f = self.snapshot_fn.lock().unwrap();
        f(url, target_month)
    }
}

/// A day cell as the booking widget renders it. `date` is `YYYY-MM-DD`.
pub fn calendar_cell(date: &str, status: &str) -> String {
    let parsed = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let test_id = parsed.format("calendar-day-%m/%d/%Y");
    let label = parsed.format("%-d, %A, %B %Y");
    format!(
        r#"<td role="button" aria-label="{label}. {status}"><div data-testid="{test_id}">{}</div></td>"#,
        parsed.format("%-d")
    )
}

pub fn checkin_cell(date: &str) -> String {
    calendar_cell(date, "Available. Select as check-in date.")
}

pub fn checkout_cell(date: &str) -> String {
    calendar_cell(date, "This day is only available for checkout.")
}

pub fn unavailable_cell(date: &str) -> String {
    calendar_cell(date, "Unavailable")
}

pub fn calendar_page(month_heading: &str, cells: &[String]) -> String {
    format!(
        r#"<html><body><div role="application" aria-label="Calendar"><h3 class="_hpipapi x1">{month_heading}</h3><table><tbody><tr>{}</tr></tbody></table></div></body></html>"#,
        cells.concat()
    )
}
