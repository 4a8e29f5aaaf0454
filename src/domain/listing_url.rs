use chrono::{Days, NaiveDate};
use url::Url;

use crate::error::Result;

/// Nights in the placeholder stay used to open a listing page.
pub const PLACEHOLDER_STAY_NIGHTS: u64 = 2;

pub fn build_listing_url(
    base_url: &str,
    room_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<String> {
    let base = base_url.trim_end_matches('/');
    let url = Url::parse(&format!("{base}/rooms/{room_id}"))?;
    Ok(with_dates(url.as_str(), check_in, check_out))
}

/// Placeholder stay starting at `start`, for pages that need dates in the URL.
pub fn placeholder_checkout(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_days(Days::new(PLACEHOLDER_STAY_NIGHTS))
        .unwrap_or(start)
}

/// Set `check_in` and `check_out` on `url`, keeping every other query parameter.
///
/// Strings that are not absolute URLs are returned unchanged.
pub fn with_dates(url: &str, check_in: NaiveDate, check_out: NaiveDate) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != "check_in" && k != "check_out")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut qp = parsed.query_pairs_mut();
        qp.clear();
        for (k, v) in &kept {
            qp.append_pair(k, v);
        }
        qp.append_pair("check_in", &check_in.to_string());
        qp.append_pair("check_out", &check_out.to_string());
    }
    parsed.to_string()
}
