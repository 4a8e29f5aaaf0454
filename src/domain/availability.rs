use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::day_state::CalendarDayState;
use crate::domain::window::AvailabilityWindow;

/// Date → state for in-window days that are check-in or checkout-only.
pub type DateStateMap = BTreeMap<NaiveDate, CalendarDayState>;

/// A stay that can begin on `checkin` and end on `checkout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

impl DateRange {
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> Self {
        Self { checkin, checkout }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.checkin, self.checkout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedAvailability {
    pub checkins: Vec<NaiveDate>,
    pub checkouts: Vec<NaiveDate>,
    pub ranges: Vec<DateRange>,
    pub all_move_in: bool,
    pub end_day_available: bool,
}

/// Merge per-day states into check-in → checkout ranges.
///
/// When every day of the window is open for check-in and there is no
/// checkout-only day, the whole window is reported as one range. Otherwise
/// each check-in is greedily paired with the earliest checkout on or after
/// it; check-ins covered by an emitted range are skipped. Once checkouts run
/// out, a final range to the window end is emitted only if the end day is
/// itself a check-in day.
pub fn merge_ranges(states: &DateStateMap, window: &AvailabilityWindow) -> MergedAvailability {
    let checkins = dates_with_state(states, CalendarDayState::CheckinAvailable);
    let checkouts = dates_with_state(states, CalendarDayState::CheckoutOnly);
    let end_day_available = checkins.binary_search(&window.end()).is_ok();

    let whole_window_open = !checkins.is_empty()
        && checkouts.is_empty()
        && window
            .days()
            .all(|d| states.get(&d) == Some(&CalendarDayState::CheckinAvailable));
    if whole_window_open {
        return MergedAvailability {
            ranges: vec![DateRange::new(window.start(), window.end())],
            checkins,
            checkouts,
            all_move_in: true,
            end_day_available,
        };
    }

    let mut ranges = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < checkins.len() {
        let checkin = checkins[i];
        while j < checkouts.len() && checkouts[j] < checkin {
            j += 1;
        }
        let Some(&checkout) = checkouts.get(j) else {
            if end_day_available {
                ranges.push(DateRange::new(checkin, window.end()));
            }
            break;
        };
        ranges.push(DateRange::new(checkin, checkout));
        while i < checkins.len() && checkins[i] <= checkout {
            i += 1;
        }
        j += 1;
    }

    MergedAvailability {
        checkins,
        checkouts,
        ranges,
        all_move_in: false,
        end_day_available,
    }
}

fn dates_with_state(states: &DateStateMap, wanted: CalendarDayState) -> Vec<NaiveDate> {
    // BTreeMap iteration is already ascending.
    states
        .iter()
        .filter(|(_, state)| **state == wanted)
        .map(|(date, _)| *date)
        .collect()
}

/// Outcome of scraping one listing over one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResult {
    pub url: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub states: DateStateMap,
    pub checkins: Vec<NaiveDate>,
    pub checkouts: Vec<NaiveDate>,
    pub ranges: Vec<DateRange>,
    pub all_move_in: bool,
    pub end_day_available: bool,
}

impl ListingResult {
    pub fn new(url: String, window: &AvailabilityWindow, states: DateStateMap) -> Self {
        let merged = merge_ranges(&states, window);
        Self {
            url,
            start: window.start(),
            end: window.end(),
            states,
            checkins: merged.checkins,
            checkouts: merged.checkouts,
            ranges: merged.ranges,
            all_move_in: merged.all_move_in,
            end_day_available: merged.end_day_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn june_window() -> AvailabilityWindow {
        AvailabilityWindow::new(d("2025-06-01"), 14).unwrap()
    }

    fn states(checkins: &[&str], checkouts: &[&str]) -> DateStateMap {
        let mut map = DateStateMap::new();
        for c in checkins {
            map.insert(d(c), CalendarDayState::CheckinAvailable);
        }
        for c in checkouts {
            map.insert(d(c), CalendarDayState::CheckoutOnly);
        }
        map
    }

    #[test]
    fn unmatched_trailing_checkin_is_dropped() {
        let map = states(&["2025-06-03", "2025-06-05", "2025-06-07"], &["2025-06-06"]);
        let merged = merge_ranges(&map, &june_window());
        assert_eq!(
            merged.ranges,
            vec![DateRange::new(d("2025-06-03"), d("2025-06-06"))]
        );
        assert!(!merged.all_move_in);
        assert!(!merged.end_day_available);
        assert_eq!(merged.checkins.len(), 3);
        assert_eq!(merged.checkouts, vec![d("2025-06-06")]);
    }

    #[test]
    fn end_day_checkin_opens_tail_range() {
        let map = states(&["2025-06-14"], &[]);
        let merged = merge_ranges(&map, &june_window());
        assert_eq!(
            merged.ranges,
            vec![DateRange::new(d("2025-06-14"), d("2025-06-14"))]
        );
        assert!(!merged.all_move_in);
        assert!(merged.end_day_available);
    }

    #[test]
    fn no_checkins_means_no_ranges() {
        let map = states(&[], &["2025-06-05"]);
        let merged = merge_ranges(&map, &june_window());
        assert!(merged.ranges.is_empty());
        assert!(merged.checkins.is_empty());
        assert!(!merged.end_day_available);
    }

    #[test]
    fn whole_window_open_is_single_range() {
        let window = june_window();
        let map: DateStateMap = window
            .days()
            .map(|day| (day, CalendarDayState::CheckinAvailable))
            .collect();
        let merged = merge_ranges(&map, &window);
        assert!(merged.all_move_in);
        assert!(merged.end_day_available);
        assert_eq!(merged.ranges, vec![DateRange::new(window.start(), window.end())]);
        assert_eq!(merged.checkins.len(), 14);
    }

    #[test]
    fn one_missing_day_falls_back_to_greedy_merge() {
        let window = june_window();
        let map: DateStateMap = window
            .days()
            .filter(|day| *day != d("2025-06-08"))
            .map(|day| (day, CalendarDayState::CheckinAvailable))
            .collect();
        let merged = merge_ranges(&map, &window);
        assert!(!merged.all_move_in);
        // No checkouts: first checkin runs to the window end via the tail case.
        assert_eq!(
            merged.ranges,
            vec![DateRange::new(d("2025-06-01"), d("2025-06-14"))]
        );
        assert!(merged.end_day_available);
    }

    #[test]
    fn checkins_inside_a_range_are_subsumed() {
        let map = states(
            &["2025-06-02", "2025-06-03", "2025-06-04", "2025-06-09"],
            &["2025-06-05", "2025-06-11"],
        );
        let merged = merge_ranges(&map, &june_window());
        assert_eq!(
            merged.ranges,
            vec![
                DateRange::new(d("2025-06-02"), d("2025-06-05")),
                DateRange::new(d("2025-06-09"), d("2025-06-11")),
            ]
        );
    }

    #[test]
    fn checkouts_before_first_checkin_are_skipped() {
        let map = states(&["2025-06-06"], &["2025-06-02", "2025-06-04", "2025-06-10"]);
        let merged = merge_ranges(&map, &june_window());
        assert_eq!(
            merged.ranges,
            vec![DateRange::new(d("2025-06-06"), d("2025-06-10"))]
        );
    }

    #[test]
    fn end_day_flag_kept_alongside_tail_range() {
        let map = states(&["2025-06-03", "2025-06-12", "2025-06-14"], &["2025-06-05"]);
        let merged = merge_ranges(&map, &june_window());
        assert_eq!(
            merged.ranges,
            vec![
                DateRange::new(d("2025-06-03"), d("2025-06-05")),
                DateRange::new(d("2025-06-12"), d("2025-06-14")),
            ]
        );
        assert!(merged.end_day_available);
    }

    #[test]
    fn listing_result_carries_window_and_merge() {
        let map = states(&["2025-06-03"], &["2025-06-06"]);
        let result = ListingResult::new(
            "https://www.airbnb.com/rooms/1".into(),
            &june_window(),
            map.clone(),
        );
        assert_eq!(result.start, d("2025-06-01"));
        assert_eq!(result.end, d("2025-06-14"));
        assert_eq!(result.states, map);
        assert_eq!(result.ranges.len(), 1);
    }

    #[test]
    fn listing_result_json_shape() {
        let map = states(&["2025-06-03"], &["2025-06-06"]);
        let result = ListingResult::new("u".into(), &june_window(), map);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["start"], "2025-06-01");
        assert_eq!(json["states"]["2025-06-03"], "checkin_available");
        assert_eq!(json["states"]["2025-06-06"], "checkout_only");
        assert_eq!(json["ranges"][0]["checkin"], "2025-06-03");
        assert_eq!(json["ranges"][0]["checkout"], "2025-06-06");
        assert_eq!(json["all_move_in"], false);
    }
}
