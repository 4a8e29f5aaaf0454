#![no_main]
use airbnb_availability::adapters::scraper::calendar_parser::extract_window_states;
use airbnb_availability::domain::availability::merge_ranges;
use airbnb_availability::domain::window::AvailabilityWindow;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(html) = std::str::from_utf8(data)
        && let Ok(window) = AvailabilityWindow::parse("2025-06-01", 14)
    {
        let states = extract_window_states(html, &window);
        let _ = merge_ranges(&states, &window);
    }
});
