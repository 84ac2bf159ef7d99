//! Time window classification.

use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::models::{Region, TimeWindow};

/// `(window, start hour, end hour)` in UTC, half-open. Uncovered hours are off-hours.
type HourRange = (TimeWindow, u32, u32);

const NA_WINDOWS: [HourRange; 3] = [
    (TimeWindow::NaPrime, 0, 5),
    (TimeWindow::Ocx, 8, 12),
    (TimeWindow::EuPrime, 18, 22),
];

const EU_WINDOWS: [HourRange; 3] = [
    (TimeWindow::NaPrime, 1, 5),
    (TimeWindow::Ocx, 7, 11),
    (TimeWindow::EuPrime, 17, 22),
];

fn windows_for(region: Region) -> &'static [HourRange] {
    match region {
        Region::Na => &NA_WINDOWS,
        Region::Eu => &EU_WINDOWS,
    }
}

/// Classify an instant into its daily activity window for `region`.
pub fn time_window<Tz: TimeZone>(instant: &DateTime<Tz>, region: Region) -> TimeWindow {
    let hour = instant.with_timezone(&Utc).hour();

    windows_for(region)
        .iter()
        .find(|(_, start, end)| hour >= *start && hour < *end)
        .map(|(window, _, _)| *window)
        .unwrap_or(TimeWindow::OffHours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 13, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_na_windows() {
        assert_eq!(time_window(&at_hour(0), Region::Na), TimeWindow::NaPrime);
        assert_eq!(time_window(&at_hour(4), Region::Na), TimeWindow::NaPrime);
        assert_eq!(time_window(&at_hour(5), Region::Na), TimeWindow::OffHours);
        assert_eq!(time_window(&at_hour(9), Region::Na), TimeWindow::Ocx);
        assert_eq!(time_window(&at_hour(19), Region::Na), TimeWindow::EuPrime);
        assert_eq!(time_window(&at_hour(23), Region::Na), TimeWindow::OffHours);
    }

    #[test]
    fn test_eu_windows() {
        assert_eq!(time_window(&at_hour(0), Region::Eu), TimeWindow::OffHours);
        assert_eq!(time_window(&at_hour(2), Region::Eu), TimeWindow::NaPrime);
        assert_eq!(time_window(&at_hour(7), Region::Eu), TimeWindow::Ocx);
        assert_eq!(time_window(&at_hour(17), Region::Eu), TimeWindow::EuPrime);
        assert_eq!(time_window(&at_hour(22), Region::Eu), TimeWindow::OffHours);
    }

    #[test]
    fn test_regions_differ_at_boundaries() {
        assert_ne!(
            time_window(&at_hour(0), Region::Na),
            time_window(&at_hour(0), Region::Eu)
        );
        assert_ne!(
            time_window(&at_hour(17), Region::Na),
            time_window(&at_hour(17), Region::Eu)
        );
    }

    #[test]
    fn test_every_hour_classified() {
        for region in [Region::Na, Region::Eu] {
            let mut seen = std::collections::HashSet::new();
            for hour in 0..24 {
                seen.insert(time_window(&at_hour(hour), region));
            }
            assert_eq!(seen.len(), TimeWindow::ALL.len());
        }
    }

    #[test]
    fn test_ranges_are_disjoint() {
        for region in [Region::Na, Region::Eu] {
            for hour in 0..24u32 {
                let hits = windows_for(region)
                    .iter()
                    .filter(|(_, start, end)| hour >= *start && hour < *end)
                    .count();
                assert!(hits <= 1, "hour {} in {} matches {} ranges", hour, region, hits);
            }
        }
    }

    #[test]
    fn test_converts_to_utc_first() {
        // 21:00 at UTC-5 is 02:00 UTC the next day
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2025, 6, 12, 21, 0, 0).unwrap();
        assert_eq!(time_window(&local, Region::Na), TimeWindow::NaPrime);
    }
}
