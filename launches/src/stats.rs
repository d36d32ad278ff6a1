use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::LaunchRecord;

/// Counts for the dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaunchStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_year: BTreeMap<String, usize>,
}

pub fn summarize(records: &[LaunchRecord]) -> LaunchStats {
    let mut stats = LaunchStats {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        *stats
            .by_status
            .entry(record.status.as_str().to_owned())
            .or_default() += 1;

        // Records without a usable date only count towards the total.
        if let Some(year) = launch_year(record) {
            *stats.by_year.entry(year.to_string()).or_default() += 1;
        }
    }

    stats
}

/// Year of the launch, from `launch_date_utc` or else a non-zero
/// `launch_date_unix`.
pub fn launch_year(record: &LaunchRecord) -> Option<i32> {
    parse_year(&record.launch_date_utc).or_else(|| {
        (record.launch_date_unix != 0)
            .then(|| DateTime::from_timestamp(record.launch_date_unix, 0))
            .flatten()
            .map(|dt| dt.year())
    })
}

fn parse_year(date: &str) -> Option<i32> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.year())
        .or_else(|_| NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.year()))
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d").map(|d| d.year()))
        .ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::normalize;

    #[test]
    fn counts_by_status_and_year() {
        let records = [
            normalize(&json!({"id": "a", "success": true, "date_utc": "2020-05-30T19:22:00.000Z"})),
            normalize(&json!({"id": "b", "success": false, "date_utc": "2021-02-04T06:19:00.000Z"})),
        ];

        let stats = summarize(&records);
        assert_eq!(stats.total, 2);
        assert_eq!(
            stats.by_status,
            BTreeMap::from([("failed".to_owned(), 1), ("success".to_owned(), 1)])
        );
        assert_eq!(
            stats.by_year,
            BTreeMap::from([("2020".to_owned(), 1), ("2021".to_owned(), 1)])
        );
    }

    #[test]
    fn falls_back_to_unix_timestamp() {
        let record = normalize(&json!({"id": "a", "date_utc": "not a date", "date_unix": 1143239400}));
        assert_eq!(launch_year(&record), Some(2006));

        let record = normalize(&json!({"id": "a", "date_unix": 1609459200}));
        assert_eq!(launch_year(&record), Some(2021));
    }

    #[test]
    fn accepts_offsets_and_naive_dates() {
        let at = |d: &str| normalize(&json!({"id": "a", "date_utc": d}));
        assert_eq!(launch_year(&at("2022-12-31T23:00:00-05:00")), Some(2022));
        assert_eq!(launch_year(&at("2019-07-01T10:00:00")), Some(2019));
        assert_eq!(launch_year(&at("2018-02-06")), Some(2018));
    }

    #[test]
    fn undatable_records_only_count_in_total() {
        let records = [
            normalize(&json!({"id": "a", "upcoming": true})),
            normalize(&json!({"id": "b", "date_utc": "2020-01-01T00:00:00Z"})),
        ];

        let stats = summarize(&records);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_status.get("upcoming"), Some(&1));
        assert_eq!(stats.by_year, BTreeMap::from([("2020".to_owned(), 1)]));
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize(&[]), LaunchStats::default());
    }
}
