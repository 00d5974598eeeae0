use chrono::{DateTime, Utc};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// RFC 3339 stamp for report headers.
pub fn report_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Day string in the format the shop API stamps purchases with.
pub fn iso_day(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" smoke, ,promo-checkout,  stats ");
        assert_eq!(parts, vec!["smoke", "promo-checkout", "stats"]);
    }

    #[test]
    fn formats_dates_for_reports_and_backend() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 5, 0).unwrap();
        assert_eq!(report_timestamp(at), "2025-03-14T09:05:00Z");
        assert_eq!(iso_day(at), "2025-03-14");
    }
}
