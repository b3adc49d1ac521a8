use chrono::NaiveDate;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Day number (Arrow `Date32`) of an ISO calendar date such as `2021-06-30`.
/// Text that does not name a real day yields `None`.
pub fn parse_date_days(s: &str) -> Option<i32> {
    let s = s.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 10 || !s.is_ascii() || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[5..7].parse().ok()?;
    let day: u32 = s[8..10].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(days_since_epoch(date))
}

pub fn days_since_epoch(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Inverse of [`days_since_epoch`].
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_days() {
        assert_eq!(parse_date_days("1970-01-01"), Some(0));
        assert_eq!(parse_date_days("1970-01-02"), Some(1));
        assert_eq!(parse_date_days(" 2016-01-01 "), Some(16801));
        let d = parse_date_days("2021-06-30").unwrap();
        assert_eq!(date_from_days(d), NaiveDate::from_ymd_opt(2021, 6, 30));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(parse_date_days(""), None);
        assert_eq!(parse_date_days("2021-02-30"), None);
        assert_eq!(parse_date_days("2021/02/03"), None);
        assert_eq!(parse_date_days("20210203"), None);
        assert_eq!(parse_date_days("2021-1-3"), None);
    }

    #[test]
    fn multibyte_text_of_date_width_is_rejected() {
        // ten bytes, with a two-byte character across each separator position
        assert_eq!("abcŽdefgh".len(), 10);
        assert_eq!(parse_date_days("abcŽdefgh"), None);
        assert_eq!(parse_date_days("2021-0č-3"), None);
        assert_eq!(parse_date_days("202ř-06-3"), None);
    }
}
