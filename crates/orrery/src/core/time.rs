/// Julian-date helpers.
///
/// Simulated time enters the core as milliseconds since the Unix epoch and is
/// converted here to Julian centuries since J2000.0, the argument every
/// element rate is expressed against. `calendar_date` gives the readout date.

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00Z).
pub const J2000_JD: f64 = 2451545.0;

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

/// J2000.0 expressed as milliseconds since the Unix epoch.
pub const J2000_UNIX_MS: f64 = 946_728_000_000.0;

pub const MS_PER_DAY: f64 = 86_400_000.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Julian Date for a timestamp in milliseconds since the Unix epoch.
pub fn julian_date(unix_ms: f64) -> f64 {
    unix_ms / MS_PER_DAY + UNIX_EPOCH_JD
}

/// Days elapsed since J2000.0 (negative before the epoch).
pub fn millis_to_days(unix_ms: f64) -> f64 {
    julian_date(unix_ms) - J2000_JD
}

/// Convert days from J2000 to Julian centuries from J2000.
pub fn days_to_centuries(days_from_j2000: f64) -> f64 {
    days_from_j2000 / DAYS_PER_CENTURY
}

/// Julian centuries since J2000.0 for a Unix timestamp in milliseconds.
pub fn julian_centuries(unix_ms: f64) -> f64 {
    days_to_centuries(millis_to_days(unix_ms))
}

/// Proleptic Gregorian (year, month, day) in UTC for a Unix timestamp.
///
/// Works on whole days since 1970-01-01 in 400-year eras (146097 days),
/// with years starting in March so the leap day falls last.
pub fn calendar_date(unix_ms: f64) -> (i64, u32, u32) {
    let days = (unix_ms / MS_PER_DAY).floor() as i64;
    let shifted = days + 719_468;
    let era = shifted.div_euclid(146_097);
    let day_of_era = shifted.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_from_march = (5 * day_of_year + 2) / 153;

    let day = (day_of_year - (153 * month_from_march + 2) / 5 + 1) as u32;
    let month = if month_from_march < 10 {
        month_from_march + 3
    } else {
        month_from_march - 9
    };
    let month = month as u32;
    let year = year_of_era + era * 400 + i64::from(month <= 2);

    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_is_century_zero() {
        assert!(julian_centuries(J2000_UNIX_MS).abs() < 1e-15);
        assert!((julian_date(J2000_UNIX_MS) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn unix_epoch_is_negative_thirty_years() {
        // 1970-01-01T00:00Z is 10957.5 days before J2000
        let days = millis_to_days(0.0);
        assert!((days + 10957.5).abs() < 1e-9, "days = {days}");
    }

    #[test]
    fn one_julian_century_of_millis() {
        let ms = J2000_UNIX_MS + DAYS_PER_CENTURY * MS_PER_DAY;
        assert!((julian_centuries(ms) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn calendar_date_at_epochs() {
        assert_eq!(calendar_date(0.0), (1970, 1, 1));
        assert_eq!(calendar_date(J2000_UNIX_MS), (2000, 1, 1));
    }

    #[test]
    fn calendar_date_known_date() {
        // 2024-03-20T12:00Z
        assert_eq!(calendar_date(J2000_UNIX_MS + 8845.0 * MS_PER_DAY), (2024, 3, 20));
    }

    #[test]
    fn calendar_date_leap_day() {
        assert_eq!(calendar_date(11_016.0 * MS_PER_DAY), (2000, 2, 29));
        assert_eq!(calendar_date(11_017.0 * MS_PER_DAY), (2000, 3, 1));
    }

    #[test]
    fn calendar_date_before_unix_epoch() {
        assert_eq!(calendar_date(-1.0), (1969, 12, 31));
        // 1900 is not a leap year.
        assert_eq!(calendar_date(-25_508.0 * MS_PER_DAY), (1900, 3, 1));
    }
}
