/*!
Gregorian calendar conversions.

The arithmetic is Scott E. Lee's serial-day-number formulation: months are
renumbered so the leap day falls at the end of the year (March is month 0),
which turns month lengths into the fixed 153-days-per-5-months pattern, and
the 4/100/400 leap rule into two fixed-point divisions.

Year 0 does not exist: 1 BCE is year -1 and is arithmetically adjacent to
year 1.
*/

const SDN_OFFSET: i64 = 32045;
const DAYS_PER_5_MONTHS: i64 = 153;
const DAYS_PER_4_YEARS: i64 = 1461;
const DAYS_PER_400_YEARS: i64 = 146097;

/// Returns true if and only if the given year is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Converts a Gregorian civil date to a serial day number.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    let mut year =
        i64::from(year) + if year < 0 { 4801 } else { 4800 };
    let month = if month > 2 {
        i64::from(month) - 3
    } else {
        year -= 1;
        i64::from(month) + 9
    };
    let sdn = (year.div_euclid(100) * DAYS_PER_400_YEARS).div_euclid(4)
        + (year.rem_euclid(100) * DAYS_PER_4_YEARS).div_euclid(4)
        + (month * DAYS_PER_5_MONTHS + 2).div_euclid(5)
        + i64::from(day)
        - SDN_OFFSET;
    sdn as i32
}

/// Converts a serial day number to a Gregorian `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    let temp = (i64::from(sdn) + SDN_OFFSET) * 4 - 1;
    let century = temp.div_euclid(DAYS_PER_400_YEARS);

    let temp = temp.rem_euclid(DAYS_PER_400_YEARS).div_euclid(4) * 4 + 3;
    let mut year = century * 100 + temp.div_euclid(DAYS_PER_4_YEARS);
    let day_of_year = temp.rem_euclid(DAYS_PER_4_YEARS).div_euclid(4) + 1;

    let temp = day_of_year * 5 - 3;
    let mut month = temp.div_euclid(DAYS_PER_5_MONTHS);
    let day = temp.rem_euclid(DAYS_PER_5_MONTHS).div_euclid(5) + 1;

    if month < 10 {
        month += 3;
    } else {
        year += 1;
        month -= 9;
    }
    year -= 4800;
    if year <= 0 {
        year -= 1;
    }
    (year as i32, month as i32, day as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_days() {
        assert_eq!(to_sdn(1970, 1, 1), 2440588);
        assert_eq!(to_sdn(2000, 1, 1), 2451545);
        assert_eq!(to_sdn(2000, 2, 29), 2451604);
        assert_eq!(from_sdn(2451545), (2000, 1, 1));
    }

    #[test]
    fn bce_years_are_adjacent() {
        // 31 December 1 BCE immediately precedes 1 January 1 CE.
        assert_eq!(to_sdn(1, 1, 1) - 1, to_sdn(-1, 12, 31));
        assert_eq!(from_sdn(to_sdn(1, 1, 1) - 1), (-1, 12, 31));
    }

    #[test]
    fn sdn_roundtrip_range() {
        // A full 400-year cycle straddling the epoch of interest.
        let start = to_sdn(1600, 1, 1);
        for sdn in start..start + DAYS_PER_400_YEARS as i32 {
            let (y, m, d) = from_sdn(sdn);
            assert_eq!(to_sdn(y, m, d), sdn, "at {y:04}-{m:02}-{d:02}");
        }
    }

    quickcheck::quickcheck! {
        fn prop_civil_roundtrip(sdn: i32) -> bool {
            // Keep to a few millennia on either side of the common era.
            let sdn = sdn.rem_euclid(4_000_000);
            let (y, m, d) = from_sdn(sdn);
            to_sdn(y, m, d) == sdn
        }
    }
}
