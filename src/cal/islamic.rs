/*!
Islamic (tabular Hijri) calendar conversions.

The arithmetical calendar: months alternate 30 and 29 days, with eleven
leap days distributed over a 30-year cycle of 10631 days. The month of a
given day is located with a ceiling division clamped to 12, since the
final month stretches to 30 days in leap years.

This is the tabular approximation used for record keeping, not any
particular sighting-based civil calendar.
*/

/// Serial day of 1 Muharram AH 1 (16 July 622, Julian).
const EPOCH: i64 = 1948440;

fn to_sdn64(year: i64, month: i64, day: i64) -> i64 {
    // ceil(29.5 * (month - 1)), in halves
    day + (59 * (month - 1) + 1).div_euclid(2)
        + (year - 1) * 354
        + (11 * year + 3).div_euclid(30)
        + EPOCH
        - 1
}

/// Converts an Islamic civil date to a serial day number.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    to_sdn64(i64::from(year), i64::from(month), i64::from(day)) as i32
}

/// Converts a serial day number to an Islamic `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    let sdn = i64::from(sdn);
    let year = (30 * (sdn - EPOCH) + 10646).div_euclid(10631);
    let into_year = sdn - to_sdn64(year, 1, 1);
    let month = ((2 * into_year).div_euclid(59) + 1).min(12);
    let day = sdn - to_sdn64(year, month, 1) + 1;
    (year as i32, month as i32, day as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch() {
        assert_eq!(to_sdn(1, 1, 1), EPOCH as i32);
        assert_eq!(from_sdn(EPOCH as i32), (1, 1, 1));
        assert_eq!(
            crate::cal::julian::from_sdn(EPOCH as i32),
            (622, 7, 16),
        );
    }

    #[test]
    fn cycle_length() {
        // Thirty years of the tabular calendar span exactly 10631 days.
        assert_eq!(to_sdn(31, 1, 1) - to_sdn(1, 1, 1), 10631);
    }

    #[test]
    fn month_lengths() {
        // Odd months have 30 days, even months 29, and the final month
        // has 30 in a leap year (AH 1 is common, AH 2 is leap).
        assert_eq!(to_sdn(2, 2, 1) - to_sdn(2, 1, 1), 30);
        assert_eq!(to_sdn(2, 3, 1) - to_sdn(2, 2, 1), 29);
        assert_eq!(to_sdn(2, 1, 1) - to_sdn(1, 12, 1), 29);
        assert_eq!(to_sdn(3, 1, 1) - to_sdn(2, 12, 1), 30);
    }

    #[test]
    fn sdn_roundtrip_range() {
        // A full 30-year cycle in the present era.
        let start = to_sdn(1400, 1, 1);
        let stop = to_sdn(1430, 1, 1);
        for sdn in start..stop {
            let (y, m, d) = from_sdn(sdn);
            assert_eq!(to_sdn(y, m, d), sdn, "at {y}-{m}-{d}");
        }
    }
}
