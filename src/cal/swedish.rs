/*!
Swedish calendar conversions.

Sweden tried to reach the Gregorian calendar gradually, by skipping leap
days, starting with the leap day of 1700 — and then abandoned the plan
after skipping only that one, leaving the country a single day ahead of
the Julian calendar from 1 March 1700. To return to the Julian calendar,
1712 was given a double leap day: the 30th of February. Sweden finally
switched to the Gregorian calendar on 1 March 1753 (the preceding 17
days of February were dropped).

So this is a dispatcher, not an independent calendar: the anomalous
1700-1712 window is the Julian count shifted by one day, 30 February 1712
is a literal special case, and everything else is Julian before the 1753
switch and Gregorian after it.
*/

use crate::cal::{gregorian, julian};

/// The serial day of the unique calendar date 30 February 1712.
pub const LEAP_DAY_1712_SDN: i32 = 2346425;

/// First day of the anomalous period: 1 March 1700 (Swedish style).
const ANOMALY_START_SDN: i32 = 2342042;
/// First day of the Gregorian calendar in Sweden: 1 March 1753.
const GREGORIAN_START_SDN: i32 = 2361390;

/// Converts a Swedish civil date to a serial day number.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    let date = (year, month, day);
    if ((1700, 3, 1)..=(1712, 2, 30)).contains(&date) {
        julian::to_sdn(year, month, day) - 1
    } else if date >= (1753, 3, 1) {
        gregorian::to_sdn(year, month, day)
    } else {
        julian::to_sdn(year, month, day)
    }
}

/// Converts a serial day number to a Swedish `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    if sdn == LEAP_DAY_1712_SDN {
        (1712, 2, 30)
    } else if (ANOMALY_START_SDN..LEAP_DAY_1712_SDN).contains(&sdn) {
        julian::from_sdn(sdn + 1)
    } else if sdn >= GREGORIAN_START_SDN {
        gregorian::from_sdn(sdn)
    } else {
        julian::from_sdn(sdn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_leap_day() {
        // The one and only 30th of February.
        assert_eq!(from_sdn(LEAP_DAY_1712_SDN), (1712, 2, 30));
        assert_eq!(to_sdn(1712, 2, 30), LEAP_DAY_1712_SDN);
        // The day after it is back on the Julian count.
        assert_eq!(from_sdn(LEAP_DAY_1712_SDN + 1), (1712, 3, 1));
        assert_eq!(
            julian::from_sdn(LEAP_DAY_1712_SDN + 1),
            (1712, 3, 1),
        );
    }

    #[test]
    fn anomaly_boundaries() {
        // 28 February 1700 was followed by 1 March: the skipped leap day
        // put Sweden a day ahead of the Julian calendar.
        assert_eq!(to_sdn(1700, 2, 28) + 1, to_sdn(1700, 3, 1));
        assert_eq!(julian::from_sdn(to_sdn(1700, 3, 1)), (1700, 2, 29));
        // Within the anomaly: Swedish new year 1707 against Julian.
        assert_eq!(
            to_sdn(1707, 1, 1),
            julian::to_sdn(1706, 12, 31),
        );
        // The Gregorian switch of 1753.
        assert_eq!(to_sdn(1753, 2, 17) + 1, to_sdn(1753, 3, 1));
        assert_eq!(from_sdn(to_sdn(1753, 3, 1)), (1753, 3, 1));
    }

    #[test]
    fn sdn_roundtrip_range() {
        // Julian run-up, the anomaly, the reversion and the Gregorian
        // switch, day by day.
        let start = to_sdn(1698, 1, 1);
        let stop = to_sdn(1755, 1, 1);
        for sdn in start..stop {
            let (y, m, d) = from_sdn(sdn);
            assert_eq!(to_sdn(y, m, d), sdn, "at {y:04}-{m:02}-{d:02}");
        }
    }
}
