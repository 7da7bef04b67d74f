/*!
Julian calendar conversions.

Same month-renumbering scheme as the Gregorian arithmetic, minus the
century rule. Year 0 does not exist.
*/

const SDN_OFFSET: i64 = 32083;
const DAYS_PER_5_MONTHS: i64 = 153;
const DAYS_PER_4_YEARS: i64 = 1461;

/// Converts a Julian civil date to a serial day number.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    let mut year =
        i64::from(year) + if year < 0 { 4801 } else { 4800 };
    let month = if month > 2 {
        i64::from(month) - 3
    } else {
        year -= 1;
        i64::from(month) + 9
    };
    let sdn = (year * DAYS_PER_4_YEARS).div_euclid(4)
        + (month * DAYS_PER_5_MONTHS + 2).div_euclid(5)
        + i64::from(day)
        - SDN_OFFSET;
    sdn as i32
}

/// Converts a serial day number to a Julian `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    let temp = (i64::from(sdn) + SDN_OFFSET) * 4 - 1;
    let mut year = temp.div_euclid(DAYS_PER_4_YEARS);
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
