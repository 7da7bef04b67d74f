/*!
Persian (Solar Hijri) calendar conversions.

Closed-form arithmetic over the 2820-year great cycle of 683 leap years
(John Walker's formulation). Months 1 through 7 have 31 days, months 8
through 12 have 30 (the last having 29 in common years). Year 0 does not
exist.
*/

/// Serial day of 1 Farvardin AP 1 (19 March 622, Julian).
const EPOCH: i64 = 1948321;
const DAYS_PER_CYCLE: i64 = 1029983;

fn to_sdn64(year: i64, month: i64, day: i64) -> i64 {
    let epbase = if year >= 0 { year - 474 } else { year - 473 };
    let epyear = 474 + epbase.rem_euclid(2820);
    let month_days = if month <= 7 {
        (month - 1) * 31
    } else {
        (month - 1) * 30 + 6
    };
    day + month_days
        + (epyear * 682 - 110).div_euclid(2816)
        + (epyear - 1) * 365
        + epbase.div_euclid(2820) * DAYS_PER_CYCLE
        + EPOCH
        - 1
}

/// Converts a Persian civil date to a serial day number.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    to_sdn64(i64::from(year), i64::from(month), i64::from(day)) as i32
}

/// Converts a serial day number to a Persian `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    let sdn = i64::from(sdn);
    let depoch = sdn - to_sdn64(475, 1, 1);
    let cycle = depoch.div_euclid(DAYS_PER_CYCLE);
    let cyear = depoch.rem_euclid(DAYS_PER_CYCLE);
    let ycycle = if cyear == DAYS_PER_CYCLE - 1 {
        2820
    } else {
        let aux1 = cyear.div_euclid(366);
        let aux2 = cyear.rem_euclid(366);
        (2134 * aux1 + 2816 * aux2 + 2815).div_euclid(1028522) + aux1 + 1
    };
    let mut year = ycycle + 2820 * cycle + 474;
    if year <= 0 {
        year -= 1;
    }
    let yday = sdn - to_sdn64(year, 1, 1) + 1;
    let month = if yday <= 186 {
        // ceil(yday / 31)
        (yday + 30).div_euclid(31)
    } else {
        // ceil((yday - 6) / 30)
        (yday + 23).div_euclid(30)
    };
    let day = sdn - to_sdn64(year, month, 1) + 1;
    (year as i32, month as i32, day as i32)
}
