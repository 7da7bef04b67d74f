/*!
French Republican calendar conversions.

Twelve 30-day months followed by five (or six) complementary days, treated
here as a short thirteenth month. The arithmetic uses the simple 1461-day
leap cycle; the calendar was only ever in civil use from 22 September 1792
(1 Vendémiaire I) until it was abolished effective 1 January 1806, and the
`*_checked` variants reject conversions outside that window.
*/

use crate::error::Error;

const SDN_OFFSET: i64 = 2375474;
const DAYS_PER_4_YEARS: i64 = 1461;
const DAYS_PER_MONTH: i64 = 30;

/// The first historically valid serial day: 22 September 1792.
pub const FIRST_VALID_SDN: i32 = 2375840;
/// The last historically valid serial day: 31 December 1805.
pub const LAST_VALID_SDN: i32 = 2380687;

/// Converts a French Republican civil date to a serial day number.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    let sdn = (i64::from(year) * DAYS_PER_4_YEARS).div_euclid(4)
        + i64::from(month - 1) * DAYS_PER_MONTH
        + i64::from(day)
        + SDN_OFFSET;
    sdn as i32
}

/// Converts a serial day number to a French Republican
/// `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    let temp = (i64::from(sdn) - SDN_OFFSET) * 4 - 1;
    let year = temp.div_euclid(DAYS_PER_4_YEARS);
    let day_of_year = temp.rem_euclid(DAYS_PER_4_YEARS).div_euclid(4);
    (
        year as i32,
        (day_of_year.div_euclid(DAYS_PER_MONTH) + 1) as i32,
        (day_of_year.rem_euclid(DAYS_PER_MONTH) + 1) as i32,
    )
}

/// Like [`to_sdn`], but rejects dates outside the calendar's historically
/// valid window.
///
/// # Errors
///
/// Returns an error if the date falls before 1 Vendémiaire I
/// (22 September 1792) or after the calendar's abolition
/// (31 December 1805).
pub fn to_sdn_checked(year: i32, month: i32, day: i32) -> Result<i32, Error> {
    let sdn = to_sdn(year, month, day);
    if !(FIRST_VALID_SDN..=LAST_VALID_SDN).contains(&sdn) {
        return Err(Error::french_range(sdn));
    }
    Ok(sdn)
}

/// Like [`from_sdn`], but rejects serial days outside the calendar's
/// historically valid window.
///
/// # Errors
///
/// Returns an error if the serial day falls outside the window accepted
/// by [`to_sdn_checked`].
pub fn from_sdn_checked(sdn: i32) -> Result<(i32, i32, i32), Error> {
    if !(FIRST_VALID_SDN..=LAST_VALID_SDN).contains(&sdn) {
        return Err(Error::french_range(sdn));
    }
    Ok(from_sdn(sdn))
}
