/*!
Conversions between civil dates in seven calendars and serial day numbers.

Every calendar in this module maps a civil `(year, month, day)` triple to
and from a single integer timeline: the serial day number (SDN), a count of
days elapsed since the proleptic Julian epoch (1 January 4713 BCE), the
same convention as the astronomical Julian day number. Because every
calendar shares the timeline, dates recorded in different calendars become
directly comparable as integers.

The conversions are pure arithmetic. They do not validate their input: a
nonsensical civil date (day 31 in a 30-day month, say) is silently carried
into the nearest real day, exactly as the day-count arithmetic dictates.
Callers that need validation should round-trip through the SDN and compare,
which is what [`Date::set`](crate::Date::set) does.

The per-calendar modules expose the raw function pairs; the [`Calendar`]
enum dispatches to them.
*/

pub mod french;
pub mod gregorian;
pub mod hebrew;
pub mod islamic;
pub mod julian;
pub mod persian;
pub mod swedish;

use crate::error::Error;

/// An identifier for one of the seven supported calendars.
///
/// Each variant bundles one conversion pair ([`Calendar::to_sdn`],
/// [`Calendar::from_sdn`]) and one display name. A [`Date`](crate::Date)
/// always carries exactly one `Calendar`.
///
/// # Example
///
/// ```
/// use kalends::Calendar;
///
/// // 1 Vendémiaire I, the French Republican epoch, is 22 September 1792.
/// let sdn = Calendar::French.to_sdn(1, 1, 1);
/// assert_eq!(Calendar::Gregorian.from_sdn(sdn), (1792, 9, 22));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Calendar {
    /// The Gregorian calendar, proleptic before its 1582 introduction.
    Gregorian,
    /// The Julian calendar.
    Julian,
    /// The Hebrew (Jewish) calendar.
    Hebrew,
    /// The French Republican calendar (1792-1805).
    French,
    /// The Persian (Solar Hijri) calendar.
    Persian,
    /// The Islamic (tabular Hijri) calendar.
    Islamic,
    /// The Swedish calendar, which deviated from the Julian calendar by
    /// one day between 1700-03-01 and 1712-02-30.
    Swedish,
}

impl Calendar {
    /// All supported calendars, in serialization-code order.
    pub const ALL: [Calendar; 7] = [
        Calendar::Gregorian,
        Calendar::Julian,
        Calendar::Hebrew,
        Calendar::French,
        Calendar::Persian,
        Calendar::Islamic,
        Calendar::Swedish,
    ];

    /// Converts a civil date in this calendar to a serial day number.
    #[inline]
    pub fn to_sdn(self, year: i32, month: i32, day: i32) -> i32 {
        match self {
            Calendar::Gregorian => gregorian::to_sdn(year, month, day),
            Calendar::Julian => julian::to_sdn(year, month, day),
            Calendar::Hebrew => hebrew::to_sdn(year, month, day),
            Calendar::French => french::to_sdn(year, month, day),
            Calendar::Persian => persian::to_sdn(year, month, day),
            Calendar::Islamic => islamic::to_sdn(year, month, day),
            Calendar::Swedish => swedish::to_sdn(year, month, day),
        }
    }

    /// Converts a serial day number to a civil `(year, month, day)` in
    /// this calendar.
    #[inline]
    pub fn from_sdn(self, sdn: i32) -> (i32, i32, i32) {
        match self {
            Calendar::Gregorian => gregorian::from_sdn(sdn),
            Calendar::Julian => julian::from_sdn(sdn),
            Calendar::Hebrew => hebrew::from_sdn(sdn),
            Calendar::French => french::from_sdn(sdn),
            Calendar::Persian => persian::from_sdn(sdn),
            Calendar::Islamic => islamic::from_sdn(sdn),
            Calendar::Swedish => swedish::from_sdn(sdn),
        }
    }

    /// Returns the English display name of this calendar.
    pub fn name(self) -> &'static str {
        match self {
            Calendar::Gregorian => "Gregorian",
            Calendar::Julian => "Julian",
            Calendar::Hebrew => "Hebrew",
            Calendar::French => "French Republican",
            Calendar::Persian => "Persian",
            Calendar::Islamic => "Islamic",
            Calendar::Swedish => "Swedish",
        }
    }

    /// Returns true when this calendar's civil year always begins on its
    /// first day, i.e. when a [`NewYear`](crate::NewYear) override is not
    /// permitted.
    ///
    /// Only the Gregorian, Julian and Swedish calendars — the ones that
    /// were in civil use with regional year-start conventions — accept an
    /// override.
    pub fn has_fixed_new_year(self) -> bool {
        !matches!(
            self,
            Calendar::Gregorian | Calendar::Julian | Calendar::Swedish
        )
    }

    /// Returns the numeric code of this calendar in the persistence
    /// format.
    pub fn code(self) -> u8 {
        match self {
            Calendar::Gregorian => 0,
            Calendar::Julian => 1,
            Calendar::Hebrew => 2,
            Calendar::French => 3,
            Calendar::Persian => 4,
            Calendar::Islamic => 5,
            Calendar::Swedish => 6,
        }
    }

    /// Converts a persistence-format numeric code back to a calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the code names no calendar.
    pub fn from_code(code: i64) -> Result<Calendar, Error> {
        match code {
            0 => Ok(Calendar::Gregorian),
            1 => Ok(Calendar::Julian),
            2 => Ok(Calendar::Hebrew),
            3 => Ok(Calendar::French),
            4 => Ok(Calendar::Persian),
            5 => Ok(Calendar::Islamic),
            6 => Ok(Calendar::Swedish),
            _ => Err(Error::code("calendar", code)),
        }
    }
}

impl core::fmt::Display for Calendar {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Calendar {
    type Err = Error;

    /// Looks up a calendar by its English name, case-insensitively.
    fn from_str(s: &str) -> Result<Calendar, Error> {
        for cal in Calendar::ALL {
            if s.eq_ignore_ascii_case(cal.name()) {
                return Ok(cal);
            }
        }
        Err(Error::value("unrecognized calendar name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A handful of known correspondences anchoring the shared timeline.
    // If any calendar's epoch arithmetic drifts, these catch it.
    #[test]
    fn cross_calendar_anchors() {
        let greg = |y, m, d| Calendar::Gregorian.to_sdn(y, m, d);

        // Unix epoch and J2000, from the usual astronomical tables.
        assert_eq!(greg(1970, 1, 1), 2440588);
        assert_eq!(greg(2000, 1, 1), 2451545);

        // Gregorian 1591-01-01 is Julian 1590-12-22.
        let sdn = greg(1591, 1, 1);
        assert_eq!(Calendar::Julian.from_sdn(sdn), (1590, 12, 22));

        // Gregorian 2009-12-08 falls in Hebrew year 5770.
        let (hy, _, _) = Calendar::Hebrew.from_sdn(greg(2009, 12, 8));
        assert_eq!(hy, 5770);

        // The French Republican epoch: 22 September 1792.
        assert_eq!(Calendar::French.to_sdn(1, 1, 1), greg(1792, 9, 22));

        // 1 Muharram AH 1 is 16 July 622 in the Julian calendar.
        assert_eq!(
            Calendar::Islamic.to_sdn(1, 1, 1),
            Calendar::Julian.to_sdn(622, 7, 16),
        );

        // 1 Farvardin AP 1 is 19 March 622 in the Julian calendar.
        assert_eq!(
            Calendar::Persian.to_sdn(1, 1, 1),
            Calendar::Julian.to_sdn(622, 3, 19),
        );
    }

    #[test]
    fn equal_instants_in_different_calendars() {
        let sdn = Calendar::Gregorian.to_sdn(1789, 11, 4);
        for cal in Calendar::ALL {
            let (y, m, d) = cal.from_sdn(sdn);
            assert_eq!(
                cal.to_sdn(y, m, d),
                sdn,
                "round trip through {cal} at sdn {sdn}",
            );
        }
    }

    #[test]
    fn name_lookup() {
        assert_eq!(
            "french republican".parse::<Calendar>().unwrap(),
            Calendar::French,
        );
        assert_eq!("Hebrew".parse::<Calendar>().unwrap(), Calendar::Hebrew);
        assert!("discordian".parse::<Calendar>().is_err());
    }

    #[test]
    fn codes_roundtrip() {
        for cal in Calendar::ALL {
            assert_eq!(Calendar::from_code(i64::from(cal.code())).unwrap(), cal);
        }
        assert!(Calendar::from_code(7).unwrap_err().is_invalid_code());
    }
}
