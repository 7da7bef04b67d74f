use crate::{cal::Calendar, date::Date};

/// An error that can occur in this crate.
///
/// This crate uses a single error type for every fallible operation. Most
/// errors come from [`Date::set`], which validates the civil-date fields it
/// is given against the declared calendar; the remaining sources are the
/// second-endpoint operations (which require a compound date), decoding of
/// raw serialized codes, and the restricted French Republican conversions.
///
/// Beyond the `Display`, `Debug` and [`std::error::Error`] impls,
/// introspection is limited to a few predicates and, for a failed
/// civil-date validation, the offending date itself via [`Error::date`].
#[derive(Clone)]
pub struct Error {
    kind: Box<ErrorKind>,
}

#[derive(Clone, Debug)]
enum ErrorKind {
    /// A raw serialized code does not name any enumeration variant.
    Code { what: &'static str, code: i64 },
    /// A supplied value has the wrong shape for the declared modifier, or
    /// is otherwise structurally unusable.
    Value { what: &'static str },
    /// A new-year override was supplied for a calendar whose civil year
    /// start is fixed.
    NewYear { calendar: Calendar },
    /// The supplied civil-date fields do not name a real day in the
    /// declared calendar.
    Date { what: &'static str, date: Date },
    /// A second-endpoint operation was invoked on a non-compound date.
    NotCompound,
    /// A French Republican conversion in restricted mode was given a date
    /// outside the calendar's historically valid window.
    FrenchRange { sdn: i32 },
}

impl Error {
    #[inline(never)]
    #[cold]
    pub(crate) fn code(what: &'static str, code: i64) -> Error {
        Error::from(ErrorKind::Code { what, code })
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn value(what: &'static str) -> Error {
        Error::from(ErrorKind::Value { what })
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn newyear(calendar: Calendar) -> Error {
        Error::from(ErrorKind::NewYear { calendar })
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn invalid_date(what: &'static str, date: Date) -> Error {
        Error::from(ErrorKind::Date { what, date })
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn not_compound() -> Error {
        Error::from(ErrorKind::NotCompound)
    }

    #[inline(never)]
    #[cold]
    pub(crate) fn french_range(sdn: i32) -> Error {
        Error::from(ErrorKind::FrenchRange { sdn })
    }

    /// Returns true when this error came from decoding a raw serialized
    /// code that names no calendar, modifier or quality.
    pub fn is_invalid_code(&self) -> bool {
        matches!(*self.kind, ErrorKind::Code { .. })
    }

    /// Returns true when this error came from a structurally invalid
    /// value, including a new-year override on a fixed-new-year calendar.
    pub fn is_invalid_value(&self) -> bool {
        matches!(
            *self.kind,
            ErrorKind::Value { .. } | ErrorKind::NewYear { .. }
        )
    }

    /// Returns true when this error came from the civil-date sanity check:
    /// the supplied fields do not correspond to a real day in the declared
    /// calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Calendar, Date, DateVal, DateValue, Modifier, NewYear, Quality};
    ///
    /// // 1875 is not a leap year, so February has no 29th day.
    /// let mut date = Date::new();
    /// let err = date
    ///     .set(
    ///         Quality::None,
    ///         Modifier::None,
    ///         Calendar::Gregorian,
    ///         DateValue::Simple(DateVal::from_dmy(29, 2, 1875)),
    ///         None,
    ///         NewYear::Jan1,
    ///     )
    ///     .unwrap_err();
    /// assert!(err.is_invalid_date());
    /// ```
    pub fn is_invalid_date(&self) -> bool {
        matches!(*self.kind, ErrorKind::Date { .. })
    }

    /// Returns true when a second-endpoint operation was invoked on a date
    /// that is not a range or a span.
    pub fn is_not_compound(&self) -> bool {
        matches!(*self.kind, ErrorKind::NotCompound)
    }

    /// Returns true when a restricted French Republican conversion was
    /// given a date outside the calendar's historically valid window.
    pub fn is_outside_valid_range(&self) -> bool {
        matches!(*self.kind, ErrorKind::FrenchRange { .. })
    }

    /// Returns the date that failed the civil-date sanity check, if that
    /// is what this error reports.
    pub fn date(&self) -> Option<&Date> {
        match *self.kind {
            ErrorKind::Date { ref date, .. } => Some(date),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { kind: Box::new(kind) }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self.kind {
            ErrorKind::Code { what, code } => {
                write!(f, "code {code} does not name a {what}")
            }
            ErrorKind::Value { what } => write!(f, "invalid value: {what}"),
            ErrorKind::NewYear { calendar } => {
                write!(
                    f,
                    "the {calendar} calendar has a fixed new year and \
                     does not accept a new-year override",
                )
            }
            ErrorKind::Date { what, ref date } => {
                write!(f, "invalid date \"{date}\": {what}")
            }
            ErrorKind::NotCompound => {
                write!(
                    f,
                    "operation is only allowed for compound (range or \
                     span) dates",
                )
            }
            ErrorKind::FrenchRange { sdn } => {
                write!(
                    f,
                    "serial day {sdn} is outside the historically valid \
                     window of the French Republican calendar \
                     (22 Sep 1792 through 31 Dec 1805)",
                )
            }
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        }
    }
}
