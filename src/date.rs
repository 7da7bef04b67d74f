use crate::{cal, cal::Calendar, config::Config, error::Error};

/// A date modifier: the qualifier that turns a bare civil date into a
/// point, bound, approximation or interval.
///
/// `Range` and `Span` are the *compound* modifiers: a date carrying one of
/// them holds two endpoints instead of one. A `Range` is an interval of
/// uncertainty about one real event ("between 1750 and 1752"); a `Span`
/// is the interval between two distinct endpoints ("from 1802 to 1807").
/// `From` and `To` are the open-ended halves of a span.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Modifier {
    /// A single point date, possibly with unknown month or day.
    None,
    /// An open-ended upper bound: the event happened before this date.
    Before,
    /// An open-ended lower bound: the event happened after this date.
    After,
    /// An approximate point date.
    About,
    /// An inclusive interval of uncertainty for one event. Compound.
    Range,
    /// An interval between two distinct endpoints. Compound.
    Span,
    /// The date is unstructured text; only the text field is meaningful.
    TextOnly,
    /// The open-ended start of a span.
    From,
    /// The open-ended end of a span.
    To,
}

impl Modifier {
    /// Returns true for the compound modifiers, `Range` and `Span`.
    pub fn is_compound(self) -> bool {
        matches!(self, Modifier::Range | Modifier::Span)
    }

    /// Returns the numeric code of this modifier in the persistence
    /// format.
    pub fn code(self) -> u8 {
        match self {
            Modifier::None => 0,
            Modifier::Before => 1,
            Modifier::After => 2,
            Modifier::About => 3,
            Modifier::Range => 4,
            Modifier::Span => 5,
            Modifier::TextOnly => 6,
            Modifier::From => 7,
            Modifier::To => 8,
        }
    }

    /// Converts a persistence-format numeric code back to a modifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the code names no modifier.
    pub fn from_code(code: i64) -> Result<Modifier, Error> {
        match code {
            0 => Ok(Modifier::None),
            1 => Ok(Modifier::Before),
            2 => Ok(Modifier::After),
            3 => Ok(Modifier::About),
            4 => Ok(Modifier::Range),
            5 => Ok(Modifier::Span),
            6 => Ok(Modifier::TextOnly),
            7 => Ok(Modifier::From),
            8 => Ok(Modifier::To),
            _ => Err(Error::code("modifier", code)),
        }
    }
}

impl core::str::FromStr for Modifier {
    type Err = Error;

    /// Looks up a modifier by its English keyword, case-insensitively.
    fn from_str(s: &str) -> Result<Modifier, Error> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Modifier::None),
            "before" => Ok(Modifier::Before),
            "after" => Ok(Modifier::After),
            "about" => Ok(Modifier::About),
            "range" => Ok(Modifier::Range),
            "from" => Ok(Modifier::From),
            "to" => Ok(Modifier::To),
            "span" => Ok(Modifier::Span),
            "textonly" => Ok(Modifier::TextOnly),
            _ => Err(Error::value("unrecognized modifier keyword")),
        }
    }
}

/// How confident the record is in a date's value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Quality {
    /// An ordinary recorded date.
    None,
    /// The date is an estimate.
    Estimated,
    /// The date was calculated from other information.
    Calculated,
}

impl Quality {
    /// Returns the numeric code of this quality in the persistence
    /// format.
    pub fn code(self) -> u8 {
        match self {
            Quality::None => 0,
            Quality::Estimated => 1,
            Quality::Calculated => 2,
        }
    }

    /// Converts a persistence-format numeric code back to a quality.
    ///
    /// # Errors
    ///
    /// Returns an error if the code names no quality.
    pub fn from_code(code: i64) -> Result<Quality, Error> {
        match code {
            0 => Ok(Quality::None),
            1 => Ok(Quality::Estimated),
            2 => Ok(Quality::Calculated),
            _ => Err(Error::code("quality", code)),
        }
    }
}

impl core::str::FromStr for Quality {
    type Err = Error;

    /// Looks up a quality by its English keyword, case-insensitively.
    fn from_str(s: &str) -> Result<Quality, Error> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Quality::None),
            "estimated" => Ok(Quality::Estimated),
            "calculated" => Ok(Quality::Calculated),
            _ => Err(Error::value("unrecognized quality keyword")),
        }
    }
}

/// The civil-year start convention attached to a date.
///
/// Before standardization on 1 January, the civil year started on
/// different days in different places and eras (25 March in England until
/// 1752, for example). A date recorded under such a convention carries a
/// `NewYear` so its *effective* year — the one used for the sort value —
/// can be one less than the written year when the month and day fall at
/// or after the year-start split.
///
/// Only calendars without a fixed year start (Gregorian, Julian, Swedish)
/// accept a value other than `Jan1`; see
/// [`Calendar::has_fixed_new_year`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NewYear {
    /// The year begins on 1 January. The default; no adjustment.
    Jan1,
    /// The year begins on 1 March.
    Mar1,
    /// The year begins on 25 March (Annunciation style).
    Mar25,
    /// The year begins on 1 September (Byzantine style).
    Sep1,
    /// The year begins on an arbitrary month and day.
    Custom(i32, i32),
}

impl NewYear {
    /// The `(month, day)` on which the civil year starts, or `None` for
    /// the default 1 January (which needs no adjustment).
    pub fn split(self) -> Option<(i32, i32)> {
        match self {
            NewYear::Jan1 => None,
            NewYear::Mar1 => Some((3, 1)),
            NewYear::Mar25 => Some((3, 25)),
            NewYear::Sep1 => Some((9, 1)),
            NewYear::Custom(month, day) => Some((month, day)),
        }
    }

    /// Renders this convention as a short token: `""`, `"Mar1"`,
    /// `"Mar25"`, `"Sep1"` or `"month-day"`.
    pub fn token(self) -> String {
        match self {
            NewYear::Jan1 => String::new(),
            NewYear::Mar1 => "Mar1".to_string(),
            NewYear::Mar25 => "Mar25".to_string(),
            NewYear::Sep1 => "Sep1".to_string(),
            NewYear::Custom(month, day) => format!("{month}-{day}"),
        }
    }

    /// Parses a token as produced by [`NewYear::token`]. Unparseable
    /// input yields the default `Jan1`.
    pub fn from_token(s: &str) -> NewYear {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "" | "jan1" => NewYear::Jan1,
            "mar1" => NewYear::Mar1,
            "mar25" => NewYear::Mar25,
            "sep1" => NewYear::Sep1,
            _ => {
                let mut parts = s.splitn(2, '-');
                let month = parts.next().and_then(|p| p.parse().ok());
                let day = parts.next().and_then(|p| p.parse().ok());
                match (month, day) {
                    (Some(m), Some(d)) => NewYear::Custom(m, d),
                    _ => NewYear::Jan1,
                }
            }
        }
    }
}

/// One endpoint of a date: the raw numeric fields as recorded.
///
/// A year may be negative (BCE); a month or day of `0` means "unknown".
/// The `slash` flag marks a dual-dated ("1706/7") year recorded under the
/// Old Style/New Style ambiguity; a slash date is always interpreted in
/// the Julian calendar, and the stored year is the *later* (new-style)
/// one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateVal {
    /// Day of month, or 0 when unknown.
    pub day: i32,
    /// Month of year, or 0 when unknown.
    pub month: i32,
    /// Year, possibly negative; 0 when unknown.
    pub year: i32,
    /// Whether the year is dual-dated.
    pub slash: bool,
}

impl DateVal {
    /// The all-unknown endpoint.
    pub const EMPTY: DateVal =
        DateVal { day: 0, month: 0, year: 0, slash: false };

    /// Builds an endpoint from day, month and year, without a slash.
    pub const fn from_dmy(day: i32, month: i32, year: i32) -> DateVal {
        DateVal { day, month, year, slash: false }
    }

    /// The endpoint as a `(year, month, day)` triple.
    pub const fn ymd(self) -> (i32, i32, i32) {
        (self.year, self.month, self.day)
    }
}

/// The numeric payload of a date: one endpoint for simple dates, two for
/// compound (range/span) dates.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DateValue {
    /// A single endpoint.
    Simple(DateVal),
    /// A start and a stop endpoint.
    Compound(DateVal, DateVal),
}

impl DateValue {
    /// The all-unknown simple value.
    pub const EMPTY: DateValue = DateValue::Simple(DateVal::EMPTY);

    /// The first (or only) endpoint.
    pub fn start(&self) -> DateVal {
        match *self {
            DateValue::Simple(v) => v,
            DateValue::Compound(v, _) => v,
        }
    }

    /// The second endpoint, if there is one.
    pub fn stop(&self) -> Option<DateVal> {
        match *self {
            DateValue::Simple(_) => None,
            DateValue::Compound(_, v) => Some(v),
        }
    }

    fn start_mut(&mut self) -> &mut DateVal {
        match self {
            DateValue::Simple(v) => v,
            DateValue::Compound(v, _) => v,
        }
    }
}

/// The comparison relations understood by [`Date::matches`].
///
/// Every relation is evaluated over the two dates' bracketing intervals
/// (see [`Date::start_stop_range`]), not over point values. The plain
/// `Before`/`After` family asks whether the relation *could* hold
/// ("any part of self vs. any part of other"); the `Strictly` variants
/// ask whether it *must* hold ("all parts vs. all parts").
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Comparison {
    /// The two brackets overlap at all.
    Overlaps,
    /// The two brackets are identical.
    Equals,
    /// Self's bracket starts before the other's bracket stops: self could
    /// be earlier.
    Before,
    /// Like `Before`, but allowing equality.
    BeforeOrEqual,
    /// Self's entire bracket lies before the other's: self is definitely
    /// earlier.
    StrictlyBefore,
    /// Self's bracket stops after the other's bracket starts: self could
    /// be later.
    After,
    /// Like `After`, but allowing equality.
    AfterOrEqual,
    /// Self's entire bracket lies after the other's: self is definitely
    /// later.
    StrictlyAfter,
}

/// How [`Date::anniversary`] resolves a 29 February anniversary in a
/// year without one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Feb29Policy {
    /// Observe the anniversary on 28 February.
    Feb28,
    /// Observe the anniversary on 1 March.
    Mar1,
    /// Keep 29 February as recorded.
    Keep,
}

/// The flat persistence form of a [`Date`].
///
/// This mirrors the wire contract consumed by storage layers: a tuple of
/// `(calendar, modifier, quality, dateval, text, sortval, newyear)`, with
/// the three leading enumerations as numeric codes. With the `serde`
/// crate feature enabled, `RawDate` serializes as exactly that tuple, and
/// deserialization also accepts the legacy six-element form that predates
/// the `newyear` field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawDate {
    /// Calendar code; see [`Calendar::code`].
    pub calendar: u8,
    /// Modifier code; see [`Modifier::code`].
    pub modifier: u8,
    /// Quality code; see [`Quality::code`].
    pub quality: u8,
    /// The numeric field payload.
    pub dateval: DateValue,
    /// The free-text field.
    pub text: String,
    /// The derived sort value, stored as-is.
    pub sortval: i32,
    /// The civil-year start convention.
    pub newyear: NewYear,
}

/// A genealogical date: a civil date that may be partial, qualified,
/// approximate, compound, dual-dated, recorded in any of seven calendars,
/// or free text.
///
/// A `Date` couples raw numeric fields (see [`DateValue`]) with a
/// [`Calendar`], a [`Modifier`], a [`Quality`] and a [`NewYear`]
/// convention, and maintains a derived integer *sort value*: the serial
/// day number of its (effective) start. The sort value is recomputed by
/// every mutation, is `0` for unknown and text-only dates, and is the
/// single source of truth for ordering dates — including dates recorded
/// in different calendars.
///
/// # Construction and mutation
///
/// [`Date::from_ymd`] covers the common case of a plain (possibly
/// partial) Gregorian date. Everything else goes through [`Date::set`],
/// which validates its input, including a full round-trip *sanity check*
/// of the civil fields against the declared calendar:
///
/// ```
/// use kalends::{Calendar, Date, DateVal, DateValue, Modifier, NewYear, Quality};
///
/// let mut date = Date::new();
/// date.set(
///     Quality::None,
///     Modifier::Range,
///     Calendar::Gregorian,
///     DateValue::Compound(
///         DateVal::from_dmy(0, 0, 1750),
///         DateVal::from_dmy(0, 0, 1752),
///     ),
///     None,
///     NewYear::Jan1,
/// )?;
/// assert!(date.is_compound());
/// # Ok::<(), kalends::Error>(())
/// ```
///
/// # Comparing dates
///
/// `Date` deliberately implements neither `PartialEq` nor `PartialOrd`.
/// There are three distinct notions of comparison, and hiding them behind
/// operators invites mistakes:
///
/// * [`Date::sort_value`] — instant identity/ordering on the shared day
///   timeline. Two plain dates in different calendars naming the same day
///   have equal sort values.
/// * [`Date::is_equal`] — structural equality of every recorded field.
/// * [`Date::matches`] — fuzzy comparison over uncertainty brackets.
///
/// ```
/// use kalends::{Calendar, Date};
///
/// let gregorian = Date::from_ymd(1591, 1, 1);
/// let julian = gregorian.to_calendar(Calendar::Julian);
/// assert_eq!(julian.ymd(), (1590, 12, 22));
/// assert_eq!(julian.sort_value(), gregorian.sort_value());
/// assert!(!julian.is_equal(&gregorian));
/// ```
#[derive(Clone, Debug)]
pub struct Date {
    calendar: Calendar,
    modifier: Modifier,
    quality: Quality,
    dateval: DateValue,
    text: String,
    sortval: i32,
    newyear: NewYear,
}

impl Default for Date {
    fn default() -> Date {
        Date::new()
    }
}

fn zero_adjust(year: i32, month: i32, day: i32) -> (i32, i32, i32) {
    (if year != 0 { year } else { 1 }, month.max(1), day.max(1))
}

impl Date {
    /// Creates a new empty (fully unknown) date.
    pub fn new() -> Date {
        Date {
            calendar: Calendar::Gregorian,
            modifier: Modifier::None,
            quality: Quality::None,
            dateval: DateValue::EMPTY,
            text: String::new(),
            sortval: 0,
            newyear: NewYear::Jan1,
        }
    }

    /// Creates a plain Gregorian date from year, month and day, where a
    /// zero month or day (or both) means "unknown".
    ///
    /// This constructor does not validate the fields against the
    /// calendar; use [`Date::set`] when validation is wanted.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Date;
    ///
    /// let d = Date::from_ymd(1789, 11, 0);
    /// assert_eq!(d.year(), 1789);
    /// assert!(!d.day_valid());
    /// ```
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Date {
        let mut date = Date::new();
        date.set_ymd_raw(year, month, day);
        date
    }

    /// Returns the current date (UTC) as a plain Gregorian date.
    pub fn today() -> Date {
        let days = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| (d.as_secs() / 86_400) as i32)
            .unwrap_or(0);
        let (y, m, d) = cal::gregorian::from_sdn(days + 2_440_588);
        Date::from_ymd(y, m, d)
    }

    /// Copies every attribute of `source` into this date, in place.
    ///
    /// This exists (rather than only `Clone`) so that a date embedded in
    /// a larger record can be updated without replacing the slot that
    /// holds it.
    pub fn copy_from(&mut self, source: &Date) {
        self.calendar = source.calendar;
        self.modifier = source.modifier;
        self.quality = source.quality;
        self.dateval = source.dateval;
        self.text = source.text.clone();
        self.sortval = source.sortval;
        self.newyear = source.newyear;
    }

    /// Sets every aspect of the date at once, revalidating it.
    ///
    /// The supplied `value` must be [`Compound`](DateValue::Compound)
    /// when the modifier is compound. A `newyear` other than
    /// [`NewYear::Jan1`] is only accepted for calendars without a fixed
    /// year start. `text` replaces the free-text field when `Some` and
    /// non-empty.
    ///
    /// The sort value is recomputed, substituting 1 for unknown
    /// year/month/day fields for the computation only. A slash-dated
    /// value forces the calendar to Julian. The new-year convention, when
    /// present and triggered by the month/day, lowers the *effective*
    /// year of the sort value by one without touching the stored fields.
    ///
    /// Finally — except for text-only dates — the civil fields are
    /// round-tripped through the calendar conversion and compared with
    /// what was supplied. The conversions themselves never reject
    /// anything: day 31 in a 30-day month silently lands in the next
    /// month, and the round trip is how such input is caught.
    ///
    /// # Errors
    ///
    /// Fails when the value has the wrong shape for the modifier, when a
    /// new-year override is given for a fixed-new-year calendar, or when
    /// the round-trip check finds that the fields name no real day in the
    /// declared calendar. In the last case the offending date travels in
    /// the error; see [`Error::date`](crate::Error::date).
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Calendar, Date, DateVal, DateValue, Modifier, NewYear, Quality};
    ///
    /// let mut leap = Date::new();
    /// assert!(leap
    ///     .set(
    ///         Quality::None,
    ///         Modifier::None,
    ///         Calendar::Gregorian,
    ///         DateValue::Simple(DateVal::from_dmy(29, 2, 2000)),
    ///         None,
    ///         NewYear::Jan1,
    ///     )
    ///     .is_ok());
    ///
    /// let mut not_leap = Date::new();
    /// let err = not_leap
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
    pub fn set(
        &mut self,
        quality: Quality,
        modifier: Modifier,
        calendar: Calendar,
        value: DateValue,
        text: Option<&str>,
        newyear: NewYear,
    ) -> Result<(), Error> {
        if modifier.is_compound()
            && !matches!(value, DateValue::Compound(..))
        {
            return Err(Error::value(
                "a range or span needs a start and a stop endpoint",
            ));
        }
        if newyear != NewYear::Jan1 && calendar.has_fixed_new_year() {
            return Err(Error::newyear(calendar));
        }

        self.quality = quality;
        self.modifier = modifier;
        self.calendar = calendar;
        self.dateval = value;
        self.newyear = newyear;

        let start = value.start();
        let (y, m, d) = zero_adjust(start.year, start.month, start.day);
        self.sortval = calendar.to_sdn(y, m, d);

        if self.is_slash() && self.calendar != Calendar::Julian {
            self.calendar = Calendar::Julian;
            self.calc_sort_value();
        }

        let year_delta = self.adjust_newyear();

        if let Some(text) = text {
            if !text.is_empty() {
                self.text = text.to_string();
            }
        }

        if modifier == Modifier::TextOnly {
            self.sortval = 0;
            return Ok(());
        }

        // The conversions silently correct nonsense like 31 April; only
        // a round trip through the serial day count can detect that the
        // caller's fields were not a real civil date.
        let mut sanity = self.clone();
        sanity.reconvert(self.calendar);
        if sanity.is_slash() != self.is_slash() {
            sanity.set_slash(self.is_slash());
        }
        if self.is_compound() && sanity.is_slash2() != self.is_slash2() {
            let _ = sanity.set_slash2(self.is_slash2());
        }
        if sanity.new_year() != self.new_year() {
            sanity.set_new_year(self.new_year());
            sanity.adjust_newyear();
        }

        // The round trip is not compared against self: that would erase
        // the uncertainty expressed by zero day/month fields.
        if sanity.dateval != value {
            if let Err(what) =
                compare_sanity(&sanity.dateval, &value, year_delta)
            {
                debug!(
                    "sanity check failed - self: {:?}, sanity: {:?}",
                    self, sanity,
                );
                return Err(Error::invalid_date(what, self.clone()));
            }
        }
        Ok(())
    }

    /// Returns the sort value: the serial day number of the date's
    /// effective start, or 0 when the date is unknown or text-only.
    ///
    /// The sort value is recomputed on every mutation and is never stale.
    /// It is the value to use for ordering and indexing; equal instants
    /// recorded in different calendars have equal sort values.
    pub fn sort_value(&self) -> i32 {
        self.sortval
    }

    /// Recomputes and returns the sort value from the stored fields.
    pub fn recalc_sort_value(&mut self) -> i32 {
        self.calc_sort_value();
        self.sortval
    }

    fn calc_sort_value(&mut self) {
        let start = self.dateval.start();
        let (y, m, d) = zero_adjust(start.year, start.month, start.day);
        self.sortval = self.calendar.to_sdn(y, m, d);
    }

    /// Applies the new-year convention to the sort value: when the
    /// month/day fall at or after the year-start split, the effective
    /// year is one less than the stored year. Returns the year
    /// adjustment performed (0 or -1). The stored fields never change.
    fn adjust_newyear(&mut self) -> i32 {
        let Some(split) = self.newyear.split() else { return 0 };
        let mut year_delta = 0;
        if (self.month(), self.day()) >= split && split != (0, 0) {
            year_delta = -1;
            let (y, m, d) = zero_adjust(
                self.year() + year_delta,
                self.month(),
                self.day(),
            );
            self.sortval = self.calendar.to_sdn(y, m, d);
        }
        year_delta
    }

    /// Returns the modifier.
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Sets the modifier. The numeric fields and sort value are left
    /// untouched; use [`Date::set`] to change everything consistently.
    pub fn set_modifier(&mut self, modifier: Modifier) {
        self.modifier = modifier;
    }

    /// Returns the quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Sets the quality.
    pub fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    /// Returns the calendar.
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Sets the calendar *without* recomputing anything. The numeric
    /// fields keep their values and are reinterpreted in the new
    /// calendar on the next recomputation; use
    /// [`Date::convert_calendar`] to convert the fields instead.
    pub fn set_calendar(&mut self, calendar: Calendar) {
        self.calendar = calendar;
    }

    /// Returns the civil-year start convention.
    pub fn new_year(&self) -> NewYear {
        self.newyear
    }

    /// Sets the civil-year start convention. The sort value is not
    /// recomputed.
    pub fn set_new_year(&mut self, newyear: NewYear) {
        self.newyear = newyear;
    }

    /// Returns the free-text field.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sets the free-text field without touching anything else.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Turns this date into a text-only date: the text is stored and the
    /// sort value is forced to 0 (unordered).
    pub fn set_as_text(&mut self, text: &str) {
        self.modifier = Modifier::TextOnly;
        self.text = text.to_string();
        self.sortval = 0;
    }

    /// The first (or only) endpoint's raw fields. All zeros for a
    /// text-only date.
    pub fn start_value(&self) -> DateVal {
        if self.modifier == Modifier::TextOnly {
            return DateVal::EMPTY;
        }
        self.dateval.start()
    }

    /// The second endpoint's raw fields. All zeros unless the date is
    /// compound.
    pub fn stop_value(&self) -> DateVal {
        if !self.is_compound() {
            return DateVal::EMPTY;
        }
        self.dateval.stop().unwrap_or(DateVal::EMPTY)
    }

    /// The year, or 0 when unknown or text-only. For a compound date,
    /// the start endpoint's year.
    pub fn year(&self) -> i32 {
        self.start_value().year
    }

    /// Whether a year is actually recorded.
    pub fn year_valid(&self) -> bool {
        self.start_value().year != 0
    }

    /// The month, or 0 when unknown or text-only.
    pub fn month(&self) -> i32 {
        self.start_value().month
    }

    /// Whether a month is actually recorded.
    pub fn month_valid(&self) -> bool {
        self.start_value().month != 0
    }

    /// The day of month, or 0 when unknown or text-only.
    pub fn day(&self) -> i32 {
        self.start_value().day
    }

    /// Whether a day is actually recorded.
    pub fn day_valid(&self) -> bool {
        self.start_value().day != 0
    }

    /// The stop endpoint's year, or 0 when the date is not compound.
    pub fn stop_year(&self) -> i32 {
        self.stop_value().year
    }

    /// The stop endpoint's month, or 0 when the date is not compound.
    pub fn stop_month(&self) -> i32 {
        self.stop_value().month
    }

    /// The stop endpoint's day, or 0 when the date is not compound.
    pub fn stop_day(&self) -> i32 {
        self.stop_value().day
    }

    /// The high year estimate: a compound date's stop year when it is
    /// recorded, the plain year for a simple date, and `None` for a
    /// compound date whose stop year is unknown.
    pub fn high_year(&self) -> Option<i32> {
        if self.is_compound() {
            let year = self.stop_year();
            (year != 0).then_some(year)
        } else {
            Some(self.year())
        }
    }

    /// The `(year, month, day)` of the start endpoint.
    pub fn ymd(&self) -> (i32, i32, i32) {
        (self.year(), self.month(), self.day())
    }

    /// The `(day, month, year)` of the start endpoint.
    pub fn dmy(&self) -> (i32, i32, i32) {
        (self.day(), self.month(), self.year())
    }

    /// The `(year, month, day)` of the stop endpoint, all zeros when the
    /// date is not compound.
    pub fn stop_ymd(&self) -> (i32, i32, i32) {
        (self.stop_year(), self.stop_month(), self.stop_day())
    }

    /// The day of the week (Monday = 0) of a regular date, or `None`
    /// when the date is not regular.
    pub fn day_of_week(&self) -> Option<i32> {
        self.is_regular().then(|| self.sortval.rem_euclid(7))
    }

    /// Whether the date carries no information at all: no text and
    /// all-zero endpoints.
    pub fn is_empty(&self) -> bool {
        !((self.modifier == Modifier::TextOnly && !self.text.is_empty())
            || self.start_value() != DateVal::EMPTY
            || self.stop_value() != DateVal::EMPTY)
    }

    /// Whether the date is compound (a range or a span).
    pub fn is_compound(&self) -> bool {
        self.modifier.is_compound()
    }

    /// Whether the date is a single exact day: no modifier, no quality,
    /// and year, month and day all recorded.
    pub fn is_regular(&self) -> bool {
        self.modifier == Modifier::None
            && self.quality == Quality::None
            && self.year_valid()
            && self.month_valid()
            && self.day_valid()
    }

    /// Whether year, month and day are all recorded.
    pub fn is_full(&self) -> bool {
        self.year_valid() && self.month_valid() && self.day_valid()
    }

    /// Whether the date is text-only.
    pub fn is_textonly(&self) -> bool {
        self.modifier == Modifier::TextOnly
    }

    /// Whether the date is structured (not text-only) and known (sort
    /// value is not 0).
    pub fn is_valid(&self) -> bool {
        self.modifier != Modifier::TextOnly && self.sortval != 0
    }

    /// Whether the start endpoint is dual-dated. Always false for a
    /// text-only date.
    pub fn is_slash(&self) -> bool {
        self.modifier != Modifier::TextOnly && self.dateval.start().slash
    }

    /// Sets the start endpoint's dual-dating flag.
    pub fn set_slash(&mut self, value: bool) {
        self.dateval.start_mut().slash = value;
    }

    /// Whether the stop endpoint is dual-dated. Always false for a
    /// text-only or single-endpoint date.
    pub fn is_slash2(&self) -> bool {
        self.modifier != Modifier::TextOnly
            && self.dateval.stop().is_some_and(|v| v.slash)
    }

    /// Sets the stop endpoint's dual-dating flag.
    ///
    /// # Errors
    ///
    /// Fails when the date has no stop endpoint.
    pub fn set_slash2(&mut self, value: bool) -> Result<(), Error> {
        match &mut self.dateval {
            DateValue::Compound(_, stop) => {
                stop.slash = value;
                Ok(())
            }
            DateValue::Simple(_) => Err(Error::not_compound()),
        }
    }

    fn assert_compound(&self) -> Result<(), Error> {
        if !self.is_compound() {
            return Err(Error::not_compound());
        }
        Ok(())
    }

    fn set_ymd_raw(&mut self, year: i32, month: i32, day: i32) {
        let start = self.dateval.start_mut();
        start.year = year;
        start.month = month;
        start.day = day;
        self.calc_sort_value();
    }

    /// Sets the year, month and day of a non-compound date.
    ///
    /// # Errors
    ///
    /// Fails on a compound date: say what happens to the stop endpoint
    /// with [`Date::set_ymd_and_stop`] instead.
    pub fn set_ymd(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<(), Error> {
        if self.is_compound() {
            return Err(Error::value(
                "setting a compound date's fields requires choosing what \
                 happens to the stop endpoint; use set_ymd_and_stop",
            ));
        }
        self.set_ymd_raw(year, month, day);
        Ok(())
    }

    /// Sets the year, month and day, stating explicitly what happens to
    /// a compound date's stop endpoint: when `remove_stop_date` is true
    /// the stop endpoint is collapsed onto the same values, otherwise it
    /// is left alone. On a non-compound date the flag has no effect.
    pub fn set_ymd_and_stop(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
        remove_stop_date: bool,
    ) {
        self.set_ymd_raw(year, month, day);
        if remove_stop_date && self.is_compound() {
            let _ = self.set2_ymd(year, month, day);
        }
    }

    /// Sets the year, month and day of the stop endpoint of a compound
    /// date. The sort value (which tracks the start endpoint) is not
    /// affected.
    ///
    /// # Errors
    ///
    /// Fails when the date is not compound.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Date;
    ///
    /// let mut d = Date::from_ymd(2013, 2, 2);
    /// assert!(d.set2_ymd(2014, 1, 1).unwrap_err().is_not_compound());
    /// ```
    pub fn set2_ymd(
        &mut self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<(), Error> {
        self.assert_compound()?;
        let stop = DateVal { day, month, year, slash: false };
        self.dateval = match self.dateval {
            DateValue::Compound(start, old) => DateValue::Compound(
                start,
                DateVal { slash: old.slash, ..stop },
            ),
            DateValue::Simple(start) => DateValue::Compound(start, stop),
        };
        Ok(())
    }

    /// Offsets one endpoint's year/month fields in place, carrying month
    /// overflow into the year. Returns true when the day column still
    /// needs resolving through the day count (a day offset was asked
    /// for, or the stored day may not exist in the new month).
    fn apply_ymd_offset(
        &mut self,
        years: i32,
        months: i32,
        days: i32,
        second: bool,
    ) -> bool {
        let mut v = if second {
            self.dateval.stop().unwrap_or(DateVal::EMPTY)
        } else {
            self.dateval.start()
        };
        if v.year != 0 {
            v.year += years;
        } else if years != 0 {
            v.year = years;
        }
        if v.month != 0 {
            v.month += months;
        } else if months != 0 {
            v.month = if months < 0 { 1 + months } else { months };
        }
        if months != 0 {
            if v.month == 0 {
                v.month = 12;
                v.year -= 1;
            } else if v.month < 0 {
                v.year -= (-v.month).div_euclid(12) + 1;
                v.month = v.month.rem_euclid(12);
            } else if v.month > 12 {
                v.year += v.month.div_euclid(12);
                v.month = v.month.rem_euclid(12);
            }
        }
        if second {
            self.dateval = match self.dateval {
                DateValue::Compound(start, _) => {
                    DateValue::Compound(start, v)
                }
                DateValue::Simple(start) => DateValue::Compound(start, v),
            };
        } else {
            *self.dateval.start_mut() = v;
        }
        self.calc_sort_value();
        days != 0 || v.day > 28
    }

    /// Offsets the date in place by the given years, months and days.
    /// Month arithmetic carries into the year; the day column is then
    /// resolved through the Gregorian day count. Both endpoints of a
    /// compound date move.
    pub fn set_ymd_offset(&mut self, years: i32, months: i32, days: i32) {
        if self.apply_ymd_offset(years, months, days, false) {
            let (y, m, d) = self.offset(days);
            self.set_ymd_raw(y, m, d);
        }
        if self.is_compound() {
            let _ = self.set2_ymd_offset(years, months, days);
        }
    }

    /// Offsets the stop endpoint of a compound date in place.
    ///
    /// # Errors
    ///
    /// Fails when the date is not compound.
    pub fn set2_ymd_offset(
        &mut self,
        years: i32,
        months: i32,
        days: i32,
    ) -> Result<(), Error> {
        self.assert_compound()?;
        if self.apply_ymd_offset(years, months, days, true) {
            let (sy, sm, sd) = self.stop_ymd();
            let stop = Date::from_ymd(sy, sm, sd);
            let (y, m, d) = stop.offset(days);
            if let DateValue::Compound(_, v) = &mut self.dateval {
                v.year = y;
                v.month = m;
                v.day = d;
            }
        }
        Ok(())
    }

    /// Returns a copy of this date offset by the given years, months and
    /// days.
    ///
    /// The arithmetic always runs through the Gregorian calendar, where
    /// month and day carries are well defined, and converts back
    /// afterward.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Date;
    ///
    /// let d = Date::from_ymd(2008, 1, 1);
    /// assert_eq!(d.add_offset(0, 0, 32).ymd(), (2008, 2, 2));
    /// assert_eq!(d.add_offset(0, -11, 0).ymd(), (2007, 2, 1));
    /// ```
    pub fn add_offset(&self, years: i32, months: i32, days: i32) -> Date {
        let orig_cal = self.calendar;
        let mut retval = if orig_cal != Calendar::Gregorian {
            self.to_calendar(Calendar::Gregorian)
        } else {
            self.clone()
        };
        retval.set_ymd_offset(years, months, days);
        if orig_cal != Calendar::Gregorian {
            retval.convert_calendar(orig_cal);
        }
        retval
    }

    /// Returns a copy of this date offset backward; the negation of
    /// [`Date::add_offset`].
    pub fn sub_offset(&self, years: i32, months: i32, days: i32) -> Date {
        self.add_offset(-years, -months, -days)
    }

    /// Returns a copy with the given year, month and day.
    ///
    /// # Errors
    ///
    /// Fails on a compound date, like [`Date::set_ymd`].
    pub fn copy_ymd(
        &self,
        year: i32,
        month: i32,
        day: i32,
    ) -> Result<Date, Error> {
        let mut retval = self.clone();
        retval.set_ymd(year, month, day)?;
        Ok(retval)
    }

    /// Returns a copy with the given year, month and day, stating what
    /// happens to a compound date's stop endpoint as in
    /// [`Date::set_ymd_and_stop`].
    pub fn copy_ymd_and_stop(
        &self,
        year: i32,
        month: i32,
        day: i32,
        remove_stop_date: bool,
    ) -> Date {
        let mut retval = self.clone();
        retval.set_ymd_and_stop(year, month, day, remove_stop_date);
        retval
    }

    /// The Gregorian `(year, month, day)` that lies `days` away from
    /// this date on the day count.
    pub fn offset(&self, days: i32) -> (i32, i32, i32) {
        cal::gregorian::from_sdn(self.sortval + days)
    }

    /// Like [`Date::offset`], but wraps the result in a plain date.
    pub fn offset_date(&self, days: i32) -> Date {
        let (y, m, d) = self.offset(days);
        Date::from_ymd(y, m, d)
    }

    /// Converts the stored fields into the target calendar, in place.
    ///
    /// The start endpoint is re-derived from the sort value; a compound
    /// date's stop endpoint is independently round-tripped through its
    /// own serial day. Slash flags are cleared, and the new-year
    /// convention is reset to [`NewYear::Jan1`] — it described the
    /// previous calendar's civil year, not the new one.
    ///
    /// Converting to the current calendar with the default new-year
    /// convention is a no-op.
    pub fn convert_calendar(&mut self, calendar: Calendar) {
        if calendar == self.calendar && self.newyear == NewYear::Jan1 {
            return;
        }
        self.reconvert(calendar);
    }

    /// The conversion behind [`Date::convert_calendar`], performed even
    /// when the target calendar is the current one. The sanity check in
    /// [`Date::set`] uses this to canonicalize fields.
    fn reconvert(&mut self, calendar: Calendar) {
        let (year, month, day) = calendar.from_sdn(self.sortval);
        let start = DateVal { day, month, year, slash: false };
        if self.is_compound() {
            let stop = self.dateval.stop().unwrap_or(DateVal::EMPTY);
            let (ry, rm, rd) = zero_adjust(stop.year, stop.month, stop.day);
            let sdn = self.calendar.to_sdn(ry, rm, rd);
            let (ny, nm, nd) = calendar.from_sdn(sdn);
            self.dateval = DateValue::Compound(
                start,
                DateVal { day: nd, month: nm, year: ny, slash: false },
            );
        } else {
            self.dateval = DateValue::Simple(start);
        }
        self.calendar = calendar;
        self.newyear = NewYear::Jan1;
    }

    /// Returns a copy of this date converted to the target calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Calendar, Date};
    ///
    /// let d = Date::from_ymd(2009, 12, 8).to_calendar(Calendar::Hebrew);
    /// assert_eq!(d.year(), 5770);
    /// ```
    pub fn to_calendar(&self, calendar: Calendar) -> Date {
        let mut retval = self.clone();
        retval.convert_calendar(calendar);
        retval
    }

    /// The year this date has in the given calendar, converting a copy
    /// if needed.
    pub fn year_in_calendar(&self, calendar: Calendar) -> i32 {
        if calendar == self.calendar {
            return self.year();
        }
        self.to_calendar(calendar).year()
    }

    /// Removes the month and day details (from both endpoints of a
    /// compound date), leaving an approximate year-only date.
    pub fn make_vague(&mut self) {
        match &mut self.dateval {
            DateValue::Simple(v) => {
                v.month = 0;
                v.day = 0;
            }
            DateValue::Compound(start, stop) => {
                start.month = 0;
                start.day = 0;
                stop.month = 0;
                stop.day = 0;
            }
        }
        self.calc_sort_value();
    }

    /// Sets the start endpoint's year and recomputes the sort value.
    pub fn set_year(&mut self, year: i32) {
        self.dateval.start_mut().year = year;
        self.calc_sort_value();
    }

    /// The `(month, day)` on which to observe this date's anniversary in
    /// the given year. A 29 February anniversary in a year without one
    /// is resolved according to `policy`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Date, Feb29Policy};
    ///
    /// let d = Date::from_ymd(2000, 2, 29);
    /// assert_eq!(d.anniversary(2001, Feb29Policy::Feb28), (2, 28));
    /// assert_eq!(d.anniversary(2001, Feb29Policy::Mar1), (3, 1));
    /// assert_eq!(d.anniversary(2004, Feb29Policy::Feb28), (2, 29));
    /// ```
    pub fn anniversary(
        &self,
        year: i32,
        policy: Feb29Policy,
    ) -> (i32, i32) {
        let start = self.dateval.start();
        let (mut month, mut day) = (start.month, start.day);
        if month == 2 && day == 29 && !cal::gregorian::is_leap_year(year) {
            match policy {
                Feb29Policy::Feb28 => day = 28,
                Feb29Policy::Mar1 => {
                    month = 3;
                    day = 1;
                }
                Feb29Policy::Keep => {}
            }
        }
        (month, day)
    }

    /// Structural equality: same calendar, modifier, quality and numeric
    /// fields — or, for two text-only dates, the same text.
    ///
    /// Contrast with comparing [`Date::sort_value`]s, which only asks
    /// whether two dates name the same instant.
    pub fn is_equal(&self, other: &Date) -> bool {
        if self.modifier == other.modifier
            && self.modifier == Modifier::TextOnly
        {
            return self.text == other.text;
        }
        self.calendar == other.calendar
            && self.modifier == other.modifier
            && self.quality == other.quality
            && self.dateval == other.dateval
    }

    /// The bracketing interval this date could cover: a minimal start
    /// and maximal stop, as Gregorian `(year, month, day)` triples.
    ///
    /// A plain date brackets itself, with unknown month/day defaulted to
    /// the month/day bounds. "Before" brackets from `before_range` years
    /// back up to the day before the date; "after" mirrors it with
    /// `after_range`. "About" — and any date of estimated quality —
    /// spreads `about_range` years to both sides. A compound date
    /// brackets its two stored endpoints.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Calendar, Config, Date, DateVal, DateValue, Modifier, NewYear, Quality};
    ///
    /// let cfg = Config::default();
    /// let mut d = Date::new();
    /// d.set(
    ///     Quality::None,
    ///     Modifier::Range,
    ///     Calendar::Gregorian,
    ///     DateValue::Compound(
    ///         DateVal::from_dmy(1, 1, 2000),
    ///         DateVal::from_dmy(1, 1, 2010),
    ///     ),
    ///     None,
    ///     NewYear::Jan1,
    /// )?;
    /// assert_eq!(d.start_stop_range(&cfg), ((2000, 1, 1), (2010, 1, 1)));
    /// # Ok::<(), kalends::Error>(())
    /// ```
    pub fn start_stop_range(
        &self,
        cfg: &Config,
    ) -> ((i32, i32, i32), (i32, i32, i32)) {
        fn date_offset(
            ymd: (i32, i32, i32),
            offset: i32,
        ) -> (i32, i32, i32) {
            Date::from_ymd(ymd.0, ymd.1, ymd.2).offset(offset)
        }

        let mut datecopy = self.clone();
        datecopy.convert_calendar(Calendar::Gregorian);

        let start = datecopy.start_value().ymd();
        let stop = datecopy.stop_value().ymd();
        let stop = if stop == (0, 0, 0) { start } else { stop };

        let mut stopmax = stop;
        if stopmax.0 == 0 {
            stopmax.0 = start.0;
        }
        if stopmax.1 == 0 {
            stopmax.1 = 12;
        }
        if stopmax.2 == 0 {
            stopmax.2 = 31;
        }
        let mut startmin = start;
        if startmin.1 == 0 {
            startmin.1 = 1;
        }
        if startmin.2 == 0 {
            startmin.2 = 1;
        }

        if matches!(self.modifier, Modifier::Before | Modifier::To) {
            if self.modifier == Modifier::Before {
                stopmax = date_offset(startmin, -1);
            }
            startmin =
                (stopmax.0 - cfg.before_range, stopmax.1, stopmax.2);
        } else if matches!(self.modifier, Modifier::After | Modifier::From)
        {
            if self.modifier == Modifier::After {
                startmin = date_offset(stopmax, 1);
            }
            stopmax = (startmin.0 + cfg.after_range, startmin.1, startmin.2);
        } else if self.modifier == Modifier::About
            || self.quality == Quality::Estimated
        {
            startmin =
                (startmin.0 - cfg.about_range, startmin.1, startmin.2);
            stopmax = (stopmax.0 + cfg.about_range, stopmax.1, stopmax.2);
        }
        (startmin, stopmax)
    }

    /// Fuzzy comparison over the two dates' bracketing intervals.
    ///
    /// When either date is text-only, `Overlaps` degrades to
    /// case-insensitive containment of `other`'s text in this date's
    /// text, `Equals` to exact text equality, and every other comparison
    /// is false. When either sort value is 0 (unknown), every comparison
    /// is false.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::{Calendar, Comparison, Config, Date, DateVal, DateValue,
    ///               Modifier, NewYear, Quality};
    ///
    /// let cfg = Config::default();
    /// let mut before = Date::new();
    /// before.set(
    ///     Quality::None,
    ///     Modifier::Before,
    ///     Calendar::Gregorian,
    ///     DateValue::Simple(DateVal::from_dmy(0, 0, 1960)),
    ///     None,
    ///     NewYear::Jan1,
    /// )?;
    ///
    /// let eve = Date::from_ymd(1959, 12, 31);
    /// let day = Date::from_ymd(1960, 1, 1);
    /// assert!(before.matches(&eve, Comparison::Overlaps, &cfg));
    /// assert!(!before.matches(&day, Comparison::Overlaps, &cfg));
    /// # Ok::<(), kalends::Error>(())
    /// ```
    pub fn matches(
        &self,
        other: &Date,
        comparison: Comparison,
        cfg: &Config,
    ) -> bool {
        if self.modifier == Modifier::TextOnly
            || other.modifier == Modifier::TextOnly
        {
            return match comparison {
                Comparison::Overlaps => self
                    .text
                    .to_uppercase()
                    .contains(&other.text.to_uppercase()),
                Comparison::Equals => self.text == other.text,
                _ => false,
            };
        }
        if self.sortval == 0 || other.sortval == 0 {
            return false;
        }

        let (other_start, other_stop) = other.start_stop_range(cfg);
        let (self_start, self_stop) = self.start_stop_range(cfg);

        match comparison {
            Comparison::Overlaps => {
                (self_start <= other_start && other_start <= self_stop)
                    || (self_start <= other_stop
                        && other_stop <= self_stop)
                    || (other_start <= self_start
                        && self_start <= other_stop)
                    || (other_start <= self_stop
                        && self_stop <= other_stop)
            }
            Comparison::Equals => {
                self_start == other_start && self_stop == other_stop
            }
            Comparison::Before => self_start < other_stop,
            Comparison::BeforeOrEqual => self_start <= other_stop,
            Comparison::StrictlyBefore => self_stop < other_start,
            Comparison::After => self_stop > other_start,
            Comparison::AfterOrEqual => self_stop >= other_start,
            Comparison::StrictlyAfter => self_start > other_stop,
        }
    }

    /// Non-bracketing match, used for matching a point against recorded
    /// date ranges (as in place histories): exact sort-value equality
    /// against a plain date, strict ordering against an open-ended
    /// bound, and containment within a compound date's bracket.
    pub fn matches_exact(&self, other: &Date, cfg: &Config) -> bool {
        match other.modifier {
            Modifier::None => other.sortval == self.sortval,
            Modifier::Before | Modifier::To => other.sortval > self.sortval,
            Modifier::After | Modifier::From => {
                other.sortval < self.sortval
            }
            Modifier::Range | Modifier::Span => {
                let (start, stop) = other.start_stop_range(cfg);
                let start = Date::from_ymd(start.0, start.1, start.2);
                let stop = Date::from_ymd(stop.0, stop.1, stop.2);
                start.sortval <= self.sortval
                    && self.sortval <= stop.sortval
            }
            _ => false,
        }
    }

    /// Converts this date to its flat persistence form. With `no_text`,
    /// the text field is dropped.
    pub fn serialize(&self, no_text: bool) -> RawDate {
        RawDate {
            calendar: self.calendar.code(),
            modifier: self.modifier.code(),
            quality: self.quality.code(),
            dateval: self.dateval,
            text: if no_text { String::new() } else { self.text.clone() },
            sortval: self.sortval,
            newyear: self.newyear,
        }
    }

    /// Rebuilds a date from its flat persistence form.
    ///
    /// Only the enumeration codes are validated; the fields themselves
    /// are trusted, including the stored sort value (it is derived and
    /// can be recomputed with [`Date::recalc_sort_value`]).
    ///
    /// # Errors
    ///
    /// Fails when a calendar, modifier or quality code is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use kalends::Date;
    ///
    /// let d = Date::from_ymd(1789, 11, 4);
    /// let rebuilt = Date::unserialize(d.serialize(false))?;
    /// assert!(rebuilt.is_equal(&d));
    /// # Ok::<(), kalends::Error>(())
    /// ```
    pub fn unserialize(raw: RawDate) -> Result<Date, Error> {
        Ok(Date {
            calendar: Calendar::from_code(i64::from(raw.calendar))?,
            modifier: Modifier::from_code(i64::from(raw.modifier))?,
            quality: Quality::from_code(i64::from(raw.quality))?,
            dateval: raw.dateval,
            text: raw.text,
            sortval: raw.sortval,
            newyear: raw.newyear,
        })
    }
}

/// Compares a round-tripped dateval against the caller's original,
/// endpoint by endpoint. A zero day/month/year that came back as 1 is the
/// tolerated unknown-field substitution; the year additionally tolerates
/// the new-year adjustment delta.
fn compare_sanity(
    sanity: &DateValue,
    value: &DateValue,
    year_delta: i32,
) -> Result<(), &'static str> {
    let pairs: [Option<(DateVal, DateVal)>; 2] =
        match (sanity, value) {
            (
                DateValue::Compound(s1, s2),
                DateValue::Compound(v1, v2),
            ) => [Some((*s1, *v1)), Some((*s2, *v2))],
            _ => [Some((sanity.start(), value.start())), None],
        };
    for (adjusted, original) in pairs.into_iter().flatten() {
        if adjusted.slash != original.slash {
            return Err("the slash flag did not survive the round trip");
        }
        for (a, o) in
            [(adjusted.day, original.day), (adjusted.month, original.month)]
        {
            if a != o && !(o == 0 && a == 1) {
                return Err(
                    "no such day and month in this calendar and year",
                );
            }
        }
        let a = adjusted.year - year_delta;
        if a != original.year && !(original.year == 0 && a == 1) {
            return Err("no such year in this calendar");
        }
    }
    Ok(())
}

impl core::fmt::Display for Date {
    /// Renders the date in a diagnostic form: quality and modifier
    /// prefixes, `YYYY-MM-DD` fields (doubled for a compound date, or in
    /// the `YYYY/Y-MM-DD` dual-dated form), and a parenthesized calendar
    /// and new-year suffix when either is not the default.
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let qual = match self.quality {
            Quality::Estimated => "est ",
            Quality::Calculated => "calc ",
            Quality::None => "",
        };
        let pref = match self.modifier {
            Modifier::Before => "bef ",
            Modifier::After => "aft ",
            Modifier::From => "from ",
            Modifier::To => "to ",
            Modifier::About => "abt ",
            _ => "",
        };

        let nyear = self.newyear.token();
        let cal = if self.calendar != Calendar::Gregorian {
            if !nyear.is_empty() {
                format!(" ({},{})", self.calendar.name(), nyear)
            } else {
                format!(" ({})", self.calendar.name())
            }
        } else if !nyear.is_empty() {
            format!(" ({nyear})")
        } else {
            String::new()
        };

        let val = if self.modifier == Modifier::TextOnly {
            self.text.clone()
        } else if self.is_slash() {
            let v = self.dateval.start();
            format!(
                "{:04}/{}-{:02}-{:02}",
                v.year - 1,
                v.year.rem_euclid(10),
                v.month,
                v.day,
            )
        } else if self.is_compound() {
            let s = self.dateval.start();
            let p = self.dateval.stop().unwrap_or(DateVal::EMPTY);
            format!(
                "{:04}-{:02}-{:02} - {:04}-{:02}-{:02}",
                s.year, s.month, s.day, p.year, p.month, p.day,
            )
        } else {
            let v = self.dateval.start();
            format!("{:04}-{:02}-{:02}", v.year, v.month, v.day)
        };
        write!(f, "{qual}{pref}{val}{cal}")
    }
}
