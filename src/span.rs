use crate::{
    cal::Calendar,
    config::Config,
    date::{Comparison, Date, Modifier, NewYear},
};

/// The (years, months, days) decomposition of a [`Span`], or the marker
/// that no decomposition could be established.
///
/// `Unknown` is a real outcome, not an error: it covers spans between two
/// open bounds of the same direction ("before X" to "before Y") and the
/// rare case where the calendar-irregularity correction fails to
/// converge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Delta {
    /// A (years, months, days) difference. Negative when the span runs
    /// backward.
    Ymd(i32, i32, i32),
    /// No decomposition is available.
    Unknown,
}

impl Delta {
    /// The decomposition as a tuple, or `None` when unknown.
    pub fn ymd(self) -> Option<(i32, i32, i32)> {
        match self {
            Delta::Ymd(y, m, d) => Some((y, m, d)),
            Delta::Unknown => None,
        }
    }
}

/// The elapsed time between two dates.
///
/// A span is computed once, at construction, from the pair of input
/// dates: they are normalized to the Gregorian calendar, swapped into
/// chronological order (remembering the swap in a sign flag), and then a
/// case table over the two modifiers produces a sortable
/// `(base, spread)` pair and a `(min, max)` day-count interval that
/// account for each side's uncertainty.
///
/// The human-facing decomposition into years, months and days is
/// computed on demand by [`Span::delta`] and rendered by
/// [`Span::format`].
///
/// # Example
///
/// ```
/// use kalends::{Config, Date, Span};
///
/// let cfg = Config::default();
/// let born = Date::from_ymd(1963, 12, 4);
/// let died = Date::from_ymd(2007, 12, 23);
///
/// let age = Span::new(&died, &born, cfg);
/// assert_eq!(age.delta().ymd(), Some((44, 0, 19)));
/// assert_eq!(age.as_days(), 16090);
/// assert_eq!(age.to_string(), "44 years, 19 days");
///
/// // Swapping the inputs negates the span.
/// let backward = Span::new(&born, &died, cfg);
/// assert_eq!(backward.as_days(), -16090);
/// assert_eq!(backward.to_string(), "(44 years, 19 days)");
/// ```
#[derive(Clone, Debug)]
pub struct Span {
    valid: bool,
    date1: Date,
    date2: Date,
    sort: (i32, i32),
    minmax: (i32, i32),
    negative: bool,
    config: Config,
}

/// The modifier groups the case tables dispatch on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Group {
    Single,
    Before,
    After,
    About,
    Compound,
}

/// Grouping for the chronologically later date. Open span halves do not
/// participate on this side.
fn group1(modifier: Modifier) -> Option<Group> {
    match modifier {
        Modifier::None => Some(Group::Single),
        Modifier::Before => Some(Group::Before),
        Modifier::After => Some(Group::After),
        Modifier::About => Some(Group::About),
        Modifier::Range | Modifier::Span => Some(Group::Compound),
        _ => None,
    }
}

/// Grouping for the chronologically earlier date; `From`/`To` ride the
/// open-bound groups.
fn group2(modifier: Modifier) -> Option<Group> {
    match modifier {
        Modifier::None => Some(Group::Single),
        Modifier::Before | Modifier::To => Some(Group::Before),
        Modifier::After | Modifier::From => Some(Group::After),
        Modifier::About => Some(Group::About),
        Modifier::Range | Modifier::Span => Some(Group::Compound),
        _ => None,
    }
}

impl Span {
    /// Computes the span between two dates.
    ///
    /// The span is invalid — every accessor yields its unknown value —
    /// when either input's sort value is 0 (an unknown or text-only
    /// date). The tolerances in `cfg` widen the result according to each
    /// side's modifier.
    pub fn new(date1: &Date, date2: &Date, config: Config) -> Span {
        let valid = date1.sort_value() != 0 && date2.sort_value() != 0;
        let mut span = Span {
            valid,
            date1: date1.clone(),
            date2: date2.clone(),
            sort: (-9999, -9999),
            minmax: (9999, -9999),
            negative: false,
            config,
        };
        if !span.valid {
            return span;
        }
        if span.date1.sort_value() < span.date2.sort_value() {
            core::mem::swap(&mut span.date1, &mut span.date2);
            span.negative = true;
        }
        if span.date1.calendar() != Calendar::Gregorian {
            span.date1 = span.date1.to_calendar(Calendar::Gregorian);
        }
        if span.date2.calendar() != Calendar::Gregorian {
            span.date2 = span.date2.to_calendar(Calendar::Gregorian);
        }
        match group1(span.date1.modifier()) {
            Some(Group::Single) => span.init_single(),
            Some(Group::Before) => span.init_before(),
            Some(Group::After) => span.init_after(),
            Some(Group::About) => span.init_about(),
            Some(Group::Compound) => span.init_compound(),
            None => {}
        }
        span
    }

    /// The case row for a plain later date.
    fn init_single(&mut self) {
        let val = self.date1.sort_value() - self.date2.sort_value();
        let before = self.config.before_range;
        let after = self.config.after_range;
        let about = self.config.about_range;
        match group2(self.date2.modifier()) {
            Some(Group::Single) => {
                self.sort = (val, 0);
                self.minmax = (val, val);
            }
            Some(Group::Before) => {
                self.sort = (val, -before);
                self.minmax = (val - before, val);
            }
            Some(Group::After) => {
                self.sort = (val, after);
                self.minmax = (val, val + after);
            }
            Some(Group::About) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + about);
            }
            Some(Group::Compound) => {
                let (start, stop) = self.range_dates(&self.date2);
                let val1 = self.date1.sort_value() - stop.sort_value();
                let val2 = self.date1.sort_value() - start.sort_value();
                self.sort = (val1, val2 - val1);
                self.minmax = (val1, val2);
            }
            None => {}
        }
    }

    /// The case row for a "before" later date.
    fn init_before(&mut self) {
        let val = self.date1.sort_value() - self.date2.sort_value();
        let before = self.config.before_range;
        let after = self.config.after_range;
        let about = self.config.about_range;
        match group2(self.date2.modifier()) {
            Some(Group::Single) => {
                self.sort = (val, 0);
                self.minmax = (0, val);
            }
            Some(Group::Before) => {
                self.sort = (val, -before);
                self.minmax = (val, val + before);
            }
            Some(Group::After) => {
                self.sort = (val, -after);
                self.minmax = (0, val);
            }
            Some(Group::About) | Some(Group::Compound) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + about);
            }
            None => {}
        }
    }

    /// The case row for an "after" later date.
    fn init_after(&mut self) {
        let val = self.date1.sort_value() - self.date2.sort_value();
        let before = self.config.before_range;
        let after = self.config.after_range;
        let about = self.config.about_range;
        match group2(self.date2.modifier()) {
            Some(Group::Single) => {
                self.sort = (val, after);
                self.minmax = (val, val + after);
            }
            Some(Group::Before) => {
                self.sort = (val, after);
                self.minmax = (val - before, val + after);
            }
            Some(Group::After) => {
                self.sort = (val, after);
                self.minmax = (val, val + after);
            }
            Some(Group::About) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + after);
            }
            Some(Group::Compound) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + about);
            }
            None => {}
        }
    }

    /// The case row for an "about" later date.
    fn init_about(&mut self) {
        let val = self.date1.sort_value() - self.date2.sort_value();
        let before = self.config.before_range;
        let after = self.config.after_range;
        let about = self.config.about_range;
        match group2(self.date2.modifier()) {
            Some(Group::Single) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + about);
            }
            Some(Group::Before) => {
                self.sort = (val, -before);
                self.minmax = (val - before, val + about);
            }
            Some(Group::After) => {
                self.sort = (val, after);
                self.minmax = (val - about, val + about);
            }
            Some(Group::About) | Some(Group::Compound) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + about);
            }
            None => {}
        }
    }

    /// The case row for a compound later date.
    fn init_compound(&mut self) {
        let val = self.date1.sort_value() - self.date2.sort_value();
        let before = self.config.before_range;
        let after = self.config.after_range;
        let about = self.config.about_range;
        match group2(self.date2.modifier()) {
            Some(Group::Single) => {
                let (start, stop) = self.range_dates(&self.date1);
                let val1 = start.sort_value() - self.date2.sort_value();
                let val2 = stop.sort_value() - self.date2.sort_value();
                self.sort = (val1, val2 - val1);
                self.minmax = (val1, val2);
            }
            Some(Group::Before) => {
                self.sort = (val, before);
                self.minmax = (val - before, val + before);
            }
            Some(Group::After) => {
                self.sort = (val, -after);
                self.minmax = (val - after, val + after);
            }
            Some(Group::About) => {
                self.sort = (val, -about);
                self.minmax = (val - about, val + about);
            }
            Some(Group::Compound) => {
                let (start1, stop1) = self.range_dates(&self.date1);
                let (start2, stop2) = self.range_dates(&self.date2);
                let val1 = start1.sort_value() - stop2.sort_value();
                let val2 = stop1.sort_value() - start2.sort_value();
                self.sort = (val1, val2 - val1);
                self.minmax = (val1, val2);
            }
            None => {}
        }
    }

    /// A date's bracketing interval as a pair of plain dates.
    fn range_dates(&self, date: &Date) -> (Date, Date) {
        let (start, stop) = date.start_stop_range(&self.config);
        (
            Date::from_ymd(start.0, start.1, start.2),
            Date::from_ymd(stop.0, stop.1, stop.2),
        )
    }

    /// Whether both input dates were known; when false, every accessor
    /// yields its unknown value.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the caller's dates arrived in reverse chronological order
    /// and were swapped.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The `(base, spread)` pair used for ordering spans.
    pub fn sort_key(&self) -> (i32, i32) {
        self.sort
    }

    /// The absolute `(earliest, latest)` day-count interval this span
    /// could cover.
    pub fn minmax(&self) -> (i32, i32) {
        self.minmax
    }

    /// The signed day-count estimate of this span.
    pub fn as_days(&self) -> i32 {
        if self.negative {
            -(self.sort.0 + self.sort.1)
        } else {
            self.sort.0 + self.sort.1
        }
    }

    /// The (years, months, days) decomposition of this span.
    pub fn delta(&self) -> Delta {
        if !self.valid {
            return Delta::Unknown;
        }
        self.diff(&self.date1, &self.date2)
    }

    fn signed(&self, years: i32, months: i32, days: i32) -> Delta {
        if self.negative {
            Delta::Ymd(-years, -months, -days)
        } else {
            Delta::Ymd(years, months, days)
        }
    }

    /// Decomposes `date1 - date2` into (years, months, days) with civil
    /// borrow arithmetic, then corrects the day column against the real
    /// day counts.
    ///
    /// Civil subtraction treats every month as 31 days when borrowing,
    /// so for fully specified dates the estimate is re-applied to
    /// `date1` and walked, a day at a time and at most 60 times, until
    /// the result lands exactly on `date2`. Failing to land inside the
    /// bound yields [`Delta::Unknown`].
    fn diff(&self, date1: &Date, date2: &Date) -> Delta {
        // With a movable new year in play the civil fields do not align
        // with the sort value, so fall back to flat 365/30 division of
        // the day count.
        if date1.new_year() != NewYear::Jan1
            || date2.new_year() != NewYear::Jan1
        {
            let days = date1.sort_value() - date2.sort_value();
            let years = days.div_euclid(365);
            let months = (days - years * 365).div_euclid(30);
            let days = (days - years * 365) - months * 30;
            return self.signed(years, months, days);
        }

        let or_one = |n: i32| if n != 0 { n } else { 1 };
        let (y1, m1, d1) = date1.ymd();
        let (y2, m2, d2) = date2.ymd();
        let mut ymd1 = [or_one(y1), or_one(m1), or_one(d1)];
        let ymd2 = [or_one(y2), or_one(m2), or_one(d2)];

        // Borrow a day as 31 and a month as 12.
        if ymd2[2] > ymd1[2] {
            if ymd2[1] > ymd1[1] {
                ymd1[0] -= 1;
                ymd1[1] += 12;
            }
            ymd1[1] -= 1;
            ymd1[2] += 31;
        }
        if ymd2[1] > ymd1[1] {
            ymd1[0] -= 1;
            ymd1[1] += 12;
        }
        let mut days = ymd1[2] - ymd2[2];
        let mut months = ymd1[1] - ymd2[1];
        let mut years = ymd1[0] - ymd2[0];
        if days > 31 {
            months += days.div_euclid(31);
            days = days.rem_euclid(31);
        }
        if months > 12 {
            years += months.div_euclid(12);
            months = months.rem_euclid(12);
        }

        // The estimate assumed 31-day months; check it against the real
        // day counts and walk the day column until it lands.
        if date1.is_full() && date2.is_full() {
            let cfg = &self.config;
            let mut edate = date1.sub_offset(years, months, days);
            if edate.matches(date2, Comparison::Before, cfg) {
                let mut diff = 0;
                while edate.matches(date2, Comparison::StrictlyBefore, cfg)
                    && diff < 60
                {
                    diff += 1;
                    edate = edate.add_offset(0, 0, diff);
                }
                if diff == 60 {
                    return Delta::Unknown;
                }
                return self.signed(years, months, days - diff);
            }
            if edate.matches(date2, Comparison::After, cfg) {
                let mut diff: i32 = 0;
                while edate.matches(date2, Comparison::StrictlyAfter, cfg)
                    && diff > -60
                {
                    diff -= 1;
                    edate = edate.sub_offset(0, 0, diff.abs());
                }
                if diff == -60 {
                    return Delta::Unknown;
                }
                return self.signed(years, months, days + diff);
            }
        }
        self.signed(years, months, days)
    }

    /// Renders the span as an age: capped at the configured maximum
    /// plausible age, at years+months precision.
    pub fn as_age(&self) -> String {
        self.render(2, true)
    }

    /// Renders the span as elapsed time, uncapped.
    pub fn as_time(&self) -> String {
        self.render(2, false)
    }

    /// Renders the span at a chosen precision: 1 keeps only the most
    /// significant nonzero component, 2 the two most significant, 3 all
    /// three. With `as_age`, a span longer than the configured maximum
    /// plausible age renders as "greater than N years".
    pub fn format(&self, precision: u8, as_age: bool) -> String {
        self.render(precision, as_age)
    }

    fn render(&self, precision: u8, as_age: bool) -> String {
        let mut repr = String::from("unknown");
        if self.valid {
            let d12 = self.diff(&self.date1, &self.date2);
            let fdate12 = self.format_delta(&d12, precision);
            let fdate12p1 = self.format_delta(&d12, 1);
            let mod1 = self.date1.modifier();
            let mod2 = self.date2.modifier();
            let over_age = as_age
                && matches!(d12, Delta::Ymd(y, _, _) if y > self.config.max_age);

            if over_age {
                repr =
                    format!("greater than {} years", self.config.max_age);
            } else if mod1 == Modifier::None {
                if mod2 == Modifier::None {
                    repr = fdate12;
                } else if mod2 == Modifier::Before {
                    repr = format!("more than {fdate12}");
                } else if mod2 == Modifier::After {
                    repr = format!("less than {fdate12}");
                } else if mod2 == Modifier::About {
                    repr = format!("about {fdate12p1}");
                } else if self.date2.is_compound() {
                    let (start, stop) =
                        self.range_dates(&self.date2);
                    repr = format!(
                        "between {} and {}",
                        self.format_delta(
                            &self.diff(&self.date1, &stop),
                            precision,
                        ),
                        self.format_delta(
                            &self.diff(&self.date1, &start),
                            precision,
                        ),
                    );
                }
            } else if mod1 == Modifier::Before {
                if mod2 == Modifier::Before {
                    repr = self.format_delta(&Delta::Unknown, precision);
                } else if mod2 == Modifier::About {
                    repr = format!("less than about {fdate12}");
                } else if matches!(mod2, Modifier::None | Modifier::After)
                    || self.date2.is_compound()
                {
                    repr = format!("less than {fdate12}");
                }
            } else if mod1 == Modifier::After {
                if mod2 == Modifier::After {
                    repr = self.format_delta(&Delta::Unknown, precision);
                } else if mod2 == Modifier::About {
                    repr = format!("more than about {fdate12p1}");
                } else if matches!(mod2, Modifier::None | Modifier::Before)
                    || self.date2.is_compound()
                {
                    repr = format!("more than {fdate12}");
                }
            } else if mod1 == Modifier::About {
                if mod2 == Modifier::Before {
                    repr = format!("more than about {fdate12p1}");
                } else if mod2 == Modifier::After {
                    repr = format!("less than about {fdate12p1}");
                } else if matches!(mod2, Modifier::None | Modifier::About)
                    || self.date2.is_compound()
                {
                    repr = format!("about {fdate12p1}");
                }
            } else if self.date1.is_compound() {
                if mod2 == Modifier::None {
                    let (start, stop) =
                        self.range_dates(&self.date1);
                    repr = format!(
                        "between {} and {}",
                        self.format_delta(
                            &self.diff(&start, &self.date2),
                            precision,
                        ),
                        self.format_delta(
                            &self.diff(&stop, &self.date2),
                            precision,
                        ),
                    );
                } else if mod2 == Modifier::Before {
                    repr = format!("more than {fdate12}");
                } else if mod2 == Modifier::After {
                    repr = format!("less than {fdate12}");
                } else if mod2 == Modifier::About {
                    repr = format!("about {fdate12p1}");
                } else if self.date2.is_compound() {
                    let (start1, stop1) =
                        self.range_dates(&self.date1);
                    let (start2, stop2) =
                        self.range_dates(&self.date2);
                    repr = format!(
                        "between {} and {}",
                        self.format_delta(
                            &self.diff(&start1, &stop2),
                            precision,
                        ),
                        self.format_delta(
                            &self.diff(&stop1, &start2),
                            precision,
                        ),
                    );
                }
            }
        }
        // A negative decomposition renders as a parenthesized magnitude.
        if !repr.contains('-') {
            repr
        } else {
            format!("({})", repr.replace('-', ""))
        }
    }

    /// Renders one decomposition, truncated to the given precision and
    /// pluralized.
    fn format_delta(&self, delta: &Delta, precision: u8) -> String {
        let Delta::Ymd(years, months, days) = *delta else {
            return String::from("unknown");
        };
        fn plural(n: i32, unit: &str) -> String {
            if n == 1 {
                format!("{n} {unit}")
            } else {
                format!("{n} {unit}s")
            }
        }
        let mut retval = String::new();
        let mut detail = 0;
        if years != 0 {
            retval = plural(years, "year");
            detail += 1;
        }
        if precision == detail {
            if months >= 6 && self.config.round_up_years {
                retval = plural(years + 1, "year");
            }
            return retval;
        }
        if months != 0 {
            if !retval.is_empty() {
                retval.push_str(", ");
            }
            retval.push_str(&plural(months, "month"));
            detail += 1;
        }
        if precision == detail {
            return retval;
        }
        if days != 0 {
            if !retval.is_empty() {
                retval.push_str(", ");
            }
            retval.push_str(&plural(days, "day"));
            detail += 1;
        }
        if precision == detail {
            return retval;
        }
        if retval.is_empty() {
            retval = String::from("0 days");
        }
        retval
    }
}

impl PartialEq for Span {
    /// Spans compare by their signed day-count estimate.
    fn eq(&self, other: &Span) -> bool {
        self.as_days() == other.as_days()
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Span) -> Option<core::cmp::Ordering> {
        Some(self.as_days().cmp(&other.as_days()))
    }
}

impl core::fmt::Display for Span {
    /// Renders as an age at years+months precision.
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.render(2, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{DateVal, DateValue, Quality};

    fn cfg() -> Config {
        Config::default()
    }

    fn simple(modifier: Modifier, ymd: (i32, i32, i32)) -> Date {
        let mut d = Date::new();
        d.set(
            Quality::None,
            modifier,
            Calendar::Gregorian,
            DateValue::Simple(DateVal::from_dmy(ymd.2, ymd.1, ymd.0)),
            None,
            NewYear::Jan1,
        )
        .unwrap();
        d
    }

    fn range(start: (i32, i32, i32), stop: (i32, i32, i32)) -> Date {
        let mut d = Date::new();
        d.set(
            Quality::None,
            Modifier::Range,
            Calendar::Gregorian,
            DateValue::Compound(
                DateVal::from_dmy(start.2, start.1, start.0),
                DateVal::from_dmy(stop.2, stop.1, stop.0),
            ),
            None,
            NewYear::Jan1,
        )
        .unwrap();
        d
    }

    fn delta_of(a: (i32, i32, i32), b: (i32, i32, i32)) -> Delta {
        let d1 = Date::from_ymd(a.0, a.1, a.2);
        let d2 = Date::from_ymd(b.0, b.1, b.2);
        Span::new(&d1, &d2, cfg()).delta()
    }

    #[test]
    fn plain_decompositions() {
        assert_eq!(
            delta_of((1876, 5, 7), (1876, 5, 1)),
            Delta::Ymd(0, 0, 6),
        );
        assert_eq!(
            delta_of((1876, 5, 7), (1876, 4, 30)),
            Delta::Ymd(0, 0, 7),
        );
        assert_eq!(
            delta_of((2000, 1, 1), (1999, 2, 1)),
            Delta::Ymd(0, 11, 0),
        );
        assert_eq!(
            delta_of((2000, 1, 1), (1999, 12, 1)),
            Delta::Ymd(0, 1, 0),
        );
        assert_eq!(
            delta_of((2007, 12, 23), (1963, 12, 4)),
            Delta::Ymd(44, 0, 19),
        );
        assert_eq!(
            delta_of((1963, 12, 4), (2007, 12, 23)),
            Delta::Ymd(-44, 0, -19),
        );
    }

    #[test]
    fn day_walk_correction() {
        // Civil subtraction with 31-day borrows overshoots across a
        // 30-day November; the walk pulls the day column back in.
        assert_eq!(
            delta_of((2000, 3, 1), (1999, 11, 30)),
            Delta::Ymd(0, 3, 1),
        );
    }

    #[test]
    fn span_symmetry() {
        let pairs = [
            ((1876, 5, 7), (1876, 5, 1)),
            ((2000, 1, 1), (1999, 2, 1)),
            ((2007, 12, 23), (1963, 12, 4)),
        ];
        for (a, b) in pairs {
            let d1 = Date::from_ymd(a.0, a.1, a.2);
            let d2 = Date::from_ymd(b.0, b.1, b.2);
            assert_eq!(
                Span::new(&d1, &d2, cfg()).as_days(),
                -Span::new(&d2, &d1, cfg()).as_days(),
            );
        }
    }

    #[test]
    fn invalid_span() {
        let unknown = Date::new();
        let known = Date::from_ymd(2000, 1, 1);
        let span = Span::new(&known, &unknown, cfg());
        assert!(!span.is_valid());
        assert_eq!(span.delta(), Delta::Unknown);
        assert_eq!(span.to_string(), "unknown");
    }

    #[test]
    fn sort_and_minmax_cells() {
        let c = cfg();
        let d1 = Date::from_ymd(2000, 1, 1);
        let d2 = Date::from_ymd(1990, 1, 1);
        let val = d1.sort_value() - d2.sort_value();

        // plain / plain
        let span = Span::new(&d1, &d2, c);
        assert_eq!(span.sort_key(), (val, 0));
        assert_eq!(span.minmax(), (val, val));

        // plain / before
        let before = simple(Modifier::Before, (1990, 1, 1));
        let span = Span::new(&d1, &before, c);
        assert_eq!(span.sort_key(), (val, -c.before_range));
        assert_eq!(span.minmax(), (val - c.before_range, val));

        // plain / after
        let after = simple(Modifier::After, (1990, 1, 1));
        let span = Span::new(&d1, &after, c);
        assert_eq!(span.sort_key(), (val, c.after_range));
        assert_eq!(span.minmax(), (val, val + c.after_range));

        // plain / about
        let about = simple(Modifier::About, (1990, 1, 1));
        let span = Span::new(&d1, &about, c);
        assert_eq!(span.sort_key(), (val, -c.about_range));
        assert_eq!(
            span.minmax(),
            (val - c.about_range, val + c.about_range),
        );

        // The minmax interval is always ordered.
        for span in [
            Span::new(&d1, &before, c),
            Span::new(&d1, &after, c),
            Span::new(&d1, &about, c),
        ] {
            let (min, max) = span.minmax();
            assert!(min <= max);
        }
    }

    #[test]
    fn compound_cells() {
        let c = cfg();
        let d1 = Date::from_ymd(2000, 6, 15);
        let r = range((1990, 1, 1), (1992, 1, 1));
        let span = Span::new(&d1, &r, c);
        let stop = Date::from_ymd(1992, 1, 1).sort_value();
        let start = Date::from_ymd(1990, 1, 1).sort_value();
        let val1 = d1.sort_value() - stop;
        let val2 = d1.sort_value() - start;
        assert_eq!(span.sort_key(), (val1, val2 - val1));
        assert_eq!(span.minmax(), (val1, val2));
    }

    #[test]
    fn rendering() {
        let c = cfg();
        let d1 = Date::from_ymd(2007, 12, 23);
        let d2 = Date::from_ymd(1963, 12, 4);
        let span = Span::new(&d1, &d2, c);
        assert_eq!(span.format(1, false), "44 years");
        assert_eq!(span.format(2, false), "44 years, 19 days");
        assert_eq!(span.format(3, false), "44 years, 19 days");

        let before = simple(Modifier::Before, (1963, 12, 4));
        assert_eq!(
            Span::new(&d1, &before, c).as_time(),
            "more than 44 years, 19 days",
        );
        let after = simple(Modifier::After, (1963, 12, 4));
        assert_eq!(
            Span::new(&d1, &after, c).as_time(),
            "less than 44 years, 19 days",
        );
        let about = simple(Modifier::About, (1963, 12, 4));
        assert_eq!(
            Span::new(&d1, &about, c).as_time(),
            "about 44 years",
        );

        // Two bounds in the same direction say nothing.
        let b1 = simple(Modifier::Before, (2007, 12, 23));
        assert_eq!(Span::new(&b1, &before, c).as_time(), "unknown");
    }

    #[test]
    fn rendering_between() {
        let c = cfg();
        let d1 = Date::from_ymd(2000, 1, 1);
        let r = range((1990, 0, 0), (1992, 0, 0));
        let span = Span::new(&d1, &r, c);
        assert_eq!(
            span.as_time(),
            "between 7 years, 1 day and 10 years",
        );
    }

    #[test]
    fn age_cap() {
        let c = cfg();
        let d1 = Date::from_ymd(2000, 1, 1);
        let d2 = Date::from_ymd(1850, 1, 1);
        let span = Span::new(&d1, &d2, c);
        assert_eq!(span.as_age(), "greater than 110 years");
        assert_eq!(span.as_time(), "150 years");
    }

    #[test]
    fn round_up_years_preference() {
        let mut c = cfg();
        c.round_up_years = true;
        let d1 = Date::from_ymd(2000, 8, 1);
        let d2 = Date::from_ymd(1990, 1, 1);
        let span = Span::new(&d1, &d2, c);
        assert_eq!(span.format(1, false), "11 years");
        assert_eq!(span.format(2, false), "10 years, 7 months");
    }

    #[test]
    fn movable_newyear_falls_back_to_flat_division() {
        let mut d1 = Date::new();
        d1.set(
            Quality::None,
            Modifier::None,
            Calendar::Gregorian,
            DateValue::Simple(DateVal::from_dmy(1, 12, 1234)),
            None,
            NewYear::Mar25,
        )
        .unwrap();
        let d2 = Date::from_ymd(1230, 1, 1);
        let span = Span::new(&d1, &d2, cfg());
        // 365/30 arithmetic, not civil subtraction.
        let days = d1.sort_value() - d2.sort_value();
        let years = days.div_euclid(365);
        let months = (days - years * 365).div_euclid(30);
        let rest = (days - years * 365) - months * 30;
        assert_eq!(span.delta(), Delta::Ymd(years, months, rest));
    }
}
