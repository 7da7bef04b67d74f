/*!
Kalends is a date library for genealogy and other historical record keeping.

Unlike a typical datetime library, the dates found in historical records are
rarely precise instants. They are partially known ("March 1892"), qualified
("about 1850", "before 1960"), compound ("between 1750 and 1752", "from 1802
to 1807") or recorded in a calendar other than the Gregorian one. This crate
models all of that in a single value type, [`Date`], and provides:

* Conversion between seven calendars — Gregorian, Julian, Hebrew, French
  Republican, Persian, Islamic and Swedish — through a universal serial day
  number (SDN) timeline. See the [`cal`] module.
* A derived integer [sort value](Date::sort_value) so dates from different
  calendars order correctly against one another.
* Fuzzy interval [matching](Date::matches) that accounts for the uncertainty
  implied by a date's modifier and quality.
* A best-effort difference between two dates, [`Span`], decomposed into
  years, months and days with calendar irregularities corrected for.

# Example

```
use kalends::{Calendar, Config, Date, Span};

// 8 December 2009 falls in the Hebrew year 5770.
let date = Date::from_ymd(2009, 12, 8);
assert_eq!(date.to_calendar(Calendar::Hebrew).year(), 5770);

// The elapsed time between two dates, as (years, months, days).
let cfg = Config::default();
let born = Date::from_ymd(1963, 12, 4);
let died = Date::from_ymd(2007, 12, 23);
let span = Span::new(&died, &born, cfg);
assert_eq!(span.to_string(), "44 years, 19 days");
```

# Configuration

The tolerances used for approximate and open-ended dates (how many years
"before 1960" reaches back, for example) are not global state. They live in
a [`Config`] value that callers pass to the operations that consume them, so
different callers — and different tests — can use different tolerances
without affecting one another.

# Crate features

* **serde** — enables the persistence wire format for [`Date`]: a flat
  tuple of `(calendar, modifier, quality, dateval, text, sortval, newyear)`.
  See [`RawDate`].
* **logging** — emits internal diagnostics through the [`log`] crate. The
  only current log site is the civil-date sanity check in [`Date::set`],
  which logs the offending state at debug level before failing.

[`log`]: https://docs.rs/log
*/

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub use crate::{
    cal::Calendar,
    config::Config,
    date::{
        Comparison, Date, DateVal, DateValue, Feb29Policy, Modifier,
        NewYear, Quality, RawDate,
    },
    error::Error,
    span::{Delta, Span},
};

#[macro_use]
mod logging;

pub mod cal;
mod config;
mod date;
mod error;
#[cfg(feature = "serde")]
mod serde;
mod span;
