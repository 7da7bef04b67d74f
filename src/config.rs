/// Tolerances and limits consumed by date matching and span rendering.
///
/// Historical records with "before", "after" or "about" dates do not pin
/// down an exact day, and the operations that reason about such dates —
/// [`Date::start_stop_range`](crate::Date::start_stop_range),
/// [`Date::matches`](crate::Date::matches) and
/// [`Span::new`](crate::Span::new) — need to know how wide the implied
/// uncertainty interval is. That width is a policy decision, not a property
/// of the date itself, so it lives here and is passed explicitly wherever
/// it is needed. Tests (and applications with different policies) can use
/// different values without any process-wide coordination.
///
/// `Config` is `Copy`; pass it around freely.
///
/// # Example
///
/// ```
/// use kalends::Config;
///
/// let cfg = Config { about_range: 10, ..Config::default() };
/// assert_eq!(cfg.before_range, 50);
/// assert_eq!(cfg.about_range, 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// How many years a "before" date reaches back, at most.
    pub before_range: i32,
    /// How many years an "after" date reaches forward, at most.
    pub after_range: i32,
    /// How many years an "about" (or estimated) date spreads to either
    /// side.
    pub about_range: i32,
    /// The largest plausible age, in years. Spans rendered as ages are
    /// capped at this value.
    pub max_age: i32,
    /// When rendering a span at whole-year precision, whether six or more
    /// leftover months round the year count up.
    pub round_up_years: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            before_range: 50,
            after_range: 50,
            about_range: 50,
            max_age: 110,
            round_up_years: false,
        }
    }
}
