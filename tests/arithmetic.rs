//! Date arithmetic, compound-date mutation and calendar sweeps.

use kalends::{
    Calendar, Config, Date, DateVal, DateValue, Delta, Modifier, NewYear,
    Quality, Span,
};

fn cfg() -> Config {
    Config::default()
}

fn range_2000_2010() -> Date {
    let mut d = Date::new();
    d.set(
        Quality::None,
        Modifier::Range,
        Calendar::Gregorian,
        DateValue::Compound(
            DateVal::from_dmy(1, 1, 2000),
            DateVal::from_dmy(1, 1, 2010),
        ),
        None,
        NewYear::Jan1,
    )
    .unwrap();
    d
}

#[test]
fn offsets() {
    // Expectations compare by sort value, the equality the original
    // scenarios were written against (a partial date and its defaulted
    // form name the same instant).
    let cases: &[((i32, i32, i32), (i32, i32, i32), (i32, i32, i32))] = &[
        // (start ymd, offset, expected ymd)
        ((2008, 1, 1), (-1, 0, 0), (2007, 1, 1)),
        ((2008, 1, 1), (1, 0, 0), (2009, 1, 1)),
        ((2008, 1, 1), (0, 0, -1), (2007, 12, 31)),
        ((2008, 1, 1), (0, 0, -2), (2007, 12, 30)),
        ((2008, 0, 0), (0, 0, -1), (2007, 12, 31)),
        ((2008, 0, 0), (-1, 0, 0), (2007, 0, 0)),
        ((2008, 12, 31), (0, 0, 1), (2009, 1, 1)),
        ((2000, 1, 1), (0, -11, 0), (1999, 2, 1)),
        ((2000, 1, 1), (0, -1, 0), (1999, 12, 1)),
        ((2008, 1, 1), (0, 0, 32), (2008, 2, 2)),
        ((2008, 2, 1), (0, 0, 32), (2008, 3, 4)),
        ((2000, 0, 0), (0, -1, 0), (1999, 12, 1)),
        ((2000, 0, 0), (0, 1, 0), (2000, 1, 0)),
        ((2000, 1, 1), (-1, 0, 0), (1999, 1, 1)),
        ((2000, 0, 0), (-1, 0, 0), (1999, 0, 0)),
        ((2000, 0, 0), (1, 0, 0), (2001, 0, 0)),
    ];
    for &(start, (y, m, d), expected) in cases {
        let date = Date::from_ymd(start.0, start.1, start.2);
        let got = date.add_offset(y, m, d);
        let want = Date::from_ymd(expected.0, expected.1, expected.2);
        assert_eq!(
            got.sort_value(),
            want.sort_value(),
            "{start:?} offset by {:?}",
            (y, m, d),
        );
    }

    // Fully specified dates keep exact fields through the day fix-up.
    assert_eq!(
        Date::from_ymd(2008, 1, 1).add_offset(0, 0, -1).ymd(),
        (2007, 12, 31),
    );
    assert_eq!(
        Date::from_ymd(2008, 2, 1).add_offset(0, 0, 32).ymd(),
        (2008, 3, 4),
    );
    assert_eq!(
        Date::from_ymd(2000, 1, 1).add_offset(0, -11, 0).ymd(),
        (1999, 2, 1),
    );
}

#[test]
fn offset_inverse() {
    let date = Date::from_ymd(1876, 5, 7);
    for days in [1, 17, 365, 10_000] {
        let there = date.add_offset(0, 0, days);
        let back = there.sub_offset(0, 0, days);
        assert_eq!(back.sort_value(), date.sort_value(), "{days} days");
    }
    for years in [1, 4, 100] {
        let there = date.add_offset(years, 0, 0);
        let back = there.sub_offset(years, 0, 0);
        assert_eq!(back.sort_value(), date.sort_value(), "{years} years");
    }
}

#[test]
fn offset_preserves_calendar() {
    let mut hebrew = Date::new();
    hebrew
        .set(
            Quality::None,
            Modifier::None,
            Calendar::Hebrew,
            DateValue::Simple(DateVal::from_dmy(21, 3, 5770)),
            None,
            NewYear::Jan1,
        )
        .unwrap();
    let later = hebrew.add_offset(0, 0, 30);
    assert_eq!(later.calendar(), Calendar::Hebrew);
    assert_eq!(later.sort_value(), hebrew.sort_value() + 30);
}

#[test]
fn span_decompositions() {
    let cases: &[((i32, i32, i32), (i32, i32, i32), (i32, i32, i32))] = &[
        ((1876, 5, 7), (1876, 5, 1), (0, 0, 6)),
        ((1876, 5, 7), (1876, 4, 30), (0, 0, 7)),
        ((2000, 1, 1), (1999, 2, 1), (0, 11, 0)),
        ((2000, 1, 1), (1999, 12, 1), (0, 1, 0)),
        ((2007, 12, 23), (1963, 12, 4), (44, 0, 19)),
        ((1963, 12, 4), (2007, 12, 23), (-44, 0, -19)),
    ];
    for &(a, b, expected) in cases {
        let d1 = Date::from_ymd(a.0, a.1, a.2);
        let d2 = Date::from_ymd(b.0, b.1, b.2);
        let span = Span::new(&d1, &d2, cfg());
        assert_eq!(
            span.delta(),
            Delta::Ymd(expected.0, expected.1, expected.2),
            "{a:?} - {b:?}",
        );
    }
}

#[test]
fn compound_start_stop() {
    let date = range_2000_2010();
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!(start, (2000, 1, 1));
    assert_eq!(stop, (2010, 1, 1));
}

#[test]
fn set2_overrides_stop_date() {
    let mut date = range_2000_2010();
    date.set2_ymd(2013, 2, 2).unwrap();
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!(start, (2000, 1, 1));
    assert_eq!(stop, (2013, 2, 2));
}

#[test]
fn set_ymd_can_override_both_dates() {
    let mut date = range_2000_2010();
    date.set_ymd_and_stop(2013, 2, 2, true);
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!(start, stop);
    assert_eq!(stop, (2013, 2, 2));
}

#[test]
fn set_ymd_offset_updates_both_ends() {
    let mut date = range_2000_2010();
    date.set_ymd_offset(2, 2, 2);
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!(start, (2002, 3, 3));
    assert_eq!(stop, (2012, 3, 3));
}

#[test]
fn set2_ymd_offset_updates_stop_date() {
    let mut date = range_2000_2010();
    date.set2_ymd_offset(7, 5, 5).unwrap();
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!(start, (2000, 1, 1));
    assert_eq!(stop, (2017, 6, 6));
}

#[test]
fn copy_offset_preserves_original() {
    let date = range_2000_2010();
    let copied = date.add_offset(-1, 0, 0);
    // The original is untouched.
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!((start, stop), ((2000, 1, 1), (2010, 1, 1)));
    let (start, stop) = copied.start_stop_range(&cfg());
    assert_eq!(start, (1999, 1, 1));
    assert_eq!(stop, (2009, 1, 1));
}

#[test]
fn copy_ymd_preserves_original() {
    let date = range_2000_2010();
    let copied = date.copy_ymd_and_stop(1000, 10, 10, true);
    let (start, stop) = date.start_stop_range(&cfg());
    assert_eq!((start, stop), ((2000, 1, 1), (2010, 1, 1)));
    let (start, stop) = copied.start_stop_range(&cfg());
    assert_eq!(start, (1000, 10, 10));
    assert_eq!(stop, (1000, 10, 10));
}

#[test]
fn second_endpoint_needs_a_compound_date() {
    for modifier in [
        Modifier::None,
        Modifier::Before,
        Modifier::After,
        Modifier::About,
        Modifier::TextOnly,
    ] {
        let mut date = range_2000_2010();
        date.set_modifier(modifier);
        assert!(
            date.set2_ymd(2013, 2, 2).unwrap_err().is_not_compound(),
            "modifier {modifier:?}",
        );
        assert!(
            date.set2_ymd_offset(-1, 0, 0)
                .unwrap_err()
                .is_not_compound(),
            "modifier {modifier:?}",
        );
    }
}

#[test]
fn swedish_sweep_agrees_with_gregorian() {
    // Every month across the anomalous period: the instant survives
    // conversion and recomputation.
    for year in 1701..1712 {
        for month in 1..=12 {
            let mut date = Date::new();
            date.set(
                Quality::None,
                Modifier::None,
                Calendar::Swedish,
                DateValue::Simple(DateVal::from_dmy(4, month, year)),
                None,
                NewYear::Jan1,
            )
            .unwrap();
            let mut gregorian = date.to_calendar(Calendar::Gregorian);
            assert_eq!(
                gregorian.recalc_sort_value(),
                date.sort_value(),
                "{year}-{month}-04",
            );
        }
    }
}

#[test]
fn conversion_roundtrip_preserves_fields() {
    let date = Date::from_ymd(1876, 11, 26);
    for calendar in Calendar::ALL {
        let there = date.to_calendar(calendar);
        let back = there.to_calendar(Calendar::Gregorian);
        assert_eq!(back.ymd(), (1876, 11, 26), "via {calendar}");
        assert_eq!(back.sort_value(), date.sort_value(), "via {calendar}");
    }
}

#[test]
fn compound_conversion_converts_both_endpoints() {
    let mut date = Date::new();
    date.set(
        Quality::None,
        Modifier::Span,
        Calendar::Gregorian,
        DateValue::Compound(
            DateVal::from_dmy(22, 9, 1792),
            DateVal::from_dmy(31, 12, 1805),
        ),
        None,
        NewYear::Jan1,
    )
    .unwrap();
    let french = date.to_calendar(Calendar::French);
    assert_eq!(french.ymd(), (1, 1, 1));
    assert_eq!(french.stop_ymd(), (14, 4, 10));
}
