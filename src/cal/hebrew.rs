/*!
Hebrew calendar conversions.

The Hebrew calendar is lunisolar: months track the moon, and seven leap
months per 19-year metonic cycle keep the year tracking the sun. Finding
the first day of a year means computing the molad (the moment of the
calculated new moon, measured in halakim, 1080ths of an hour) of Tishri
for that year, then applying the four traditional Rosh Hashanah
postponement rules. Everything else — month lengths, and therefore the
position of any day within a year — follows from the lengths of two
consecutive years.

Months are numbered 1 (Tishri) through 13 (Elul), with Adar I as month 6,
present only in leap years; in a common year, Adar is month 7.

A serial day at or before the calendar's epoch converts to `(0, 0, 0)`
rather than an error; the calendar does not extend backward past creation.
*/

const HALAKIM_PER_HOUR: i64 = 1080;
const HALAKIM_PER_DAY: i64 = 25920;
const HALAKIM_PER_LUNAR_CYCLE: i64 = 29 * HALAKIM_PER_DAY + 13753;
const HALAKIM_PER_METONIC_CYCLE: i64 =
    HALAKIM_PER_LUNAR_CYCLE * (12 * 19 + 7);

const SDN_OFFSET: i64 = 347997;
const NEW_MOON_OF_CREATION: i64 = 31524;

const SUNDAY: i64 = 0;
const MONDAY: i64 = 1;
const TUESDAY: i64 = 2;
const WEDNESDAY: i64 = 3;
const FRIDAY: i64 = 5;

// Moments within a day, in halakim counted from 6pm.
const NOON: i64 = 18 * HALAKIM_PER_HOUR;
const AM3_11_20: i64 = 9 * HALAKIM_PER_HOUR + 204;
const AM9_32_43: i64 = 15 * HALAKIM_PER_HOUR + 589;

/// Lunar months in each year of the 19-year metonic cycle (0-based;
/// 13 marks a leap year).
const MONTHS_PER_YEAR: [i64; 19] = [
    12, 12, 13, 12, 12, 13, 12, 13, 12, 12, 13, 12, 12, 13, 12, 12, 13,
    12, 13,
];

/// Lunar months elapsed before each year of a metonic cycle.
const YEAR_OFFSET: [i64; 19] = [
    0, 12, 24, 37, 49, 61, 74, 86, 99, 111, 123, 136, 148, 160, 173, 185,
    197, 210, 222,
];

/// The molad of Tishri at the start of the given metonic cycle, as a
/// `(day, halakim-within-day)` pair on the calendar's day count.
fn molad_of_metonic_cycle(cycle: i64) -> (i64, i64) {
    let halakim = NEW_MOON_OF_CREATION + cycle * HALAKIM_PER_METONIC_CYCLE;
    (halakim.div_euclid(HALAKIM_PER_DAY), halakim.rem_euclid(HALAKIM_PER_DAY))
}

/// Applies the four postponement rules to a molad of Tishri, yielding the
/// day number of Tishri 1.
///
/// The rules: Rosh Hashanah is postponed a day when the molad falls at or
/// after noon; when the molad of a common year falls on a Tuesday at or
/// after 3:11:20am; or when the molad of a year following a leap year
/// falls on a Monday at or after 9:32:43am. After those, it is postponed
/// again if it would land on a Sunday, Wednesday or Friday.
fn tishri1(metonic_year: i64, molad_day: i64, molad_halakim: i64) -> i64 {
    let mut tishri1 = molad_day;
    let mut dow = tishri1.rem_euclid(7);
    let leap_year = MONTHS_PER_YEAR[metonic_year as usize] == 13;
    let last_was_leap_year =
        MONTHS_PER_YEAR[((metonic_year + 18) % 19) as usize] == 13;

    if molad_halakim >= NOON
        || (!leap_year && dow == TUESDAY && molad_halakim >= AM3_11_20)
        || (last_was_leap_year && dow == MONDAY && molad_halakim >= AM9_32_43)
    {
        tishri1 += 1;
        dow += 1;
        if dow == 7 {
            dow = 0;
        }
    }
    if dow == WEDNESDAY || dow == FRIDAY || dow == SUNDAY {
        tishri1 += 1;
    }
    tishri1
}

/// The day number of Tishri 1 of the given Hebrew year.
fn year_start(year: i64) -> i64 {
    let metonic_cycle = (year - 1).div_euclid(19);
    let metonic_year = (year - 1).rem_euclid(19);
    let (mut molad_day, mut molad_halakim) =
        molad_of_metonic_cycle(metonic_cycle);
    molad_halakim +=
        HALAKIM_PER_LUNAR_CYCLE * YEAR_OFFSET[metonic_year as usize];
    molad_day += molad_halakim.div_euclid(HALAKIM_PER_DAY);
    molad_halakim = molad_halakim.rem_euclid(HALAKIM_PER_DAY);
    tishri1(metonic_year, molad_day, molad_halakim)
}

/// Month lengths for a year of the given total length (353, 354, 355,
/// 383, 384 or 385 days). The Adar I slot is zero in a common year.
fn month_lengths(year_length: i64) -> [i64; 13] {
    let heshvan = if year_length % 10 == 5 { 30 } else { 29 };
    let kislev = if year_length % 10 == 3 { 29 } else { 30 };
    let adar1 = if year_length > 380 { 30 } else { 0 };
    [30, heshvan, kislev, 29, 30, adar1, 29, 30, 29, 30, 29, 30, 29]
}

/// Converts a Hebrew civil date to a serial day number.
///
/// Out-of-range months yield 0; non-positive years are computed silently
/// (the metonic arithmetic simply extends backward) and are not
/// meaningful.
pub fn to_sdn(year: i32, month: i32, day: i32) -> i32 {
    if !(1..=13).contains(&month) {
        return 0;
    }
    let year = i64::from(year);
    let start = year_start(year);
    let lengths = month_lengths(year_start(year + 1) - start);
    let mut sdn = start;
    for length in &lengths[..month as usize - 1] {
        sdn += length;
    }
    (sdn + i64::from(day) - 1 + SDN_OFFSET) as i32
}

/// Converts a serial day number to a Hebrew `(year, month, day)`.
pub fn from_sdn(sdn: i32) -> (i32, i32, i32) {
    let input_day = i64::from(sdn) - SDN_OFFSET;
    if input_day <= 0 {
        return (0, 0, 0);
    }

    // Estimate the year from the mean year length (the metonic cycle's
    // 235 lunations over 19 years), then settle the estimate against the
    // actual year starts. The estimate is off by at most one year.
    let mut year =
        input_day * 19 * HALAKIM_PER_DAY / HALAKIM_PER_METONIC_CYCLE + 1;
    while year > 1 && year_start(year) > input_day {
        year -= 1;
    }
    while year_start(year + 1) <= input_day {
        year += 1;
    }

    let start = year_start(year);
    let lengths = month_lengths(year_start(year + 1) - start);
    let mut day = input_day - start + 1;
    let mut month = 1;
    for (index, length) in lengths.iter().enumerate() {
        if day <= *length {
            month = index as i64 + 1;
            break;
        }
        day -= length;
    }
    (year as i32, month as i32, day as i32)
}
