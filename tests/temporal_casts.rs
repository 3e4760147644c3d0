use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use typecast::temporal::LAYOUTS;
use typecast::{format_duration, parse_duration, string_to_date, to_duration, to_string, to_time};
use typecast::{try_to_duration, try_to_time, CastError, Value};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap().fixed_offset()
}

#[test]
fn layout_order_is_fixed() {
    let names: Vec<&str> = LAYOUTS.iter().map(|l| l.name).collect();
    assert_eq!(
        names,
        [
            "RFC3339", "ISO8601", "RFC1123Z", "RFC1123", "RFC822Z", "RFC822", "ANSIC", "UnixDate", "RubyDate", "Log",
            "ZoneOffset", "ShortYearZone", "Date", "LongDate",
        ]
    );
}

#[test]
fn rfc3339() {
    assert_eq!(string_to_date("2023-06-15T10:30:00Z"), Ok(utc(2023, 6, 15, 10, 30, 0)));
    let t = string_to_date("2023-06-15T10:30:00.5+02:00").expect("rfc3339 with offset");
    assert_eq!(t.offset().local_minus_utc(), 7200);
    assert_eq!(t, utc(2023, 6, 15, 8, 30, 0) + TimeDelta::milliseconds(500));
}

#[test]
fn iso8601_without_zone_is_utc() {
    let t = string_to_date("2023-06-15T10:30:00").expect("iso8601");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    assert_eq!(t.offset().local_minus_utc(), 0);
}

#[test]
fn rfc1123_variants() {
    let t = string_to_date("Thu, 15 Jun 2023 10:30:00 +0200").expect("rfc1123z");
    assert_eq!(t, utc(2023, 6, 15, 8, 30, 0));
    let t = string_to_date("Thu, 15 Jun 2023 10:30:00 GMT").expect("rfc1123");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
}

#[test]
fn rfc822_variants() {
    let t = string_to_date("15 Jun 23 10:30 -0700").expect("rfc822z");
    assert_eq!(t, utc(2023, 6, 15, 17, 30, 0));
    // abbreviations other than GMT offsets resolve to UTC
    let t = string_to_date("15 Jun 23 10:30 MST").expect("rfc822");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    let t = string_to_date("15 Jun 23 10:30 GMT+3").expect("gmt offset");
    assert_eq!(t, utc(2023, 6, 15, 7, 30, 0));
}

#[test]
fn unix_style_layouts() {
    let t = string_to_date("Thu Jun 15 10:30:00 2023").expect("ansic");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    let t = string_to_date("Mon Jun  5 10:30:00 2023").expect("ansic with padded day");
    assert_eq!(t, utc(2023, 6, 5, 10, 30, 0));
    let t = string_to_date("Thu Jun 15 10:30:00 UTC 2023").expect("unix date");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    let t = string_to_date("Thu Jun 15 10:30:00 +0200 2023").expect("ruby date");
    assert_eq!(t, utc(2023, 6, 15, 8, 30, 0));
}

#[test]
fn weekday_names_are_not_checked_against_the_date() {
    // 15 Jun 2023 is a Thursday
    let t = string_to_date("Tue, 15 Jun 2023 10:30:00 +0200").expect("rfc1123z with wrong weekday");
    assert_eq!(t, utc(2023, 6, 15, 8, 30, 0));
    let t = string_to_date("Sun, 15 Jun 2023 10:30:00 GMT").expect("rfc1123 with wrong weekday");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    let t = string_to_date("Mon Jun 15 10:30:00 2023").expect("ansic with wrong weekday");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    let t = string_to_date("fri Jun 15 10:30:00 UTC 2023").expect("weekday in lower case");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));

    // but it still has to be a weekday
    assert!(string_to_date("Xyz, 15 Jun 2023 10:30:00 +0200").is_err());
    assert!(string_to_date("Thursday, 15 Jun 2023 10:30:00 +0200").is_err());
}

#[test]
fn long_zone_abbreviations() {
    let t = string_to_date("Thu, 15 Jun 2023 10:30:00 ACWST").expect("five letters ending in T");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    let t = string_to_date("Thu, 15 Jun 2023 10:30:00 WITA").expect("wita");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
    assert!(string_to_date("Thu, 15 Jun 2023 10:30:00 ABCDE").is_err());
}

#[test]
fn rfc3339_is_strict() {
    assert!(string_to_date("2023-06-15T10:30:00z").is_err());
    assert!(string_to_date("2023-06-15T10:30:00+0200").is_err());
    assert!(string_to_date("2023-06-15T1:30:00Z").is_err());
    assert!(string_to_date("2023-6-15T10:30:00Z").is_err());
}

#[test]
fn log_and_offset_layouts() {
    let t = string_to_date("2023-06-15 10:30:00.123456789 +0200 CEST").expect("log layout");
    assert_eq!(t, utc(2023, 6, 15, 8, 30, 0) + TimeDelta::nanoseconds(123_456_789));
    let t = string_to_date("2023-06-15 10:30:00+02:00").expect("zone offset");
    assert_eq!(t, utc(2023, 6, 15, 8, 30, 0));
    let t = string_to_date("2023-06-15 10:30:00Z").expect("zulu");
    assert_eq!(t, utc(2023, 6, 15, 10, 30, 0));
}

#[test]
fn date_only_layouts() {
    assert_eq!(string_to_date("2023-06-15"), Ok(utc(2023, 6, 15, 0, 0, 0)));
    assert_eq!(string_to_date("15 Jun 2023"), Ok(utc(2023, 6, 15, 0, 0, 0)));
}

#[test]
fn unknown_formats_fail() {
    let err = string_to_date("not-a-date").unwrap_err();
    assert_eq!(err, CastError::Date { input: String::from("not-a-date") });
    assert_eq!(err.to_string(), "unable to parse date: not-a-date");
    assert!(string_to_date("2023-13-45").is_err());
    assert!(string_to_date("15 Jun 23 10:30 Mountain").is_err());
}

#[test]
fn time_casts() {
    let t = utc(2020, 1, 2, 3, 4, 5);
    assert_eq!(try_to_time(t), Ok(t));
    assert_eq!(try_to_time(Value::pointer("2020-01-02T03:04:05Z")), Ok(t));

    let err = try_to_time("yesterday").unwrap_err();
    assert_eq!(err.to_string(), "could not parse date/time format: unable to parse date: yesterday");
    assert!(matches!(try_to_time(5i32), Err(CastError::Unsupported { target: "Time", .. })));
    assert_eq!(to_time("yesterday"), DateTime::<FixedOffset>::default());
}

#[test]
fn rendered_times() {
    let t = utc(2006, 1, 2, 15, 4, 5);
    assert_eq!(to_string(t), "2006-01-02 15:04:05 +0000 UTC");
    assert_eq!(to_string(t + TimeDelta::milliseconds(500)), "2006-01-02 15:04:05.500 +0000 UTC");
}

#[test]
fn rendered_times_parse_back() {
    let plain = utc(2023, 6, 15, 10, 30, 0);
    let fractional = plain + TimeDelta::milliseconds(250);
    let shifted = string_to_date("2023-06-15T10:30:00-05:00").expect("shifted");
    for t in [plain, fractional, shifted] {
        let parsed = to_time(to_string(t));
        assert_eq!(parsed, t);
        assert_eq!(parsed.offset(), t.offset());
    }
}

#[test]
fn duration_literals() {
    let cases = [
        ("300ms", TimeDelta::milliseconds(300)),
        ("1h", TimeDelta::hours(1)),
        ("1h30m", TimeDelta::minutes(90)),
        ("1h45m", TimeDelta::minutes(105)),
        ("-1.5h", TimeDelta::minutes(-90)),
        ("+5s", TimeDelta::seconds(5)),
        (".5s", TimeDelta::milliseconds(500)),
        ("1.5\u{b5}s", TimeDelta::nanoseconds(1500)),
        ("2\u{3bc}s", TimeDelta::microseconds(2)),
        ("2us", TimeDelta::microseconds(2)),
        ("10ns", TimeDelta::nanoseconds(10)),
        ("0", TimeDelta::zero()),
        ("-0", TimeDelta::zero()),
        ("9223372036854775807ns", TimeDelta::nanoseconds(i64::MAX)),
        ("-9223372036854775808ns", TimeDelta::nanoseconds(i64::MIN)),
    ];
    for (s, expected) in cases {
        assert_eq!(parse_duration(s), Ok(expected), "literal {s}");
    }
}

#[test]
fn duration_errors() {
    let reason = |s: &str| match parse_duration(s) {
        Err(CastError::Duration { reason, .. }) => reason,
        other => panic!("expected a duration error for {s:?}, got {other:?}"),
    };
    assert_eq!(reason(""), "invalid duration");
    assert_eq!(reason("-"), "invalid duration");
    assert_eq!(reason("."), "invalid duration");
    assert_eq!(reason("h"), "invalid duration");
    assert_eq!(reason("1"), "missing unit in duration");
    assert_eq!(reason("1h30"), "missing unit in duration");
    assert_eq!(reason("1x"), "unknown unit \"x\" in duration");
    assert_eq!(reason("9223372036854775808ns"), "invalid duration");
    assert_eq!(reason("3000000h"), "invalid duration");
    assert_eq!(
        parse_duration("1x").unwrap_err().to_string(),
        "unable to parse duration \"1x\": unknown unit \"x\" in duration"
    );
}

#[test]
fn duration_casts() {
    assert_eq!(try_to_duration(TimeDelta::seconds(3)), Ok(TimeDelta::seconds(3)));
    assert_eq!(try_to_duration("1m"), Ok(TimeDelta::minutes(1)));
    assert_eq!(try_to_duration(Value::pointer("1m")), Ok(TimeDelta::minutes(1)));
    assert!(matches!(try_to_duration(60i32), Err(CastError::Unsupported { target: "Duration", .. })));
    assert_eq!(to_duration("soon"), TimeDelta::zero());
}

#[test]
fn duration_rendering() {
    assert_eq!(format_duration(TimeDelta::zero()), "0s");
    assert_eq!(format_duration(TimeDelta::nanoseconds(1)), "1ns");
    assert_eq!(format_duration(TimeDelta::nanoseconds(1500)), "1.5\u{b5}s");
    assert_eq!(format_duration(TimeDelta::milliseconds(300)), "300ms");
    assert_eq!(format_duration(TimeDelta::seconds(61)), "1m1s");
    assert_eq!(format_duration(TimeDelta::minutes(90)), "1h30m0s");
    assert_eq!(format_duration(TimeDelta::milliseconds(-2500)), "-2.5s");
    for d in [TimeDelta::nanoseconds(123_456_789), TimeDelta::hours(49), TimeDelta::microseconds(-7)] {
        assert_eq!(parse_duration(&format_duration(d)), Ok(d));
    }
}
