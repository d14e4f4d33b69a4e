// File: crates/chart-core/tests/scale.rs
// Purpose: Scale mapping, monotonicity, nice ticks and label formats.

use chrono::NaiveDate;
use gdp_chart_core::format::{billions_label, fixed, group_thousands, month_year_label, trillions_label, year_label};
use gdp_chart_core::scale::{linear_ticks, tick_step};
use gdp_chart_core::{LinearScale, Scale, TimeScale};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn linear_scale_is_inverted_and_monotonic() {
    let y = LinearScale::new((0.0, 18064.7), (360.0, 0.0));
    assert_eq!(y.apply(0.0), 360.0);
    assert!((y.apply(18064.7) - 0.0).abs() < 1e-9);
    let mut prev = f64::INFINITY;
    for i in 0..=100 {
        let v = 18064.7 * i as f64 / 100.0;
        let py = y.apply(v);
        assert!(py <= prev, "y scale must not increase with value");
        prev = py;
    }
    assert!((y.invert(180.0) - 9032.35).abs() < 1e-6);
}

#[test]
fn zero_span_value_domain_widens_to_one() {
    let y = LinearScale::new((0.0, 0.0), (360.0, 0.0));
    assert_eq!(y.domain(), (0.0, 1.0));
    assert_eq!(y.apply(0.0), 360.0);
    assert_eq!(y.ticks(10), vec![0.0]);
    assert_eq!(LinearScale::new((0.0, 1.0), (360.0, 0.0)).ticks(5).len(), 6);
}

#[test]
fn time_invert_clamps_far_positions() {
    let x = TimeScale::new((date(1947, 1, 1), date(2015, 7, 1)), (0.0, 890.0));
    assert_eq!(x.invert(1e300), NaiveDate::MAX);
    assert_eq!(x.invert(-1e300), NaiveDate::MIN);
    assert_eq!(x.invert(f64::NAN), date(1947, 1, 1));
    assert_eq!(x.invert(0.0), date(1947, 1, 1));
}

#[test]
fn time_scale_maps_extent_to_range() {
    let x = TimeScale::new((date(1947, 1, 1), date(2015, 7, 1)), (0.0, 890.0));
    assert_eq!(x.apply(date(1947, 1, 1)), 0.0);
    assert_eq!(x.apply(date(2015, 7, 1)), 890.0);
    let mut prev = f64::NEG_INFINITY;
    let mut d = date(1947, 1, 1);
    while d <= date(2015, 7, 1) {
        let px = x.apply(d);
        assert!(px >= prev, "x scale must not decrease over time");
        prev = px;
        d = d + chrono::Months::new(3);
    }
    assert_eq!(x.invert(890.0), date(2015, 7, 1));
}

#[test]
fn single_date_domain_pins_to_range_start() {
    let x = TimeScale::new((date(2000, 1, 1), date(2000, 1, 1)), (0.0, 890.0));
    assert_eq!(x.apply(date(2000, 1, 1)), 0.0);
    assert_eq!(x.ticks(10), vec![date(2000, 1, 1)]);
}

#[test]
fn linear_ticks_use_nice_steps() {
    assert_eq!(linear_ticks(0.0, 3600.2, 10), vec![0.0, 500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0, 3500.0]);
    let gdp = linear_ticks(0.0, 18064.7, 10);
    assert_eq!(gdp.first(), Some(&0.0));
    assert_eq!(gdp.last(), Some(&18000.0));
    assert_eq!(gdp.len(), 10);
    assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(linear_ticks(5.0, 5.0, 10), vec![5.0]);
    assert!(linear_ticks(0.0, 1.0, 0).is_empty());
    assert_eq!(tick_step(0.0, 68.5, 10), 5.0);
}

#[test]
fn year_ticks_for_the_full_feed() {
    let x = TimeScale::new((date(1947, 1, 1), date(2015, 7, 1)), (0.0, 890.0));
    let ticks = x.ticks(10);
    let years: Vec<String> = ticks.iter().map(|d| year_label(*d)).collect();
    assert_eq!(years.first().map(String::as_str), Some("1950"));
    assert_eq!(years.last().map(String::as_str), Some("2015"));
    assert_eq!(ticks.len(), 14);
    assert!(ticks.iter().all(|d| d.format("%m-%d").to_string() == "01-01"));
}

#[test]
fn short_spans_use_finer_intervals() {
    // ~3 months: weekly ticks on Sundays
    let x = TimeScale::new((date(2000, 1, 1), date(2000, 4, 1)), (0.0, 890.0));
    let ticks = x.ticks(10);
    assert_eq!(ticks.first(), Some(&date(2000, 1, 2)));
    assert!(ticks.windows(2).all(|w| (w[1] - w[0]).num_days() == 7));

    // ~3 years: quarterly ticks on the first of Jan/Apr/Jul/Oct
    let x = TimeScale::new((date(2000, 1, 1), date(2003, 1, 1)), (0.0, 890.0));
    let ticks = x.ticks(10);
    assert!(ticks.iter().all(|d| d.format("%d").to_string() == "01"));
    assert!(ticks.iter().all(|d| matches!(d.format("%m").to_string().as_str(), "01" | "04" | "07" | "10")));
}

#[test]
fn label_formats() {
    assert_eq!(year_label(date(1947, 4, 1)), "1947");
    assert_eq!(trillions_label(3600.2), "$3.6T");
    assert_eq!(trillions_label(0.0), "$0.0T");
    assert_eq!(trillions_label(18000.0), "$18.0T");
    assert_eq!(month_year_label(date(2000, 1, 1)), "January 2000");
    assert_eq!(billions_label(3500.5), "$3,500.50 Billion");
    assert_eq!(billions_label(243.1), "$243.10 Billion");
    assert_eq!(billions_label(18064.7), "$18,064.70 Billion");
    assert_eq!(group_thousands("1234567.891"), "1,234,567.891");
    assert_eq!(group_thousands("-1000"), "-1,000");
    assert_eq!(group_thousands("999"), "999");
}

#[test]
fn exact_halves_round_away_from_zero() {
    // 250 billion is exactly 0.25 trillion
    assert_eq!(trillions_label(250.0), "$0.3T");
    assert_eq!(trillions_label(750.0), "$0.8T");
    assert_eq!(trillions_label(1250.0), "$1.3T");
    assert_eq!(trillions_label(200.0), "$0.2T");
    assert_eq!(billions_label(3500.125), "$3,500.13 Billion");
    assert_eq!(billions_label(0.005), "$0.01 Billion");
    // 1.005 is stored just below the half, so it rounds down
    assert_eq!(billions_label(1.005), "$1.00 Billion");
    assert_eq!(fixed(-2.5, 0), "-3");
    assert_eq!(fixed(-0.0, 1), "0.0");
}
