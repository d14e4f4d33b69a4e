// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and linear value (Y) scales with "nice" tick generation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Tick count requested by the axes when none is given.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Monotonic mapping from a domain interval onto a pixel range.
pub trait Scale {
    type Domain: Copy;
    fn apply(&self, v: Self::Domain) -> f64;
    fn invert(&self, px: f64) -> Self::Domain;
    fn range(&self) -> (f64, f64);
    /// Representative domain values for axis ticks, ascending.
    fn ticks(&self, count: usize) -> Vec<Self::Domain>;
}

/// Continuous value scale. The range may be inverted (e.g. [height, 0]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
    /// The requested domain had no span and was widened by one.
    widened: bool,
}

impl LinearScale {
    pub fn new((d0, d1): (f64, f64), (r0, r1): (f64, f64)) -> Self {
        let mut s = Self { d0, d1, r0, r1, widened: false };
        if (s.d1 - s.d0).abs() < 1e-12 {
            s.d1 = s.d0 + 1.0;
            s.widened = true;
        }
        s
    }

    pub fn domain(&self) -> (f64, f64) { (self.d0, self.d1) }
}

impl Scale for LinearScale {
    type Domain = f64;

    #[inline]
    fn apply(&self, v: f64) -> f64 {
        self.r0 + (v - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }

    #[inline]
    fn invert(&self, px: f64) -> f64 {
        let span = self.r1 - self.r0;
        if span.abs() < 1e-12 { return self.d0; }
        self.d0 + (px - self.r0) / span * (self.d1 - self.d0)
    }

    fn range(&self) -> (f64, f64) { (self.r0, self.r1) }

    /// A widened domain only has its original value to show.
    fn ticks(&self, count: usize) -> Vec<f64> {
        if self.widened { return if count == 0 { Vec::new() } else { vec![self.d0] }; }
        let (lo, hi) = if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) };
        linear_ticks(lo, hi, count)
    }
}

/// Calendar-date scale. Dates are measured in whole days from the domain start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    d0: NaiveDate,
    d1: NaiveDate,
    r0: f64,
    r1: f64,
}

impl TimeScale {
    pub fn new((d0, d1): (NaiveDate, NaiveDate), (r0, r1): (f64, f64)) -> Self {
        Self { d0, d1, r0, r1 }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) { (self.d0, self.d1) }

    fn span_days(&self) -> i64 { (self.d1 - self.d0).num_days() }
}

impl Scale for TimeScale {
    type Domain = NaiveDate;

    /// A zero-span domain pins every date to the range start.
    #[inline]
    fn apply(&self, d: NaiveDate) -> f64 {
        let span = self.span_days();
        if span == 0 { return self.r0; }
        let t = (d - self.d0).num_days() as f64 / span as f64;
        self.r0 + t * (self.r1 - self.r0)
    }

    /// Positions far outside the range clamp to the representable dates.
    fn invert(&self, px: f64) -> NaiveDate {
        let span = self.r1 - self.r0;
        if span.abs() < 1e-12 { return self.d0; }
        let days = ((px - self.r0) / span * self.span_days() as f64).round();
        if days.is_nan() { return self.d0; }
        let lo = (NaiveDate::MIN - self.d0).num_days();
        let hi = (NaiveDate::MAX - self.d0).num_days();
        let days = (days.clamp(lo as f64, hi as f64) as i64).clamp(lo, hi);
        self.d0.checked_add_signed(Duration::days(days)).unwrap_or(self.d0)
    }

    fn range(&self) -> (f64, f64) { (self.r0, self.r1) }

    fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        let (lo, hi) = if self.d0 <= self.d1 { (self.d0, self.d1) } else { (self.d1, self.d0) };
        if lo == hi { return vec![lo]; }
        let target_days = (hi - lo).num_days() as f64 / count.max(1) as f64;
        TimeInterval::choose(lo, hi, target_days, count).dates_between(lo, hi)
    }
}

// ---- linear ticks -----------------------------------------------------------

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// First/last tick multipliers and the increment. A negative increment means
/// "divide by -inc", which keeps small steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let m = 10f64.powf(-power) / factor;
        i1 = (start * m).round();
        i2 = (stop * m).round();
        if i1 / m < start { i1 += 1.0; }
        if i2 / m > stop { i2 -= 1.0; }
        inc = -m;
    } else {
        let m = 10f64.powf(power) * factor;
        i1 = (start / m).round();
        i2 = (stop / m).round();
        if i1 * m < start { i1 += 1.0; }
        if i2 * m > stop { i2 -= 1.0; }
        inc = m;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Ticks at multiples of 1, 2 or 5 × 10^k inside `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() { return Vec::new(); }
    if start == stop { return vec![start]; }
    let (i1, i2, inc) = tick_spec(start, stop, count as f64);
    if !(i2 >= i1) { return Vec::new(); }
    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|k| {
            let i = i1 + k as f64;
            if inc < 0.0 { i / -inc } else { i * inc }
        })
        .collect()
}

/// Size of one nice step for the interval, always positive.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let (_, _, inc) = tick_spec(lo, hi, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

// ---- time ticks -------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimeInterval {
    Day(u32),
    Week,
    Month(u32),
    Year(i32),
}

impl TimeInterval {
    const DAYS_PER_MONTH: f64 = 30.0;
    const DAYS_PER_YEAR: f64 = 365.0;

    fn approx_days(self) -> f64 {
        match self {
            TimeInterval::Day(n) => n as f64,
            TimeInterval::Week => 7.0,
            TimeInterval::Month(n) => n as f64 * Self::DAYS_PER_MONTH,
            TimeInterval::Year(n) => n as f64 * Self::DAYS_PER_YEAR,
        }
    }

    /// Pick the candidate interval closest (by ratio) to the target spacing.
    fn choose(lo: NaiveDate, hi: NaiveDate, target_days: f64, count: usize) -> Self {
        const CANDIDATES: [TimeInterval; 6] = [
            TimeInterval::Day(1),
            TimeInterval::Day(2),
            TimeInterval::Week,
            TimeInterval::Month(1),
            TimeInterval::Month(3),
            TimeInterval::Year(1),
        ];
        let i = CANDIDATES.iter().position(|c| c.approx_days() > target_days).unwrap_or(CANDIDATES.len());
        if i == CANDIDATES.len() {
            let to_years = |d: NaiveDate| d.num_days_from_ce() as f64 / Self::DAYS_PER_YEAR;
            let step = tick_step(to_years(lo), to_years(hi), count).round().max(1.0);
            return TimeInterval::Year(step as i32);
        }
        if i == 0 { return CANDIDATES[0]; }
        let (a, b) = (CANDIDATES[i - 1], CANDIDATES[i]);
        if target_days / a.approx_days() < b.approx_days() / target_days { a } else { b }
    }

    fn dates_between(self, lo: NaiveDate, hi: NaiveDate) -> Vec<NaiveDate> {
        match self {
            TimeInterval::Day(step) => lo
                .iter_days()
                .take_while(|d| *d <= hi)
                .filter(|d| d.day0() % step == 0)
                .collect(),
            TimeInterval::Week => lo
                .iter_days()
                .take_while(|d| *d <= hi)
                .filter(|d| d.weekday() == Weekday::Sun)
                .collect(),
            TimeInterval::Month(step) => {
                let mut out = Vec::new();
                let (mut y, mut m) = (lo.year(), lo.month());
                while let Some(d) = NaiveDate::from_ymd_opt(y, m, 1) {
                    if d > hi { break; }
                    if d >= lo && (m - 1) % step == 0 { out.push(d); }
                    if m == 12 { y += 1; m = 1; } else { m += 1; }
                }
                out
            }
            TimeInterval::Year(step) => (lo.year()..=hi.year())
                .filter(|y| y.rem_euclid(step) == 0)
                .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
                .filter(|d| *d >= lo && *d <= hi)
                .collect(),
        }
    }
}
