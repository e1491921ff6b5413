//! Scales and the coordinate mapping built from them.
//!
//! `CoordinateMapping` turns a commit into pixel space: time → x, hour of day → y,
//! lines changed → radius. Domains come from the subset it was built for, ranges
//! from the plot layout. A new mapping is built on every view change.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::models::{Commit, PlotLayout, Tick};

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Continuous linear map from a domain onto a range.
///
/// A degenerate domain maps everything to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, value: f64) -> f64 {
        interpolate(self.range, normalize(self.domain, value))
    }

    pub fn invert(&self, value: f64) -> f64 {
        interpolate(self.domain, normalize(self.range, value))
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }
}

fn normalize((a, b): (f64, f64), value: f64) -> f64 {
    if b != a { (value - a) / (b - a) } else { 0.5 }
}

fn interpolate((a, b): (f64, f64), t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Square-root scale: area, not radius, grows linearly with the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    linear: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            linear: LinearScale::new((domain.0.max(0.0).sqrt(), domain.1.max(0.0).sqrt()), range),
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.linear.map(value.max(0.0).sqrt())
    }
}

/// Linear scale over instants, stored as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (i64, i64), range: (f64, f64)) -> Self {
        Self {
            linear: LinearScale::new((domain.0 as f64, domain.1 as f64), range),
        }
    }

    pub fn domain(&self) -> (i64, i64) {
        let (a, b) = self.linear.domain();
        (a as i64, b as i64)
    }

    pub fn map(&self, datetime: DateTime<FixedOffset>) -> f64 {
        self.linear.map(datetime.timestamp_millis() as f64)
    }

    /// Ticks on calendar boundaries (UTC), labelled for the chosen interval.
    pub fn ticks(&self, count: usize) -> Vec<(i64, String)> {
        let (start, stop) = self.domain();
        let (lo, hi) = (start.min(stop), start.max(stop));
        if count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![(lo, format_tick(lo, "%b %d"))];
        }

        let span = hi - lo;
        let target = count as i64;
        let fixed = [
            (HOUR_MS, "%H:%M"),
            (3 * HOUR_MS, "%H:%M"),
            (6 * HOUR_MS, "%H:%M"),
            (12 * HOUR_MS, "%H:%M"),
            (DAY_MS, "%b %d"),
            (2 * DAY_MS, "%b %d"),
            (WEEK_MS, "%b %d"),
        ];
        if let Some(&(step, fmt)) = fixed.iter().find(|(step, _)| span / step <= target) {
            return fixed_ticks(lo, hi, step, fmt);
        }
        for months in [1, 3] {
            if span / (months as i64 * MONTH_MS) <= target {
                return month_ticks(lo, hi, months);
            }
        }
        let years = ((span / YEAR_MS) / target).max(1) as i32;
        year_ticks(lo, hi, years)
    }
}

fn format_tick(ms: i64, fmt: &str) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

fn fixed_ticks(lo: i64, hi: i64, step: i64, fmt: &str) -> Vec<(i64, String)> {
    let mut tick = lo.div_euclid(step) * step;
    if tick < lo {
        tick += step;
    }
    let mut ticks = Vec::new();
    while tick <= hi {
        ticks.push((tick, format_tick(tick, fmt)));
        tick += step;
    }
    ticks
}

fn month_start_ms(year: i32, month0: u32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

fn month_ticks(lo: i64, hi: i64, step: u32) -> Vec<(i64, String)> {
    let Some(start) = Utc.timestamp_millis_opt(lo).single() else {
        return Vec::new();
    };
    let mut index = start.year() * 12 + (start.month0() - start.month0() % step) as i32;
    let mut ticks = Vec::new();
    while let Some(ms) = month_start_ms(index.div_euclid(12), index.rem_euclid(12) as u32) {
        if ms > hi {
            break;
        }
        if ms >= lo {
            ticks.push((ms, format_tick(ms, "%b %Y")));
        }
        index += step as i32;
    }
    ticks
}

fn year_ticks(lo: i64, hi: i64, step: i32) -> Vec<(i64, String)> {
    let Some(start) = Utc.timestamp_millis_opt(lo).single() else {
        return Vec::new();
    };
    let mut year = start.year() - start.year().rem_euclid(step);
    let mut ticks = Vec::new();
    while let Some(ms) = month_start_ms(year, 0) {
        if ms > hi {
            break;
        }
        if ms >= lo {
            ticks.push((ms, format_tick(ms, "%Y")));
        }
        year += step;
    }
    ticks
}

/// Round ticks: steps of 1, 2 or 5 times a power of ten, about `count` of them.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(start.is_finite() && stop.is_finite()) || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = (start.min(stop), start.max(stop));
    let step = tick_step(lo, hi, count);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapping {
    x: Option<TimeScale>,
    y: LinearScale,
    radius_domain: Option<(usize, usize)>,
    radius_range: (f64, f64),
}

impl CoordinateMapping {
    pub fn for_subset<'a, I>(commits: I, layout: &PlotLayout, radius_range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut time_domain: Option<(i64, i64)> = None;
        let mut radius_domain: Option<(usize, usize)> = None;

        for commit in commits {
            if let Some(datetime) = commit.datetime() {
                let ms = datetime.timestamp_millis();
                time_domain = Some(match time_domain {
                    Some((lo, hi)) => (lo.min(ms), hi.max(ms)),
                    None => (ms, ms),
                });
            }
            let n = commit.total_lines();
            radius_domain = Some(match radius_domain {
                Some((lo, hi)) => (lo.min(n), hi.max(n)),
                None => (n, n),
            });
        }

        let usable = layout.usable;
        Self {
            x: time_domain.map(|d| TimeScale::new(d, (usable.left, usable.right))),
            y: LinearScale::new((0.0, 24.0), (usable.bottom, usable.top)),
            radius_domain,
            radius_range,
        }
    }

    #[cfg(test)]
    pub fn time_domain(&self) -> Option<(i64, i64)> {
        self.x.map(|x| x.domain())
    }

    #[cfg(test)]
    pub fn radius_domain(&self) -> Option<(usize, usize)> {
        self.radius_domain
    }

    /// `None` when the subset had no dated commits.
    pub fn time_to_x(&self, datetime: DateTime<FixedOffset>) -> Option<f64> {
        self.x.map(|x| x.map(datetime))
    }

    pub fn hour_to_y(&self, hour: f64) -> f64 {
        self.y.map(hour)
    }

    pub fn lines_to_radius(&self, lines: usize) -> f64 {
        match self.radius_domain {
            Some((lo, hi)) => {
                SqrtScale::new((lo as f64, hi as f64), self.radius_range).map(lines as f64)
            }
            None => self.radius_range.0,
        }
    }

    pub fn position(&self, commit: &Commit) -> Option<(f64, f64)> {
        let x = self.time_to_x(commit.datetime()?)?;
        let y = self.hour_to_y(commit.hour_frac()?);
        Some((x, y))
    }

    pub fn x_ticks(&self, count: usize) -> Vec<Tick> {
        let Some(x) = self.x else {
            return Vec::new();
        };
        x.ticks(count)
            .into_iter()
            .map(|(ms, label)| Tick {
                offset: x.linear.map(ms as f64),
                label,
            })
            .collect()
    }

    pub fn y_ticks(&self, count: usize) -> Vec<Tick> {
        self.y
            .ticks(count)
            .into_iter()
            .map(|hour| Tick {
                offset: self.y.map(hour),
                label: format!("{:02}:00", (hour as i64).rem_euclid(24)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::viz::test_support::{commit_at, three_commits};

    #[test]
    fn linear_ticks_for_hours_step_by_two() {
        let ticks = linear_ticks(0.0, 24.0, 10);

        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&24.0));
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(scale.map(5.0), 50.0);

        let sqrt = SqrtScale::new((7.0, 7.0), (2.0, 30.0));
        assert_eq!(sqrt.map(7.0), 16.0);
    }

    #[test]
    fn sqrt_scale_makes_area_linear() {
        let scale = SqrtScale::new((0.0, 100.0), (0.0, 10.0));

        assert_eq!(scale.map(25.0), 5.0);
        assert_eq!(scale.map(100.0), 10.0);
    }

    #[test]
    fn mapping_domains_follow_subset() {
        let commits = three_commits();
        let layout = PlotConfig::default().layout();

        let mapping = CoordinateMapping::for_subset(&commits, &layout, (2.0, 30.0));

        assert_eq!(mapping.radius_domain(), Some((5, 40)));
        assert_eq!(mapping.lines_to_radius(5), 2.0);
        assert_eq!(mapping.lines_to_radius(40), 30.0);
        let first = commits[0].datetime().expect("dated");
        let last = commits[2].datetime().expect("dated");
        assert_eq!(
            mapping.time_domain(),
            Some((first.timestamp_millis(), last.timestamp_millis()))
        );
        assert_eq!(mapping.time_to_x(first), Some(layout.usable.left));
        assert_eq!(mapping.time_to_x(last), Some(layout.usable.right));
    }

    #[test]
    fn hour_axis_is_inverted() {
        let layout = PlotConfig::default().layout();
        let mapping = CoordinateMapping::for_subset(std::iter::empty::<&Commit>(), &layout, (2.0, 30.0));

        assert_eq!(mapping.hour_to_y(0.0), layout.usable.bottom);
        assert_eq!(mapping.hour_to_y(24.0), layout.usable.top);
        assert!(mapping.hour_to_y(14.5) < mapping.hour_to_y(9.0));
        assert_eq!(mapping.y_ticks(10)[7].label, "14:00");
    }

    #[test]
    fn equal_datetimes_map_to_equal_x() {
        let commits = vec![
            commit_at("a", "2025-01-01T10:00:00Z", 1),
            commit_at("b", "2025-01-01T02:00:00-08:00", 3),
            commit_at("c", "2025-01-03T10:00:00Z", 1),
        ];
        let layout = PlotConfig::default().layout();
        let mapping = CoordinateMapping::for_subset(&commits, &layout, (2.0, 30.0));

        assert_eq!(
            mapping.position(&commits[0]).map(|p| p.0),
            mapping.position(&commits[1]).map(|p| p.0)
        );
    }

    #[test]
    fn empty_subset_has_no_positions() {
        let layout = PlotConfig::default().layout();
        let mapping = CoordinateMapping::for_subset(std::iter::empty::<&Commit>(), &layout, (2.0, 30.0));
        let commit = commit_at("a", "2025-01-01T10:00:00Z", 1);

        assert_eq!(mapping.position(&commit), None);
        assert!(mapping.x_ticks(10).is_empty());
        assert_eq!(mapping.lines_to_radius(10), 2.0);
    }

    #[test]
    fn time_ticks_pick_day_interval_for_a_week() {
        let scale = TimeScale::new((0, 7 * DAY_MS), (0.0, 700.0));

        let ticks = scale.ticks(10);

        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0].1, "Jan 01");
        assert_eq!(ticks[1].0, DAY_MS);
    }

    #[test]
    fn time_ticks_pick_months_for_a_year() {
        let start = month_start_ms(2024, 0).expect("valid");
        let end = month_start_ms(2025, 0).expect("valid");
        let scale = TimeScale::new((start, end), (0.0, 100.0));

        let ticks = scale.ticks(10);

        assert_eq!(ticks.first().map(|t| t.1.as_str()), Some("Jan 2024"));
        assert_eq!(ticks.last().map(|t| t.1.as_str()), Some("Jan 2025"));
        assert_eq!(ticks.len(), 5);
    }
}
