// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offerable fulfillment date resolution.
//!
//! Given the weekly rules, one-off dates, closures and the current instant,
//! this module computes which calendar dates a customer may choose for
//! delivery or pickup.
//!
//! ## Rules
//!
//! - `now` is converted to business time exactly once per resolution
//! - A weekly candidate is valid iff `now < cutoff` and
//!   `date >= today + effective lead days`
//! - Closures beat one-off dates, one-off dates beat weekly candidates
//! - Among weekly candidates on the same date, the lowest schedule id wins
//! - One-off dates are not bounded by the lookahead horizon
//! - An empty result means "nothing offerable" and is never an error

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    BusinessTimezone, add_days, format_time_window, most_recent_weekday_on_or_before, sub_days,
};
use crate::error::DomainError;
use crate::order::FulfillmentMethod;
use crate::product::Product;
use crate::schedule::{CalendarClosure, DeliverySchedule, OneOffDate, PickupLocation};

/// Number of weeks of weekly candidates generated when not configured.
pub const DEFAULT_LOOKAHEAD_WEEKS: u32 = 4;

/// Tunables for a resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub timezone: BusinessTimezone,
    pub lookahead_weeks: u32,
    /// Truncate the sorted result to this many dates.
    pub max_dates: Option<usize>,
}

impl ResolverConfig {
    /// Creates a configuration with the default horizon and no truncation.
    #[must_use]
    pub const fn new(timezone: BusinessTimezone) -> Self {
        Self {
            timezone,
            lookahead_weeks: DEFAULT_LOOKAHEAD_WEEKS,
            max_dates: None,
        }
    }

    /// Returns a copy truncating results to `max_dates`.
    #[must_use]
    pub const fn with_max_dates(mut self, max_dates: Option<usize>) -> Self {
        self.max_dates = max_dates;
        self
    }

    /// Returns a copy with a different horizon.
    #[must_use]
    pub const fn with_lookahead_weeks(mut self, weeks: u32) -> Self {
        self.lookahead_weeks = weeks;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(BusinessTimezone::default())
    }
}

/// Where an offered date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DateSource {
    Weekly { schedule_id: i64 },
    Pickup { location_id: i64 },
    OneOff { one_off_id: i64 },
}

/// A calendar date the customer may choose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOption {
    pub date: NaiveDate,
    /// Last instant at which the date can be ordered (exclusive).
    pub cutoff: DateTime<Utc>,
    pub time_window: String,
    pub source: DateSource,
}

#[derive(Debug, Clone, Copy)]
enum CutoffRule {
    /// A weekday and wall-clock time on or before the fulfillment date.
    Weekly { day: Weekday, time: NaiveTime },
    /// Midnight beginning the day after `date - lead`.
    LeadTime,
}

struct Candidate {
    option: DateOption,
    /// Lower wins on a date collision: one-offs first, then schedule id.
    rank: (u8, i64),
}

/// The resolution frame: `now`, today's business date, and product scope.
struct Frame {
    timezone: BusinessTimezone,
    now: DateTime<Utc>,
    today: NaiveDate,
    horizon_days: u32,
    product_lead: u32,
}

fn default_cutoff_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

fn day_before(date: NaiveDate) -> Result<Weekday, DomainError> {
    Ok(sub_days(date, 1)?.weekday())
}

impl Frame {
    /// Opens a frame, or returns `None` if the product scope rules out `method`.
    fn open(
        method: FulfillmentMethod,
        product: Option<&Product>,
        now: DateTime<Utc>,
        config: &ResolverConfig,
    ) -> Option<Self> {
        if product.is_some_and(|p| !p.is_offerable(method)) {
            return None;
        }

        Some(Self {
            timezone: config.timezone,
            now,
            today: config.timezone.today(now),
            horizon_days: config.lookahead_weeks.saturating_mul(7),
            product_lead: product.and_then(|p| p.lead_time_days).unwrap_or(0),
        })
    }

    const fn effective_lead(&self, rule_lead: u32) -> u32 {
        if rule_lead > self.product_lead {
            rule_lead
        } else {
            self.product_lead
        }
    }

    /// Dates in `[today, today + horizon)` falling on `weekday`.
    fn weekly_dates(&self, weekday: Weekday) -> Result<Vec<NaiveDate>, DomainError> {
        let first: u32 = (weekday.num_days_from_sunday() + 7
            - self.today.weekday().num_days_from_sunday())
            % 7;
        (first..self.horizon_days)
            .step_by(7)
            .map(|offset| add_days(self.today, offset))
            .collect()
    }

    fn cutoff_instant(
        &self,
        date: NaiveDate,
        rule: CutoffRule,
        lead: u32,
    ) -> Result<DateTime<Utc>, DomainError> {
        match rule {
            CutoffRule::Weekly { day, time } => {
                let cutoff_date = most_recent_weekday_on_or_before(date, day)?;
                self.timezone.localize(cutoff_date, time)
            }
            CutoffRule::LeadTime => {
                let last_order_day = sub_days(date, lead)?;
                self.timezone
                    .localize(add_days(last_order_day, 1)?, NaiveTime::MIN)
            }
        }
    }

    fn admits(&self, date: NaiveDate, cutoff: DateTime<Utc>, lead: u32) -> Result<bool, DomainError> {
        Ok(self.now < cutoff && date >= add_days(self.today, lead)?)
    }

    /// Builds a candidate if it passes the cutoff and lead-time checks.
    fn candidate(
        &self,
        date: NaiveDate,
        rule: CutoffRule,
        rule_lead: u32,
        time_window: String,
        source: DateSource,
        rank: (u8, i64),
    ) -> Result<Option<Candidate>, DomainError> {
        let lead: u32 = self.effective_lead(rule_lead);
        let cutoff: DateTime<Utc> = self.cutoff_instant(date, rule, lead)?;
        if !self.admits(date, cutoff, lead)? {
            return Ok(None);
        }
        Ok(Some(Candidate {
            option: DateOption {
                date,
                cutoff,
                time_window,
                source,
            },
            rank,
        }))
    }
}

/// Applies closures, collapses collisions, sorts and truncates.
fn finish(
    mut candidates: Vec<Candidate>,
    closures: &[CalendarClosure],
    method: FulfillmentMethod,
    max_dates: Option<usize>,
) -> Vec<DateOption> {
    candidates.retain(|c| {
        !closures
            .iter()
            .any(|closure| closure.closure_date == c.option.date && closure.blocks(method))
    });
    candidates.sort_by_key(|c| (c.option.date, c.rank));
    candidates.dedup_by_key(|c| c.option.date);

    let mut options: Vec<DateOption> = candidates.into_iter().map(|c| c.option).collect();
    if let Some(max) = max_dates {
        options.truncate(max);
    }
    options
}

/// Resolves offerable delivery dates.
///
/// # Arguments
///
/// * `schedules` - All delivery schedules; inactive ones generate nothing
///   but may still be referenced by a one-off date
/// * `one_offs` - One-off dates of any method; only delivery ones are used
/// * `closures` - Calendar closures
/// * `product` - Optional product scope
/// * `now` - The current instant
/// * `config` - Timezone, horizon and truncation
///
/// # Errors
///
/// Returns an error only if date arithmetic overflows or a local time cannot
/// be mapped into the business timezone.
pub fn resolve_delivery_dates(
    schedules: &[DeliverySchedule],
    one_offs: &[OneOffDate],
    closures: &[CalendarClosure],
    product: Option<&Product>,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<Vec<DateOption>, DomainError> {
    let method = FulfillmentMethod::Delivery;
    let Some(frame) = Frame::open(method, product, now, config) else {
        return Ok(Vec::new());
    };

    let mut active: Vec<&DeliverySchedule> = schedules.iter().filter(|s| s.is_active).collect();
    active.sort_by_key(|s| s.id);

    let mut candidates: Vec<Candidate> = Vec::new();

    for schedule in &active {
        for date in frame.weekly_dates(schedule.day_of_week)? {
            let rule = CutoffRule::Weekly {
                day: schedule.cutoff_day,
                time: schedule.cutoff_time,
            };
            if let Some(candidate) = frame.candidate(
                date,
                rule,
                schedule.lead_time_days,
                schedule.delivery_time_window.clone(),
                DateSource::Weekly {
                    schedule_id: schedule.id,
                },
                (1, schedule.id),
            )? {
                candidates.push(candidate);
            }
        }
    }

    let fallback: Option<&DeliverySchedule> = active.first().copied();

    for one_off in one_offs.iter().filter(|o| o.method == method) {
        let base: Option<&DeliverySchedule> = one_off
            .schedule_id
            .and_then(|id| schedules.iter().find(|s| s.id == id))
            .or(fallback);

        let day: Weekday = match one_off.cutoff_day.or_else(|| base.map(|s| s.cutoff_day)) {
            Some(day) => day,
            None => day_before(one_off.date)?,
        };
        let time: NaiveTime = one_off
            .cutoff_time
            .or_else(|| base.map(|s| s.cutoff_time))
            .unwrap_or_else(default_cutoff_time);
        let lead: u32 = one_off
            .lead_time_days
            .or_else(|| base.map(|s| s.lead_time_days))
            .unwrap_or(0);
        let time_window: String =
            format_time_window(one_off.time_window_start, one_off.time_window_end)
                .or_else(|| base.map(|s| s.delivery_time_window.clone()))
                .unwrap_or_default();

        if let Some(candidate) = frame.candidate(
            one_off.date,
            CutoffRule::Weekly { day, time },
            lead,
            time_window,
            DateSource::OneOff {
                one_off_id: one_off.id,
            },
            (0, one_off.id),
        )? {
            candidates.push(candidate);
        }
    }

    Ok(finish(candidates, closures, method, config.max_dates))
}

/// Resolves offerable pickup dates at one location.
///
/// Weekly candidates come from the location's pickup days and use a pure
/// lead-time cutoff. A pickup one-off date only gets a weekday cutoff when
/// it sets `cutoff_day` or `cutoff_time`; the missing half defaults to the
/// day before at 23:59.
///
/// # Errors
///
/// Returns an error only if date arithmetic overflows or a local time cannot
/// be mapped into the business timezone.
pub fn resolve_pickup_dates(
    location: &PickupLocation,
    one_offs: &[OneOffDate],
    closures: &[CalendarClosure],
    product: Option<&Product>,
    now: DateTime<Utc>,
    config: &ResolverConfig,
) -> Result<Vec<DateOption>, DomainError> {
    let method = FulfillmentMethod::Pickup;
    if !location.is_active {
        return Ok(Vec::new());
    }
    let Some(frame) = Frame::open(method, product, now, config) else {
        return Ok(Vec::new());
    };

    let location_lead: u32 = if location.requires_preorder {
        location.lead_time_days.max(1)
    } else {
        location.lead_time_days
    };

    let mut weekdays: Vec<Weekday> = location.pickup_days.clone();
    weekdays.sort_by_key(Weekday::num_days_from_sunday);
    weekdays.dedup();

    let mut candidates: Vec<Candidate> = Vec::new();

    for weekday in weekdays {
        for date in frame.weekly_dates(weekday)? {
            if let Some(candidate) = frame.candidate(
                date,
                CutoffRule::LeadTime,
                location_lead,
                location.pickup_time_windows.clone(),
                DateSource::Pickup {
                    location_id: location.id,
                },
                (1, location.id),
            )? {
                candidates.push(candidate);
            }
        }
    }

    for one_off in one_offs.iter().filter(|o| o.method == method) {
        let rule: CutoffRule = if one_off.cutoff_day.is_some() || one_off.cutoff_time.is_some() {
            let day: Weekday = match one_off.cutoff_day {
                Some(day) => day,
                None => day_before(one_off.date)?,
            };
            CutoffRule::Weekly {
                day,
                time: one_off.cutoff_time.unwrap_or_else(default_cutoff_time),
            }
        } else {
            CutoffRule::LeadTime
        };
        let time_window: String =
            format_time_window(one_off.time_window_start, one_off.time_window_end)
                .unwrap_or_else(|| location.pickup_time_windows.clone());

        if let Some(candidate) = frame.candidate(
            one_off.date,
            rule,
            one_off.lead_time_days.unwrap_or(location_lead),
            time_window,
            DateSource::OneOff {
                one_off_id: one_off.id,
            },
            (0, one_off.id),
        )? {
            candidates.push(candidate);
        }
    }

    Ok(finish(candidates, closures, method, config.max_dates))
}

/// Returns true if `date` appears in `options`.
#[must_use]
pub fn is_offered(options: &[DateOption], date: NaiveDate) -> bool {
    options.iter().any(|o| o.date == date)
}
