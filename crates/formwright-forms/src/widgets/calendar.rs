//! Date picker.
//!
//! The panel is either closed or open; while open, a year picker may be
//! shown on top of the day grid. Navigating months only moves the month
//! cursor. Picking a day writes the ISO date (`YYYY-MM-DD`) and closes the
//! panel. A pointer-down or touch-start outside the widget closes the panel
//! without touching the selection.

use std::fmt::Write as _;

use chrono::{Datelike, Months, NaiveDate, Weekday};

use formwright_core::settings::WeekStart;
use formwright_core::{FormError, FormResult};

use super::{unsupported, InputWidget, ValueIntent, WidgetContext, WidgetEvent, WidgetView};
use crate::fields::{CalendarConfig, KindTag};
use crate::value::Value;

const ISO_DATE: &str = "%Y-%m-%d";

/// One cell of the day grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    /// `false` for the leading and trailing days of neighbouring months.
    pub in_current_month: bool,
    pub selected: bool,
    pub today: bool,
}

/// Renderable state of a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub open: bool,
    pub year_picker_open: bool,
    /// First day of the month under the cursor.
    pub current_month: NaiveDate,
    pub month_label: String,
    /// Short weekday names in grid column order.
    pub weekdays: Vec<String>,
    /// Whole weeks covering the current month.
    pub days: Vec<CalendarDay>,
    pub years: Vec<i32>,
    pub selected_date: Option<NaiveDate>,
    /// The selected date in the display format.
    pub selected_display: Option<String>,
}

/// A date picker.
#[derive(Debug, Clone)]
pub struct CalendarInput {
    name: String,
    today: NaiveDate,
    current_month: NaiveDate,
    open: bool,
    year_picker_open: bool,
    selected_date: Option<NaiveDate>,
    years: Vec<i32>,
    week_start: Weekday,
    display_format: String,
    month_label_format: String,
}

impl CalendarInput {
    /// Creates a calendar with the cursor on the month containing `ctx.today`.
    pub fn new(name: &str, config: &CalendarConfig, ctx: &WidgetContext<'_>) -> FormResult<Self> {
        let years = match &config.years_to_select {
            Some(years) if years.is_empty() => {
                return Err(FormError::missing_config(name, "years_to_select is empty"));
            }
            Some(years) => years.clone(),
            None => {
                let span = ctx.settings.calendar_year_span.abs();
                let year = ctx.today.year();
                (year - span..=year + span).collect()
            }
        };
        Ok(Self {
            name: name.to_string(),
            today: ctx.today,
            current_month: first_of_month(ctx.today),
            open: false,
            year_picker_open: false,
            selected_date: None,
            years,
            week_start: match ctx.settings.week_start {
                WeekStart::Monday => Weekday::Mon,
                WeekStart::Sunday => Weekday::Sun,
            },
            display_format: ctx.settings.date_display_format.clone(),
            month_label_format: ctx.settings.month_label_format.clone(),
        })
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_year_picker_open(&self) -> bool {
        self.year_picker_open
    }

    pub const fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// First day of the month under the cursor.
    pub const fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    /// The selectable years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Every day of the weeks covering the current month, in grid order.
    pub fn grid(&self) -> Vec<NaiveDate> {
        let first = self.current_month;
        let last = last_of_month(first);
        let week_end = self.week_start.pred();
        let lead = days_between(self.week_start, first.weekday());
        let trail = days_between(last.weekday(), week_end);
        let start = first - chrono::Duration::days(i64::from(lead));
        let end = last + chrono::Duration::days(i64::from(trail));
        start.iter_days().take_while(|d| *d <= end).collect()
    }

    fn close(&mut self) {
        if self.open {
            tracing::debug!(field = %self.name, "calendar closed");
        }
        self.open = false;
        self.year_picker_open = false;
    }

    fn shift_month(&mut self, forward: bool) -> FormResult<()> {
        let one = Months::new(1);
        let moved = if forward {
            self.current_month.checked_add_months(one)
        } else {
            self.current_month.checked_sub_months(one)
        };
        self.current_month = moved.ok_or_else(|| self.out_of_range("month"))?;
        Ok(())
    }

    fn pick_day(&mut self, date: NaiveDate) -> FormResult<Vec<ValueIntent>> {
        if !self.grid().contains(&date) {
            return Err(FormError::InvalidOption {
                field: self.name.clone(),
                detail: format!("{date} is not in the visible grid"),
            });
        }
        self.selected_date = Some(date);
        self.current_month = first_of_month(date);
        self.close();
        let iso = date.format(ISO_DATE).to_string();
        Ok(vec![ValueIntent::validated(&self.name, iso)])
    }

    fn pick_year(&mut self, year: i32) -> FormResult<()> {
        if !self.years.contains(&year) {
            return Err(FormError::InvalidOption {
                field: self.name.clone(),
                detail: format!("year {year} is not selectable"),
            });
        }
        self.current_month = self
            .current_month
            .with_year(year)
            .ok_or_else(|| self.out_of_range("year"))?;
        self.year_picker_open = false;
        Ok(())
    }

    fn out_of_range(&self, what: &str) -> FormError {
        FormError::InvalidOption {
            field: self.name.clone(),
            detail: format!("{what} out of range"),
        }
    }
}

impl InputWidget for CalendarInput {
    fn kind(&self) -> KindTag {
        KindTag::Calendar
    }

    fn on_mount(&mut self, current: &Value) -> Vec<ValueIntent> {
        if let Some(date) = current
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, ISO_DATE).ok())
        {
            self.selected_date = Some(date);
            self.current_month = first_of_month(date);
        }
        Vec::new()
    }

    fn handle(&mut self, event: WidgetEvent, _current: &Value) -> FormResult<Vec<ValueIntent>> {
        match event {
            WidgetEvent::Activate => {
                self.open = true;
            }
            WidgetEvent::PointerDown { inside } | WidgetEvent::TouchStart { inside } => {
                if !inside {
                    self.close();
                }
            }
            WidgetEvent::PickDay(date) => return self.pick_day(date),
            WidgetEvent::NextMonth => self.shift_month(true)?,
            WidgetEvent::PrevMonth => self.shift_month(false)?,
            WidgetEvent::ToggleYearPicker => {
                self.year_picker_open = !self.year_picker_open;
            }
            WidgetEvent::PickYear(year) => self.pick_year(year)?,
            WidgetEvent::Blur => {}
            other => return Err(unsupported(&self.name, &other)),
        }
        Ok(Vec::new())
    }

    fn view(&self, _current: &Value) -> WidgetView {
        let days = self
            .grid()
            .into_iter()
            .map(|date| CalendarDay {
                date,
                day: date.day(),
                in_current_month: date.month() == self.current_month.month(),
                selected: self.selected_date == Some(date),
                today: date == self.today,
            })
            .collect();
        let weekdays = std::iter::successors(Some(self.week_start), |d| Some(d.succ()))
            .take(7)
            .map(|d| d.to_string())
            .collect();
        WidgetView::Calendar(CalendarView {
            open: self.open,
            year_picker_open: self.year_picker_open,
            current_month: self.current_month,
            month_label: format_date(self.current_month, &self.month_label_format),
            weekdays,
            days,
            years: self.years.clone(),
            selected_date: self.selected_date,
            selected_display: self
                .selected_date
                .map(|d| format_date(d, &self.display_format)),
        })
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.day0()))
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Days to step forward from `from` to reach `to`.
fn days_between(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}

/// Formats `date`, falling back to ISO when `pattern` is not a valid format.
fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        tracing::warn!(pattern, "invalid date format, using ISO");
        return date.format(ISO_DATE).to_string();
    }
    out
}
