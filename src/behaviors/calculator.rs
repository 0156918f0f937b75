use std::rc::Rc;

use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::config::Settings;
use crate::dom::{self, Bindings, Listener};

pub const PULSE_CLASS: &str = "pulse";

pub const PULSE_CSS: &str = r#"
    @keyframes pulse {
        0% { transform: scale(1); }
        50% { transform: scale(1.05); }
        100% { transform: scale(1); }
    }
    .pulse {
        animation: pulse 0.3s ease-in-out;
    }
"#;

/// Anything that is not a positive finite number counts as zero.
pub fn parse_hours(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours > 0.0 => hours,
        _ => 0.0,
    }
}

pub fn parse_days(raw: &str) -> u32 {
    let raw = raw.trim();
    let digits = raw.find('.').map_or(raw, |dot| &raw[..dot]);
    digits.parse::<u32>().unwrap_or(0)
}

pub fn unit_label(value: f64, unit: &str) -> String {
    if value == 1.0 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub weekly_hours: f64,
    pub monthly_hours: f64,
    pub min_monthly: i64,
    pub max_monthly: i64,
}

impl Estimate {
    pub fn new(hours: f64, days: u32, settings: &Settings) -> Self {
        let weekly_hours = hours * days as f64;
        let monthly_hours = weekly_hours * settings.weeks_per_month;
        Self {
            weekly_hours,
            monthly_hours,
            min_monthly: (monthly_hours * settings.min_hourly_rate).round() as i64,
            max_monthly: (monthly_hours * settings.max_hourly_rate).round() as i64,
        }
    }

    pub fn display(&self) -> String {
        format!("${} - ${}", self.min_monthly, self.max_monthly)
    }
}

struct CalculatorView {
    hours_input: HtmlInputElement,
    days_input: HtmlInputElement,
    hours_value: Option<HtmlElement>,
    days_value: Option<HtmlElement>,
    output: HtmlElement,
    settings: Settings,
}

impl CalculatorView {
    fn render(&self) {
        let hours = parse_hours(&self.hours_input.value());
        let days = parse_days(&self.days_input.value());

        if let Some(label) = &self.hours_value {
            label.set_text_content(Some(&unit_label(hours, "hour")));
        }
        if let Some(label) = &self.days_value {
            label.set_text_content(Some(&unit_label(days as f64, "day")));
        }

        let estimate = Estimate::new(hours, days, &self.settings);
        self.output.set_text_content(Some(&estimate.display()));

        dom::remove_class(&self.output, PULSE_CLASS);
        dom::force_reflow(&self.output);
        dom::add_class(&self.output, PULSE_CLASS);
    }
}

pub fn attach(document: &Document, settings: &Settings) -> Option<Bindings> {
    let view = Rc::new(CalculatorView {
        hours_input: dom::by_id(document, "hours-input")?,
        days_input: dom::by_id(document, "days-input")?,
        hours_value: dom::by_id(document, "hours-value"),
        days_value: dom::by_id(document, "days-value"),
        output: dom::by_id(document, "estimated-earnings")?,
        settings: settings.clone(),
    });

    let mut bindings = Bindings::default();
    for input in [view.hours_input.clone(), view.days_input.clone()] {
        let view = view.clone();
        bindings.listen(Listener::new(&input, "input", move |_| view.render()));
    }

    view.render();
    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_hours_five_days() {
        let estimate = Estimate::new(2.0, 5, &Settings::default());
        assert_eq!(estimate.weekly_hours, 10.0);
        assert!((estimate.monthly_hours - 43.3).abs() < 1e-9);
        assert_eq!(estimate.min_monthly, 173);
        assert_eq!(estimate.max_monthly, 520);
        assert_eq!(estimate.display(), "$173 - $520");
    }

    #[test]
    fn fractional_hours() {
        // 1.5 * 7 = 10.5 weekly, 45.465 monthly
        let estimate = Estimate::new(1.5, 7, &Settings::default());
        assert_eq!(estimate.display(), "$182 - $546");
    }

    #[test]
    fn zero_input_is_zero_range() {
        assert_eq!(Estimate::new(0.0, 5, &Settings::default()).display(), "$0 - $0");
    }

    #[test]
    fn bad_input_clamps_to_zero() {
        assert_eq!(parse_hours("abc"), 0.0);
        assert_eq!(parse_hours("-3"), 0.0);
        assert_eq!(parse_hours("NaN"), 0.0);
        assert_eq!(parse_hours(" 2.5 "), 2.5);
        assert_eq!(parse_days("x"), 0);
        assert_eq!(parse_days("4.9"), 4);
        assert_eq!(parse_days("6"), 6);
    }

    #[test]
    fn labels_pluralize_except_one() {
        assert_eq!(unit_label(1.0, "hour"), "1 hour");
        assert_eq!(unit_label(2.5, "hour"), "2.5 hours");
        assert_eq!(unit_label(0.0, "day"), "0 days");
        assert_eq!(unit_label(7.0, "day"), "7 days");
    }
}
