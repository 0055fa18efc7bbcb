//! Target form state and validation.
//!
//! The setup view edits a [`TargetForm`]: a dynamically extensible list of URL
//! fields plus the interval and requests-per-check settings. [`collect`] turns
//! the form into a validated [`MonitorPlan`] or fails with a
//! [`ValidationError`] that the caller surfaces in the status bar without
//! starting the loop.

use thiserror::Error;

use crate::data::MonitorTarget;

/// Minimum allowed check interval, in seconds.
pub const MIN_INTERVAL_SECS: u64 = 5;
/// Minimum allowed requests per check.
pub const MIN_REQUESTS: u32 = 1;

/// Why a form could not be turned into a monitoring plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No non-blank URL field exists.
    #[error("enter at least one website URL")]
    NoUrlsProvided,
    /// Interval below [`MIN_INTERVAL_SECS`].
    #[error("interval must be at least {MIN_INTERVAL_SECS} seconds (got {0})")]
    IntervalTooSmall(u64),
    /// Requests per check below [`MIN_REQUESTS`].
    #[error("requests per check must be at least {MIN_REQUESTS} (got {0})")]
    RequestsTooFew(u32),
}

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// One of the URL rows.
    Url(usize),
    /// The interval field.
    Interval,
    /// The requests-per-check field.
    Requests,
}

/// Editable state of the setup form.
///
/// URL rows may be blank; blanks are filtered out at collection time, so an
/// "add another URL" row left empty never causes an error by itself.
#[derive(Debug, Clone)]
pub struct TargetForm {
    /// URL text fields, one per row.
    pub urls: Vec<String>,
    /// Check interval field, edited as text.
    pub interval: String,
    /// Requests-per-check field, edited as text.
    pub requests: String,
    /// Currently focused field.
    pub focus: FormFocus,
}

impl TargetForm {
    /// Create a form with one blank URL row and the given defaults.
    pub fn new(interval: u64, requests: u32) -> Self {
        Self {
            urls: vec![String::new()],
            interval: interval.to_string(),
            requests: requests.to_string(),
            focus: FormFocus::Url(0),
        }
    }

    /// Pre-fill the URL rows, keeping one trailing blank row for additions.
    pub fn with_urls(mut self, urls: &[String]) -> Self {
        if !urls.is_empty() {
            self.urls = urls.to_vec();
            self.urls.push(String::new());
        }
        self
    }

    /// Append a blank URL row and focus it.
    pub fn add_url_row(&mut self) {
        self.urls.push(String::new());
        self.focus = FormFocus::Url(self.urls.len() - 1);
    }

    /// Remove the focused URL row, keeping at least one.
    pub fn remove_url_row(&mut self) {
        if let FormFocus::Url(index) = self.focus {
            if self.urls.len() > 1 {
                self.urls.remove(index);
                self.focus = FormFocus::Url(index.min(self.urls.len() - 1));
            } else {
                self.urls[0].clear();
            }
        }
    }

    /// Move focus to the next field, cycling through rows then settings.
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormFocus::Url(i) if i + 1 < self.urls.len() => FormFocus::Url(i + 1),
            FormFocus::Url(_) => FormFocus::Interval,
            FormFocus::Interval => FormFocus::Requests,
            FormFocus::Requests => FormFocus::Url(0),
        };
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormFocus::Url(0) => FormFocus::Requests,
            FormFocus::Url(i) => FormFocus::Url(i - 1),
            FormFocus::Interval => FormFocus::Url(self.urls.len() - 1),
            FormFocus::Requests => FormFocus::Interval,
        };
    }

    /// Type a character into the focused field.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Url(i) => self.urls[i].push(c),
            // Settings fields only accept digits
            FormFocus::Interval => {
                if c.is_ascii_digit() {
                    self.interval.push(c);
                }
            }
            FormFocus::Requests => {
                if c.is_ascii_digit() {
                    self.requests.push(c);
                }
            }
        }
    }

    /// Delete the last character of the focused field.
    pub fn pop_char(&mut self) {
        match self.focus {
            FormFocus::Url(i) => {
                self.urls[i].pop();
            }
            FormFocus::Interval => {
                self.interval.pop();
            }
            FormFocus::Requests => {
                self.requests.pop();
            }
        }
    }
}

/// A validated set of targets ready to hand to the monitor loop.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorPlan {
    /// One entry per non-blank URL, each carrying the shared settings.
    pub targets: Vec<MonitorTarget>,
    /// Loop sleep duration in seconds (the first target's interval).
    pub interval: u64,
}

/// Validate the form and build a [`MonitorPlan`].
///
/// Pure with respect to application state: only reads the form. Blank URL
/// rows are dropped before the emptiness check; the numeric fields parse
/// leniently, with unparsable text treated as zero and caught by the range
/// checks.
pub fn collect(form: &TargetForm) -> Result<MonitorPlan, ValidationError> {
    let urls: Vec<String> = form
        .urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ValidationError::NoUrlsProvided);
    }

    let interval: u64 = form.interval.trim().parse().unwrap_or(0);
    if interval < MIN_INTERVAL_SECS {
        return Err(ValidationError::IntervalTooSmall(interval));
    }

    let requests: u32 = form.requests.trim().parse().unwrap_or(0);
    if requests < MIN_REQUESTS {
        return Err(ValidationError::RequestsTooFew(requests));
    }

    let targets = urls
        .into_iter()
        .map(|url| MonitorTarget {
            url,
            interval,
            requests,
        })
        .collect();

    Ok(MonitorPlan { targets, interval })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(urls: &[&str], interval: &str, requests: &str) -> TargetForm {
        TargetForm {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            interval: interval.to_string(),
            requests: requests.to_string(),
            focus: FormFocus::Url(0),
        }
    }

    #[test]
    fn test_collect_rejects_all_blank_urls() {
        let form = form_with(&["", "   ", ""], "30", "3");
        assert_eq!(collect(&form), Err(ValidationError::NoUrlsProvided));
    }

    #[test]
    fn test_collect_skips_blank_rows() {
        let form = form_with(&["https://a.com", "", "  https://b.com  "], "30", "3");
        let plan = collect(&form).unwrap();
        assert_eq!(plan.targets.len(), 2);
        assert_eq!(plan.targets[0].url, "https://a.com");
        assert_eq!(plan.targets[1].url, "https://b.com");
        assert_eq!(plan.interval, 30);
    }

    #[test]
    fn test_collect_interval_boundary() {
        let form = form_with(&["https://a.com"], "4", "3");
        assert_eq!(collect(&form), Err(ValidationError::IntervalTooSmall(4)));

        let form = form_with(&["https://a.com"], "5", "3");
        let plan = collect(&form).unwrap();
        assert_eq!(plan.interval, 5);
        assert_eq!(plan.targets[0].interval, 5);
    }

    #[test]
    fn test_collect_requests_boundary() {
        let form = form_with(&["https://a.com"], "30", "0");
        assert_eq!(collect(&form), Err(ValidationError::RequestsTooFew(0)));

        let form = form_with(&["https://a.com"], "30", "1");
        let plan = collect(&form).unwrap();
        assert_eq!(plan.targets[0].requests, 1);
    }

    #[test]
    fn test_collect_unparsable_numbers() {
        let form = form_with(&["https://a.com"], "", "3");
        assert_eq!(collect(&form), Err(ValidationError::IntervalTooSmall(0)));

        let form = form_with(&["https://a.com"], "30", "");
        assert_eq!(collect(&form), Err(ValidationError::RequestsTooFew(0)));
    }

    #[test]
    fn test_collect_settings_repeated_per_target() {
        let form = form_with(&["https://a.com", "https://b.com"], "10", "2");
        let plan = collect(&form).unwrap();
        for target in &plan.targets {
            assert_eq!(target.interval, 10);
            assert_eq!(target.requests, 2);
        }
    }

    #[test]
    fn test_form_row_editing() {
        let mut form = TargetForm::new(30, 3);
        assert_eq!(form.urls.len(), 1);

        form.push_char('a');
        assert_eq!(form.urls[0], "a");

        form.add_url_row();
        assert_eq!(form.urls.len(), 2);
        assert_eq!(form.focus, FormFocus::Url(1));

        form.remove_url_row();
        assert_eq!(form.urls.len(), 1);
        assert_eq!(form.focus, FormFocus::Url(0));

        // Removing the last remaining row just clears it
        form.remove_url_row();
        assert_eq!(form.urls.len(), 1);
        assert_eq!(form.urls[0], "");
    }

    #[test]
    fn test_form_focus_cycle() {
        let mut form = TargetForm::new(30, 3);
        form.add_url_row();
        form.focus = FormFocus::Url(0);

        form.focus_next();
        assert_eq!(form.focus, FormFocus::Url(1));
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Interval);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Requests);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Url(0));

        form.focus_prev();
        assert_eq!(form.focus, FormFocus::Requests);
    }

    #[test]
    fn test_settings_fields_accept_digits_only() {
        let mut form = TargetForm::new(30, 3);
        form.focus = FormFocus::Interval;
        form.push_char('x');
        form.push_char('5');
        assert_eq!(form.interval, "305");
    }
}
