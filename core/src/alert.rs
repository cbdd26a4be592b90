//! What the presentation layer shows when a fetch fails.

use std::fmt;

use crate::error::GithubFollowerError;

pub const ALERT_TITLE: &str = "Bad Stuff Happened";
pub const ALERT_BUTTON: &str = "Ok";

/// A dismissible alert: title, body and the label of its single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    pub button_title: &'static str,
}

impl Alert {
    pub fn for_error(error: &GithubFollowerError) -> Self {
        Self {
            title: ALERT_TITLE,
            message: error.message(),
            button_title: ALERT_BUTTON,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n[{}]", self.title, self.message, self.button_title)
    }
}
