use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::time_of_day::{Minutes, TimeOfDay};

/// Closed interval `[open, close]` in minutes of day.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub struct TimeWindow {
    open: TimeOfDay,
    close: TimeOfDay,
}

impl TimeWindow {
    pub const FULL_DAY: TimeWindow = TimeWindow {
        open: TimeOfDay::MIDNIGHT,
        close: TimeOfDay::END_OF_DAY,
    };

    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Self {
        TimeWindow { open, close }
    }

    pub fn from_minutes(open: Minutes, close: Minutes) -> Self {
        TimeWindow {
            open: TimeOfDay::from_minutes(open),
            close: TimeOfDay::from_minutes(close),
        }
    }

    pub fn open(&self) -> Minutes {
        self.open.minutes()
    }

    pub fn close(&self) -> Minutes {
        self.close.minutes()
    }

    pub fn is_inverted(&self) -> bool {
        self.open > self.close
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::FULL_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let window: TimeWindow =
            serde_json::from_str(r#"{ "open": "08:00", "close": "12:30" }"#).unwrap();

        assert_eq!(window.open(), 480);
        assert_eq!(window.close(), 750);
        assert!(!window.is_inverted());
    }
}
