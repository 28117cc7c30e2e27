use crate::calendar::YearMonth;
use crate::model::MemberCalendar;
use std::time::Instant;

pub struct TuiState {
    pub month: YearMonth,
    pub calendars: Vec<MemberCalendar>,
    pub selected: usize,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            calendars: Vec::new(),
            selected: 0,
            show_help: false,
            status_message: None,
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.calendars.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replace the displayed calendars, keeping the selection in bounds.
    pub fn set_calendars(&mut self, calendars: Vec<MemberCalendar>) {
        self.calendars = calendars;
        if self.selected >= self.calendars.len() {
            self.selected = self.calendars.len().saturating_sub(1);
        }
    }

    pub fn selected_calendar(&self) -> Option<&MemberCalendar> {
        self.calendars.get(self.selected)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Status text if it was set less than `ttl_secs` ago.
    pub fn current_status(&self, ttl_secs: u64) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed().as_secs() < ttl_secs)
            .map(|(msg, _)| msg.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthStats;

    fn cal(key: &str) -> MemberCalendar {
        MemberCalendar {
            key: key.into(),
            display_name: key.into(),
            base_color: "#000000".into(),
            stats: MonthStats::default(),
            days: Vec::new(),
        }
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = TuiState::new(YearMonth::new(2025, 9).unwrap());
        state.select_next();
        assert_eq!(state.selected, 0);

        state.set_calendars(vec![cal("a"), cal("b"), cal("c")]);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);

        state.set_calendars(vec![cal("a")]);
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected_calendar().unwrap().key, "a");
    }

    #[test]
    fn status_expires() {
        let mut state = TuiState::new(YearMonth::new(2025, 9).unwrap());
        assert!(state.current_status(3).is_none());
        state.set_status("refreshed");
        assert_eq!(state.current_status(3), Some("refreshed"));
        assert!(state.current_status(0).is_none());
    }
}
