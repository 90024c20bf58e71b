//! Per-session dashboard state: settings, active tab and widget selections.

use threatfolio_data::summary::DEFAULT_SUMMARY_COLUMNS;
use threatfolio_stats::confidence::Significance;

use crate::command::args::{ROW_LIMIT, SAMPLE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Settings {
    /// Statistics are only computed on request.
    pub light_mode: bool,
    /// Charts and comparisons use the sample instead of the full dataset.
    pub use_sample: bool,
    pub sample_size: usize,
    pub row_limit: usize,
    pub seed: u64,
    pub significance: Significance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub(super) enum AnalysisView {
    #[display("Data & Types")]
    DataTypes,
    #[display("Statistics")]
    Statistics,
    #[display("Welch t-test")]
    Welch,
    #[display("Charts")]
    Charts,
}

impl AnalysisView {
    pub(super) const ALL: [Self; 4] = [Self::DataTypes, Self::Statistics, Self::Welch, Self::Charts];

    pub(super) fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

/// Cursor over a list of options that wraps around at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Selector {
    pub index: usize,
}

impl Selector {
    pub(super) fn at(index: usize) -> Self {
        Self { index }
    }

    pub(super) fn up(&mut self, len: usize) {
        if len > 0 {
            self.index = self.index.checked_sub(1).unwrap_or(len - 1).min(len - 1);
        }
    }

    pub(super) fn down(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    /// Keeps the cursor inside a list that may have shrunk.
    pub(super) fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub(super) fn get<'a, T>(&self, options: &'a [T]) -> Option<&'a T> {
        options.get(self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct StatisticsState {
    pub enabled: bool,
    pub cursor: Selector,
    /// Selection flag per numeric column.
    pub selected: Vec<bool>,
}

impl StatisticsState {
    fn new(num_columns: usize, light_mode: bool) -> Self {
        Self {
            enabled: !light_mode,
            cursor: Selector::default(),
            selected: (0..num_columns).map(|i| i < DEFAULT_SUMMARY_COLUMNS).collect(),
        }
    }

    pub(super) fn toggle_current(&mut self) {
        if let Some(flag) = self.selected.get_mut(self.cursor.index) {
            *flag = !*flag;
        }
    }

    pub(super) fn selected_columns<'a>(&self, columns: &'a [String]) -> Vec<&'a str> {
        columns
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum WelchFocus {
    #[default]
    Metric,
    Group,
    LabelA,
    LabelB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct WelchState {
    pub focus: WelchFocus,
    pub metric: Selector,
    pub group: Selector,
    pub a: Selector,
    pub b: Selector,
}

impl Default for WelchState {
    fn default() -> Self {
        Self {
            focus: WelchFocus::default(),
            metric: Selector::default(),
            group: Selector::default(),
            a: Selector::at(0),
            b: Selector::at(1),
        }
    }
}

impl WelchState {
    pub(super) fn focus_next(&mut self) {
        self.focus = match self.focus {
            WelchFocus::Metric => WelchFocus::Group,
            WelchFocus::Group => WelchFocus::LabelA,
            WelchFocus::LabelA => WelchFocus::LabelB,
            WelchFocus::LabelB => WelchFocus::Metric,
        };
    }

    pub(super) fn focus_prev(&mut self) {
        self.focus = match self.focus {
            WelchFocus::Metric => WelchFocus::LabelB,
            WelchFocus::Group => WelchFocus::Metric,
            WelchFocus::LabelA => WelchFocus::Group,
            WelchFocus::LabelB => WelchFocus::LabelA,
        };
    }

    /// Resets the label choices to the first two labels of a new grouping column.
    pub(super) fn reset_labels(&mut self) {
        self.a = Selector::at(0);
        self.b = Selector::at(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum ChartFocus {
    #[default]
    Histogram,
    BoxGroup,
    BoxMetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct ChartState {
    pub focus: ChartFocus,
    pub histogram: Selector,
    pub box_group: Selector,
    pub box_metric: Selector,
}

impl ChartState {
    pub(super) fn focus_next(&mut self) {
        self.focus = match self.focus {
            ChartFocus::Histogram => ChartFocus::BoxGroup,
            ChartFocus::BoxGroup => ChartFocus::BoxMetric,
            ChartFocus::BoxMetric => ChartFocus::Histogram,
        };
    }

    pub(super) fn focus_prev(&mut self) {
        self.focus = match self.focus {
            ChartFocus::Histogram => ChartFocus::BoxMetric,
            ChartFocus::BoxGroup => ChartFocus::Histogram,
            ChartFocus::BoxMetric => ChartFocus::BoxGroup,
        };
    }
}

/// Everything one dashboard user can change.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Session {
    pub settings: Settings,
    pub tab: usize,
    pub view: AnalysisView,
    pub statistics: StatisticsState,
    pub welch: WelchState,
    pub charts: ChartState,
}

impl Session {
    pub(super) fn new(settings: Settings, num_numeric: usize) -> Self {
        Self {
            settings,
            tab: 0,
            view: AnalysisView::DataTypes,
            statistics: StatisticsState::new(num_numeric, settings.light_mode),
            welch: WelchState::default(),
            charts: ChartState::default(),
        }
    }

    pub(super) fn toggle_light_mode(&mut self) {
        self.settings.light_mode = !self.settings.light_mode;
        self.statistics.enabled = !self.settings.light_mode;
    }

    pub(super) fn toggle_sample(&mut self) {
        self.settings.use_sample = !self.settings.use_sample;
    }

    pub(super) fn grow_sample(&mut self) {
        self.settings.sample_size = SAMPLE_SIZE.increase(self.settings.sample_size);
    }

    pub(super) fn shrink_sample(&mut self) {
        self.settings.sample_size = SAMPLE_SIZE.decrease(self.settings.sample_size);
    }

    pub(super) fn grow_rows(&mut self) {
        self.settings.row_limit = ROW_LIMIT.increase(self.settings.row_limit);
    }

    pub(super) fn shrink_rows(&mut self) {
        self.settings.row_limit = ROW_LIMIT.decrease(self.settings.row_limit);
    }
}

#[cfg(test)]
mod tests {
    use threatfolio_data::sample::DEFAULT_SEED;

    use super::*;

    fn settings() -> Settings {
        Settings {
            light_mode: true,
            use_sample: true,
            sample_size: SAMPLE_SIZE.default,
            row_limit: ROW_LIMIT.default,
            seed: DEFAULT_SEED,
            significance: Significance::default(),
        }
    }

    #[test]
    fn test_selector_wraps() {
        let mut selector = Selector::default();
        selector.up(3);
        assert_eq!(selector.index, 2);
        selector.down(3);
        assert_eq!(selector.index, 0);
        selector.down(0);
        assert_eq!(selector.index, 0);
    }

    #[test]
    fn test_selector_clamp() {
        let mut selector = Selector::at(5);
        selector.clamp(3);
        assert_eq!(selector.index, 2);
        selector.clamp(0);
        assert_eq!(selector.index, 0);
        assert_eq!(selector.get::<u8>(&[]), None);
    }

    #[test]
    fn test_first_three_numeric_columns_selected() {
        let session = Session::new(settings(), 5);
        let columns = ["a", "b", "c", "d", "e"].map(String::from);
        assert_eq!(
            session.statistics.selected_columns(&columns),
            ["a", "b", "c"]
        );
        assert!(!session.statistics.enabled);
    }

    #[test]
    fn test_light_mode_controls_statistics() {
        let mut session = Session::new(settings(), 2);
        session.toggle_light_mode();
        assert!(!session.settings.light_mode);
        assert!(session.statistics.enabled);
        session.toggle_light_mode();
        assert!(!session.statistics.enabled);
    }

    #[test]
    fn test_toggle_column() {
        let mut session = Session::new(settings(), 4);
        session.statistics.cursor = Selector::at(3);
        session.statistics.toggle_current();
        let columns = ["a", "b", "c", "d"].map(String::from);
        assert_eq!(
            session.statistics.selected_columns(&columns),
            ["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_sample_size_stays_in_range() {
        let mut session = Session::new(settings(), 0);
        for _ in 0..100 {
            session.grow_sample();
        }
        assert_eq!(session.settings.sample_size, SAMPLE_SIZE.max);
        for _ in 0..100 {
            session.shrink_rows();
        }
        assert_eq!(session.settings.row_limit, ROW_LIMIT.min);
    }

    #[test]
    fn test_welch_focus_cycle() {
        let mut welch = WelchState::default();
        for _ in 0..4 {
            welch.focus_next();
        }
        assert_eq!(welch.focus, WelchFocus::Metric);
        welch.focus_prev();
        assert_eq!(welch.focus, WelchFocus::LabelB);
        assert_eq!((welch.a.index, welch.b.index), (0, 1));
    }
}
