use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use threatfolio_data::{
    QueryError,
    cache::DatasetCache,
    chart::{self, GroupBoxPlot},
    column::{self, ColumnClassification, ColumnDescriptor},
    comparison::{self, ComparisonOutcome},
    dataset::{Dataset, LoadError},
    summary::{self, SummaryRecord},
};
use threatfolio_stats::histogram::{DEFAULT_NUM_BINS, Histogram};

use crate::{
    command::dashboard::{
        screens,
        state::{AnalysisView, ChartFocus, Session, Settings, WelchFocus},
    },
    profile::Profile,
    tui::App,
};

/// Columns of the full dataset, computed once at startup.
#[derive(Debug)]
pub(super) struct DatasetInfo {
    pub dataset: Arc<Dataset>,
    pub classification: ColumnClassification,
    pub descriptors: Vec<ColumnDescriptor>,
}

/// Chart selections and display dataset the chart data was computed for.
#[derive(Debug)]
struct ChartInputs {
    display: Arc<Dataset>,
    histogram: usize,
    box_group: usize,
    box_metric: usize,
}

impl PartialEq for ChartInputs {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.display, &other.display)
            && (self.histogram, self.box_group, self.box_metric)
                == (other.histogram, other.box_group, other.box_metric)
    }
}

/// Results derived from the session's current selections.
///
/// Only the active view's results are computed; the others stay `None`.
#[derive(Debug)]
pub(super) struct AnalysisData {
    pub display: Arc<Dataset>,
    pub head: Dataset,
    /// `None` while statistics are switched off.
    pub summary: Option<Result<Vec<SummaryRecord>, QueryError>>,
    /// Labels of the selected grouping column in the display dataset.
    pub labels: Vec<String>,
    pub comparison: Option<Result<ComparisonOutcome, QueryError>>,
    pub histogram: Option<Result<Histogram, QueryError>>,
    pub box_plots: Option<Result<Vec<GroupBoxPlot>, QueryError>>,
    chart_inputs: Option<ChartInputs>,
}

impl AnalysisData {
    /// Recomputes the results, taking the chart data over from `previous`
    /// when its inputs are unchanged.
    fn compute(
        cache: &DatasetCache,
        info: &DatasetInfo,
        session: &mut Session,
        previous: Option<&mut AnalysisData>,
    ) -> Result<Self, LoadError> {
        let Settings {
            use_sample,
            sample_size,
            row_limit,
            seed,
            significance,
            ..
        } = session.settings;
        let display = cache.display_dataset(use_sample, sample_size, seed)?;
        let numeric = &info.classification.numeric;
        let categorical = &info.classification.categorical;

        let summary = (session.view == AnalysisView::Statistics && session.statistics.enabled)
            .then(|| {
                let columns = session.statistics.selected_columns(numeric);
                summary::summarize(&info.dataset, &columns)
            });

        let mut labels = vec![];
        let mut comparison = None;
        if session.view == AnalysisView::Welch {
            let welch = &mut session.welch;
            let group = welch.group.get(categorical);
            labels = group
                .and_then(|group| comparison::group_labels(&display, group).ok())
                .unwrap_or_default();
            welch.a.clamp(labels.len());
            welch.b.clamp(labels.len());
            comparison = match (welch.metric.get(numeric), group) {
                (Some(metric), Some(group)) if labels.len() >= 2 => {
                    let a = welch.a.get(&labels).map_or("", String::as_str);
                    let b = welch.b.get(&labels).map_or("", String::as_str);
                    Some(comparison::compare_groups(
                        &display,
                        metric,
                        group,
                        a,
                        b,
                        significance,
                    ))
                }
                _ => None,
            };
        }

        let (mut histogram, mut box_plots, mut chart_inputs) = (None, None, None);
        if session.view == AnalysisView::Charts {
            let charts = &session.charts;
            let inputs = ChartInputs {
                display: Arc::clone(&display),
                histogram: charts.histogram.index,
                box_group: charts.box_group.index,
                box_metric: charts.box_metric.index,
            };
            match previous.filter(|p| p.chart_inputs.as_ref() == Some(&inputs)) {
                Some(previous) => {
                    histogram = previous.histogram.take();
                    box_plots = previous.box_plots.take();
                }
                None => {
                    histogram = charts
                        .histogram
                        .get(numeric)
                        .map(|column| chart::histogram(&display, column, DEFAULT_NUM_BINS));
                    box_plots = charts
                        .box_group
                        .get(categorical)
                        .zip(charts.box_metric.get(numeric))
                        .map(|(group, metric)| chart::box_plot_by_group(&display, group, metric));
                }
            }
            chart_inputs = Some(inputs);
        }

        Ok(Self {
            head: info.dataset.head(row_limit),
            display,
            summary,
            labels,
            comparison,
            histogram,
            box_plots,
            chart_inputs,
        })
    }
}

#[derive(Debug)]
pub(super) struct DashboardApp {
    pub profile: Profile,
    cache: DatasetCache,
    pub info: DatasetInfo,
    pub session: Session,
    pub data: AnalysisData,
    pub error: Option<String>,
    should_exit: bool,
}

impl DashboardApp {
    pub(super) fn new(
        profile: Profile,
        cache: DatasetCache,
        settings: Settings,
    ) -> Result<Self, LoadError> {
        let dataset = cache.dataset()?;
        let info = DatasetInfo {
            classification: ColumnClassification::classify(&dataset),
            descriptors: column::describe_columns(&dataset),
            dataset,
        };
        let mut session = Session::new(settings, info.classification.numeric.len());
        let data = AnalysisData::compute(&cache, &info, &mut session, None)?;
        Ok(Self {
            profile,
            cache,
            info,
            session,
            data,
            error: None,
            should_exit: false,
        })
    }

    pub(super) fn analysis_tab(&self) -> usize {
        self.profile.pages.len()
    }

    fn num_tabs(&self) -> usize {
        self.profile.pages.len() + 1
    }

    fn refresh(&mut self) {
        match AnalysisData::compute(
            &self.cache,
            &self.info,
            &mut self.session,
            Some(&mut self.data),
        ) {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(e) => {
                log::warn!("Failed to refresh analysis: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Applies a key pressed on the analysis tab, returning whether it was handled.
    fn handle_analysis_key(&mut self, code: KeyCode) -> bool {
        let session = &mut self.session;
        match code {
            KeyCode::Char('1') => session.view = AnalysisView::DataTypes,
            KeyCode::Char('2') => session.view = AnalysisView::Statistics,
            KeyCode::Char('3') => session.view = AnalysisView::Welch,
            KeyCode::Char('4') => session.view = AnalysisView::Charts,
            KeyCode::Char('l') => session.toggle_light_mode(),
            KeyCode::Char('s') => session.toggle_sample(),
            KeyCode::Char('+' | '=') => session.grow_sample(),
            KeyCode::Char('-') => session.shrink_sample(),
            KeyCode::Char(']') => session.grow_rows(),
            KeyCode::Char('[') => session.shrink_rows(),
            code => return self.handle_view_key(code),
        }
        true
    }

    fn handle_view_key(&mut self, code: KeyCode) -> bool {
        let numeric = self.info.classification.numeric.len();
        let categorical = self.info.classification.categorical.len();
        let labels = self.data.labels.len();
        let session = &mut self.session;

        match session.view {
            AnalysisView::DataTypes => return false,
            AnalysisView::Statistics => {
                let statistics = &mut session.statistics;
                match code {
                    KeyCode::Char('c') => statistics.enabled = !statistics.enabled,
                    KeyCode::Up => statistics.cursor.up(numeric),
                    KeyCode::Down => statistics.cursor.down(numeric),
                    KeyCode::Char(' ') | KeyCode::Enter => statistics.toggle_current(),
                    _ => return false,
                }
            }
            AnalysisView::Welch => {
                let welch = &mut session.welch;
                let (selector, len) = match welch.focus {
                    WelchFocus::Metric => (&mut welch.metric, numeric),
                    WelchFocus::Group => (&mut welch.group, categorical),
                    WelchFocus::LabelA => (&mut welch.a, labels),
                    WelchFocus::LabelB => (&mut welch.b, labels),
                };
                match code {
                    KeyCode::Up => selector.up(len),
                    KeyCode::Down => selector.down(len),
                    KeyCode::Left => welch.focus_prev(),
                    KeyCode::Right => welch.focus_next(),
                    _ => return false,
                }
                if welch.focus == WelchFocus::Group && matches!(code, KeyCode::Up | KeyCode::Down)
                {
                    welch.reset_labels();
                }
            }
            AnalysisView::Charts => {
                let charts = &mut session.charts;
                let (selector, len) = match charts.focus {
                    ChartFocus::Histogram => (&mut charts.histogram, numeric),
                    ChartFocus::BoxGroup => (&mut charts.box_group, categorical),
                    ChartFocus::BoxMetric => (&mut charts.box_metric, numeric),
                };
                match code {
                    KeyCode::Up => selector.up(len),
                    KeyCode::Down => selector.down(len),
                    KeyCode::Left => charts.focus_prev(),
                    KeyCode::Right => charts.focus_next(),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl App for DashboardApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let Some(key) = event
            .as_key_event()
            .filter(|key| key.kind == KeyEventKind::Press)
        else {
            return false;
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Tab => self.session.tab = (self.session.tab + 1) % self.num_tabs(),
            KeyCode::BackTab => {
                self.session.tab = self
                    .session
                    .tab
                    .checked_sub(1)
                    .unwrap_or(self.num_tabs() - 1);
            }
            code if self.session.tab == self.analysis_tab() => {
                if !self.handle_analysis_key(code) {
                    return false;
                }
                self.refresh();
            }
            _ => return false,
        }
        true
    }

    fn draw(&self, frame: &mut Frame) {
        screens::draw(self, frame);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use threatfolio_data::sample::DEFAULT_SEED;
    use threatfolio_stats::confidence::Significance;

    use super::*;
    use crate::command::args::{ROW_LIMIT, SAMPLE_SIZE};

    fn app() -> DashboardApp {
        let dataset = Dataset::from_rows(
            ["Loss", "Type", "Region"],
            (0..40).map(|i| {
                let kind = if i % 2 == 0 { "Phishing" } else { "DDoS" };
                let region = if i < 25 { "EU" } else { "APAC" };
                [(i * 3 % 17).to_string(), kind.to_owned(), region.to_owned()]
            }),
        )
        .unwrap();
        let settings = Settings {
            light_mode: false,
            use_sample: false,
            sample_size: SAMPLE_SIZE.default,
            row_limit: ROW_LIMIT.default,
            seed: DEFAULT_SEED,
            significance: Significance::default(),
        };
        let mut app = DashboardApp::new(
            Profile::builtin().unwrap(),
            DatasetCache::from_dataset(dataset),
            settings,
        )
        .unwrap();
        app.session.tab = app.analysis_tab();
        app
    }

    fn press(app: &mut DashboardApp, code: KeyCode) -> bool {
        app.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn test_only_active_view_is_computed() {
        let mut app = app();
        assert_eq!(app.session.view, AnalysisView::DataTypes);
        assert!(app.data.summary.is_none());
        assert!(app.data.comparison.is_none());
        assert!(app.data.histogram.is_none());
        assert!(app.data.box_plots.is_none());

        assert!(press(&mut app, KeyCode::Char('3')));
        assert_eq!(app.data.labels, ["Phishing", "DDoS"]);
        assert!(matches!(
            app.data.comparison,
            Some(Ok(ComparisonOutcome::Compared(_)))
        ));
        assert!(app.data.histogram.is_none());

        assert!(press(&mut app, KeyCode::Char('4')));
        assert!(app.data.comparison.is_none());
        assert!(matches!(app.data.histogram, Some(Ok(_))));
        assert!(matches!(&app.data.box_plots, Some(Ok(plots)) if plots.len() == 2));
    }

    #[test]
    fn test_chart_data_reused_until_selection_changes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        let plots_ptr = |app: &DashboardApp| match &app.data.box_plots {
            Some(Ok(plots)) => plots.as_ptr(),
            _ => std::ptr::null(),
        };
        let before = plots_ptr(&app);
        assert!(!before.is_null());

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(plots_ptr(&app), before);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.session.charts.focus, ChartFocus::BoxGroup);
        assert_eq!(app.session.charts.box_group.index, 1);
        assert_ne!(plots_ptr(&app), before);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!app.should_exit());
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.should_exit());
    }
}
