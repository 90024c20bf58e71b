use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    prelude::Direction,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, Block, List, ListItem, ListState, Paragraph, Row, StatefulWidget, Table,
        Tabs, Widget, Wrap,
    },
};
use threatfolio_data::{
    QueryError,
    chart::GroupBoxPlot,
    column::ColumnDescriptor,
    comparison::{ComparisonOutcome, GroupSummary},
    dataset::Dataset,
    summary::SummaryRecord,
};
use threatfolio_stats::{box_plot::BoxPlotSummary, histogram::Histogram};

use crate::{
    command::{
        dashboard::{
            app::DashboardApp,
            state::{AnalysisView, ChartFocus, WelchFocus},
        },
        table,
    },
    profile::ProfilePage,
    util::{format_stat, truncate},
};

const ANALYSIS_TAB_TITLE: &str = "Data Analysis";
const HEAD_CELL_WIDTH: u16 = 16;
const BOX_LABEL_WIDTH: usize = 18;

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn pane(title: &str, focused: bool) -> Block<'_> {
    let block = Block::bordered().title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

pub(super) fn draw(app: &DashboardApp, frame: &mut Frame) {
    let [tabs_area, body_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let titles = app
        .profile
        .pages
        .iter()
        .map(|page| page.title.clone())
        .chain([ANALYSIS_TAB_TITLE.to_owned()])
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .block(Block::bordered().title(app.profile.title.as_str()))
        .select(app.session.tab)
        .highlight_style(highlight_style());
    frame.render_widget(tabs, tabs_area);

    let help = if let Some(page) = app.profile.pages.get(app.session.tab) {
        frame.render_widget(ProfilePageView { page }, body_area);
        "Tab/Shift+Tab: Switch tab | q/Esc: Quit"
    } else {
        draw_analysis(app, frame, body_area);
        match app.session.view {
            AnalysisView::DataTypes => {
                "Tab: Tab | 1-4: View | l: Light | s: Sample | +/-: Sample size | [/]: Rows | q: Quit"
            }
            AnalysisView::Statistics => {
                "1-4: View | c: Compute | ↑/↓: Column | Space: Select | l: Light | q: Quit"
            }
            AnalysisView::Welch | AnalysisView::Charts => {
                "1-4: View | ←/→: Focus | ↑/↓: Choose | s: Sample | +/-: Sample size | q: Quit"
            }
        }
    };

    frame.render_widget(Line::styled(status_text(app), hint_style()), status_area);
    frame.render_widget(Text::from(help).style(hint_style()).centered(), help_area);
}

fn status_text(app: &DashboardApp) -> String {
    let settings = &app.session.settings;
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let mut status = format!(
        " Light mode: {} | Sample: {} ({} rows, seed {}) | Table rows: {} | alpha: {} | Display rows: {}",
        on_off(settings.light_mode),
        on_off(settings.use_sample),
        settings.sample_size,
        settings.seed,
        settings.row_limit,
        settings.significance.alpha(),
        app.data.display.num_rows(),
    );
    if let Some(error) = &app.error {
        status.push_str(" | Error: ");
        status.push_str(error);
    }
    status
}

fn draw_analysis(app: &DashboardApp, frame: &mut Frame, area: Rect) {
    let [views_area, view_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    let views = Tabs::new(
        AnalysisView::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| format!("{}. {view}", i + 1)),
    )
    .select(app.session.view.index())
    .highlight_style(highlight_style());
    frame.render_widget(views, views_area);

    match app.session.view {
        AnalysisView::DataTypes => draw_data_types(app, frame, view_area),
        AnalysisView::Statistics => draw_statistics(app, frame, view_area),
        AnalysisView::Welch => draw_welch(app, frame, view_area),
        AnalysisView::Charts => draw_charts(app, frame, view_area),
    }
}

fn draw_data_types(app: &DashboardApp, frame: &mut Frame, area: Rect) {
    let dataset = &app.info.dataset;
    let [shape_area, head_area, types_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(55),
        Constraint::Fill(1),
    ])
    .areas(area);

    let (rows, columns) = dataset.shape();
    frame.render_widget(
        Line::raw(format!(" Shape (full dataset): {rows} rows x {columns} columns")),
        shape_area,
    );
    frame.render_widget(HeadTable { head: &app.data.head }, head_area);
    frame.render_widget(
        DescriptorTable {
            descriptors: &app.info.descriptors,
        },
        types_area,
    );
}

fn draw_statistics(app: &DashboardApp, frame: &mut Frame, area: Rect) {
    let statistics = &app.session.statistics;
    let [columns_area, table_area] =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Fill(1)]).areas(area);

    frame.render_widget(
        SelectorList {
            title: "Numeric columns",
            items: &app.info.classification.numeric,
            selected: statistics.cursor.index,
            focused: statistics.enabled,
            marks: Some(statistics.selected.as_slice()),
        },
        columns_area,
    );

    let block = pane("Descriptive statistics", false);
    match &app.data.summary {
        None => {
            let text = Paragraph::new(vec![
                Line::raw("Statistics are not computed in light mode."),
                Line::styled("Press c to compute them.", hint_style()),
            ])
            .block(block);
            frame.render_widget(text, table_area);
        }
        Some(Err(QueryError::EmptySelection)) => {
            let text = Paragraph::new("Select at least one numeric column.").block(block);
            frame.render_widget(text, table_area);
        }
        Some(Err(e)) => frame.render_widget(Paragraph::new(e.to_string()).block(block), table_area),
        Some(Ok(records)) => frame.render_widget(SummaryTable { records, block }, table_area),
    }
}

fn draw_welch(app: &DashboardApp, frame: &mut Frame, area: Rect) {
    let welch = &app.session.welch;
    let [selectors_area, result_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(8)]).areas(area);
    let [metric_area, group_area, a_area, b_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .areas(selectors_area);

    let selectors = [
        (
            "Metric",
            &app.info.classification.numeric,
            welch.metric.index,
            WelchFocus::Metric,
            metric_area,
        ),
        (
            "Group by",
            &app.info.classification.categorical,
            welch.group.index,
            WelchFocus::Group,
            group_area,
        ),
        ("Group A", &app.data.labels, welch.a.index, WelchFocus::LabelA, a_area),
        ("Group B", &app.data.labels, welch.b.index, WelchFocus::LabelB, b_area),
    ];
    for (title, items, selected, focus, area) in selectors {
        let list = SelectorList {
            title,
            items,
            selected,
            focused: welch.focus == focus,
            marks: None,
        };
        frame.render_widget(list, area);
    }

    let alpha = app.session.settings.significance.alpha();
    let lines = match &app.data.comparison {
        None => vec![Line::raw(
            "Choose a metric and a grouping column with at least two categories.",
        )],
        Some(Err(e)) => vec![Line::raw(e.to_string())],
        Some(Ok(ComparisonOutcome::Skipped {
            label_a,
            count_a,
            label_b,
            count_b,
        })) => vec![
            Line::raw("Not enough data: each group needs more than 5 numeric values."),
            Line::styled(
                format!("{label_a}: {count_a} values, {label_b}: {count_b} values"),
                hint_style(),
            ),
        ],
        Some(Ok(ComparisonOutcome::Compared(result))) => {
            let test = &result.test;
            let verdict = if test.is_significant(alpha) {
                format!("Means differ significantly at alpha = {alpha}")
            } else {
                format!("No significant difference at alpha = {alpha}")
            };
            vec![
                group_line(&result.a),
                group_line(&result.b),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("Welch t-test: ", highlight_style()),
                    Span::raw(format!(
                        "t = {}, p-value = {}, df = {}",
                        format_stat(Some(test.t_statistic), 3),
                        format_stat(Some(test.p_value), 4),
                        format_stat(Some(test.degrees_of_freedom), 2),
                    )),
                ]),
                Line::raw(verdict),
            ]
        }
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(pane("Result", false))
            .wrap(Wrap { trim: true }),
        result_area,
    );
}

fn group_line(group: &GroupSummary) -> Line<'static> {
    let interval = group.interval.bounds.map_or("CI: not enough data".to_owned(), |b| {
        format!(
            "{}% CI [{:.2}, {:.2}]",
            table::format_level(group.interval.confidence_level),
            b.lower,
            b.upper
        )
    });
    Line::raw(format!(
        "Mean {} (n = {}): {:.2}   {interval}",
        group.label, group.count, group.mean
    ))
}

fn draw_charts(app: &DashboardApp, frame: &mut Frame, area: Rect) {
    let charts = &app.session.charts;
    let numeric = &app.info.classification.numeric;
    let categorical = &app.info.classification.categorical;

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let [histogram_selector_area, histogram_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Fill(1)]).areas(left);
    let [box_selectors_area, box_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Fill(1)]).areas(right);
    let [group_area, metric_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(box_selectors_area);

    frame.render_widget(
        SelectorList {
            title: "Histogram column",
            items: numeric,
            selected: charts.histogram.index,
            focused: charts.focus == ChartFocus::Histogram,
            marks: None,
        },
        histogram_selector_area,
    );
    frame.render_widget(
        SelectorList {
            title: "Box plot group",
            items: categorical,
            selected: charts.box_group.index,
            focused: charts.focus == ChartFocus::BoxGroup,
            marks: None,
        },
        group_area,
    );
    frame.render_widget(
        SelectorList {
            title: "Box plot metric",
            items: numeric,
            selected: charts.box_metric.index,
            focused: charts.focus == ChartFocus::BoxMetric,
            marks: None,
        },
        metric_area,
    );

    let histogram_block = pane("Histogram", false);
    match &app.data.histogram {
        Some(Ok(histogram)) if !histogram.bins.is_empty() => frame.render_widget(
            HistogramChart {
                histogram,
                block: histogram_block,
            },
            histogram_area,
        ),
        Some(Err(e)) => frame.render_widget(
            Paragraph::new(e.to_string()).block(histogram_block),
            histogram_area,
        ),
        _ => frame.render_widget(
            Paragraph::new("No numeric values to plot.").block(histogram_block),
            histogram_area,
        ),
    }

    let box_block = pane("Box plot (whiskers at 1.5 IQR, • outliers)", false);
    match &app.data.box_plots {
        Some(Ok(plots)) if !plots.is_empty() => frame.render_widget(
            BoxPlotView {
                plots,
                block: box_block,
            },
            box_area,
        ),
        Some(Err(e)) => {
            frame.render_widget(Paragraph::new(e.to_string()).block(box_block), box_area);
        }
        _ => frame.render_widget(
            Paragraph::new("No numeric values to plot.").block(box_block),
            box_area,
        ),
    }
}

struct ProfilePageView<'a> {
    page: &'a ProfilePage,
}

impl Widget for ProfilePageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![];
        for section in &self.page.sections {
            lines.push(Line::styled(section.heading.clone(), highlight_style()));
            lines.extend(section.lines.iter().map(|line| Line::raw(line.clone())));
            lines.push(Line::raw(""));
        }
        Paragraph::new(lines)
            .block(Block::bordered().title(self.page.title.as_str()))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

struct SelectorList<'a> {
    title: &'a str,
    items: &'a [String],
    selected: usize,
    focused: bool,
    /// Checkbox state per item for multi-selection lists.
    marks: Option<&'a [bool]>,
}

impl Widget for SelectorList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| match self.marks {
                Some(marks) => {
                    let mark = if marks.get(i).copied().unwrap_or(false) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    ListItem::new(format!("{mark} {item}"))
                }
                None => ListItem::new(item.as_str()),
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(pane(self.title, self.focused))
            .highlight_style(highlight_style())
            .highlight_symbol(">> ");

        let mut state = ListState::default();
        state.select((!self.items.is_empty()).then_some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

struct HeadTable<'a> {
    head: &'a Dataset,
}

impl Widget for HeadTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(HEAD_CELL_WIDTH);
        let header = Row::new(
            self.head
                .column_names()
                .map(|name| truncate(name, width))
                .collect::<Vec<_>>(),
        )
        .style(highlight_style());
        let rows = (0..self.head.num_rows()).map(|row| {
            Row::new(
                self.head
                    .row(row)
                    .map(|cell| truncate(cell.unwrap_or("N/A"), width))
                    .collect::<Vec<_>>(),
            )
        });
        let widths = vec![Constraint::Length(HEAD_CELL_WIDTH); self.head.num_columns()];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title(format!("First {} rows", self.head.num_rows())));
        Widget::render(table, area, buf);
    }
}

struct DescriptorTable<'a> {
    descriptors: &'a [ColumnDescriptor],
}

impl Widget for DescriptorTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["Column", "Kind", "Missing", "Missing %"]).style(highlight_style());
        let rows = self.descriptors.iter().map(|d| {
            Row::new([
                d.name.clone(),
                d.kind.to_string(),
                d.missing.to_string(),
                format!("{:.2}", d.missing_pct),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::bordered().title("Variable types and missing values"));
        Widget::render(table, area, buf);
    }
}

struct SummaryTable<'a> {
    records: &'a [SummaryRecord],
    block: Block<'a>,
}

impl Widget for SummaryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new([
            "Column", "Count", "Missing", "NonNum", "Mean", "Median", "Std", "Var", "Min", "Max",
        ])
        .style(highlight_style());
        let rows = self.records.iter().map(|r| {
            Row::new([
                r.column.clone(),
                r.count.to_string(),
                r.missing.to_string(),
                r.non_numeric.to_string(),
                format_stat(r.mean, 2),
                format_stat(r.median, 2),
                format_stat(r.std_dev, 2),
                format_stat(r.variance, 2),
                format_stat(r.min, 2),
                format_stat(r.max, 2),
            ])
        });
        let mut widths = vec![Constraint::Fill(1)];
        widths.extend([Constraint::Length(8); 3]);
        widths.extend([Constraint::Length(12); 6]);
        let table = Table::new(rows, widths)
            .header(header)
            .block(self.block);
        Widget::render(table, area, buf);
    }
}

struct HistogramChart<'a> {
    histogram: &'a Histogram,
    block: Block<'a>,
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars = self
            .histogram
            .bins
            .iter()
            .map(|bin| {
                Bar::with_label(format!("{:>10.2}", bin.range.start), bin.count)
                    .text_value(bin.count.to_string())
            })
            .collect::<Vec<_>>();
        BarChart::new(bars)
            .block(self.block)
            .direction(Direction::Horizontal)
            .bar_gap(0)
            .render(area, buf);
    }
}

struct BoxPlotView<'a> {
    plots: &'a [GroupBoxPlot],
    block: Block<'a>,
}

impl Widget for BoxPlotView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.inner(area);
        self.block.render(area, buf);

        let (lo, hi) = value_range(self.plots);
        let width = usize::from(inner.width).saturating_sub(BOX_LABEL_WIDTH + 1);
        let mut lines = self
            .plots
            .iter()
            .map(|plot| {
                Line::from(vec![
                    Span::raw(format!(
                        "{:<BOX_LABEL_WIDTH$} ",
                        truncate(&plot.label, BOX_LABEL_WIDTH)
                    )),
                    Span::styled(
                        box_glyphs(&plot.summary, lo, hi, width),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            })
            .collect::<Vec<_>>();
        let lo_text = format!("{lo:.2}");
        let pad = width.saturating_sub(lo_text.len());
        lines.push(Line::styled(
            format!("{:BOX_LABEL_WIDTH$} {lo_text}{hi:>pad$.2}", ""),
            hint_style(),
        ));
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Smallest and largest value drawn across all box plots.
fn value_range(plots: &[GroupBoxPlot]) -> (f64, f64) {
    plots
        .iter()
        .flat_map(|p| {
            let s = &p.summary;
            [s.lower_whisker, s.upper_whisker]
                .into_iter()
                .chain(s.outliers.iter().copied())
        })
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Draws one horizontal box plot scaled from `lo..=hi` onto `width` cells.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn box_glyphs(summary: &BoxPlotSummary, lo: f64, hi: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let position = |value: f64| {
        if hi > lo {
            let pos = ((value - lo) / (hi - lo) * (width - 1) as f64).round();
            (pos.max(0.0) as usize).min(width - 1)
        } else {
            width / 2
        }
    };

    let mut cells = vec![' '; width];
    let (left, right) = (position(summary.lower_whisker), position(summary.upper_whisker));
    let (q1, q3) = (position(summary.q1), position(summary.q3));
    for cell in &mut cells[left..=right] {
        *cell = '─';
    }
    for cell in &mut cells[q1..=q3] {
        *cell = '█';
    }
    cells[left] = '├';
    cells[right] = '┤';
    cells[position(summary.median)] = '┃';
    for &outlier in &summary.outliers {
        cells[position(outlier)] = '•';
    }
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> BoxPlotSummary {
        BoxPlotSummary {
            count: 5,
            q1: 25.0,
            median: 50.0,
            q3: 75.0,
            lower_whisker: 0.0,
            upper_whisker: 90.0,
            outliers: vec![100.0],
        }
    }

    #[test]
    fn test_box_glyphs() {
        let glyphs = box_glyphs(&summary(), 0.0, 100.0, 11).chars().collect::<Vec<_>>();
        assert_eq!(glyphs.len(), 11);
        assert_eq!(glyphs[0], '├');
        assert_eq!(glyphs[1], '─');
        assert_eq!(glyphs[4], '█');
        assert_eq!(glyphs[5], '┃');
        assert_eq!(glyphs[9], '┤');
        assert_eq!(glyphs[10], '•');
    }

    #[test]
    fn test_box_glyphs_degenerate_range() {
        let constant = BoxPlotSummary {
            count: 3,
            q1: 1.0,
            median: 1.0,
            q3: 1.0,
            lower_whisker: 1.0,
            upper_whisker: 1.0,
            outliers: vec![],
        };
        let glyphs = box_glyphs(&constant, 1.0, 1.0, 5);
        assert_eq!(glyphs.chars().nth(2), Some('┃'));
        assert_eq!(box_glyphs(&constant, 1.0, 1.0, 0), "");
    }

    #[test]
    fn test_value_range_includes_outliers() {
        let plots = [GroupBoxPlot {
            label: "A".to_owned(),
            summary: summary(),
        }];
        assert_eq!(value_range(&plots), (0.0, 100.0));
    }
}
