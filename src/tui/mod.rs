//! Ratatui-based terminal dashboard.
//!
//! Layout: metrics header, a "Filter Data" sidebar (supplier multi-select and the
//! date range), the two charts, and the scrollable detail table. Every filter
//! change re-runs the query pipeline against the session cache.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use tracing::{info, warn};

use crate::app::pipeline::{Dashboard, QueryOutput};
use crate::domain::FilterCriteria;
use crate::error::AppError;
use crate::report::format::truncate;
use crate::report::{format_currency, format_margin};

mod plotters_chart;

use plotters_chart::SalesLineChart;

const VIEW_CSV: &str = "sdash-view.csv";
const AGGREGATES_JSON: &str = "sdash-aggregates.json";

/// Start the TUI.
///
/// The dataset is loaded before the terminal switches to raw mode, so a failing
/// source surfaces as a plain error on the normal screen.
pub fn run(dashboard: Dashboard) -> Result<(), AppError> {
    let mut app = App::new(dashboard)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Suppliers,
    StartDate,
    EndDate,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Suppliers => Focus::StartDate,
            Focus::StartDate => Focus::EndDate,
            Focus::EndDate => Focus::Table,
            Focus::Table => Focus::Suppliers,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Suppliers => Focus::Table,
            Focus::StartDate => Focus::Suppliers,
            Focus::EndDate => Focus::StartDate,
            Focus::Table => Focus::EndDate,
        }
    }
}

struct App {
    dashboard: Dashboard,
    /// Multi-select options, in first-seen order.
    suppliers: Vec<String>,
    criteria: FilterCriteria,
    /// Earliest and latest sale in the loaded dataset.
    data_bounds: Option<(NaiveDate, NaiveDate)>,
    output: QueryOutput,
    source_label: String,
    focus: Focus,
    supplier_cursor: usize,
    editing_date: bool,
    date_input: String,
    table_offset: usize,
    table_rows_visible: usize,
    status: String,
}

impl App {
    fn new(mut dashboard: Dashboard) -> Result<Self, AppError> {
        let criteria = dashboard.default_criteria()?;
        let suppliers = dashboard.suppliers()?;
        let data_bounds = dashboard.date_bounds()?;
        let output = dashboard.query(&criteria)?;
        let source_label = dashboard.source_label();
        info!(source = %source_label, rows = output.rows.len(), "dashboard ready");

        Ok(Self {
            dashboard,
            suppliers,
            criteria,
            data_bounds,
            status: format!("Loaded {} rows from {source_label}.", output.rows.len()),
            output,
            source_label,
            focus: Focus::Suppliers,
            supplier_cursor: 0,
            editing_date: false,
            date_input: String::new(),
            table_offset: 0,
            table_rows_visible: 10,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_date {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.scroll_table(-(self.table_rows_visible as isize)),
            KeyCode::PageDown => self.scroll_table(self.table_rows_visible as isize),
            KeyCode::Char(' ') if self.focus == Focus::Suppliers => {
                if let Some(name) = self.suppliers.get(self.supplier_cursor).cloned() {
                    self.criteria.toggle_supplier(&name);
                    self.requery();
                }
            }
            KeyCode::Char('a') => {
                self.criteria.selected_suppliers = self.suppliers.iter().cloned().collect();
                self.requery();
            }
            KeyCode::Char('n') => {
                self.criteria.selected_suppliers.clear();
                self.requery();
            }
            KeyCode::Enter if matches!(self.focus, Focus::StartDate | Focus::EndDate) => {
                self.editing_date = true;
                self.date_input = self.focused_date().map(|d| d.to_string()).unwrap_or_default();
                self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('e') => self.export(Path::new(".")),
            _ => {}
        }

        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_date = false;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_date = false;
                self.apply_date_input();
            }
            KeyCode::Backspace => {
                self.date_input.pop();
            }
            KeyCode::Char(c) => {
                if (c.is_ascii_digit() || c == '-') && self.date_input.len() < 10 {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn focused_date(&self) -> Option<NaiveDate> {
        match self.focus {
            Focus::StartDate => Some(self.criteria.date_range.start),
            Focus::EndDate => Some(self.criteria.date_range.end),
            _ => None,
        }
    }

    fn apply_date_input(&mut self) {
        let trimmed = self.date_input.trim();
        let date = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                self.status = format!("Invalid date '{trimmed}': {e}");
                return;
            }
        };

        match self.focus {
            Focus::StartDate => self.criteria.date_range.start = date,
            Focus::EndDate => self.criteria.date_range.end = date,
            _ => return,
        }
        self.requery();
        if self.criteria.date_range.is_inverted() {
            self.status = "Start date is after end date; nothing matches.".to_string();
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.focus {
            Focus::Suppliers => {
                let last = self.suppliers.len().saturating_sub(1);
                self.supplier_cursor = self.supplier_cursor.saturating_add_signed(delta).min(last);
            }
            Focus::Table => self.scroll_table(delta),
            Focus::StartDate | Focus::EndDate => {
                self.focus = if delta < 0 { self.focus.prev() } else { self.focus.next() };
            }
        }
    }

    fn scroll_table(&mut self, delta: isize) {
        let max_offset = self.output.rows.len().saturating_sub(1);
        self.table_offset = self.table_offset.saturating_add_signed(delta).min(max_offset);
    }

    /// Re-run filter + aggregate for the current criteria.
    fn requery(&mut self) {
        match self.dashboard.query(&self.criteria) {
            Ok(output) => {
                self.output = output;
                self.table_offset = self.table_offset.min(self.output.rows.len().saturating_sub(1));
                self.status = format!("{} rows match.", self.output.rows.len());
            }
            Err(e) => {
                warn!(error = %e, "query failed");
                self.status = format!("Query failed: {e}");
            }
        }
    }

    fn refresh(&mut self) {
        match self.dashboard.refresh() {
            Ok(rows) => {
                if let Ok(suppliers) = self.dashboard.suppliers() {
                    self.suppliers = suppliers;
                }
                if let Ok(bounds) = self.dashboard.date_bounds() {
                    self.data_bounds = bounds;
                }
                self.supplier_cursor = self.supplier_cursor.min(self.suppliers.len().saturating_sub(1));
                self.source_label = self.dashboard.source_label();
                self.requery();
                self.status = format!("Reloaded {rows} rows from {}.", self.source_label);
            }
            Err(e) => {
                warn!(error = %e, "refresh failed");
                self.status = format!("Refresh failed: {e}");
            }
        }
    }

    fn export(&mut self, dir: &Path) {
        let csv: PathBuf = dir.join(VIEW_CSV);
        let json: PathBuf = dir.join(AGGREGATES_JSON);
        let result = crate::io::write_view_csv(&csv, &self.output.rows).and_then(|_| {
            crate::io::write_aggregates_json(&json, &self.source_label, &self.criteria, &self.output.aggregates)
        });
        self.status = match result {
            Ok(()) => format!("Exported {} and {}.", csv.display(), json.display()),
            Err(e) => format!("Export failed: {e}"),
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let agg = &self.output.aggregates;
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled("Supplier Performance Dashboard", Style::default().fg(Color::Cyan)),
                Span::styled(format!("  source: {}", self.source_label), label),
            ]),
            Line::from(vec![
                Span::styled("Total Sales ", label),
                Span::styled(format_currency(agg.total_sales), value),
                Span::raw("   "),
                Span::styled("Total Profit ", label),
                Span::styled(format_currency(agg.total_profit), value),
                Span::raw("   "),
                Span::styled("Avg. Margin ", label),
                Span::styled(format_margin(agg.avg_margin), value),
            ]),
            Line::from(Span::styled(format!("rows: {}", agg.row_count), label)),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);
        self.draw_sidebar(frame, columns[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Min(0)])
            .split(columns[1]);
        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main[0]);

        self.draw_profit_chart(frame, charts[0]);
        self.draw_sales_chart(frame, charts[1]);
        self.draw_table(frame, main[1]);
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let outer = Block::default().title("Filter Data").borders(Borders::ALL);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(inner);

        let items: Vec<ListItem> = self
            .suppliers
            .iter()
            .map(|s| {
                let mark = if self.criteria.is_selected(s) { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {}", truncate(s, 20)))
            })
            .collect();
        let suppliers_focused = self.focus == Focus::Suppliers;
        let list = List::new(items)
            .block(Block::default().title("Suppliers").borders(Borders::TOP))
            .highlight_style(if suppliers_focused {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            })
            .highlight_symbol("» ");
        let mut state = ListState::default();
        state.select(Some(self.supplier_cursor));
        frame.render_stateful_widget(list, parts[0], &mut state);

        let date_line = |name: &str, field: Focus, date: NaiveDate| {
            let focused = self.focus == field;
            let text = if focused && self.editing_date {
                format!("{name}: {}_", self.date_input)
            } else {
                format!("{name}: {date}")
            };
            let style = match (focused, self.editing_date) {
                (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Black).bg(Color::White),
                _ => Style::default(),
            };
            Line::from(Span::styled(text, style))
        };
        let span = match self.data_bounds {
            Some((first, last)) => format!("data: {first} .. {last}"),
            None => "data: (no rows)".to_string(),
        };
        let dates = Paragraph::new(Text::from(vec![
            date_line("Start", Focus::StartDate, self.criteria.date_range.start),
            date_line("End  ", Focus::EndDate, self.criteria.date_range.end),
            Line::from(Span::styled(span, Style::default().fg(Color::DarkGray))),
        ]))
        .block(Block::default().title("Date range").borders(Borders::TOP));
        frame.render_widget(dates, parts[1]);
    }

    fn draw_profit_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Profit by Supplier").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.output.aggregates.is_empty() {
            frame.render_widget(
                Paragraph::new("No rows match the filters.").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let profits = &self.output.aggregates.profit_by_supplier;
        let bar_width = bar_width(inner.width, profits.len());
        let bars: Vec<Bar> = profits
            .iter()
            .map(|(supplier, profit)| {
                Bar::default()
                    // Bars cannot go below zero; the label carries the signed value.
                    .value(profit.max(0.0).round() as u64)
                    .text_value(format_currency(*profit))
                    .label(Line::from(truncate(supplier, bar_width as usize)))
                    .style(Style::default().fg(if *profit < 0.0 { Color::Red } else { Color::Cyan }))
            })
            .collect();

        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
        frame.render_widget(chart, inner);
    }

    fn draw_sales_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Sales Over Time").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = self.output.aggregates.sales_series();
        if series.is_empty() {
            frame.render_widget(
                Paragraph::new("No rows match the filters.").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }
        frame.render_widget(SalesLineChart::new(&series), inner);
    }

    fn draw_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let total = self.output.rows.len();
        // Borders plus the header row.
        self.table_rows_visible = (area.height.saturating_sub(3) as usize).max(1);
        let first = self.table_offset.min(total.saturating_sub(1));
        let last = (first + self.table_rows_visible).min(total);

        let title = if total == 0 {
            "Detailed Performance Table (no rows)".to_string()
        } else {
            format!("Detailed Performance Table ({}-{last} of {total})", first + 1)
        };

        let header = Row::new([
            "Supplier",
            "Product",
            "Exp. Mgn %",
            "Act. Mgn %",
            "Units",
            "Cost/Unit",
            "Date Sold",
        ])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self.output.rows[first..last]
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.supplier.clone()),
                    Cell::from(r.product.clone()),
                    Cell::from(format!("{:.2}", r.expected_margin_pct)),
                    Cell::from(format!("{:.2}", r.actual_margin_pct)),
                    Cell::from(r.units_sold.to_string()),
                    Cell::from(format_currency(r.cost_per_unit)),
                    Cell::from(r.date_sold.to_string()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(12),
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(11),
            Constraint::Length(10),
        ];
        let border_style = if self.focus == Focus::Table {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL).border_style(border_style));
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab focus  ↑/↓ move  Space toggle  a all  n none  Enter edit date  PgUp/PgDn scroll  r refresh  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Width of each bar so `count` bars (plus one-cell gaps) fit in `available` columns.
fn bar_width(available: u16, count: usize) -> u16 {
    let count = count.max(1) as u16;
    (available.saturating_sub(count) / count).clamp(3, 20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FixtureSource, SessionCache};

    fn demo_app() -> App {
        App::new(Dashboard::new(SessionCache::new(Box::new(FixtureSource::demo())))).unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn type_date(app: &mut App, text: &str) {
        app.handle_key(KeyCode::Enter);
        assert!(app.editing_date);
        for _ in 0..10 {
            app.handle_key(KeyCode::Backspace);
        }
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn starts_with_everything_selected() {
        let app = demo_app();
        assert_eq!(app.suppliers, ["Supplier A", "Supplier B", "Supplier C"]);
        assert_eq!(app.output.rows.len(), 12);
        assert!(app.status.starts_with("Loaded 12 rows"));
    }

    #[test]
    fn space_toggles_supplier_and_requeries() {
        let mut app = demo_app();
        app.handle_key(KeyCode::Char(' '));
        assert!(!app.criteria.is_selected("Supplier A"));
        assert!(app.output.rows.iter().all(|r| r.supplier != "Supplier A"));

        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.output.rows.len(), 12);
    }

    #[test]
    fn select_none_and_all() {
        let mut app = demo_app();
        app.handle_key(KeyCode::Char('n'));
        assert!(app.output.rows.is_empty());
        assert_eq!(app.output.aggregates.avg_margin, None);

        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.output.rows.len(), 12);
    }

    #[test]
    fn editing_dates_narrows_the_view() {
        let mut app = demo_app();
        app.handle_key(KeyCode::Tab);
        type_date(&mut app, "2024-01-05");
        app.handle_key(KeyCode::Tab);
        type_date(&mut app, "2024-01-12");

        assert_eq!(app.criteria.date_range.start, jan(5));
        assert_eq!(app.criteria.date_range.end, jan(12));
        assert!(app.output.rows.iter().all(|r| r.date_sold >= jan(5) && r.date_sold <= jan(12)));
        assert!(!app.output.rows.is_empty());
    }

    #[test]
    fn invalid_date_keeps_criteria() {
        let mut app = demo_app();
        let before = app.criteria.clone();
        app.handle_key(KeyCode::Tab);
        type_date(&mut app, "2024-13-01");

        assert_eq!(app.criteria, before);
        assert!(app.status.starts_with("Invalid date"));
    }

    #[test]
    fn escape_cancels_edit() {
        let mut app = demo_app();
        let before = app.criteria.clone();
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Esc);
        assert!(!app.editing_date);
        assert_eq!(app.criteria, before);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let mut app = demo_app();
        app.handle_key(KeyCode::Tab);
        type_date(&mut app, "2024-02-01");
        assert!(app.output.rows.is_empty());
        assert!(app.status.contains("after end date"));
    }

    #[test]
    fn refresh_reloads_and_keeps_filters() {
        let mut app = demo_app();
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('r'));
        assert!(app.status.starts_with("Reloaded 12 rows"));
        assert!(!app.criteria.is_selected("Supplier A"));
        assert_eq!(app.data_bounds, Some((jan(3), jan(31))));
    }

    #[test]
    fn data_bounds_track_the_dataset() {
        let app = demo_app();
        assert_eq!(app.data_bounds, Some((jan(3), jan(31))));
        assert_eq!(app.criteria.date_range.start, jan(3));
    }

    #[test]
    fn export_writes_both_files() {
        let mut app = demo_app();
        let dir = tempfile::tempdir().unwrap();
        app.export(dir.path());
        assert!(app.status.starts_with("Exported"));
        assert!(dir.path().join(VIEW_CSV).exists());
        assert!(dir.path().join(AGGREGATES_JSON).exists());
    }

    #[test]
    fn table_scroll_is_clamped() {
        let mut app = demo_app();
        app.focus = Focus::Table;
        app.handle_key(KeyCode::Up);
        assert_eq!(app.table_offset, 0);
        for _ in 0..50 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.table_offset, 11);
    }

    #[test]
    fn q_quits_only_outside_edit_mode() {
        let mut app = demo_app();
        app.focus = Focus::StartDate;
        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Esc);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn bars_fit_the_panel() {
        assert_eq!(bar_width(40, 3), 12);
        assert_eq!(bar_width(8, 5), 3);
        assert_eq!(bar_width(200, 1), 20);
    }
}
