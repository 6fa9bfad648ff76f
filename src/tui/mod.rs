//! Ratatui-based terminal form.
//!
//! The form mirrors the web calculator: an LMP date field, a gestational-age
//! number field and slider, the derived EDD/GA lines, the percentile cards for
//! the looked-up week, and a chart of the selected vessel's reference curves.
//! All state lives in [`DatingForm`]; this module only maps keys to its
//! handlers and draws its outputs.

use std::io;
use std::time::Duration;

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
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use crate::calc::{DatingForm, GaTextOutcome};
use crate::config::AppConfig;
use crate::data::PercentileTable;
use crate::domain::Vessel;
use crate::error::AppError;
use crate::report::{DISCLAIMER, NO_DATA, fmt_pi};

mod plotters_chart;

use plotters_chart::PercentileChart;

/// Start the TUI.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(crate::app::session::start_form(config));
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

/// Focusable form fields, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Lmp,
    GaNumber,
    Slider,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Lmp => Field::GaNumber,
            Field::GaNumber | Field::Slider => Field::Slider,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Lmp | Field::GaNumber => Field::Lmp,
            Field::Slider => Field::GaNumber,
        }
    }
}

struct App {
    form: DatingForm,
    selected_field: Field,
    editing_date: bool,
    date_input: String,
    vessel: Vessel,
    status: String,
}

impl App {
    fn new(form: DatingForm) -> Self {
        Self {
            form,
            selected_field: Field::Lmp,
            editing_date: false,
            date_input: String::new(),
            vessel: Vessel::McaPi,
            status: "Enter edits the date; type digits in the GA field.".to_string(),
        }
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
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected_field = self.selected_field.prev(),
            KeyCode::Down | KeyCode::Tab => self.selected_field = self.selected_field.next(),
            KeyCode::Char('v') => {
                self.vessel = self.vessel.next();
                self.status = format!("chart: {}", self.vessel.display_name());
            }
            _ => match self.selected_field {
                Field::Lmp => self.handle_lmp_key(code),
                Field::GaNumber => self.handle_ga_number_key(code),
                Field::Slider => self.handle_slider_key(code),
            },
        }

        false
    }

    fn handle_lmp_key(&mut self, code: KeyCode) {
        if code == KeyCode::Enter {
            self.editing_date = true;
            self.date_input = self.form.lmp_text();
            self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel, empty clears.".to_string();
        }
    }

    fn handle_ga_number_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let mut text = self.form.ga_text().to_string();
                text.push(c);
                self.apply_ga_text(text);
            }
            KeyCode::Backspace => {
                let mut text = self.form.ga_text().to_string();
                text.pop();
                self.apply_ga_text(text);
            }
            KeyCode::Left => self.step_slider(-1),
            KeyCode::Right => self.step_slider(1),
            _ => {}
        }
    }

    fn handle_slider_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => self.step_slider(-1),
            KeyCode::Right => self.step_slider(1),
            KeyCode::Home => {
                let min = self.form.table().min_week();
                self.form.set_slider(min);
                self.status = format!("GA: {min} weeks");
            }
            KeyCode::End => {
                let max = self.form.table().max_week();
                self.form.set_slider(max);
                self.status = format!("GA: {max} weeks");
            }
            _ => {}
        }
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
                if c.is_ascii_digit() || c == '-' {
                    self.date_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_date_input(&mut self) {
        match self.form.set_lmp_text(&self.date_input) {
            Ok(()) => {
                self.status = match self.form.lmp() {
                    Some(lmp) => format!("LMP: {lmp}"),
                    None => "LMP cleared.".to_string(),
                };
            }
            Err(e) => {
                self.status = e.to_string();
            }
        }
    }

    fn apply_ga_text(&mut self, text: String) {
        let (min, max) = (self.form.table().min_week(), self.form.table().max_week());
        self.status = match self.form.set_ga_text(text) {
            GaTextOutcome::Applied(week) => format!("GA: {week} weeks"),
            GaTextOutcome::OutOfRange(weeks) => {
                format!("{weeks} is outside {min}..={max} weeks; LMP unchanged.")
            }
            GaTextOutcome::NotANumber => format!("Type a whole number of weeks ({min}-{max})."),
        };
    }

    fn step_slider(&mut self, delta: i64) {
        self.form.step_slider(delta);
        self.status = format!("GA: {} weeks", self.form.slider_value());
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Min(0),
                Constraint::Length(5),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_dating(frame, chunks[1]);
        self.draw_calculator(frame, chunks[2]);
        self.draw_cards(frame, chunks[3]);
        self.draw_chart(frame, chunks[4]);
        self.draw_footer(frame, chunks[5]);
    }

    fn field_style(&self, field: Field) -> Style {
        if self.selected_field == field {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::Cyan)
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "OBTools",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "Tools for pregnancy dating and doppler values. | today: {}",
                    self.form.reference()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_dating(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let view = self.form.view();

        let lmp_value = if self.editing_date {
            format!("{}_", self.date_input)
        } else if view.lmp.is_some() {
            self.form.lmp_text()
        } else {
            "yyyy-mm-dd".to_string()
        };

        let mut lines = vec![Line::from(vec![
            Span::raw("First Day of Last Period: "),
            Span::styled(lmp_value, self.field_style(Field::Lmp)),
        ])];
        if !view.edd_display.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("Estimated Due Date: "),
                Span::styled(view.edd_display.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
        }
        lines.push(Line::from(vec![
            Span::raw("Current Gestational Age: "),
            Span::styled(view.ga_display.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));

        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Pregnancy Dating").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_calculator(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Doppler Percentile Calculator").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let note = Paragraph::new("Adjusting the slider updates the LMP/EDD above, using today as the reference point.")
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(note, rows[0]);

        let ga_line = Line::from(vec![
            Span::raw("Gestational Age: "),
            Span::styled(format!("[{:>3}]", self.form.ga_text()), self.field_style(Field::GaNumber)),
            Span::raw(" weeks"),
        ]);
        frame.render_widget(Paragraph::new(ga_line), rows[1]);

        let table = self.form.table();
        let slider = self.form.slider_value();
        let gauge_color = if self.selected_field == Field::Slider {
            Color::White
        } else {
            Color::Blue
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(gauge_color).bg(Color::DarkGray))
            .ratio(slider_ratio(slider, table))
            .label(format!("{slider} wks"));
        frame.render_widget(gauge, rows[2]);

        let min_label = format!("{} wks", table.min_week());
        let max_label = format!("{} wks", table.max_week());
        let gap = (rows[3].width as usize).saturating_sub(min_label.len() + max_label.len());
        let range = Paragraph::new(format!("{min_label}{}{max_label}", " ".repeat(gap)))
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(range, rows[3]);
    }

    fn draw_cards(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let view = self.form.view();
        let block = Block::default()
            .title(format!("Doppler Values for Week {}", view.lookup_week))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        for (vessel, rect) in Vessel::ALL.into_iter().zip(cols.iter()) {
            let lines = match view.percentiles.get(vessel) {
                Some(p) => vec![
                    percentile_line("5th Percentile ", p.p5, Color::Blue),
                    percentile_line("50th Percentile", p.p50, Color::Green),
                    percentile_line("95th Percentile", p.p95, Color::Red),
                ],
                None => vec![Line::from(Span::styled(NO_DATA, Style::default().fg(Color::Gray)))],
            };
            let card = Paragraph::new(Text::from(lines))
                .block(Block::default().title(vessel.display_name()).borders(Borders::ALL));
            frame.render_widget(card, *rect);
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = format!("{} reference (v to switch)", self.vessel.display_name());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = chart_series(self.form.table(), self.vessel);
        let widget = PercentileChart {
            p5: &series.p5,
            p50: &series.p50,
            p95: &series.p95,
            marker_week: Some(f64::from(self.form.view().lookup_week)),
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            y_label: "PI",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  Enter edit date  0-9/⌫ type weeks  ←/→ slider  v vessel  q quit";
        let lines = vec![
            Line::from(vec![
                Span::styled(help, Style::default().fg(Color::Gray)),
                Span::raw(" | "),
                Span::styled(self.status.as_str(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(DISCLAIMER, Style::default().fg(Color::DarkGray))),
        ];
        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn percentile_line(label: &'static str, value: f64, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(color)),
        Span::raw("  "),
        Span::styled(fmt_pi(value), Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Slider fill ratio within the table range.
fn slider_ratio(week: u32, table: &PercentileTable) -> f64 {
    let span = table.max_week().saturating_sub(table.min_week());
    if span == 0 {
        return 1.0;
    }
    let offset = week.saturating_sub(table.min_week()).min(span);
    f64::from(offset) / f64::from(span)
}

/// Chart series for one vessel.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    p5: Vec<(f64, f64)>,
    p50: Vec<(f64, f64)>,
    p95: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(table: &PercentileTable, vessel: Vessel) -> ChartSeries {
    let mut p5 = Vec::new();
    let mut p50 = Vec::new();
    let mut p95 = Vec::new();
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);

    for row in table.rows() {
        let x = f64::from(row.week);
        let p = row.vessel(vessel);
        p5.push((x, p.p5));
        p50.push((x, p.p50));
        p95.push((x, p.p95));
        y_min = y_min.min(p.p5);
        y_max = y_max.max(p.p95);
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    let mut x_bounds = [f64::from(table.min_week()), f64::from(table.max_week())];
    if x_bounds[1] <= x_bounds[0] {
        x_bounds[1] = x_bounds[0] + 1.0;
    }

    ChartSeries {
        p5,
        p50,
        p95,
        x_bounds,
        y_bounds: [y_min - pad, y_max + pad],
    }
}
