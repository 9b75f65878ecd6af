//! ratatui rendering for the wizard navigator.
//!
//! Rendering is read-only with respect to the wizard state; the only thing
//! it mutates is the side-nav highlight. Step content is opaque to the
//! navigator, so the host paints the content pane through a closure.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::navigator::{can_select, WizardNavigator};
use crate::state::{Step, WizardState};

impl WizardNavigator {
    /// Render the wizard chrome: side navigation, active step header, and
    /// footer controls. `render_content` receives the content pane and the
    /// active step so the host can paint its opaque payload.
    pub fn render<C>(
        &mut self,
        frame: &mut Frame,
        state: &WizardState<C>,
        render_content: impl FnOnce(&mut Frame, Rect, &Step<C>),
    ) {
        let area = centered_rect(84, 80, frame.area());
        frame.render_widget(Clear, area);

        let counter = self
            .strings()
            .step_counter(state.active_step_index() + 1, state.len());
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.strings().title.clone(),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" — {counter} ")),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(30)])
            .split(inner);

        self.render_side_nav(frame, columns[0], state);
        self.render_active_pane(frame, columns[1], state, render_content);
    }

    fn render_side_nav<C>(&mut self, frame: &mut Frame, area: Rect, state: &WizardState<C>) {
        let active = state.active_step_index();

        let items: Vec<ListItem> = state
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (marker, marker_style) = if step.error_text.is_some() {
                    ("! ", Style::default().fg(Color::Red))
                } else if i < active {
                    ("+ ", Style::default().fg(Color::Green))
                } else if i == active {
                    ("> ", Style::default().fg(Color::Cyan))
                } else {
                    ("- ", Style::default().fg(Color::DarkGray))
                };

                let title_style = if i == active {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if can_select(state, i) {
                    Style::default().fg(Color::Gray)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                let mut spans = vec![
                    Span::styled(marker, marker_style),
                    Span::styled(step.title.clone(), title_style),
                ];
                if step.is_optional {
                    spans.push(Span::styled(
                        format!(" ({})", self.strings().optional_tag),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let nav_title = self.strings().nav_title.clone();
        let list = List::new(items)
            .block(Block::default().borders(Borders::RIGHT).title(nav_title))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("» ");

        frame.render_stateful_widget(list, area, self.nav_state_mut());
    }

    fn render_active_pane<C>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &WizardState<C>,
        render_content: impl FnOnce(&mut Frame, Rect, &Step<C>),
    ) {
        let step = state.active_step();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(2), // Description / info
                Constraint::Length(1), // Error line
                Constraint::Min(3),    // Opaque content
                Constraint::Length(2), // Footer controls
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            step.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, chunks[0]);

        let mut meta_lines = Vec::new();
        if let Some(description) = &step.description {
            meta_lines.push(Line::from(description.clone()));
        }
        if let Some(info) = &step.info {
            meta_lines.push(Line::from(Span::styled(
                info.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(meta_lines), chunks[1]);

        // Host-supplied error text, rendered as-is
        if let Some(error_text) = &step.error_text {
            let error = Paragraph::new(Line::from(Span::styled(
                error_text.clone(),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(error, chunks[2]);
        }

        render_content(frame, chunks[3], step);

        self.render_footer(frame, chunks[4], state);
    }

    fn render_footer<C>(&self, frame: &mut Frame, area: Rect, state: &WizardState<C>) {
        let strings = self.strings();
        let loading = self.is_loading_next_step();

        let enabled = Style::default().fg(Color::Cyan);
        let disabled = Style::default().fg(Color::DarkGray);

        let previous_style = if loading || state.is_first_step() {
            disabled
        } else {
            enabled
        };
        let forward_style = if loading { disabled } else { enabled };
        let forward_label = if state.is_last_step() {
            &strings.submit
        } else {
            &strings.next
        };

        let mut spans = vec![
            Span::styled(format!("[< {}]", strings.previous), previous_style),
            Span::raw("  "),
            Span::styled(format!("[> {forward_label}]"), forward_style),
            Span::raw("  "),
            Span::styled(
                format!("[Esc {}]", strings.cancel),
                if loading { disabled } else { enabled },
            ),
        ];
        if loading {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                strings.loading.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        let hints = Paragraph::new(Line::from(Span::styled(
            "Up/Down select step | Enter open | n/p move | Esc cancel",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Left);
        let hint_area = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        frame.render_widget(hints, hint_area);
    }
}

/// Centered rect helper: percentage of the outer frame in each dimension.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
