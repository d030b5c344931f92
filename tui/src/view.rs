//! View
//!
//! Pure rendering of the app state with ratatui widgets. No logic beyond
//! layout: every value drawn here was put into `DisplayState` by an engine
//! message.

use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use plotcast_engine::PlotMode;

use crate::app::{App, Focus, Screen};
use crate::display::PipelineStatus;
use crate::input::InputField;
use crate::theme;

/// Draw one frame.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Main => draw_main(frame, app),
        Screen::Raw => draw_raw(frame, app),
    }
}

fn draw_main(frame: &mut Frame, app: &App) {
    let range_height = match app.display.mode {
        PlotMode::TwoDRange => 3,
        PlotMode::ThreeD => 0,
    };
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(3), // expression
        Constraint::Length(range_height),
        Constraint::Length(1), // status
        Constraint::Length(1), // rotation readout
        Constraint::Length(1), // scale readout
        Constraint::Min(0),
        Constraint::Length(1), // footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app, "plotcast");

    draw_input(
        frame,
        chunks[1],
        "f(x, y)",
        &app.expression,
        app.focus == Focus::Expression,
    );

    if app.display.mode == PlotMode::TwoDRange {
        let halves =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[2]);
        draw_input(frame, halves[0], "z min", &app.z_min, app.focus == Focus::ZMin);
        draw_input(frame, halves[1], "z max", &app.z_max, app.focus == Focus::ZMax);
    }

    draw_status(frame, chunks[3], app);

    frame.render_widget(
        Paragraph::new(app.display.rotation_text())
            .style(Style::default().fg(theme::ROTATION_READOUT)),
        chunks[4],
    );
    frame.render_widget(
        Paragraph::new(format!(
            "Scale pending: {:+.5}   Total scale: {:.5}",
            app.display.pending_scale, app.display.total_scale
        ))
        .style(Style::default().fg(theme::SCALE_READOUT)),
        chunks[5],
    );

    frame.render_widget(
        Paragraph::new(
            "Enter plot · Tab field · M-m mode · M-1/2 rot Z · M-3/4 rot X · M-5/6 rot Y · \
             M-+/- or scroll scale · F2 raw · Esc quit",
        )
        .style(Style::default().fg(theme::DIM_GRAY)),
        chunks[7],
    );

    let cursor_area = match app.focus {
        Focus::Expression => chunks[1],
        Focus::ZMin | Focus::ZMax if app.display.mode == PlotMode::TwoDRange => {
            let halves =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[2]);
            if app.focus == Focus::ZMin {
                halves[0]
            } else {
                halves[1]
            }
        }
        _ => chunks[1],
    };
    set_input_cursor(frame, cursor_area, app.cursor_field());
}

fn draw_raw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(3), // raw command input
        Constraint::Length(1), // status
        Constraint::Min(0),
        Constraint::Length(1), // footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app, "plotcast · raw console");
    draw_input(frame, chunks[1], "raw command", &app.raw, true);
    draw_status(frame, chunks[2], app);
    frame.render_widget(
        Paragraph::new("Enter send · F2 console · Esc quit")
            .style(Style::default().fg(theme::DIM_GRAY)),
        chunks[4],
    );

    set_input_cursor(frame, chunks[1], &app.raw);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let mode = match app.display.mode {
        PlotMode::ThreeD => "3D",
        PlotMode::TwoDRange => "2D range",
    };
    let left = Line::from(vec![
        Span::styled(format!(" {title} "), Style::default().fg(theme::ACCENT)),
        Span::styled(
            format!("· device {} · mode {mode}", app.device),
            Style::default().fg(theme::DIM_GRAY),
        ),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let fps = match app.display.fps {
        Some(fps) => format!("FPS: {fps:.0} "),
        None => "FPS: - ".to_string(),
    };
    frame.render_widget(
        Paragraph::new(fps)
            .style(Style::default().fg(theme::FPS_READOUT))
            .alignment(Alignment::Right),
        area,
    );
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.display.status {
        PipelineStatus::Idle | PipelineStatus::Plotted { .. } => theme::STATUS_OK,
        PipelineStatus::Running => theme::STATUS_BUSY,
        PipelineStatus::Failed { .. } => theme::STATUS_ERROR,
    };
    frame.render_widget(
        Paragraph::new(app.display.status_text()).style(Style::default().fg(color)),
        area,
    );
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, field: &InputField, focused: bool) {
    let border = if focused {
        theme::INPUT_FOCUSED
    } else {
        theme::INPUT_BLURRED
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(field.text()).block(block), area);
}

/// Place the terminal cursor inside a bordered input.
fn set_input_cursor(frame: &mut Frame, area: Rect, field: &InputField) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let max_col = area.width.saturating_sub(2);
    let x = area.x + 1 + field.cursor_column().min(max_col.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, area.y + 1));
}
