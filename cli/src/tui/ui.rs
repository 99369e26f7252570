use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use taskflow_core::{Priority, TaskStorage, MAX_TASKS};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub gauge: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            highlight_bg: Color::DarkGray,
            gauge: Color::Cyan,
            high: Color::Red,
            medium: Color::Yellow,
            low: Color::Green,
        }
    }

    pub fn light() -> Self {
        Theme {
            text: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            highlight_bg: Color::Gray,
            gauge: Color::Blue,
            high: Color::LightRed,
            medium: Color::LightYellow,
            low: Color::LightGreen,
        }
    }
}

pub fn draw<S: TaskStorage>(f: &mut Frame, app: &mut App<S>) {
    let theme = if app.dark { Theme::dark() } else { Theme::light() };
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Progress
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input / status
            Constraint::Length(1), // Help
        ])
        .split(size);

    let header = Paragraph::new("TASKFLOW")
        .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Stay organized, stay productive ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, main_chunks[0]);

    draw_progress(f, app, &theme, main_chunks[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[2]);

    draw_task_list(f, app, &theme, content_chunks[0]);
    draw_detail_view(f, app, &theme, content_chunks[1]);

    draw_input_bar(f, app, &theme, main_chunks[3]);

    let footer = Paragraph::new(
        "j/k: Navigate | Space: Toggle | a: Add | e: Edit | d: Delete | t: Theme | q: Quit",
    )
    .style(Style::default().fg(theme.muted))
    .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[4]);
}

fn draw_progress<S: TaskStorage>(f: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let total = app.tasks.len();
    let completed = app.tasks.iter().filter(|t| t.completed).count();
    let (ratio, label) = if total == 0 {
        (0.0, "No tasks yet. Add your first task to get started!".to_string())
    } else {
        (
            completed as f64 / total as f64,
            format!("{} of {} completed", completed, total),
        )
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Progress ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(theme.gauge))
        .ratio(ratio)
        .label(Span::styled(label, Style::default().fg(theme.text)));
    f.render_widget(gauge, area);
}

fn draw_task_list<S: TaskStorage>(f: &mut Frame, app: &mut App<S>, theme: &Theme, area: Rect) {
    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|task| {
            let status_icon = if task.completed { "✔" } else { "☐" };

            let priority_style = match task.priority {
                Priority::High => Style::default().fg(theme.high),
                Priority::Medium => Style::default().fg(theme.medium),
                Priority::Low => Style::default().fg(theme.low),
            };
            let pri_str = match task.priority {
                Priority::High => "H",
                Priority::Medium => "M",
                Priority::Low => "L",
            };

            let due_str = task
                .end_date
                .map(|d| d.format("%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());

            let title_style = if task.completed {
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            };

            Row::new(vec![
                Span::styled(status_icon, Style::default().fg(theme.text)),
                Span::styled(pri_str, priority_style),
                Span::styled(due_str, Style::default().fg(theme.text)),
                Span::styled(task.title.clone(), title_style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Priority
            Constraint::Length(6),  // Due
            Constraint::Min(10),    // Title
        ],
    )
    .header(Row::new(vec!["St", "Pr", "Due", "Task"]).style(Style::default().fg(theme.accent)))
    .block(
        Block::default()
            .title(format!(" Tasks ({}/{}) ", app.tasks.len(), MAX_TASKS))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .row_highlight_style(
        Style::default()
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view<S: TaskStorage>(f: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(task) = app.state.selected().and_then(|i| app.tasks.get(i)) else {
        f.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(theme.accent);
    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", label),
            Span::styled(&task.title, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(theme.muted)),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::raw(if task.completed { "Completed" } else { "Open" }),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", label),
            Span::raw(format!("{:?}", task.priority)),
        ]),
        Line::from(vec![
            Span::styled("Due: ", label),
            Span::raw(
                task.end_date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "None".to_string()),
            ),
        ]),
        Line::from(vec![
            Span::styled("Created: ", label),
            Span::raw(task.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Updated: ", label),
            Span::raw(task.updated_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Line::from(""),
    ];

    if let Some(desc) = &task.description {
        detail_text.push(Line::from(Span::styled("Description:", label)));
        detail_text.push(Line::from(desc.as_str()));
    }

    let detail = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_input_bar<S: TaskStorage>(f: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let (title, text, style) = match app.input_mode {
        InputMode::Adding => (
            " Add task (title desc:.. pri:h|m|l due:date) ",
            app.input.as_str(),
            Style::default().fg(theme.text),
        ),
        InputMode::Editing => (
            " Edit task (new title and/or fields) ",
            app.input.as_str(),
            Style::default().fg(theme.text),
        ),
        InputMode::Normal => match &app.status {
            Some(message) => (" Status ", message.as_str(), Style::default().fg(theme.medium)),
            None => (
                " Status ",
                "Press 'a' to add a task.",
                Style::default().fg(theme.muted),
            ),
        },
    };

    let bar = Paragraph::new(text).style(style).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(bar, area);

    if matches!(app.input_mode, InputMode::Adding | InputMode::Editing) {
        let prefix: String = app.input.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + prefix.width() as u16;
        f.set_cursor_position((x, area.y + 1));
    }
}
