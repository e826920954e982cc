use crate::config::Config;
use crate::editor::Editor;
use crate::location::Location;
use crate::mode::{Mode, NavigationParams, SearchSubMode};
use crate::theme::UiPalette;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::path::PathBuf;
use tracing::{info, warn};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn run_app(path: Option<PathBuf>, config: Config) -> Result<()> {
    let palette = UiPalette::from_config(&config);
    let mut editor = Editor::new(&config);
    if let Some(path) = path {
        editor
            .open(path.clone())
            .with_context(|| format!("Failed to open {}", path.display()))?;
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    while editor.is_running() {
        let layout = AppLayout::new(terminal.size()?);
        editor.scroll_to_cursor(layout.text.height as usize);
        terminal.draw(|f| ui(f, &editor, &palette, &layout))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Err(err) = editor.handle_key(key) {
                let err = anyhow::Error::from(err);
                warn!("key handling failed: {err:#}");
                editor.status = Some(format!("{err:#}"));
            }
        }
    }

    info!("editor closed");
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

struct AppLayout {
    text: Rect,
    status: Rect,
    prompt: Rect,
}

impl AppLayout {
    fn new(size: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);
        Self {
            text: chunks[0],
            status: chunks[1],
            prompt: chunks[2],
        }
    }
}

fn ui(f: &mut ratatui::Frame, editor: &Editor, palette: &UiPalette, layout: &AppLayout) {
    match &editor.mode {
        Mode::Navigation(nav) => render_navigation(f, nav, palette, layout.text),
        _ => f.render_widget(
            Paragraph::new(text_lines(editor, palette, layout.text.height)),
            layout.text,
        ),
    }

    f.render_widget(
        Paragraph::new(status_line(editor, palette)).style(Style::default().add_modifier(Modifier::REVERSED)),
        layout.status,
    );
    f.render_widget(Paragraph::new(prompt_line(editor, palette)), layout.prompt);

    if let Some((x, y)) = cursor_position(editor, layout) {
        f.set_cursor(x, y);
    }
}

fn render_navigation(f: &mut ratatui::Frame, nav: &NavigationParams, palette: &UiPalette, area: Rect) {
    let items: Vec<ListItem> = nav
        .entries
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name))
                    .style(Style::default().fg(palette.navigation_dir))
            } else {
                ListItem::new(entry.name.clone()).style(Style::default().fg(palette.navigation))
            }
        })
        .collect();
    let mut state = ListState::default();
    state.select((!nav.entries.is_empty()).then_some(nav.current));
    let list = List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_stateful_widget(list, area, &mut state);
}

fn text_lines(editor: &Editor, palette: &UiPalette, height: u16) -> Text<'static> {
    let origin = editor.viewport.origin.row;
    let count = editor
        .viewport
        .lines_to_render(editor.buffer.line_count(), height as usize);
    let lines: Vec<Line<'static>> = editor
        .buffer
        .lines()
        .iter()
        .enumerate()
        .skip(origin)
        .take(count)
        .map(|(row, line)| styled_line(editor, palette, row, line.content()))
        .collect();
    Text::from(lines)
}

fn styled_line(editor: &Editor, palette: &UiPalette, row: usize, content: &str) -> Line<'static> {
    let style_at = |column: usize| {
        let loc = Location::new(row, column);
        match &editor.mode {
            Mode::Search(params) if params.highlights(loc) => palette.match_style(),
            Mode::Selection(params) if params.contains(loc) => palette.selection_style(),
            _ => palette.base_style(),
        }
    };

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = palette.base_style();
    for (column, c) in content.chars().enumerate() {
        let style = style_at(column);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn status_line(editor: &Editor, palette: &UiPalette) -> Line<'static> {
    let file_name = editor
        .target
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[no file]".to_string());

    let mut parts = vec![
        Span::styled(format!(" {} ", editor.mode.label()), palette.label_style()),
        Span::raw(" "),
        Span::raw(file_name),
        Span::raw(format!(
            "  {}:{}",
            editor.cursor.row + 1,
            editor.cursor.column + 1
        )),
    ];
    if let Some(msg) = &editor.status {
        parts.push(Span::raw(" | "));
        parts.push(Span::raw(msg.clone()));
    }
    Line::from(parts)
}

fn prompt_line(editor: &Editor, palette: &UiPalette) -> Line<'static> {
    let label = Style::default().fg(palette.accent);
    if let Some(prompt) = &editor.prompt {
        return Line::from(vec![
            Span::styled(prompt.label, label),
            Span::raw(prompt.text.clone()),
        ]);
    }
    let Mode::Search(params) = &editor.mode else {
        return Line::default();
    };
    match params.sub_mode {
        SearchSubMode::Search => Line::from(vec![
            Span::styled("find: ", label),
            Span::raw(params.query.clone()),
        ]),
        SearchSubMode::Replace => Line::from(vec![
            Span::styled("replace: ", label),
            Span::raw(params.query.clone()),
            Span::styled(" -> ", Style::default().fg(palette.muted)),
            Span::raw(params.replacement.clone()),
        ]),
    }
}

fn cursor_position(editor: &Editor, layout: &AppLayout) -> Option<(u16, u16)> {
    if let Some(prompt) = &editor.prompt {
        let width = prompt.label.width() + prompt.text.width();
        let x = layout.prompt.x.saturating_add(width.try_into().ok()?);
        return Some((x, layout.prompt.y));
    }
    if matches!(editor.mode, Mode::Navigation(_)) {
        return None;
    }

    let relative = editor.viewport.relative_cursor(editor.cursor);
    if relative.row >= layout.text.height as usize {
        return None;
    }
    let line = editor.buffer.line(editor.cursor.row)?;
    let width: usize = line
        .content()
        .chars()
        .skip(editor.viewport.origin.column)
        .take(relative.column)
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum();
    let x = layout
        .text
        .x
        .saturating_add(width.min(layout.text.width as usize).try_into().ok()?);
    let y = layout.text.y.saturating_add(relative.row.try_into().ok()?);
    Some((x, y))
}
