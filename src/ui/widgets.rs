//! Text fields, dialogs, and layout helpers shared by the screens.

use super::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use zeroize::Zeroizing;

fn prev_boundary(s: &str, i: usize) -> usize {
    s[..i].chars().next_back().map_or(0, |c| i - c.len_utf8())
}

fn next_boundary(s: &str, i: usize) -> usize {
    s[i..].chars().next().map_or(i, |c| i + c.len_utf8())
}

/// Byte offset of char column `col` within `s[start..end]`, clamped to `end`.
fn offset_at_column(s: &str, start: usize, end: usize, col: usize) -> usize {
    s[start..end]
        .char_indices()
        .nth(col)
        .map_or(end, |(i, _)| start + i)
}

fn cursor_spans(text: &str, cursor: Option<usize>, style: Style) -> Vec<Span<'static>> {
    let Some(cursor) = cursor else {
        return vec![Span::styled(text.to_string(), style)];
    };
    let after = next_boundary(text, cursor);
    let under = if after > cursor { &text[cursor..after] } else { " " };
    vec![
        Span::styled(text[..cursor].to_string(), style),
        Span::styled(under.to_string(), style.add_modifier(Modifier::REVERSED)),
        Span::styled(text[after..].to_string(), style),
    ]
}

/// Single-line input. The buffer is wiped on drop since it may hold a
/// password.
#[derive(Default)]
pub struct TextInput {
    value: Zeroizing<String>,
    cursor: usize,
    masked: bool,
}

impl TextInput {
    pub fn new() -> Self {
        TextInput::default()
    }

    pub fn masked() -> Self {
        TextInput {
            masked: true,
            ..TextInput::default()
        }
    }

    pub fn with_value(value: &str) -> Self {
        let mut input = TextInput::new();
        input.set(value);
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: &str) {
        self.value = Zeroizing::new(value.to_string());
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.set("");
    }

    /// Applies an editing key. Returns false for keys the field ignores.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = prev_boundary(&self.value, self.cursor);
                    self.value.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    let end = next_boundary(&self.value, self.cursor);
                    self.value.replace_range(self.cursor..end, "");
                }
            }
            KeyCode::Left => self.cursor = prev_boundary(&self.value, self.cursor),
            KeyCode::Right => self.cursor = next_boundary(&self.value, self.cursor),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }

    pub fn line(&self, focused: bool, style: Style) -> Line<'static> {
        if self.masked {
            let stars = "*".repeat(self.value.chars().count());
            let cursor = focused.then(|| self.value[..self.cursor].chars().count());
            Line::from(cursor_spans(&stars, cursor, style))
        } else {
            Line::from(cursor_spans(&self.value, focused.then_some(self.cursor), style))
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, label: &str, focused: bool, theme: &Theme) {
        let border = if focused { theme.title() } else { theme.base() };
        let field = Paragraph::new(self.line(focused, theme.base())).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(label.to_string())
                .style(theme.base()),
        );
        f.render_widget(field, area);
    }
}

/// Multi-line input for entry content.
#[derive(Debug, Default)]
pub struct TextArea {
    text: String,
    cursor: usize,
}

impl TextArea {
    pub fn with_text(text: &str) -> Self {
        TextArea {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i)
    }

    fn column(&self) -> usize {
        self.text[self.line_start()..self.cursor].chars().count()
    }

    /// Row of the cursor, counted in hard lines.
    pub fn cursor_row(&self) -> usize {
        self.text[..self.cursor].matches('\n').count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Enter => {
                self.text.insert(self.cursor, '\n');
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = prev_boundary(&self.text, self.cursor);
                    self.text.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    let end = next_boundary(&self.text, self.cursor);
                    self.text.replace_range(self.cursor..end, "");
                }
            }
            KeyCode::Left => self.cursor = prev_boundary(&self.text, self.cursor),
            KeyCode::Right => self.cursor = next_boundary(&self.text, self.cursor),
            KeyCode::Home => self.cursor = self.line_start(),
            KeyCode::End => self.cursor = self.line_end(),
            KeyCode::Up => {
                let start = self.line_start();
                if start > 0 {
                    let col = self.column();
                    let prev_end = start - 1;
                    let prev_start = self.text[..prev_end].rfind('\n').map_or(0, |i| i + 1);
                    self.cursor = offset_at_column(&self.text, prev_start, prev_end, col);
                }
            }
            KeyCode::Down => {
                let end = self.line_end();
                if end < self.text.len() {
                    let col = self.column();
                    let next_start = end + 1;
                    let next_end = self.text[next_start..]
                        .find('\n')
                        .map_or(self.text.len(), |i| next_start + i);
                    self.cursor = offset_at_column(&self.text, next_start, next_end, col);
                }
            }
            _ => return false,
        }
        true
    }

    pub fn render(&self, f: &mut Frame, area: Rect, label: &str, focused: bool, theme: &Theme) {
        let mut offset = 0;
        let lines: Vec<Line> = self
            .text
            .split('\n')
            .map(|line| {
                let start = offset;
                offset += line.len() + 1;
                let cursor = (focused && (start..=start + line.len()).contains(&self.cursor))
                    .then(|| self.cursor - start);
                Line::from(cursor_spans(line, cursor, theme.base()))
            })
            .collect();

        let visible_rows = area.height.saturating_sub(2) as usize;
        let scroll = self.cursor_row().saturating_sub(visible_rows.saturating_sub(1));
        let border = if focused { theme.title() } else { theme.base() };
        let field = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(label.to_string())
                    .style(theme.base()),
            )
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
        f.render_widget(field, area);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// A modal notice dismissed by any key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub title: String,
    pub text: String,
}

impl Message {
    pub fn info(title: &str, text: impl Into<String>) -> Self {
        Message {
            kind: MessageKind::Info,
            title: title.to_string(),
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Message {
            kind: MessageKind::Warning,
            title: "Warning".to_string(),
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Message {
            kind: MessageKind::Error,
            title: "Error".to_string(),
            text: text.into(),
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        let border = match self.kind {
            MessageKind::Info => theme.title(),
            MessageKind::Warning => theme.base().fg(theme.accent),
            MessageKind::Error => theme.base().fg(theme.danger),
        };
        let body = Text::from(vec![
            Line::from(self.text.clone()),
            Line::default(),
            Line::styled("Press any key", theme.hint()),
        ]);
        popup(f, &self.title, body, border, 50, 30, theme);
    }
}

/// Renders `body` in a bordered box centred over whatever is underneath.
pub fn popup(
    f: &mut Frame,
    title: &str,
    body: Text<'_>,
    border: Style,
    percent_x: u16,
    percent_y: u16,
    theme: &Theme,
) {
    let area = centered_rect(percent_x, percent_y, f.area());
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title.to_string())
                .style(theme.base()),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

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
