use super::theme::Theme;
use super::widgets::{centered_rect, popup, Message, TextArea, TextInput};
use super::Transition;
use crate::accounts::{Accounts, Session};
use crate::diary_entry::DiaryEntry;
use crate::diary_state::DiaryState;
use crate::error::{DiaryError, DiaryResult};
use crate::export::{default_export_path, export_pdf};
use chrono::{Datelike, Local, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        calendar::{CalendarEventStore, Monthly},
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
    Frame,
};
use std::path::{Path, PathBuf};

const LOCKED_PLACEHOLDER: &str = "[Locked Entry – Unlock to view content]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    Title,
    Content,
}

struct EntryForm {
    /// `None` when adding, the entry's position when editing.
    target: Option<usize>,
    date: NaiveDate,
    title: TextInput,
    content: TextArea,
    focus: FormFocus,
}

enum Mode {
    Browse,
    Search,
    Form(EntryForm),
    View { index: usize, scroll: u16 },
    ConfirmDelete(usize),
    Unlock { index: usize, password: TextInput },
    Export { index: usize, path: TextInput },
    Message(Message),
}

/// The logged-in view: calendar sidebar, search box, and entry list.
pub struct Dashboard {
    session: Session,
    accounts: Accounts,
    diary: DiaryState,
    data_dir: PathBuf,
    calendar_date: NaiveDate,
    search: TextInput,
    query: String,
    /// Positions in the diary of the entries currently listed.
    results: Vec<usize>,
    cursor: usize,
    mode: Mode,
}

impl Dashboard {
    pub fn new(session: Session, accounts: Accounts, diary: DiaryState, data_dir: &Path) -> Self {
        let mut dashboard = Dashboard {
            session,
            accounts,
            diary,
            data_dir: data_dir.to_path_buf(),
            calendar_date: Local::now().date_naive(),
            search: TextInput::new(),
            query: String::new(),
            results: Vec::new(),
            cursor: 0,
            mode: Mode::Browse,
        };
        dashboard.refresh_results();
        dashboard
    }

    pub fn into_accounts(self) -> Accounts {
        self.accounts
    }

    pub fn username(&self) -> &str {
        self.session.username()
    }

    #[cfg(test)]
    fn diary(&self) -> &DiaryState {
        &self.diary
    }

    #[cfg(test)]
    fn calendar_date(&self) -> NaiveDate {
        self.calendar_date
    }

    pub fn message(&self) -> Option<&Message> {
        match &self.mode {
            Mode::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Diary position of the highlighted entry.
    pub fn selected_entry(&self) -> Option<usize> {
        self.results.get(self.cursor).copied()
    }

    fn refresh_results(&mut self) {
        self.results = self
            .diary
            .search_entries(&self.query)
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        self.cursor = self.cursor.min(self.results.len().saturating_sub(1));
    }

    fn select(&mut self, index: usize) {
        if let Some(pos) = self.results.iter().position(|&i| i == index) {
            self.cursor = pos;
        }
    }

    fn report(&mut self, result: DiaryResult<Message>) {
        self.mode = Mode::Message(result.unwrap_or_else(|e| Message::error(e.to_string())));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Transition {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Transition::Quit;
        }

        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Browse => return self.browse_key(key),
            Mode::Search => self.search_key(key),
            Mode::Form(form) => self.form_key(form, key),
            Mode::View { index, scroll } => match key.code {
                KeyCode::Up => {
                    self.mode = Mode::View {
                        index,
                        scroll: scroll.saturating_sub(1),
                    }
                }
                KeyCode::Down => {
                    self.mode = Mode::View {
                        index,
                        scroll: scroll.saturating_add(1),
                    }
                }
                _ => {}
            },
            Mode::ConfirmDelete(index) => {
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    match self.diary.delete_entry(index) {
                        Ok(_) => self.refresh_results(),
                        Err(e) => self.mode = Mode::Message(Message::error(e.to_string())),
                    }
                }
            }
            Mode::Unlock {
                index,
                mut password,
            } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => self.unlock(index, password.value()),
                _ => {
                    password.handle_key(key);
                    self.mode = Mode::Unlock { index, password };
                }
            },
            Mode::Export { index, mut path } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    let target = path.value().trim().to_string();
                    if !target.is_empty() {
                        let result = self.export(index, Path::new(&target));
                        self.report(result);
                    }
                }
                _ => {
                    path.handle_key(key);
                    self.mode = Mode::Export { index, path };
                }
            },
            Mode::Message(_) => {}
        }
        Transition::Stay
    }

    fn browse_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Char('q') => return Transition::Quit,
            KeyCode::Char('o') => return Transition::Logout,
            KeyCode::Char('t') => return Transition::ToggleTheme,
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if self.cursor + 1 < self.results.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Left => self.move_calendar(|d| d.pred_opt()),
            KeyCode::Right => self.move_calendar(|d| d.succ_opt()),
            KeyCode::Char('[') => self.move_calendar(|d| d.checked_sub_months(Months::new(1))),
            KeyCode::Char(']') => self.move_calendar(|d| d.checked_add_months(Months::new(1))),
            KeyCode::Char('g') => self.calendar_date = Local::now().date_naive(),
            KeyCode::Char('/') | KeyCode::Char('s') => self.mode = Mode::Search,
            KeyCode::Char('r') => {
                self.search.clear();
                self.query.clear();
                self.refresh_results();
            }
            KeyCode::Char('a') => {
                self.mode = Mode::Form(EntryForm {
                    target: None,
                    date: self.calendar_date,
                    title: TextInput::new(),
                    content: TextArea::default(),
                    focus: FormFocus::Title,
                })
            }
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') => match self.selected_entry() {
                Some(index) => self.mode = Mode::ConfirmDelete(index),
                None => self.warn("Please select an entry to delete."),
            },
            KeyCode::Char('l') => self.toggle_lock(),
            KeyCode::Char('x') => self.begin_export(),
            KeyCode::Enter => {
                if let Some(index) = self.selected_entry() {
                    if self.diary.get_entries()[index].locked {
                        self.warn("Unlock this entry to view its content.");
                    } else {
                        self.mode = Mode::View { index, scroll: 0 };
                    }
                }
            }
            _ => {}
        }
        Transition::Stay
    }

    fn warn(&mut self, text: &str) {
        self.mode = Mode::Message(Message::warning(text));
    }

    fn move_calendar(&mut self, step: impl FnOnce(NaiveDate) -> Option<NaiveDate>) {
        if let Some(date) = step(self.calendar_date) {
            self.calendar_date = date;
        }
    }

    fn search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.search.set(&self.query),
            KeyCode::Enter => {
                self.query = self.search.value().trim().to_string();
                self.cursor = 0;
                self.refresh_results();
            }
            _ => {
                self.search.handle_key(key);
                self.mode = Mode::Search;
            }
        }
    }

    fn begin_edit(&mut self) {
        let Some(index) = self.selected_entry() else {
            return self.warn("Please select an entry to edit.");
        };
        let entry = &self.diary.get_entries()[index];
        if entry.locked {
            return self.warn("Unlock this entry before editing.");
        }
        self.mode = Mode::Form(EntryForm {
            target: Some(index),
            date: entry.date,
            title: TextInput::with_value(&entry.title),
            content: TextArea::with_text(&entry.content),
            focus: FormFocus::Title,
        });
    }

    fn form_key(&mut self, mut form: EntryForm, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Char('s') if ctrl => {
                let result = self.save_form(&form);
                self.report(result);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                form.focus = match form.focus {
                    FormFocus::Title => FormFocus::Content,
                    FormFocus::Content => FormFocus::Title,
                };
                self.mode = Mode::Form(form);
            }
            KeyCode::Enter if form.focus == FormFocus::Title => {
                form.focus = FormFocus::Content;
                self.mode = Mode::Form(form);
            }
            _ => {
                match form.focus {
                    FormFocus::Title => form.title.handle_key(key),
                    FormFocus::Content => form.content.handle_key(key),
                };
                self.mode = Mode::Form(form);
            }
        }
    }

    fn save_form(&mut self, form: &EntryForm) -> DiaryResult<Message> {
        let title = form.title.value();
        let content = form.content.text();
        match form.target {
            None => {
                let index = self.diary.add_entry(title, content, form.date)?;
                self.refresh_results();
                self.select(index);
                Ok(Message::info("Success", "Entry added successfully."))
            }
            Some(index) => {
                self.diary.update_entry(index, title, content)?;
                self.refresh_results();
                Ok(Message::info("Success", "Changes saved successfully."))
            }
        }
    }

    fn toggle_lock(&mut self) {
        let Some(index) = self.selected_entry() else {
            return self.warn("Select an entry first.");
        };
        let entry = &self.diary.get_entries()[index];
        if entry.locked {
            self.mode = Mode::Unlock {
                index,
                password: TextInput::masked(),
            };
        } else {
            let title = entry.title.clone();
            let result = self
                .diary
                .lock_entry(index)
                .map(|()| Message::info("Locked", format!("'{title}' locked successfully.")));
            self.report(result);
        }
    }

    fn unlock(&mut self, index: usize, password: &str) {
        let username = self.session.username();
        let accounts = &self.accounts;
        let result = self
            .diary
            .unlock_entry(index, password, |given| {
                accounts.verify_password(username, given)
            });
        self.refresh_results();
        let message = match result {
            Ok(()) => {
                let title = &self.diary.get_entries()[index].title;
                Message::info("Unlocked", format!("'{title}' unlocked successfully."))
            }
            Err(DiaryError::InvalidPassword) => Message::error("Incorrect password."),
            Err(e) => Message::error(e.to_string()),
        };
        self.mode = Mode::Message(message);
    }

    fn begin_export(&mut self) {
        let Some(index) = self.selected_entry() else {
            return self.warn("Select an entry to export.");
        };
        let entry = &self.diary.get_entries()[index];
        if entry.locked {
            return self.warn("Unlock entry before exporting.");
        }
        let suggested = default_export_path(&self.data_dir, entry);
        self.mode = Mode::Export {
            index,
            path: TextInput::with_value(&suggested.to_string_lossy()),
        };
    }

    fn export(&self, index: usize, path: &Path) -> DiaryResult<Message> {
        export_pdf(self.diary.entry(index)?, path)?;
        Ok(Message::info(
            "Success",
            format!("Entry exported as PDF to {}", path.display()),
        ))
    }

    pub fn draw(&self, f: &mut Frame, theme: &Theme) {
        f.render_widget(Block::default().style(theme.base()), f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(27), Constraint::Min(30)])
            .split(f.area());
        self.draw_sidebar(f, columns[0], theme);
        self.draw_entries_panel(f, columns[1], theme);

        match &self.mode {
            Mode::Browse | Mode::Search => {}
            Mode::Form(form) => draw_form(f, form, theme),
            Mode::View { index, scroll } => {
                draw_entry_view(f, &self.diary.get_entries()[*index], *scroll, theme)
            }
            Mode::ConfirmDelete(_) => popup(
                f,
                "Confirm",
                Text::from(vec![
                    Line::from("Are you sure you want to delete this entry?"),
                    Line::default(),
                    Line::styled("y: Yes   n: No", theme.hint()),
                ]),
                theme.base().fg(theme.danger),
                50,
                30,
                theme,
            ),
            Mode::Unlock { password, .. } => draw_prompt(
                f,
                "Unlock Entry",
                "Enter your password:",
                password,
                theme,
            ),
            Mode::Export { path, .. } => {
                draw_prompt(f, "Export as PDF", "Save to:", path, theme)
            }
            Mode::Message(message) => message.render(f, theme),
        }
    }

    fn draw_sidebar(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(10),
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new("📅 Calendar")
            .style(theme.title())
            .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        if let Some(display) = to_calendar_date(self.calendar_date) {
            let mut events = CalendarEventStore::default();
            for entry in self.diary.get_entries() {
                if let Some(day) = to_calendar_date(entry.date) {
                    events.add(day, theme.base().add_modifier(Modifier::UNDERLINED));
                }
            }
            events.add(display, theme.highlight());

            let calendar = Monthly::new(display, events)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .style(theme.base()),
                )
                .show_month_header(theme.title())
                .show_weekdays_header(theme.hint())
                .default_style(theme.base());
            f.render_widget(calendar, chunks[1]);
        }

        let keys = [
            ("a", "Add Entry"),
            ("e", "Edit Entry"),
            ("d", "Delete Entry"),
            ("l", "Lock/Unlock"),
            ("x", "Export as PDF"),
            ("/", "Search"),
            ("r", "Refresh"),
            ("←→ [ ] g", "Pick date"),
            ("t", "Toggle Theme"),
            ("o", "Logout"),
            ("q", "Quit"),
        ];
        let lines: Vec<Line> = keys
            .iter()
            .map(|(key, label)| {
                Line::from(vec![
                    Span::styled(format!("{key:>9} "), theme.title()),
                    Span::styled(*label, theme.base()),
                ])
            })
            .collect();
        let help = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).style(theme.base()));
        f.render_widget(help, chunks[2]);
    }

    fn draw_entries_panel(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.search.render(
            f,
            chunks[0],
            "Search by keyword or date (YYYY-MM-DD)",
            matches!(self.mode, Mode::Search),
            theme,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Personal Diary - {}", self.username()))
            .style(theme.base());

        if self.results.is_empty() {
            let text = if self.diary.is_empty() {
                "No entries yet."
            } else {
                "No matching entries."
            };
            let empty = Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(empty, chunks[1]);
        } else {
            let entries = self.diary.get_entries();
            let items: Vec<ListItem> = self
                .results
                .iter()
                .map(|&index| entry_card(&entries[index], theme))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(theme.highlight())
                .highlight_symbol("> ");
            f.render_stateful_widget(
                list,
                chunks[1],
                &mut ListState::default().with_selected(Some(self.cursor)),
            );
        }

        let mut status = format!(
            "{} of {} entries | new entries dated {}",
            self.results.len(),
            self.diary.len(),
            self.calendar_date.format("%Y-%m-%d")
        );
        if !self.query.is_empty() {
            status.push_str(&format!(" | search: \"{}\"", self.query));
        }
        f.render_widget(Paragraph::new(status).style(theme.hint()), chunks[2]);
    }
}

fn entry_card<'a>(entry: &'a DiaryEntry, theme: &Theme) -> ListItem<'a> {
    let lock_icon = if entry.locked { "🔒 " } else { "" };
    let title = if entry.title.is_empty() {
        "(untitled)"
    } else {
        entry.title.as_str()
    };
    let heading = Line::from(vec![
        Span::styled(
            format!("{lock_icon}{title}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", entry.date_string()), theme.hint()),
    ]);
    let body = match entry.visible_content() {
        Some(content) => Line::from(content.lines().next().unwrap_or("").to_string()),
        None => Line::styled(LOCKED_PLACEHOLDER, theme.hint()),
    };
    ListItem::new(vec![heading, body, Line::default()])
}

fn draw_form(f: &mut Frame, form: &EntryForm, theme: &Theme) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);
    let heading = match form.target {
        None => format!("Add New Entry ({})", form.date.format("%Y-%m-%d")),
        Some(_) => "Edit Entry".to_string(),
    };
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(heading)
            .border_style(theme.title())
            .style(theme.base()),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);
    form.title
        .render(f, chunks[0], "Title", form.focus == FormFocus::Title, theme);
    form.content
        .render(f, chunks[1], "Content", form.focus == FormFocus::Content, theme);
    let hint = Paragraph::new("Tab: Switch field  Ctrl+S: Save  Esc: Cancel")
        .style(theme.hint())
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[2]);
}

fn draw_entry_view(f: &mut Frame, entry: &DiaryEntry, scroll: u16, theme: &Theme) {
    let area = centered_rect(70, 80, f.area());
    f.render_widget(Clear, area);
    let view = Paragraph::new(entry.visible_content().unwrap_or(LOCKED_PLACEHOLDER))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", entry.title, entry.date_string()))
                .title_bottom(Line::styled("Up/Down: Scroll  any other key: Back", theme.hint()))
                .border_style(theme.title())
                .style(theme.base()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(view, area);
}

fn draw_prompt(f: &mut Frame, title: &str, label: &str, input: &TextInput, theme: &Theme) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(theme.title())
            .style(theme.base()),
        area,
    );
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    input.render(f, chunks[0], label, true, theme);
    let hint = Paragraph::new("Enter: OK  Esc: Cancel")
        .style(theme.hint())
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[1]);
}

fn to_calendar_date(date: NaiveDate) -> Option<time::Date> {
    let month = time::Month::try_from(u8::try_from(date.month()).ok()?).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    time::Date::from_calendar_date(date.year(), month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PasswordHasher;
    use crate::ui::widgets::MessageKind;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::{tempdir, TempDir};

    const PASSWORD: &str = "open sesame";

    fn dashboard() -> (TempDir, Dashboard) {
        let dir = tempdir().unwrap();
        let mut accounts =
            Accounts::load(dir.path(), PasswordHasher::with_iterations(1_000)).unwrap();
        accounts.signup("alice", PASSWORD).unwrap();
        let session = accounts.login("alice", PASSWORD).unwrap();
        let diary = DiaryState::load_for(dir.path(), session.username()).unwrap();
        let dashboard = Dashboard::new(session, accounts, diary, dir.path());
        (dir, dashboard)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn seed(dash: &mut Dashboard, entries: &[(&str, &str)]) {
        for (i, (title, content)) in entries.iter().enumerate() {
            dash.diary.add_entry(title, content, day(i as u32 + 1)).unwrap();
        }
        dash.refresh_results();
    }

    fn press(dash: &mut Dashboard, code: KeyCode) -> Transition {
        dash.handle_key(KeyEvent::from(code))
    }

    fn type_str(dash: &mut Dashboard, s: &str) {
        for c in s.chars() {
            press(dash, KeyCode::Char(c));
        }
    }

    fn ctrl(dash: &mut Dashboard, c: char) -> Transition {
        dash.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn message_text(dash: &Dashboard) -> &str {
        dash.message().map(|m| m.text.as_str()).unwrap_or("")
    }

    fn screen_text(dash: &Dashboard) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|f| dash.draw(f, &Theme::LIGHT)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn add_entry_through_the_form() {
        let (dir, mut dash) = dashboard();
        press(&mut dash, KeyCode::Right);
        let date = dash.calendar_date();

        press(&mut dash, KeyCode::Char('a'));
        type_str(&mut dash, "Garden");
        press(&mut dash, KeyCode::Enter);
        type_str(&mut dash, "Planted tomatoes.");
        ctrl(&mut dash, 's');

        assert_eq!(message_text(&dash), "Entry added successfully.");
        let reloaded = DiaryState::load_for(dir.path(), "alice").unwrap();
        assert_eq!(reloaded.len(), 1);
        let entry = &reloaded.get_entries()[0];
        assert_eq!(entry.title, "Garden");
        assert_eq!(entry.content, "Planted tomatoes.");
        assert_eq!(entry.date, date);
        assert!(!entry.locked);
        assert_eq!(dash.selected_entry(), Some(0));
    }

    #[test]
    fn escape_discards_the_form() {
        let (_dir, mut dash) = dashboard();
        press(&mut dash, KeyCode::Char('a'));
        type_str(&mut dash, "Draft");
        press(&mut dash, KeyCode::Esc);
        assert!(dash.diary().is_empty());
        assert!(dash.message().is_none());
    }

    #[test]
    fn edit_updates_the_selected_entry() {
        let (_dir, mut dash) = dashboard();
        seed(&mut dash, &[("One", "first"), ("Two", "second")]);
        press(&mut dash, KeyCode::Down);

        press(&mut dash, KeyCode::Char('e'));
        press(&mut dash, KeyCode::Char('!'));
        press(&mut dash, KeyCode::Tab);
        type_str(&mut dash, " draft");
        ctrl(&mut dash, 's');

        assert_eq!(message_text(&dash), "Changes saved successfully.");
        let entry = &dash.diary().get_entries()[1];
        assert_eq!(entry.title, "Two!");
        assert_eq!(entry.content, "second draft");
        assert_eq!(dash.diary().get_entries()[0].title, "One");
    }

    #[test]
    fn actions_without_a_selection_warn() {
        let (_dir, mut dash) = dashboard();
        for (key, text) in [
            ('e', "Please select an entry to edit."),
            ('d', "Please select an entry to delete."),
            ('l', "Select an entry first."),
            ('x', "Select an entry to export."),
        ] {
            press(&mut dash, KeyCode::Char(key));
            let message = dash.message().unwrap();
            assert_eq!(message.kind, MessageKind::Warning);
            assert_eq!(message.text, text);
            press(&mut dash, KeyCode::Esc);
        }
    }

    #[test]
    fn locked_entry_blocks_view_edit_and_export_until_unlocked() {
        let (_dir, mut dash) = dashboard();
        seed(&mut dash, &[("Secret", "buried treasure")]);

        press(&mut dash, KeyCode::Char('l'));
        assert_eq!(message_text(&dash), "'Secret' locked successfully.");
        press(&mut dash, KeyCode::Esc);
        assert!(!screen_text(&dash).contains("buried treasure"));
        assert!(screen_text(&dash).contains("Locked Entry"));

        press(&mut dash, KeyCode::Char('e'));
        assert_eq!(message_text(&dash), "Unlock this entry before editing.");
        press(&mut dash, KeyCode::Esc);
        press(&mut dash, KeyCode::Enter);
        assert_eq!(message_text(&dash), "Unlock this entry to view its content.");
        press(&mut dash, KeyCode::Esc);
        press(&mut dash, KeyCode::Char('x'));
        assert_eq!(message_text(&dash), "Unlock entry before exporting.");
        press(&mut dash, KeyCode::Esc);

        press(&mut dash, KeyCode::Char('l'));
        type_str(&mut dash, "guess");
        press(&mut dash, KeyCode::Enter);
        assert_eq!(message_text(&dash), "Incorrect password.");
        assert!(dash.diary().get_entries()[0].locked);
        press(&mut dash, KeyCode::Esc);

        press(&mut dash, KeyCode::Char('l'));
        type_str(&mut dash, PASSWORD);
        press(&mut dash, KeyCode::Enter);
        assert_eq!(message_text(&dash), "'Secret' unlocked successfully.");
        assert!(!dash.diary().get_entries()[0].locked);
        press(&mut dash, KeyCode::Esc);
        assert!(screen_text(&dash).contains("buried treasure"));
    }

    #[test]
    fn search_results_address_the_original_entries() {
        let (_dir, mut dash) = dashboard();
        seed(
            &mut dash,
            &[("Market", "pears"), ("Rain", "stayed in"), ("Picnic", "Pears again")],
        );

        press(&mut dash, KeyCode::Char('/'));
        type_str(&mut dash, "pear");
        press(&mut dash, KeyCode::Enter);
        assert_eq!(dash.results, vec![0, 2]);

        press(&mut dash, KeyCode::Down);
        assert_eq!(dash.selected_entry(), Some(2));
        press(&mut dash, KeyCode::Char('d'));
        press(&mut dash, KeyCode::Char('y'));

        let titles: Vec<&str> = dash
            .diary()
            .get_entries()
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Market", "Rain"]);
        assert_eq!(dash.results, vec![0]);

        press(&mut dash, KeyCode::Char('r'));
        assert_eq!(dash.results, vec![0, 1]);
    }

    #[test]
    fn declining_delete_keeps_the_entry() {
        let (_dir, mut dash) = dashboard();
        seed(&mut dash, &[("Keep", "me")]);
        press(&mut dash, KeyCode::Char('d'));
        press(&mut dash, KeyCode::Char('n'));
        assert_eq!(dash.diary().len(), 1);
    }

    #[test]
    fn search_by_date() {
        let (_dir, mut dash) = dashboard();
        seed(&mut dash, &[("a", ""), ("b", ""), ("c", "")]);
        press(&mut dash, KeyCode::Char('/'));
        type_str(&mut dash, "2024-06-02");
        press(&mut dash, KeyCode::Enter);
        assert_eq!(dash.results, vec![1]);
    }

    #[test]
    fn escape_restores_the_active_query() {
        let (_dir, mut dash) = dashboard();
        seed(&mut dash, &[("Market", "pears"), ("Rain", "stayed in")]);

        press(&mut dash, KeyCode::Char('/'));
        type_str(&mut dash, "pear");
        press(&mut dash, KeyCode::Enter);
        press(&mut dash, KeyCode::Char('/'));
        type_str(&mut dash, "xyz");
        press(&mut dash, KeyCode::Esc);

        assert_eq!(dash.search.value(), "pear");
        assert_eq!(dash.query, "pear");
        assert_eq!(dash.results, vec![0]);
    }

    #[test]
    fn locked_search_hits_keep_their_content_hidden() {
        let (_dir, mut dash) = dashboard();
        seed(&mut dash, &[("Plans", "surprise party"), ("Errands", "post office")]);
        press(&mut dash, KeyCode::Char('l'));
        press(&mut dash, KeyCode::Esc);

        press(&mut dash, KeyCode::Char('/'));
        type_str(&mut dash, "party");
        press(&mut dash, KeyCode::Enter);

        assert_eq!(dash.results, vec![0]);
        let text = screen_text(&dash);
        assert!(text.contains("Plans"));
        assert!(text.contains("Locked Entry"));
        assert!(!text.contains("surprise party"));
    }

    #[test]
    fn export_writes_to_the_chosen_path() {
        let (dir, mut dash) = dashboard();
        seed(&mut dash, &[("Trip", "Mountains.")]);

        press(&mut dash, KeyCode::Char('x'));
        let path = dir.path().join("trip.pdf");
        match &mut dash.mode {
            Mode::Export { path: input, .. } => {
                assert_eq!(input.value(), dir.path().join("2024-06-01-trip.pdf").to_string_lossy());
                input.set(&path.to_string_lossy());
            }
            _ => panic!("expected the export prompt"),
        }
        press(&mut dash, KeyCode::Enter);

        assert!(message_text(&dash).starts_with("Entry exported as PDF to"));
        assert!(path.exists());
    }

    #[test]
    fn calendar_navigation() {
        let (_dir, mut dash) = dashboard();
        let start = dash.calendar_date();
        press(&mut dash, KeyCode::Right);
        press(&mut dash, KeyCode::Right);
        press(&mut dash, KeyCode::Left);
        assert_eq!(dash.calendar_date(), start.succ_opt().unwrap());
        press(&mut dash, KeyCode::Char(']'));
        assert_eq!(
            dash.calendar_date(),
            start.succ_opt().unwrap().checked_add_months(Months::new(1)).unwrap()
        );
        press(&mut dash, KeyCode::Char('g'));
        assert_eq!(dash.calendar_date(), Local::now().date_naive());
    }

    #[test]
    fn screen_transitions() {
        let (_dir, mut dash) = dashboard();
        assert!(matches!(press(&mut dash, KeyCode::Char('t')), Transition::ToggleTheme));
        assert!(matches!(press(&mut dash, KeyCode::Char('o')), Transition::Logout));
        assert!(matches!(press(&mut dash, KeyCode::Char('q')), Transition::Quit));
        assert!(matches!(ctrl(&mut dash, 'c'), Transition::Quit));
    }

    #[test]
    fn empty_diary_renders_placeholder() {
        let (_dir, dash) = dashboard();
        let text = screen_text(&dash);
        assert!(text.contains("No entries yet."));
        assert!(text.contains("Personal Diary - alice"));
    }
}
