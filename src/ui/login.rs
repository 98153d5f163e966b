use super::theme::Theme;
use super::widgets::{centered_rect, Message, TextInput};
use super::Transition;
use crate::accounts::Accounts;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Username,
    Password,
}

/// Login form, switchable to the account creation form.
pub struct LoginScreen {
    accounts: Accounts,
    mode: Mode,
    username: TextInput,
    password: TextInput,
    focus: Focus,
    message: Option<Message>,
}

impl LoginScreen {
    pub fn new(accounts: Accounts, prefill: Option<&str>) -> Self {
        let (username, focus) = match prefill {
            Some(name) => (TextInput::with_value(name), Focus::Password),
            None => (TextInput::new(), Focus::Username),
        };
        LoginScreen {
            accounts,
            mode: Mode::Login,
            username,
            password: TextInput::masked(),
            focus,
            message: None,
        }
    }

    pub fn into_accounts(self) -> Accounts {
        self.accounts
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn show_error(&mut self, text: impl Into<String>) {
        self.message = Some(Message::error(text));
    }

    #[cfg(test)]
    fn is_signup(&self) -> bool {
        self.mode == Mode::Signup
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Transition {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Transition::Quit;
        }
        if self.message.take().is_some() {
            return Transition::Stay;
        }

        match key.code {
            KeyCode::Char('n') if ctrl => self.switch_mode(),
            KeyCode::Esc => match self.mode {
                Mode::Login => return Transition::Quit,
                Mode::Signup => self.switch_mode(),
            },
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Focus::Username => Focus::Password,
                    Focus::Password => Focus::Username,
                };
            }
            KeyCode::Enter => match self.focus {
                Focus::Username => self.focus = Focus::Password,
                Focus::Password => return self.submit(),
            },
            _ => {
                match self.focus {
                    Focus::Username => self.username.handle_key(key),
                    Focus::Password => self.password.handle_key(key),
                };
            }
        }
        Transition::Stay
    }

    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Login => Mode::Signup,
            Mode::Signup => Mode::Login,
        };
        self.username.clear();
        self.password.clear();
        self.focus = Focus::Username;
    }

    fn submit(&mut self) -> Transition {
        match self.mode {
            Mode::Login => match self.accounts.login(self.username.value(), self.password.value()) {
                Ok(session) => {
                    self.password.clear();
                    Transition::LoggedIn(session)
                }
                Err(e) => {
                    self.password.clear();
                    self.message = Some(Message::error(e.to_string()));
                    Transition::Stay
                }
            },
            Mode::Signup => {
                match self.accounts.signup(self.username.value(), self.password.value()) {
                    Ok(()) => {
                        let username = self.username.value().trim().to_string();
                        self.mode = Mode::Login;
                        self.username.set(&username);
                        self.password.clear();
                        self.focus = Focus::Password;
                        self.message =
                            Some(Message::info("Success", "Account created! Please log in."));
                    }
                    Err(e) => self.message = Some(Message::error(e.to_string())),
                }
                Transition::Stay
            }
        }
    }

    pub fn draw(&self, f: &mut Frame, theme: &Theme) {
        f.render_widget(Block::default().style(theme.base()), f.area());

        let area = centered_rect(50, 60, f.area());
        f.render_widget(Clear, area);
        let (heading, hint) = match self.mode {
            Mode::Login => ("Login", "Enter: Login  Ctrl+N: Create Account  Esc: Quit"),
            Mode::Signup => ("Create Account", "Enter: Sign Up  Esc: Back to Login"),
        };
        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title("Personal Diary")
                .style(theme.base()),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        let title = Paragraph::new(heading)
            .style(theme.title())
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        self.username
            .render(f, chunks[1], "Username", self.focus == Focus::Username, theme);
        self.password
            .render(f, chunks[2], "Password", self.focus == Focus::Password, theme);

        let hint = Paragraph::new(hint)
            .style(theme.hint())
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[3]);

        if let Some(message) = &self.message {
            message.render(f, theme);
        }
    }
}
