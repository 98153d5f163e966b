pub mod dashboard;
pub mod login;
pub mod theme;
pub mod widgets;

use crate::accounts::{Accounts, Session};
use crate::config::Config;
use crate::diary_state::DiaryState;
use color_eyre::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use dashboard::Dashboard;
use login::LoginScreen;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use theme::Theme;
use tracing::{error, info};

/// What a screen asks the application loop to do after a key press.
#[derive(Debug)]
pub enum Transition {
    Stay,
    LoggedIn(Session),
    Logout,
    ToggleTheme,
    Quit,
}

enum Screen {
    Login(LoginScreen),
    Dashboard(Box<Dashboard>),
}

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    dark: bool,
}

impl UI {
    pub fn new(dark: bool) -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI { terminal, dark })
    }

    /// Runs login and dashboard screens until the user quits.
    pub fn run(&mut self, config: &Config, accounts: Accounts) -> Result<()> {
        let mut screen = Screen::Login(LoginScreen::new(accounts, config.user.as_deref()));

        loop {
            let theme = Theme::for_mode(self.dark);
            self.terminal.draw(|f| match &screen {
                Screen::Login(login) => login.draw(f, &theme),
                Screen::Dashboard(dashboard) => dashboard.draw(f, &theme),
            })?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let transition = match &mut screen {
                Screen::Login(login) => login.handle_key(key),
                Screen::Dashboard(dashboard) => dashboard.handle_key(key),
            };

            screen = match (transition, screen) {
                (Transition::Quit, _) => return Ok(()),
                (Transition::ToggleTheme, screen) => {
                    self.dark = !self.dark;
                    screen
                }
                (Transition::LoggedIn(session), Screen::Login(mut login)) => {
                    match DiaryState::load_for(&config.data_dir, session.username()) {
                        Ok(diary) => Screen::Dashboard(Box::new(Dashboard::new(
                            session,
                            login.into_accounts(),
                            diary,
                            &config.data_dir,
                        ))),
                        Err(e) => {
                            error!(username = session.username(), "failed to open diary: {e}");
                            login.show_error(e.to_string());
                            Screen::Login(login)
                        }
                    }
                }
                (Transition::Logout, Screen::Dashboard(dashboard)) => {
                    info!(username = dashboard.username(), "logged out");
                    let username = dashboard.username().to_string();
                    Screen::Login(LoginScreen::new(dashboard.into_accounts(), Some(&username)))
                }
                (_, screen) => screen,
            };
        }
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
