use crate::crypto::PasswordHasher;
use crate::error::{DiaryError, DiaryResult};
use crate::storage::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
}

/// Proof of a successful login. Only [`Accounts::login`] hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// The `users.json` registry: username to password hash.
pub struct Accounts {
    path: PathBuf,
    users: BTreeMap<String, UserRecord>,
    hasher: PasswordHasher,
}

impl Accounts {
    pub fn load(data_dir: &Path, hasher: PasswordHasher) -> DiaryResult<Self> {
        let path = data_dir.join(USERS_FILE);
        let users = load_json_or_default(&path)?;
        Ok(Accounts {
            path,
            users,
            hasher,
        })
    }

    #[cfg(test)]
    fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username.trim())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.users.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn signup(&mut self, username: &str, password: &str) -> DiaryResult<()> {
        let username = validate_username(username)?;
        if self.users.contains_key(&username) {
            warn!(%username, "signup rejected: username taken");
            return Err(DiaryError::UsernameTaken);
        }
        if password.is_empty() {
            return Err(DiaryError::EmptyPassword);
        }

        let record = UserRecord {
            password: self.hasher.hash(password),
        };
        self.users.insert(username.clone(), record);
        if let Err(e) = save_json(&self.path, &self.users) {
            self.users.remove(&username);
            return Err(e);
        }
        info!(%username, "account created");
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> DiaryResult<Session> {
        let username = username.trim();
        let Some(record) = self.users.get(username) else {
            warn!(%username, "login failed: unknown user");
            return Err(DiaryError::UserNotFound);
        };
        if !self.hasher.verify(&record.password, password) {
            warn!(%username, "login failed: wrong password");
            return Err(DiaryError::InvalidPassword);
        }
        info!(%username, "logged in");
        Ok(Session {
            username: username.to_string(),
        })
    }

    /// Checks `password` against the registry as it is on disk now, which
    /// is what gates unlocking an entry.
    pub fn verify_password(&self, username: &str, password: &str) -> DiaryResult<bool> {
        let users: BTreeMap<String, UserRecord> = load_json_or_default(&self.path)?;
        let record = users.get(username).ok_or(DiaryError::UserNotFound)?;
        Ok(self.hasher.verify(&record.password, password))
    }
}

/// Usernames name the per-user data file, so they are limited to
/// characters that are safe in a file name.
pub fn validate_username(raw: &str) -> DiaryResult<String> {
    let name = raw.trim();
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(name.to_string())
    } else {
        Err(DiaryError::InvalidUsername(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn accounts(dir: &Path) -> Accounts {
        Accounts::load(dir, PasswordHasher::with_iterations(1_000)).unwrap()
    }

    #[test]
    fn signup_then_login() {
        let dir = tempdir().unwrap();
        let mut accounts = accounts(dir.path());
        accounts.signup("alice", "s3cret").unwrap();

        let session = accounts.login("alice", "s3cret").unwrap();
        assert_eq!(session.username(), "alice");
        assert!(matches!(
            accounts.login("alice", "wrong"),
            Err(DiaryError::InvalidPassword)
        ));
        assert!(matches!(
            accounts.login("bob", "s3cret"),
            Err(DiaryError::UserNotFound)
        ));
    }

    #[test]
    fn duplicate_signup_is_rejected() {
        let dir = tempdir().unwrap();
        let mut accounts = accounts(dir.path());
        accounts.signup("alice", "one").unwrap();
        assert!(matches!(
            accounts.signup("alice", "two"),
            Err(DiaryError::UsernameTaken)
        ));
        assert!(accounts.login("alice", "one").is_ok());
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn registry_survives_reload() {
        let dir = tempdir().unwrap();
        accounts(dir.path()).signup("alice", "pw").unwrap();

        let reloaded = accounts(dir.path());
        assert!(reloaded.contains("alice"));
        assert!(reloaded.login("alice", "pw").is_ok());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(USERS_FILE)).unwrap())
                .unwrap();
        let stored = raw["alice"]["password"].as_str().unwrap();
        assert!(stored.contains('$'));
        assert!(PasswordHasher::with_iterations(1_000).verify(stored, "pw"));
    }

    #[test]
    fn rejects_bad_usernames_and_empty_passwords() {
        let dir = tempdir().unwrap();
        let mut accounts = accounts(dir.path());
        for name in ["", "   ", "../etc", ".hidden", "a/b", "with space"] {
            assert!(
                matches!(accounts.signup(name, "pw"), Err(DiaryError::InvalidUsername(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(matches!(
            accounts.signup("carol", ""),
            Err(DiaryError::EmptyPassword)
        ));
        assert!(accounts.is_empty());
    }

    #[test]
    fn usernames_are_trimmed() {
        let dir = tempdir().unwrap();
        let mut accounts = accounts(dir.path());
        accounts.signup("  dave ", "pw").unwrap();
        assert!(accounts.contains("dave"));
        assert_eq!(accounts.login(" dave", "pw").unwrap().username(), "dave");
    }

    #[test]
    fn verify_password_reads_current_registry() {
        let dir = tempdir().unwrap();
        let mut accounts = accounts(dir.path());
        accounts.signup("erin", "pw").unwrap();
        assert!(accounts.verify_password("erin", "pw").unwrap());
        assert!(!accounts.verify_password("erin", "nope").unwrap());

        fs::remove_file(dir.path().join(USERS_FILE)).unwrap();
        assert!(matches!(
            accounts.verify_password("erin", "pw"),
            Err(DiaryError::UserNotFound)
        ));
    }
}
