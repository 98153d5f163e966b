//! A password-protected personal diary with a terminal interface.
//!
//! Accounts live in `users.json` as PBKDF2 hashes; each user's entries live
//! in `data_<username>.json`, rewritten after every change. Entries can be
//! locked, which hides their content until the account password is entered
//! again.

pub mod accounts;
pub mod config;
pub mod crypto;
pub mod diary_entry;
pub mod diary_state;
pub mod error;
pub mod export;
pub mod logging;
pub mod storage;
pub mod ui;
