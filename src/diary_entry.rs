use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Short month/day/year forms written by older versions of the app. They
/// are accepted on load and saved back as [`DATE_FORMAT`].
const LEGACY_DATE_FORMATS: [&str; 2] = ["%m/%d/%y", "%m/%d/%Y"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub locked: bool,
}

impl DiaryEntry {
    pub fn new(title: String, content: String, date: NaiveDate) -> Self {
        DiaryEntry {
            title,
            content,
            date,
            locked: false,
        }
    }

    /// The content, unless the entry is locked.
    pub fn visible_content(&self) -> Option<&str> {
        (!self.locked).then_some(self.content.as_str())
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Case-insensitive substring match against title, content, and date.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.date_string().contains(needle)
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    std::iter::once(DATE_FORMAT)
        .chain(LEGACY_DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date {raw:?}")))
}
