//! Entity models and input payloads
//!
//! Records persisted to the store, plus the validated input structs a
//! UI layer submits when creating or editing records. Field names
//! serialize in camelCase to stay compatible with payloads written by
//! earlier dashboard versions.
//!
//! Records are replaced whole on edit; there are no partial updates.
//! Every record carries a `u64` id that is unique within its own
//! collection only (ids are allocated per collection by the store).

use crate::config::{DEFAULT_ALARM_LABEL, DEFAULT_NOTE_CATEGORY, MAX_TITLE_LENGTH};
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ===== Enumerations =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Utilities,
    Entertainment,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Other => "other",
        }
    }
}

/// Sound presets available to alarms; the audio collaborator resolves
/// the preset to an actual asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmSound {
    Whoosh,
    Chime,
    Bell,
    Gentle,
    Alert,
}

impl AlarmSound {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmSound::Whoosh => "whoosh",
            AlarmSound::Chime => "chime",
            AlarmSound::Bell => "bell",
            AlarmSound::Gentle => "gentle",
            AlarmSound::Alert => "alert",
        }
    }
}

impl Default for AlarmSound {
    fn default() -> Self {
        AlarmSound::Chime
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Article,
    Document,
    Other,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Article => "article",
            ResourceType::Document => "document",
            ResourceType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
    Facebook,
    Linkedin,
    Youtube,
    Tiktok,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Pdf,
    Image,
    Document,
}

// ===== Records =====

/// A task scheduled on a calendar date at a time slot. Multiple tasks
/// may share a date and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    /// Time slot in `HH:MM`.
    pub time: String,
    pub priority: Priority,
    pub description: String,
    pub completed: bool,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

/// An alarm record. `active` is flipped by the user or by the scheduler
/// when a non-repeating alarm fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: u64,
    /// Time of day in `HH:MM`; the scheduler matches at minute resolution.
    pub time: String,
    pub label: String,
    pub sound: AlarmSound,
    pub repeat: bool,
    pub active: bool,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
    pub description: String,
    /// Free-form tags; duplicates are not rejected.
    pub tags: Vec<String>,
    pub date_added: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    /// Background color from the fixed palette, picked at creation.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    pub id: u64,
    pub platform: Platform,
    pub username: String,
    pub url: String,
    pub followers: u64,
    pub bio: String,
    pub is_active: bool,
    pub date_added: DateTime<Utc>,
    /// Bumped on every mutation of the record.
    pub last_updated: DateTime<Utc>,
}

/// A study material. Owned by exactly one container at a time: either
/// its subject's root list or one folder within that subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    /// Size of the original file in bytes.
    pub size: u64,
    /// Payload encoded for storage (data URL or base64).
    pub data: String,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: u64,
    pub name: String,
    pub materials: Vec<Material>,
    pub date_created: DateTime<Utc>,
}

/// Root container for study content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub folders: Vec<Folder>,
}

/// The single user profile entry; stored as one named object rather
/// than a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub bio: String,
    /// Avatar image as a data URL.
    pub avatar: String,
    pub last_updated: DateTime<Utc>,
}

// ===== Input payloads =====
//
// Every create/edit operation goes through one of these validated
// structs; values never flow from UI controls straight into the store.

/// Parse a `HH:MM` time-of-day string, rejecting anything else.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, crate::config::CLOCK_TIME_FORMAT)
        .map_err(|_| AppError::Validation(format!("invalid time '{}', expected HH:MM", value)))
}

pub(crate) fn required(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.len() > MAX_TITLE_LENGTH {
        return Err(AppError::Validation(format!(
            "{} exceeds {} characters",
            field, MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub time: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl NewTask {
    pub fn validate(&self) -> Result<()> {
        required(&self.title, "task title")?;
        parse_clock_time(&self.time)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        required(&self.description, "expense description")?;
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(AppError::Validation(
                "expense amount must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAlarm {
    pub time: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sound: AlarmSound,
    #[serde(default)]
    pub repeat: bool,
}

impl NewAlarm {
    pub fn validate(&self) -> Result<()> {
        parse_clock_time(&self.time)?;
        Ok(())
    }

    /// Label to store, falling back to the default for empty input.
    pub fn label_or_default(&self) -> String {
        let label = self.label.trim();
        if label.is_empty() {
            DEFAULT_ALARM_LABEL.to_string()
        } else {
            label.to_string()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewResource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewResource {
    pub fn validate(&self) -> Result<()> {
        required(&self.title, "resource title")?;
        required(&self.url, "resource url")?;
        Ok(())
    }

    /// Tags trimmed with empties dropped; duplicates are kept as given.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub content: String,
}

impl NewNote {
    pub fn validate(&self) -> Result<()> {
        required(&self.title, "note title")?;
        if self.content.trim().is_empty() {
            return Err(AppError::Validation("note content is required".to_string()));
        }
        Ok(())
    }

    pub fn category_or_default(&self) -> String {
        let category = self.category.trim();
        if category.is_empty() {
            DEFAULT_NOTE_CATEGORY.to_string()
        } else {
            category.to_string()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSocialProfile {
    pub platform: Platform,
    pub username: String,
    pub url: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub bio: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewSocialProfile {
    pub fn validate(&self) -> Result<()> {
        required(&self.username, "profile username")?;
        required(&self.url, "profile url")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub size: u64,
    pub data: String,
}

impl NewMaterial {
    pub fn validate(&self) -> Result<()> {
        required(&self.name, "material name")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        required(&self.name, "profile name")?;
        required(&self.email, "profile email")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: 1,
            title: "Stand-up".to_string(),
            time: "09:30".to_string(),
            priority: Priority::High,
            description: String::new(),
            completed: false,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""priority":"high""#));
        assert!(json.contains(r#""date":"2024-03-15""#));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_resource_type_field_name() {
        let resource = Resource {
            id: 7,
            title: "Rust book".to_string(),
            kind: ResourceType::Article,
            url: "https://doc.rust-lang.org/book".to_string(),
            description: String::new(),
            tags: vec!["rust".to_string()],
            date_added: Utc::now(),
            last_accessed: None,
        };

        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains(r#""type":"article""#));
        assert!(json.contains(r#""dateAdded""#));
        assert!(json.contains(r#""lastAccessed":null"#));
    }

    #[test]
    fn test_parse_clock_time() {
        assert!(parse_clock_time("07:00").is_ok());
        assert!(parse_clock_time("23:59").is_ok());
        assert!(parse_clock_time("24:00").is_err());
        assert!(parse_clock_time("7am").is_err());
        assert!(parse_clock_time("").is_err());
    }

    #[test]
    fn test_new_task_requires_title_and_time() {
        let valid = NewTask {
            title: "Review PR".to_string(),
            time: "14:00".to_string(),
            priority: Priority::Medium,
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        assert!(valid.validate().is_ok());

        let no_title = NewTask {
            title: "  ".to_string(),
            ..valid.clone()
        };
        assert!(no_title.validate().unwrap_err().is_validation());

        let bad_time = NewTask {
            time: "noon".to_string(),
            ..valid
        };
        assert!(bad_time.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_new_expense_rejects_non_positive_amounts() {
        let base = NewExpense {
            description: "Groceries".to_string(),
            amount: 42.50,
            category: ExpenseCategory::Food,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(base.validate().is_ok());

        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let invalid = NewExpense { amount, ..base.clone() };
            assert!(invalid.validate().is_err(), "amount {} should fail", amount);
        }
    }

    #[test]
    fn test_alarm_label_default() {
        let alarm = NewAlarm {
            time: "07:00".to_string(),
            label: "   ".to_string(),
            sound: AlarmSound::Bell,
            repeat: false,
        };
        assert_eq!(alarm.label_or_default(), "Alarm");

        let named = NewAlarm {
            label: " Wake up ".to_string(),
            ..alarm
        };
        assert_eq!(named.label_or_default(), "Wake up");
    }

    #[test]
    fn test_note_category_default() {
        let note = NewNote {
            title: "Ideas".to_string(),
            category: String::new(),
            content: "plenty".to_string(),
        };
        assert_eq!(note.category_or_default(), "Uncategorized");
    }

    #[test]
    fn test_resource_tags_normalized() {
        let resource = NewResource {
            title: "Video".to_string(),
            kind: ResourceType::Video,
            url: "https://example.com".to_string(),
            description: String::new(),
            tags: vec![" rust ".to_string(), "".to_string(), "async".to_string()],
        };
        assert_eq!(resource.normalized_tags(), vec!["rust", "async"]);
    }
}
