//! Application configuration constants
//!
//! Central location for collection names, scheduler timing, defaults
//! and validation boundaries used throughout the application.

// ===== Collection Names =====

/// Named entries in the persistent store, one per feature collection.
/// The names match the storage keys used by earlier dashboard versions
/// so existing data keeps loading.
pub mod collections {
    pub const PROFILE: &str = "user_profile";
    pub const TASKS: &str = "daily_tasks";
    pub const EXPENSES: &str = "expenses";
    pub const SUBJECTS: &str = "subjects";
    pub const ALARMS: &str = "alarms";
    pub const RESOURCES: &str = "resources";
    pub const NOTES: &str = "notes";
    pub const SOCIAL_PROFILES: &str = "social_profiles";

    /// Id sequence names for records nested inside subjects. These do
    /// not name stored entries, only rows in the id sequence table.
    pub const SUBJECT_FOLDERS: &str = "subject_folders";
    pub const SUBJECT_MATERIALS: &str = "subject_materials";
}

// ===== Alarm Scheduler =====

/// Scheduler tick period in seconds. Alarms match at minute resolution;
/// a one-second tick detects the match within a second of the minute
/// boundary.
pub const SCHEDULER_TICK_SECS: u64 = 1;

/// Time-of-day format used by alarms and task time slots.
pub const CLOCK_TIME_FORMAT: &str = "%H:%M";

// ===== Defaults =====

/// Label given to an alarm created without one.
pub const DEFAULT_ALARM_LABEL: &str = "Alarm";

/// Category given to a note created without one.
pub const DEFAULT_NOTE_CATEGORY: &str = "Uncategorized";

/// Background palette for new notes; one entry is picked at random per
/// note and stored with the record.
pub const NOTE_COLOR_PALETTE: &[&str] = &[
    "#fff8dc", // Cornsilk
    "#f0fff0", // Honeydew
    "#f5f5dc", // Beige
    "#e6e6fa", // Lavender
    "#f0f8ff", // AliceBlue
    "#fff0f5", // LavenderBlush
    "#f5fffa", // MintCream
];

// ===== Validation Boundaries =====

/// Maximum length for record titles and labels. Prevents excessively
/// long values from being stored.
pub const MAX_TITLE_LENGTH: usize = 200;
