//! Core domain types for the fitcoach system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Catalog entries and read-only catalogs
//! - Externally generated plans (workout, yoga, meditation) and their items
//! - User profile fields that feed the derived metrics

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Catalog Types
// ============================================================================

/// Which content library a catalog holds
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Exercise,
    Yoga,
    Meditation,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [
        CatalogKind::Exercise,
        CatalogKind::Yoga,
        CatalogKind::Meditation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Exercise => "exercise",
            CatalogKind::Yoga => "yoga",
            CatalogKind::Meditation => "meditation",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One known exercise, yoga pose or meditation track
///
/// Only `name` takes part in matching; everything else is descriptive
/// metadata handed back to the caller with the match.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    /// Canonical, human-readable name (may carry an alias in parentheses)
    pub name: String,
    /// Primary media asset (gif/image for movements, audio for meditations)
    #[serde(default)]
    pub media: Option<String>,
    /// Secondary cover image, used by meditation tracks
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub focus_area: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogEntry {
    /// Minimal entry with just a name and a media reference
    pub fn new(name: impl Into<String>, media: Option<&str>) -> Self {
        Self {
            name: name.into(),
            media: media.map(str::to_string),
            image: None,
            category: None,
            focus_area: None,
            duration: None,
            goal: None,
            level: None,
            description: None,
        }
    }
}

/// An immutable, ordered list of catalog entries
///
/// Order is significant: on equal scores the matcher keeps the entry
/// seen first.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub kind: CatalogKind,
    pub entries: Vec<CatalogEntry>,
}

// ============================================================================
// Generated Plan Types
// ============================================================================

/// One item inside a generated plan (an exercise, a pose, a session)
///
/// Every field except `media` is kept verbatim in `extra`, `name` included,
/// so a missing, null or non-string name passes through enrichment as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanItem {
    #[serde(default, deserialize_with = "string_or_none")]
    pub media: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlanItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            media: None,
            extra: Map::new(),
        }
        .with_field("name", name.into())
    }

    /// The item's name, when the generator produced a string
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    /// Builder-style helper for attaching a pass-through field
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

// Media is always overwritten, so a malformed value is simply dropped
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A nested list inside a generated plan
///
/// Only a JSON array whose elements all decode as `T` is walked. An absent
/// key stays absent and any other value is written back untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanList<T> {
    Absent,
    Parsed(Vec<T>),
    Verbatim(Value),
}

impl<T> Default for PlanList<T> {
    fn default() -> Self {
        PlanList::Absent
    }
}

impl<T> From<Vec<T>> for PlanList<T> {
    fn from(items: Vec<T>) -> Self {
        PlanList::Parsed(items)
    }
}

impl<T> PlanList<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PlanList::Absent)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            PlanList::Parsed(items) => items.iter(),
            _ => Default::default(),
        }
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        match self {
            PlanList::Parsed(items) => items.iter_mut(),
            _ => Default::default(),
        }
    }
}

impl<T: Serialize> Serialize for PlanList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PlanList::Absent => serializer.serialize_none(),
            PlanList::Parsed(items) => items.serialize(serializer),
            PlanList::Verbatim(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for PlanList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_array() {
            if let Ok(items) = serde_json::from_value(value.clone()) {
                return Ok(PlanList::Parsed(items));
            }
        }
        Ok(PlanList::Verbatim(value))
    }
}

/// A single day of a generated workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDay {
    #[serde(default, skip_serializing_if = "PlanList::is_absent")]
    pub exercises: PlanList<PlanItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generated multi-day workout plan (plan → days → exercises)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    #[serde(default, skip_serializing_if = "PlanList::is_absent")]
    pub days: PlanList<WorkoutDay>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generated yoga session (plan → poses)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct YogaPlan {
    #[serde(default, skip_serializing_if = "PlanList::is_absent")]
    pub poses: PlanList<PlanItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generated meditation plan (plan → sessions)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MeditationPlan {
    #[serde(default, skip_serializing_if = "PlanList::is_absent")]
    pub sessions: PlanList<PlanItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any plan the external generator can produce
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratedPlan {
    Workout(WorkoutPlan),
    Yoga(YogaPlan),
    Meditation(MeditationPlan),
}

impl GeneratedPlan {
    /// The catalog this plan's items are matched against
    pub fn kind(&self) -> CatalogKind {
        match self {
            GeneratedPlan::Workout(_) => CatalogKind::Exercise,
            GeneratedPlan::Yoga(_) => CatalogKind::Yoga,
            GeneratedPlan::Meditation(_) => CatalogKind::Meditation,
        }
    }

    /// Decode an already-parsed JSON value into the plan shape for `kind`
    pub fn from_value(kind: CatalogKind, value: Value) -> serde_json::Result<Self> {
        Ok(match kind {
            CatalogKind::Exercise => GeneratedPlan::Workout(serde_json::from_value(value)?),
            CatalogKind::Yoga => GeneratedPlan::Yoga(serde_json::from_value(value)?),
            CatalogKind::Meditation => GeneratedPlan::Meditation(serde_json::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            GeneratedPlan::Workout(plan) => serde_json::to_value(plan),
            GeneratedPlan::Yoga(plan) => serde_json::to_value(plan),
            GeneratedPlan::Meditation(plan) => serde_json::to_value(plan),
        }
    }

    /// Visit every item in plan order
    pub fn items(&self) -> Box<dyn Iterator<Item = &PlanItem> + '_> {
        match self {
            GeneratedPlan::Workout(plan) => {
                Box::new(plan.days.iter().flat_map(|d| d.exercises.iter()))
            }
            GeneratedPlan::Yoga(plan) => Box::new(plan.poses.iter()),
            GeneratedPlan::Meditation(plan) => Box::new(plan.sessions.iter()),
        }
    }

    pub(crate) fn items_mut(&mut self) -> Box<dyn Iterator<Item = &mut PlanItem> + '_> {
        match self {
            GeneratedPlan::Workout(plan) => {
                Box::new(plan.days.iter_mut().flat_map(|d| d.exercises.iter_mut()))
            }
            GeneratedPlan::Yoga(plan) => Box::new(plan.poses.iter_mut()),
            GeneratedPlan::Meditation(plan) => Box::new(plan.sessions.iter_mut()),
        }
    }
}

// ============================================================================
// Profile Types
// ============================================================================

/// Gender as recorded during onboarding
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

/// Training goal selected during onboarding
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    StayFit,
    BuildEndurance,
    Other(String),
}

/// Self-reported experience level
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    Beginner,
    Intermediate,
    Advanced,
    Other(String),
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        Gender::from(s.as_str())
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => "Male".into(),
            Gender::Female => "Female".into(),
            Gender::Other(s) => s,
        }
    }
}

impl From<&str> for Goal {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lose weight" => Goal::LoseWeight,
            "gain muscle" => Goal::GainMuscle,
            "stay fit" => Goal::StayFit,
            "build endurance" => Goal::BuildEndurance,
            _ => Goal::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for Goal {
    fn from(s: String) -> Self {
        Goal::from(s.as_str())
    }
}

impl From<Goal> for String {
    fn from(g: Goal) -> Self {
        match g {
            Goal::LoseWeight => "Lose Weight".into(),
            Goal::GainMuscle => "Gain Muscle".into(),
            Goal::StayFit => "Stay Fit".into(),
            Goal::BuildEndurance => "Build Endurance".into(),
            Goal::Other(s) => s,
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beginner" => ActivityLevel::Beginner,
            "intermediate" => ActivityLevel::Intermediate,
            "advanced" => ActivityLevel::Advanced,
            _ => ActivityLevel::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(s: String) -> Self {
        ActivityLevel::from(s.as_str())
    }
}

impl From<ActivityLevel> for String {
    fn from(l: ActivityLevel) -> Self {
        match l {
            ActivityLevel::Beginner => "Beginner".into(),
            ActivityLevel::Intermediate => "Intermediate".into(),
            ActivityLevel::Advanced => "Advanced".into(),
            ActivityLevel::Other(s) => s,
        }
    }
}

/// BMI band, using the 18.5 / 24.9 / 29.9 cut-offs
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    Unknown,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
            BmiCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Onboarding profile fields plus the values derived from them
///
/// Every input is optional because profiles fill in gradually.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, rename = "height")]
    pub height_cm: Option<f64>,
    #[serde(default, rename = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,

    // Derived
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub bmi_category: Option<BmiCategory>,
    #[serde(default)]
    pub target_calories: Option<i64>,
}
