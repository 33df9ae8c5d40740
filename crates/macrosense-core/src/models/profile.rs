// ABOUTME: Biometric profile, activity pattern, and nutrition goal models
// ABOUTME: Sedentary exclusivity and frequency ranges are enforced at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::energy::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use crate::constants::limits::{
    MAX_ACTIVITY_DAYS_PER_WEEK, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tag that marks a profile as sedentary; never valid alongside other activities
pub const SEDENTARY_TAG: &str = "sedentary";

/// Biological sex used by the BMR equations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male coefficients
    Male,
    /// Female coefficients
    Female,
    /// Uses the female coefficients
    Other,
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(AppError::invalid_input(format!("Unknown sex '{other}'"))),
        }
    }
}

/// A non-sedentary activity label (e.g. `running`, `gym`)
///
/// Tags are trimmed and lowercased. The sedentary tag cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityTag(String);

impl ActivityTag {
    /// Create a validated activity tag
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank tag or the sedentary tag
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let tag = raw.as_ref().trim().to_lowercase();
        if tag.is_empty() {
            return Err(AppError::invalid_input("Activity tag must not be empty"));
        }
        if tag == SEDENTARY_TAG {
            return Err(AppError::invalid_input(
                "'sedentary' cannot be combined with other activities",
            ));
        }
        Ok(Self(tag))
    }

    /// Tag text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActivityTag {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActivityTag> for String {
    fn from(tag: ActivityTag) -> Self {
        tag.0
    }
}

impl fmt::Display for ActivityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weekly activity pattern of a profile
///
/// Either exactly sedentary, or a set of activities each with a weekly frequency
/// in `1..=7`. Mixing sedentary with anything else is rejected by every constructor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ActivityPatternRepr", into = "ActivityPatternRepr")]
pub enum ActivityPattern {
    /// Only the sedentary tag
    #[default]
    Sedentary,
    /// Non-sedentary activities with days per week
    Active(BTreeMap<ActivityTag, u8>),
}

impl ActivityPattern {
    /// Build an active pattern from `(tag, days_per_week)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if a tag is invalid (including `sedentary`) or a
    /// frequency is outside `1..=7`
    pub fn active<I, S>(activities: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (raw_tag, days) in activities {
            let tag = ActivityTag::new(raw_tag)?;
            validate_frequency(&tag, days)?;
            map.insert(tag, days);
        }
        Ok(Self::Active(map))
    }

    /// Build a pattern from a tag set plus an out-of-band frequency map
    ///
    /// An empty tag set yields an active pattern with no activities.
    ///
    /// # Errors
    ///
    /// Returns an error when `sedentary` is mixed with other tags, a tag has no
    /// frequency, or a frequency is outside `1..=7`
    pub fn from_tags<S: AsRef<str>>(tags: &[S], frequencies: &HashMap<String, u8>) -> AppResult<Self> {
        let normalized: Vec<String> = tags
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        if normalized.iter().any(|t| t == SEDENTARY_TAG) {
            if normalized.iter().all(|t| t == SEDENTARY_TAG) {
                return Ok(Self::Sedentary);
            }
            return Err(AppError::invalid_input(
                "'sedentary' cannot be combined with other activities",
            )
            .with_details(serde_json::json!({ "activities": normalized })));
        }

        let lowered: HashMap<String, u8> = frequencies
            .iter()
            .map(|(k, v)| (k.trim().to_lowercase(), *v))
            .collect();

        let mut pairs = Vec::with_capacity(normalized.len());
        for tag in normalized {
            let days = lowered.get(&tag).copied().ok_or_else(|| {
                AppError::new(
                    ErrorCode::MissingRequiredField,
                    format!("Missing weekly frequency for activity '{tag}'"),
                )
            })?;
            pairs.push((tag, days));
        }
        Self::active(pairs)
    }

    /// Parse the comma-separated tag list used by older clients
    ///
    /// # Errors
    ///
    /// Same as [`ActivityPattern::from_tags`]
    pub fn parse_legacy(tags_csv: &str, frequencies: &HashMap<String, u8>) -> AppResult<Self> {
        let tags: Vec<&str> = tags_csv.split(',').collect();
        Self::from_tags(tags.as_slice(), frequencies)
    }

    /// Whether the pattern is exactly sedentary
    #[must_use]
    pub const fn is_sedentary(&self) -> bool {
        matches!(self, Self::Sedentary)
    }

    /// Sum of weekly frequencies over all non-sedentary activities (not capped)
    #[must_use]
    pub fn weekly_activity_days(&self) -> u32 {
        match self {
            Self::Sedentary => 0,
            Self::Active(map) => map.values().map(|d| u32::from(*d)).sum(),
        }
    }

    /// Activity tags in the pattern (`["sedentary"]` for a sedentary pattern)
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        match self {
            Self::Sedentary => vec![SEDENTARY_TAG.to_owned()],
            Self::Active(map) => map.keys().map(|t| t.as_str().to_owned()).collect(),
        }
    }
}

fn validate_frequency(tag: &ActivityTag, days: u8) -> AppResult<()> {
    if (1..=MAX_ACTIVITY_DAYS_PER_WEEK).contains(&days) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "Weekly frequency for '{tag}' must be between 1 and {MAX_ACTIVITY_DAYS_PER_WEEK}, got {days}"
        )))
    }
}

/// Wire representation: tag list plus frequency map
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActivityPatternRepr {
    activities: Vec<String>,
    #[serde(default)]
    frequencies: HashMap<String, u8>,
}

impl TryFrom<ActivityPatternRepr> for ActivityPattern {
    type Error = AppError;

    fn try_from(repr: ActivityPatternRepr) -> Result<Self, Self::Error> {
        if repr.activities.is_empty() {
            return Ok(Self::Active(BTreeMap::new()));
        }
        Self::from_tags(repr.activities.as_slice(), &repr.frequencies)
    }
}

impl From<ActivityPattern> for ActivityPatternRepr {
    fn from(pattern: ActivityPattern) -> Self {
        match pattern {
            ActivityPattern::Sedentary => Self {
                activities: vec![SEDENTARY_TAG.to_owned()],
                frequencies: HashMap::new(),
            },
            ActivityPattern::Active(map) => Self {
                activities: map.keys().map(|t| t.as_str().to_owned()).collect(),
                frequencies: map
                    .into_iter()
                    .map(|(tag, days)| (String::from(tag), days))
                    .collect(),
            },
        }
    }
}

/// The four editable goal fields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalField {
    /// Daily calorie goal (kcal)
    Calories,
    /// Daily protein goal (g)
    Protein,
    /// Daily carbohydrate goal (g)
    Carbs,
    /// Daily fat goal (g)
    Fat,
}

impl GoalField {
    /// Field name as used in messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
        }
    }
}

impl fmt::Display for GoalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "kcal" => Ok(Self::Calories),
            "protein" => Ok(Self::Protein),
            "carbs" | "carbohydrates" => Ok(Self::Carbs),
            "fat" => Ok(Self::Fat),
            other => Err(AppError::invalid_input(format!("Unknown goal field '{other}'"))),
        }
    }
}

/// Daily nutrition goals
///
/// Carbohydrates may be negative when derived from biometrics with a very high
/// protein target at a low calorie goal; use [`NutritionGoals::clamped`] where a
/// non-negative value is required.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionGoals {
    /// Daily calories (kcal)
    pub calories: i32,
    /// Daily protein (g)
    pub protein_g: i32,
    /// Daily carbohydrates (g)
    pub carbs_g: i32,
    /// Daily fat (g)
    pub fat_g: i32,
}

impl NutritionGoals {
    /// Create a goal set
    #[must_use]
    pub const fn new(calories: i32, protein_g: i32, carbs_g: i32, fat_g: i32) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Energy implied by the three macro goals (kcal)
    #[must_use]
    pub fn energy_from_macros(&self) -> f64 {
        f64::from(self.protein_g).mul_add(
            KCAL_PER_GRAM_PROTEIN,
            f64::from(self.carbs_g).mul_add(
                KCAL_PER_GRAM_CARBS,
                f64::from(self.fat_g) * KCAL_PER_GRAM_FAT,
            ),
        )
    }

    /// Copy with every field floored at zero
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            calories: self.calories.max(0),
            protein_g: self.protein_g.max(0),
            carbs_g: self.carbs_g.max(0),
            fat_g: self.fat_g.max(0),
        }
    }

    /// Read one field
    #[must_use]
    pub const fn get(&self, field: GoalField) -> i32 {
        match field {
            GoalField::Calories => self.calories,
            GoalField::Protein => self.protein_g,
            GoalField::Carbs => self.carbs_g,
            GoalField::Fat => self.fat_g,
        }
    }

    /// Copy with one field replaced
    #[must_use]
    pub fn with_field(mut self, field: GoalField, value: i32) -> Self {
        match field {
            GoalField::Calories => self.calories = value,
            GoalField::Protein => self.protein_g = value,
            GoalField::Carbs => self.carbs_g = value,
            GoalField::Fat => self.fat_g = value,
        }
        self
    }
}

/// Biometric fields required before goals can be derived
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BiometricField {
    /// Biological sex
    Sex,
    /// Birth date
    BirthDate,
    /// Height in cm
    Height,
    /// Current weight in kg
    CurrentWeight,
    /// Target weight in kg
    TargetWeight,
}

impl fmt::Display for BiometricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sex => "sex",
            Self::BirthDate => "birth_date",
            Self::Height => "height_cm",
            Self::CurrentWeight => "current_weight_kg",
            Self::TargetWeight => "target_weight_kg",
        };
        f.write_str(name)
    }
}

/// Per-user biometric profile with goals and dietary preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiometricProfile {
    /// Owner of the profile
    pub user_id: Uuid,
    /// Biological sex
    pub sex: Option<Sex>,
    /// Birth date (calendar date, no time zone)
    pub birth_date: Option<NaiveDate>,
    /// Height in whole centimeters
    pub height_cm: Option<u16>,
    /// Current body weight (kg)
    pub current_weight_kg: Option<f64>,
    /// Target body weight (kg)
    pub target_weight_kg: Option<f64>,
    /// Weekly activity pattern
    #[serde(default)]
    pub activity: ActivityPattern,
    /// Current daily goals, once seeded
    pub goals: Option<NutritionGoals>,
    /// Ingredient keywords the user never wants suggested
    #[serde(default)]
    pub blocked_ingredients: Vec<String>,
    /// Allergy keywords
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl BiometricProfile {
    /// Empty profile for a user
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            sex: None,
            birth_date: None,
            height_cm: None,
            current_weight_kg: None,
            target_weight_kg: None,
            activity: ActivityPattern::Sedentary,
            goals: None,
            blocked_ingredients: Vec::new(),
            allergies: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Required biometric fields that are still missing
    #[must_use]
    pub fn missing_biometrics(&self) -> Vec<BiometricField> {
        let mut missing = Vec::new();
        if self.sex.is_none() {
            missing.push(BiometricField::Sex);
        }
        if self.birth_date.is_none() {
            missing.push(BiometricField::BirthDate);
        }
        if self.height_cm.is_none() {
            missing.push(BiometricField::Height);
        }
        if self.current_weight_kg.is_none() {
            missing.push(BiometricField::CurrentWeight);
        }
        if self.target_weight_kg.is_none() {
            missing.push(BiometricField::TargetWeight);
        }
        missing
    }

    /// Blacklist and allergy keywords merged, trimmed, lowercased, deduplicated
    #[must_use]
    pub fn excluded_keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = self
            .blocked_ingredients
            .iter()
            .chain(self.allergies.iter())
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        keywords.sort();
        keywords.dedup();
        keywords
    }
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    /// New sex
    pub sex: Option<Sex>,
    /// New birth date
    pub birth_date: Option<NaiveDate>,
    /// New height (cm)
    pub height_cm: Option<u16>,
    /// New current weight (kg)
    pub current_weight_kg: Option<f64>,
    /// New target weight (kg)
    pub target_weight_kg: Option<f64>,
    /// New activity pattern
    pub activity: Option<ActivityPattern>,
    /// New goals
    pub goals: Option<NutritionGoals>,
    /// Replacement blacklist
    pub blocked_ingredients: Option<Vec<String>>,
    /// Replacement allergy list
    pub allergies: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Set sex
    #[must_use]
    pub const fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    /// Set birth date from user text (see [`parse_birth_date`])
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the text is not a date
    pub fn birth_date_str(mut self, raw: &str) -> AppResult<Self> {
        self.birth_date = Some(parse_birth_date(raw)?);
        Ok(self)
    }

    /// Set birth date
    #[must_use]
    pub const fn birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Set height
    #[must_use]
    pub const fn height_cm(mut self, height_cm: u16) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    /// Set current weight
    #[must_use]
    pub const fn current_weight_kg(mut self, kg: f64) -> Self {
        self.current_weight_kg = Some(kg);
        self
    }

    /// Set target weight
    #[must_use]
    pub const fn target_weight_kg(mut self, kg: f64) -> Self {
        self.target_weight_kg = Some(kg);
        self
    }

    /// Set activity pattern
    #[must_use]
    pub fn activity(mut self, activity: ActivityPattern) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Set goals
    #[must_use]
    pub const fn goals(mut self, goals: NutritionGoals) -> Self {
        self.goals = Some(goals);
        self
    }

    /// Replace the blacklist
    #[must_use]
    pub fn blocked_ingredients(mut self, keywords: Vec<String>) -> Self {
        self.blocked_ingredients = Some(keywords);
        self
    }

    /// Replace the allergy list
    #[must_use]
    pub fn allergies(mut self, keywords: Vec<String>) -> Self {
        self.allergies = Some(keywords);
        self
    }

    /// Check ranges of the supplied biometric values
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for implausible height or weight values
    pub fn validate(&self) -> AppResult<()> {
        if let Some(height) = self.height_cm {
            if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height) {
                return Err(AppError::out_of_range(format!(
                    "Height must be between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm, got {height}"
                )));
            }
        }
        for (name, value) in [
            ("current_weight_kg", self.current_weight_kg),
            ("target_weight_kg", self.target_weight_kg),
        ] {
            if let Some(kg) = value {
                if !kg.is_finite() || !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&kg) {
                    return Err(AppError::out_of_range(format!(
                        "{name} must be between {MIN_WEIGHT_KG} and {MAX_WEIGHT_KG} kg, got {kg}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sex.is_none()
            && self.birth_date.is_none()
            && self.height_cm.is_none()
            && self.current_weight_kg.is_none()
            && self.target_weight_kg.is_none()
            && self.activity.is_none()
            && self.goals.is_none()
            && self.blocked_ingredients.is_none()
            && self.allergies.is_none()
    }

    /// Write every supplied field into `profile`, leaving the rest untouched
    pub fn apply_to(&self, profile: &mut BiometricProfile) {
        if let Some(sex) = self.sex {
            profile.sex = Some(sex);
        }
        if let Some(date) = self.birth_date {
            profile.birth_date = Some(date);
        }
        if let Some(height) = self.height_cm {
            profile.height_cm = Some(height);
        }
        if let Some(kg) = self.current_weight_kg {
            profile.current_weight_kg = Some(kg);
        }
        if let Some(kg) = self.target_weight_kg {
            profile.target_weight_kg = Some(kg);
        }
        if let Some(activity) = &self.activity {
            profile.activity = activity.clone();
        }
        if let Some(goals) = self.goals {
            profile.goals = Some(goals);
        }
        if let Some(keywords) = &self.blocked_ingredients {
            profile.blocked_ingredients.clone_from(keywords);
        }
        if let Some(keywords) = &self.allergies {
            profile.allergies.clone_from(keywords);
        }
        profile.updated_at = Utc::now();
    }
}

/// Parse a birth date as a calendar date
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; for a timestamp the date is
/// taken as written, without shifting into another zone, so saving the same
/// text repeatedly always stores the same date.
///
/// # Errors
///
/// Returns `InvalidFormat` if neither form parses
pub fn parse_birth_date(raw: &str) -> AppResult<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|e| {
            AppError::invalid_format(format!("Invalid birth date '{trimmed}': expected YYYY-MM-DD"))
                .with_source(e)
        })
}

/// One body weight measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightRecord {
    /// Record identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Measured weight (kg)
    pub weight_kg: f64,
    /// Measurement time
    pub recorded_at: DateTime<Utc>,
}
