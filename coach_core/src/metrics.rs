//! Derived body metrics for user profiles.
//!
//! - BMI with the 18.5 / 24.9 / 29.9 category cut-offs
//! - Daily calorie target: Mifflin-St Jeor BMR, scaled by an activity
//!   factor and shifted by ±300 kcal for weight-loss / muscle-gain goals

use crate::{ActivityLevel, BmiCategory, Gender, Goal, UserProfile};

/// Calorie delta applied for "Lose Weight" / "Gain Muscle"
const GOAL_CALORIE_DELTA: f64 = 300.0;

/// BMI value (one decimal) and its category
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BmiResult {
    pub bmi: Option<f64>,
    pub category: BmiCategory,
}

impl BmiResult {
    const UNKNOWN: BmiResult = BmiResult {
        bmi: None,
        category: BmiCategory::Unknown,
    };
}

/// Compute BMI from weight in kilograms and height in centimetres
///
/// Zero, negative or non-finite inputs give `{ bmi: None, Unknown }`
/// rather than an error; onboarding profiles are often half filled.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> BmiResult {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return BmiResult::UNKNOWN;
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);

    // Category is decided on the unrounded value
    let category = if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 24.9 {
        BmiCategory::Normal
    } else if bmi < 29.9 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    BmiResult {
        bmi: Some(round_to_tenth(bmi)),
        category,
    }
}

/// Round to one decimal on the exact decimal expansion of `value`
///
/// `(v * 10.0).round()` rounds the binary product instead, which turns
/// 0.35 (really 0.3499...) into 0.4. Exact ties such as 22.25 round up.
fn round_to_tenth(value: f64) -> f64 {
    let exact_tie = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    let value = if exact_tie { value + 0.01 } else { value };
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Basal metabolic rate (kcal/day) via Mifflin-St Jeor
///
/// Anything other than `Male` uses the female constant.
pub fn basal_metabolic_rate(gender: &Gender, weight_kg: f64, height_cm: f64, age: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age;
    match gender {
        Gender::Male => base + 5.0,
        _ => base - 161.0,
    }
}

impl ActivityLevel {
    /// TDEE multiplier; unrecognised levels count as sedentary
    pub fn activity_factor(&self) -> f64 {
        match self {
            ActivityLevel::Beginner => 1.2,
            ActivityLevel::Intermediate => 1.55,
            ActivityLevel::Advanced => 1.725,
            ActivityLevel::Other(_) => 1.2,
        }
    }
}

impl Goal {
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::LoseWeight => -GOAL_CALORIE_DELTA,
            Goal::GainMuscle => GOAL_CALORIE_DELTA,
            _ => 0.0,
        }
    }
}

/// Daily calorie target, rounded to the nearest kcal
pub fn compute_daily_calories(
    gender: &Gender,
    weight_kg: f64,
    height_cm: f64,
    age: f64,
    activity_level: &ActivityLevel,
    goal: &Goal,
) -> i64 {
    let bmr = basal_metabolic_rate(gender, weight_kg, height_cm, age);
    let tdee = bmr * activity_level.activity_factor() + goal.calorie_adjustment();
    tdee.round() as i64
}

/// Fill the derived fields of a profile from its inputs
///
/// BMI fields are always written (possibly as `Unknown`). The calorie
/// target is only written when gender, weight, height and age are all
/// present; a missing activity level or goal uses the defaults
/// (factor 1.2, no adjustment).
pub fn derive_metrics(profile: &mut UserProfile) {
    let bmi = compute_bmi(
        profile.weight_kg.unwrap_or(0.0),
        profile.height_cm.unwrap_or(0.0),
    );
    profile.bmi = bmi.bmi;
    profile.bmi_category = Some(bmi.category);

    profile.target_calories = match (
        &profile.gender,
        profile.weight_kg,
        profile.height_cm,
        profile.age,
    ) {
        (Some(gender), Some(weight), Some(height), Some(age)) => {
            let level = profile
                .activity_level
                .clone()
                .unwrap_or(ActivityLevel::Beginner);
            let goal = profile.goal.clone().unwrap_or(Goal::StayFit);
            Some(compute_daily_calories(
                gender,
                weight,
                height,
                f64::from(age),
                &level,
                &goal,
            ))
        }
        _ => None,
    };

    tracing::debug!(
        "Derived profile metrics: bmi={:?} category={:?} calories={:?}",
        profile.bmi,
        profile.bmi_category,
        profile.target_calories
    );
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
