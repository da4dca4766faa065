//! Skill grading: matches a user's claimed skills against a career's weighted
//! skill tiers and derives a coverage report with a letter grade.
//!
//! Pure and deterministic: no I/O, no shared state. Same inputs, same report.
//!
//! Matching is a loose case-insensitive substring check in either direction.
//! "JS" does NOT match "JavaScript" (neither contains the other), and a bare
//! "C" matches both "C++" and "C#". Both are known limitations of the heuristic;
//! changing them would silently change grades.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grading::careers::{CareerCatalog, CareerProfile};

const ESSENTIAL_WEIGHT: f64 = 0.5;
const IMPORTANT_WEIGHT: f64 = 0.3;
const NICE_TO_HAVE_WEIGHT: f64 = 0.2;

/// Letter grade derived from the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Inclusive lower bounds: 90 A, 80 B, 70 C, 60 D, else F.
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 90 {
            Grade::A
        } else if percent >= 80 {
            Grade::B
        } else if percent >= 70 {
            Grade::C
        } else if percent >= 60 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Coverage of a single tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierResult {
    pub skills: Vec<String>,
    pub matched: BTreeMap<String, bool>,
    pub matched_count: u32,
    /// Rounded percentage, 0 to 100.
    pub coverage_percent: u32,
}

/// Full grading report for one (skills, career) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    pub career: String,
    pub essential: TierResult,
    pub important: TierResult,
    pub nice_to_have: TierResult,
    pub overall_percent: u32,
    pub overall_grade: Grade,
}

/// True if `user_skill` and `candidate_skill` contain one another, ignoring case.
pub fn match_skill(user_skill: &str, candidate_skill: &str) -> bool {
    let user = user_skill.to_lowercase();
    let candidate = candidate_skill.to_lowercase();
    user.contains(&candidate) || candidate.contains(&user)
}

/// Grades one tier. An empty tier yields zero coverage rather than dividing by zero.
pub fn grade_tier(tier_skills: &[String], user_skills: &[String]) -> TierResult {
    let mut matched = BTreeMap::new();
    let mut matched_count = 0u32;

    for skill in tier_skills {
        let hit = user_skills.iter().any(|user| match_skill(user, skill));
        if hit {
            matched_count += 1;
        }
        matched.insert(skill.clone(), hit);
    }

    let coverage_percent = if tier_skills.is_empty() {
        0
    } else {
        (100.0 * f64::from(matched_count) / tier_skills.len() as f64).round() as u32
    };

    TierResult {
        skills: tier_skills.to_vec(),
        matched,
        matched_count,
        coverage_percent,
    }
}

/// Grades `user_skills` against `career`. Unknown careers grade as three empty tiers.
pub fn compute_grade(catalog: &CareerCatalog, user_skills: &[String], career: &str) -> GradingReport {
    let empty = CareerProfile::default();
    let profile = catalog.get(career).unwrap_or(&empty);

    let essential = grade_tier(&profile.essential, user_skills);
    let important = grade_tier(&profile.important, user_skills);
    let nice_to_have = grade_tier(&profile.nice_to_have, user_skills);

    let overall_percent = (f64::from(essential.coverage_percent) * ESSENTIAL_WEIGHT
        + f64::from(important.coverage_percent) * IMPORTANT_WEIGHT
        + f64::from(nice_to_have.coverage_percent) * NICE_TO_HAVE_WEIGHT)
        .round() as u32;

    GradingReport {
        career: career.to_string(),
        essential,
        important,
        nice_to_have,
        overall_percent,
        overall_grade: Grade::from_percent(overall_percent),
    }
}
