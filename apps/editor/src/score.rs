//! Completeness score. A heuristic count of populated fields, not an ATS measure.
//!
//! Signals:
//! - personal: fullName, email, phone, location, headline longer than 3 chars (5)
//! - experience, per entry: company, role, description longer than 50 chars
//! - education, per entry: school, degree, startDate
//! - skills longer than 10 chars (1)
//!
//! The denominator is fixed (5 + 6 + 3 + 1), so extra entries can push the raw ratio past
//! 100 before the cap.

use serde::{Deserialize, Serialize};

use crate::models::Document;

const PERSONAL_SIGNAL_FIELDS: &[&str] = &["fullName", "email", "phone", "location", "headline"];
/// Two "ideal" experience entries with three signals each.
const EXPERIENCE_POSSIBLE: u32 = 6;
const EDUCATION_POSSIBLE: u32 = 3;
const SKILLS_POSSIBLE: u32 = 1;

const RING_RADIUS: f64 = 14.0;

/// Raw scores at or above the boosted range are lifted to the best boosted score, so the
/// boost never ranks a fuller résumé below an emptier one (raw 93 reports 99, not 93).
pub const LIFT_ABOVE_BOOST_RANGE: bool = true;

/// Flat encouragement bonus for mid-range scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBoost {
    pub enabled: bool,
    /// Exclusive lower bound of the boosted range.
    pub lower: u32,
    /// Exclusive upper bound of the boosted range.
    pub upper: u32,
    pub bonus: u32,
    /// Lift raw scores at or above `upper` to the boosted ceiling.
    pub lift_above: bool,
}

impl Default for ScoreBoost {
    fn default() -> Self {
        Self {
            enabled: true,
            lower: 20,
            upper: 90,
            bonus: 10,
            lift_above: LIFT_ABOVE_BOOST_RANGE,
        }
    }
}

impl ScoreBoost {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn apply(&self, raw: u32) -> u32 {
        if !self.enabled {
            return raw;
        }
        if raw > self.lower && raw < self.upper {
            return (raw + self.bonus).min(100);
        }
        if raw >= self.upper && self.lift_above {
            let ceiling = (self.upper.saturating_sub(1) + self.bonus).min(100);
            return raw.max(ceiling);
        }
        raw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Mid,
    High,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s < 50 => ScoreBand::Low,
            s if s < 80 => ScoreBand::Mid,
            _ => ScoreBand::High,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Low => "text-red-500",
            ScoreBand::Mid => "text-yellow-500",
            ScoreBand::High => "text-green-500",
        }
    }
}

/// Stroke geometry for the score ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRing {
    pub radius: f64,
    pub circumference: f64,
    pub dash_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub earned: u32,
    pub possible: u32,
    pub band: ScoreBand,
    pub ring: ScoreRing,
}

fn longer_than(value: &str, min: usize) -> bool {
    value.chars().count() > min
}

pub fn earned_signals(doc: &Document) -> u32 {
    let personal = PERSONAL_SIGNAL_FIELDS
        .iter()
        .filter(|f| doc.personal.field(f).is_some_and(|v| longer_than(v, 3)))
        .count() as u32;

    let experience: u32 = doc
        .experience
        .iter()
        .map(|e| {
            u32::from(!e.company.is_empty())
                + u32::from(!e.role.is_empty())
                + u32::from(longer_than(&e.description, 50))
        })
        .sum();

    let education: u32 = doc
        .education
        .iter()
        .map(|e| {
            u32::from(!e.school.is_empty())
                + u32::from(!e.degree.is_empty())
                + u32::from(!e.start_date.is_empty())
        })
        .sum();

    let skills = u32::from(longer_than(&doc.skills, 10));

    personal + experience + education + skills
}

pub fn possible_signals() -> u32 {
    PERSONAL_SIGNAL_FIELDS.len() as u32 + EXPERIENCE_POSSIBLE + EDUCATION_POSSIBLE + SKILLS_POSSIBLE
}

pub fn compute_score(doc: &Document, boost: &ScoreBoost) -> ScoreReport {
    let earned = earned_signals(doc);
    let possible = possible_signals();
    let raw = ((earned as f64 / possible as f64) * 100.0).round() as u32;
    let score = boost.apply(raw.min(100));

    let circumference = 2.0 * std::f64::consts::PI * RING_RADIUS;
    ScoreReport {
        score,
        earned,
        possible,
        band: ScoreBand::for_score(score),
        ring: ScoreRing {
            radius: RING_RADIUS,
            circumference,
            dash_offset: circumference - (score as f64 / 100.0) * circumference,
        },
    }
}
