//! Scoring tables for Tukorea (한국공학대학교).

use crate::core::handlers::SemesterRule;
use crate::core::scope::{to_strings, AdmissionScope};
use serde::Serialize;
use std::collections::BTreeMap;

pub const ADMISSION_NAMES: &[(&str, &str)] = &[
    ("11", "교과우수자"),
    ("12", "지역균형"),
    ("31", "특성화고교졸업자"),
    ("32", "특성화고졸재직자"),
    ("61", "논술우수자"),
];

pub const UNIT_NAMES: &[(&str, &str)] = &[
    ("41", "기계공학과"),
    ("42", "메카트로닉스공학부"),
    ("43", "전자공학부"),
    ("44", "컴퓨터공학부"),
    ("45", "신소재공학과"),
    ("46", "에너지·전기공학과"),
    ("71", "경영학부"),
    ("72", "IT경영전공"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Engineering,
    Business,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "engineering",
            Department::Business => "business",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TukoreaConfig {
    pub general_admissions: Vec<String>,
    /// General-track admissions scored on the unscaled average.
    pub essay_admissions: Vec<String>,
    pub vocational_admissions: Vec<String>,
    pub engineering_units: Vec<String>,
    pub business_units: Vec<String>,
    pub engineering_groups: Vec<String>,
    pub business_groups: Vec<String>,
    pub social_group: String,
    pub science_group: String,
    pub korean_history_group: String,
    pub ranked_cap: usize,
    pub career_cap: usize,
    pub rank_scores: BTreeMap<u8, f64>,
    /// Ascending `(upper percentile, score)` bands.
    pub percentile_bands: Vec<(f64, f64)>,
    pub achievement_scores: BTreeMap<String, f64>,
    /// Graduates before this year may be scored from class percentile.
    pub percentile_cutoff_year: i32,
    pub scale: f64,
    pub rounding_digits: u32,
}

impl Default for TukoreaConfig {
    fn default() -> Self {
        Self {
            general_admissions: to_strings(&["11", "12", "61"]),
            essay_admissions: to_strings(&["61"]),
            vocational_admissions: to_strings(&["31", "32"]),
            engineering_units: to_strings(&["41", "42", "43", "44", "45", "46"]),
            business_units: to_strings(&["71", "72"]),
            engineering_groups: to_strings(&["국어", "수학", "영어", "과학"]),
            business_groups: to_strings(&["국어", "수학", "영어", "사회", "과학"]),
            social_group: "사회".to_string(),
            science_group: "과학".to_string(),
            korean_history_group: "한국사".to_string(),
            ranked_cap: 4,
            career_cap: 2,
            rank_scores: [
                (1, 100.0),
                (2, 99.0),
                (3, 98.0),
                (4, 97.0),
                (5, 96.0),
                (6, 95.0),
                (7, 94.0),
                (8, 93.0),
                (9, 92.0),
            ]
            .into_iter()
            .collect(),
            percentile_bands: vec![
                (4.0, 100.0),
                (11.0, 99.0),
                (23.0, 98.0),
                (40.0, 97.0),
                (60.0, 96.0),
                (77.0, 95.0),
                (89.0, 94.0),
                (96.0, 93.0),
                (100.0, 92.0),
            ],
            achievement_scores: [("A", 100.0), ("B", 98.0), ("C", 96.0)]
                .into_iter()
                .map(|(letter, score)| (letter.to_string(), score))
                .collect(),
            percentile_cutoff_year: 2007,
            scale: 5.0,
            rounding_digits: 4,
        }
    }
}

impl TukoreaConfig {
    pub fn all_units(&self) -> Vec<String> {
        self.engineering_units
            .iter()
            .chain(&self.business_units)
            .cloned()
            .collect()
    }

    pub fn all_admissions(&self) -> Vec<String> {
        self.general_admissions
            .iter()
            .chain(&self.vocational_admissions)
            .cloned()
            .collect()
    }

    pub fn supported_scope(&self) -> AdmissionScope {
        AdmissionScope {
            admissions: self.all_admissions(),
            units: self.all_units(),
        }
    }

    pub fn semester_rule(&self) -> SemesterRule {
        SemesterRule {
            max_grade: 3,
            max_term: 1,
            full_window_for_graduates: true,
        }
    }

    pub fn department(&self, unit: &str) -> Option<Department> {
        if self.engineering_units.iter().any(|u| u == unit) {
            Some(Department::Engineering)
        } else if self.business_units.iter().any(|u| u == unit) {
            Some(Department::Business)
        } else {
            None
        }
    }

    pub fn groups_for(&self, department: Department) -> &[String] {
        match department {
            Department::Engineering => &self.engineering_groups,
            Department::Business => &self.business_groups,
        }
    }

    pub fn is_essay(&self, admission: &str) -> bool {
        self.essay_admissions.iter().any(|a| a == admission)
    }

    pub fn is_vocational(&self, admission: &str) -> bool {
        self.vocational_admissions.iter().any(|a| a == admission)
    }

    pub fn is_general(&self, admission: &str) -> bool {
        self.general_admissions.iter().any(|a| a == admission)
    }

    /// First band whose upper bound the percentile does not exceed.
    pub fn band_score(&self, percentile: f64) -> Option<f64> {
        self.percentile_bands
            .iter()
            .find(|(upper, _)| percentile <= *upper)
            .map(|(_, score)| *score)
    }

    pub fn achievement_score(&self, letter: char) -> Option<f64> {
        self.achievement_scores.get(letter.to_string().as_str()).copied()
    }
}
