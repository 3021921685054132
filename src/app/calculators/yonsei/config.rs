//! Scoring tables for Yonsei (연세대학교).

use crate::core::handlers::SemesterRule;
use crate::core::scope::{to_strings, AdmissionScope};
use crate::utils::numeric::round_half_up;
use serde::Serialize;
use std::collections::BTreeMap;

pub const ADMISSION_NAMES: &[(&str, &str)] = &[
    ("11", "추천형"),
    ("12", "기회균형"),
    ("21", "체육인재"),
];

pub const UNIT_NAMES: &[(&str, &str)] = &[
    ("101", "국어국문학과"),
    ("102", "영어영문학과"),
    ("103", "경제학부"),
    ("104", "경영학과"),
    ("105", "수학과"),
    ("106", "물리학과"),
    ("107", "화학과"),
    ("108", "기계공학부"),
    ("109", "컴퓨터과학과"),
    ("110", "체육교육학과"),
];

/// Upper-tail probability of the standard normal at z = 0.0, 0.1, …, 3.0.
const Z_UPPER_TAIL: [f64; 31] = [
    0.5000, 0.4602, 0.4207, 0.3821, 0.3446, 0.3085, 0.2743, 0.2420, 0.2119, 0.1841, 0.1587,
    0.1357, 0.1151, 0.0968, 0.0808, 0.0668, 0.0548, 0.0446, 0.0359, 0.0287, 0.0228, 0.0179,
    0.0139, 0.0107, 0.0082, 0.0062, 0.0047, 0.0035, 0.0026, 0.0019, 0.0013,
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryWeights {
    pub common: f64,
    pub general: f64,
    pub career: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct YonseiConfig {
    pub general_admissions: Vec<String>,
    pub talent_admissions: Vec<String>,
    pub units: Vec<String>,
    pub talent_groups: Vec<String>,
    /// Groups scored as Subject A; every other group is Subject B.
    pub primary_groups: Vec<String>,
    pub common_subjects: Vec<String>,
    pub general_separation_code: String,
    pub career_separation_code: String,
    pub vocational_separation_code: String,
    pub grade_scores: BTreeMap<u8, f64>,
    pub career_achievement_scores: BTreeMap<String, f64>,
    pub vocational_scores: BTreeMap<String, f64>,
    pub talent_achievement_scores: BTreeMap<String, f64>,
    /// Cumulative share of the class at or above each grade.
    pub grade_floor_percentiles: BTreeMap<u8, f64>,
    pub z_limit: f64,
    pub weights: CategoryWeights,
    pub deduction_max: f64,
    pub rounding_digits: u32,
}

fn letter_table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(letter, score)| (letter.to_string(), *score))
        .collect()
}

impl Default for YonseiConfig {
    fn default() -> Self {
        Self {
            general_admissions: to_strings(&["11", "12"]),
            talent_admissions: to_strings(&["21"]),
            units: UNIT_NAMES.iter().map(|(code, _)| code.to_string()).collect(),
            talent_groups: to_strings(&["국어", "수학", "영어", "사회"]),
            primary_groups: to_strings(&["국어", "수학", "영어", "사회", "과학", "한국사"]),
            common_subjects: to_strings(&["공통국어", "공통수학", "공통영어", "통합사회", "통합과학", "한국사"]),
            general_separation_code: "01".to_string(),
            career_separation_code: "02".to_string(),
            vocational_separation_code: "03".to_string(),
            grade_scores: [
                (1, 100.0),
                (2, 95.0),
                (3, 87.5),
                (4, 75.0),
                (5, 60.0),
                (6, 40.0),
                (7, 25.0),
                (8, 12.5),
                (9, 0.0),
            ]
            .into_iter()
            .collect(),
            career_achievement_scores: letter_table(&[("A", 100.0), ("B", 80.0), ("C", 60.0)]),
            vocational_scores: letter_table(&[("A", 100.0), ("B", 90.0), ("C", 80.0), ("D", 70.0), ("E", 60.0)]),
            talent_achievement_scores: letter_table(&[("A", 100.0), ("B", 80.0), ("C", 60.0)]),
            grade_floor_percentiles: [
                (1, 0.04),
                (2, 0.11),
                (3, 0.23),
                (4, 0.40),
                (5, 0.60),
                (6, 0.77),
                (7, 0.89),
                (8, 0.96),
                (9, 1.0),
            ]
            .into_iter()
            .collect(),
            z_limit: 3.0,
            weights: CategoryWeights {
                common: 0.3,
                general: 0.5,
                career: 0.2,
            },
            deduction_max: 5.0,
            rounding_digits: 4,
        }
    }
}

impl YonseiConfig {
    pub fn all_admissions(&self) -> Vec<String> {
        self.general_admissions
            .iter()
            .chain(&self.talent_admissions)
            .cloned()
            .collect()
    }

    pub fn supported_scope(&self) -> AdmissionScope {
        AdmissionScope {
            admissions: self.all_admissions(),
            units: self.units.clone(),
        }
    }

    pub fn semester_rule(&self) -> SemesterRule {
        SemesterRule {
            max_grade: 3,
            max_term: 1,
            full_window_for_graduates: true,
        }
    }

    pub fn is_talent(&self, admission: &str) -> bool {
        self.talent_admissions.iter().any(|a| a == admission)
    }

    pub fn is_general(&self, admission: &str) -> bool {
        self.general_admissions.iter().any(|a| a == admission)
    }

    /// Z-score clamped to the table range and rounded to one decimal.
    pub fn normalize_z(&self, z: f64) -> f64 {
        round_half_up(z.clamp(-self.z_limit, self.z_limit), 1)
    }

    /// Share of the class above a normalized z-score.
    pub fn z_percentile(&self, z: f64) -> f64 {
        let tenths = (z * 10.0).round() as i64;
        let index = tenths.unsigned_abs().min(30) as usize;
        if tenths >= 0 {
            Z_UPPER_TAIL[index]
        } else {
            1.0 - Z_UPPER_TAIL[index]
        }
    }

    /// Lowest score a subject of this grade can receive from the z-score part.
    pub fn grade_floor(&self, grade: u8) -> f64 {
        self.grade_floor_percentiles
            .get(&grade)
            .map(|percentile| 100.0 * (1.0 - percentile))
            .unwrap_or(0.0)
    }

    pub fn letter_score(table: &BTreeMap<String, f64>, letter: char) -> Option<f64> {
        table.get(letter.to_string().as_str()).copied()
    }
}
