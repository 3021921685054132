//! Scoring tables for Seonggonghoe (성공회대학교).

use crate::core::handlers::{BaseScoreRule, ConversionRule, FinalFormulaRule, SemesterRule, TopCourseRule};
use crate::core::scope::{to_strings, AdmissionScope};

pub const ADMISSION_GENERAL: &str = "11";
pub const ADMISSION_EXCELLENCE: &str = "12";
pub const ADMISSION_VOCATIONAL: &str = "31";
pub const ADMISSION_PRACTICAL: &str = "41";

pub const ADMISSION_NAMES: &[(&str, &str)] = &[
    (ADMISSION_GENERAL, "학생부교과(일반)"),
    (ADMISSION_EXCELLENCE, "교과성적우수자"),
    (ADMISSION_VOCATIONAL, "특성화고졸업자"),
    (ADMISSION_PRACTICAL, "실기우수자"),
];

pub const UNIT_NAMES: &[(&str, &str)] = &[
    ("101", "인문융합자율학부"),
    ("102", "사회융합자율학부"),
    ("103", "미디어콘텐츠융합자율학부"),
    ("104", "IT융합자율학부"),
    ("105", "경영학부"),
    ("106", "신학과"),
];

pub const CORE_GROUPS: &[&str] = &["국어", "수학", "영어", "사회", "과학"];
pub const PRACTICAL_GROUPS: &[&str] = &["국어", "영어"];

/// Weighted table: lower grades are pushed further apart.
pub const STANDARD_GRADE_TABLE: &[(u8, f64)] = &[
    (1, 1.0),
    (2, 2.0),
    (3, 3.0),
    (4, 4.5),
    (5, 5.5),
    (6, 7.0),
    (7, 8.0),
    (8, 8.5),
    (9, 9.0),
];

pub const IDENTITY_GRADE_TABLE: &[(u8, f64)] = &[
    (1, 1.0),
    (2, 2.0),
    (3, 3.0),
    (4, 4.0),
    (5, 5.0),
    (6, 6.0),
    (7, 7.0),
    (8, 8.0),
    (9, 9.0),
];

pub const PRACTICAL_GRADE_TABLE: &[(u8, f64)] = &[
    (1, 20.0),
    (2, 19.0),
    (3, 18.0),
    (4, 17.0),
    (5, 16.0),
    (6, 15.0),
    (7, 14.0),
    (8, 13.0),
    (9, 12.0),
];

/// Separation codes that carry a ranking grade.
pub const RANKED_SEPARATION_CODES: &[&str] = &["01", "03"];

pub const ROUNDING_DIGITS: u32 = 2;

/// Immutable tables, built once per calculator.
#[derive(Debug, Clone)]
pub struct SeonggonghoeConfig {
    pub units: Vec<String>,
    pub standard_admissions: Vec<String>,
    pub vocational_admissions: Vec<String>,
    pub practical_admissions: Vec<String>,
}

impl Default for SeonggonghoeConfig {
    fn default() -> Self {
        Self {
            units: UNIT_NAMES.iter().map(|(code, _)| code.to_string()).collect(),
            standard_admissions: to_strings(&[ADMISSION_GENERAL, ADMISSION_EXCELLENCE]),
            vocational_admissions: to_strings(&[ADMISSION_VOCATIONAL]),
            practical_admissions: to_strings(&[ADMISSION_PRACTICAL]),
        }
    }
}

impl SeonggonghoeConfig {
    fn scope(&self, admissions: &[String]) -> AdmissionScope {
        AdmissionScope {
            admissions: admissions.to_vec(),
            units: self.units.clone(),
        }
    }

    pub fn all_admissions(&self) -> Vec<String> {
        self.standard_admissions
            .iter()
            .chain(&self.vocational_admissions)
            .chain(&self.practical_admissions)
            .cloned()
            .collect()
    }

    pub fn all_scope(&self) -> AdmissionScope {
        self.scope(&self.all_admissions())
    }

    pub fn standard_scope(&self) -> AdmissionScope {
        self.scope(&self.standard_admissions)
    }

    pub fn vocational_scope(&self) -> AdmissionScope {
        self.scope(&self.vocational_admissions)
    }

    pub fn practical_scope(&self) -> AdmissionScope {
        self.scope(&self.practical_admissions)
    }

    /// Standard and vocational tracks share the grade-average pipeline.
    pub fn averaged_scope(&self) -> AdmissionScope {
        let admissions: Vec<String> = self
            .standard_admissions
            .iter()
            .chain(&self.vocational_admissions)
            .cloned()
            .collect();
        self.scope(&admissions)
    }

    pub fn semester_rule(&self) -> SemesterRule {
        SemesterRule {
            max_grade: 3,
            max_term: 1,
            full_window_for_graduates: true,
        }
    }

    pub fn standard_conversion(&self) -> ConversionRule {
        ConversionRule::new(to_strings(RANKED_SEPARATION_CODES), STANDARD_GRADE_TABLE)
    }

    pub fn vocational_conversion(&self) -> ConversionRule {
        ConversionRule::new(to_strings(RANKED_SEPARATION_CODES), IDENTITY_GRADE_TABLE)
    }

    pub fn practical_conversion(&self) -> ConversionRule {
        ConversionRule::new(to_strings(RANKED_SEPARATION_CODES), PRACTICAL_GRADE_TABLE)
    }

    /// Only the practical table yields points, where higher is better.
    pub fn practical_top_courses(&self) -> Vec<TopCourseRule> {
        vec![TopCourseRule {
            group_name: "국어·영어".to_string(),
            subject_groups: to_strings(PRACTICAL_GROUPS),
            separation_codes: to_strings(RANKED_SEPARATION_CODES),
            top_course_count: 5,
        }]
    }

    pub fn standard_formula(&self) -> FinalFormulaRule {
        FinalFormulaRule {
            base_score: 600.0,
            max_grade: 9.0,
            grade_divisor: 8.0,
            multiplier: 400.0,
        }
    }

    pub fn vocational_formula(&self) -> FinalFormulaRule {
        FinalFormulaRule {
            base_score: 300.0,
            max_grade: 9.0,
            grade_divisor: 8.0,
            multiplier: 700.0,
        }
    }

    pub fn practical_base(&self) -> BaseScoreRule {
        BaseScoreRule { base_score: 100.0 }
    }
}
