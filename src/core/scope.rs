use crate::domain::model::{Student, Subject};
use serde::Serialize;

/// The `(admissions, units)` pairs a rule applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionScope {
    pub admissions: Vec<String>,
    pub units: Vec<String>,
}

impl AdmissionScope {
    pub fn new(admissions: &[&str], units: &[&str]) -> Self {
        Self {
            admissions: to_strings(admissions),
            units: to_strings(units),
        }
    }

    pub fn contains(&self, admission: &str, unit: &str) -> bool {
        self.admissions.iter().any(|a| a == admission) && self.units.iter().any(|u| u == unit)
    }

    pub fn matches(&self, student: &Student) -> bool {
        self.contains(&student.recruitment_type_code, &student.recruitment_unit_code)
    }
}

/// A rule payload bound to an admission scope.
#[derive(Debug, Clone, Serialize)]
pub struct Scoped<T> {
    #[serde(flatten)]
    pub scope: AdmissionScope,
    pub rule: T,
}

impl<T> Scoped<T> {
    pub fn new(scope: AdmissionScope, rule: T) -> Self {
        Self { scope, rule }
    }
}

/// First rule whose scope covers the student.
pub fn find_rule<'r, T>(rules: &'r [Scoped<T>], student: &Student) -> Option<&'r T> {
    rules
        .iter()
        .find(|scoped| scoped.scope.matches(student))
        .map(|scoped| &scoped.rule)
}

/// Matches subjects by separation code; an empty list matches everything.
pub fn separation_matches(codes: &[String], subject: &Subject) -> bool {
    codes.is_empty() || codes.iter().any(|c| *c == subject.subject_separation_code)
}

pub fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
