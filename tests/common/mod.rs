#![allow(dead_code)]

use admission_score::{Student, Subject};

pub fn ranked(id: &str, group: &str, grade: &str, unit: &str) -> Subject {
    Subject::new(id, group, format!("{group} {id}"), 1, 1)
        .with_ranking_grade(grade)
        .with_unit(unit)
}

pub fn career(id: &str, group: &str, achievement: &str, unit: &str) -> Subject {
    Subject::new(id, group, format!("{group} {id}"), 2, 1)
        .with_separation_code("02")
        .with_achievement(achievement)
        .with_unit(unit)
}

pub fn student(admission: &str, unit: &str, subjects: Vec<Subject>) -> Student {
    let mut student = Student::new("student-1", admission, unit);
    student.subjects = subjects;
    student
}

pub fn subject<'a>(student: &'a Student, id: &str) -> &'a Subject {
    student
        .subjects
        .iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("subject {id} missing"))
}

pub fn reason<'a>(student: &'a Student, id: &str) -> &'a str {
    subject(student, id)
        .calculation_detail
        .as_ref()
        .and_then(|d| d.non_reflection_reason())
        .unwrap_or("")
}

pub fn final_score(student: &Student) -> f64 {
    student
        .score_result
        .as_ref()
        .map(|r| r.final_score)
        .expect("score result should be set")
}
