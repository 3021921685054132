use super::config::YonseiConfig;
use crate::app::calculators::Decisions;
use crate::core::chain::CalculationContext;
use crate::core::handlers::handler_info;
use crate::domain::model::{HandlerInfo, HandlerKind, Student, Subject};
use crate::domain::ports::Handler;
use crate::utils::numeric::{parse_number, round_half_up, weighted_average};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Common,
    General,
    Career,
    Vocational,
    SubjectB,
}

/// Subject-A averages per category plus the Subject-B unit tallies.
#[derive(Debug, Default)]
struct GeneralTally {
    common: Vec<(f64, f64)>,
    general: Vec<(f64, f64)>,
    career: Vec<(f64, f64)>,
    penalized_units: f64,
    subject_b_units: f64,
}

/// Whole Yonsei scoring step for both the general and talent tracks.
pub struct YonseiScoreHandler {
    config: Arc<YonseiConfig>,
}

impl YonseiScoreHandler {
    pub const NAME: &'static str = "YonseiScoreHandler";

    pub fn new(config: Arc<YonseiConfig>) -> Self {
        Self { config }
    }

    pub fn classify(&self, subject: &Subject) -> Category {
        let config = &self.config;
        if !config.primary_groups.contains(&subject.subject_group) {
            return Category::SubjectB;
        }
        let code = subject.subject_separation_code.as_str();
        if code == config.general_separation_code {
            if config.common_subjects.contains(&subject.subject_name) {
                Category::Common
            } else {
                Category::General
            }
        } else if code == config.career_separation_code {
            Category::Career
        } else if code == config.vocational_separation_code {
            Category::Vocational
        } else {
            Category::SubjectB
        }
    }

    /// `0.5 × gradeScore + 0.5 × zScorePoint`, the z part floored by grade.
    fn ranked_conversion(&self, subject: &Subject) -> Result<(f64, String), String> {
        let config = &self.config;
        let grade = subject
            .ranking_grade_number()
            .ok_or_else(|| "no ranking grade".to_string())?;
        let grade_score = *config
            .grade_scores
            .get(&grade)
            .ok_or_else(|| format!("grade {grade} has no score"))?;
        let floor = config.grade_floor(grade);

        let original = parse_number(subject.original_score.as_deref());
        let average = parse_number(subject.avg_score.as_deref());
        let deviation = parse_number(subject.standard_deviation.as_deref()).filter(|d| *d > 0.0);

        let (z_point, z_note) = match (original, average, deviation) {
            (Some(original), Some(average), Some(deviation)) => {
                let z = config.normalize_z((original - average) / deviation);
                let percentile = config.z_percentile(z);
                let point = (100.0 * (1.0 - percentile)).max(floor);
                (point, format!("z {z} -> percentile {percentile} -> {point}"))
            }
            _ => (floor, format!("no raw score statistics -> grade floor {floor}")),
        };

        let score = 0.5 * grade_score + 0.5 * z_point;
        Ok((
            score,
            format!("0.5 x grade {grade} ({grade_score}) + 0.5 x {z_note} = {score}"),
        ))
    }

    fn vocational_conversion(&self, subject: &Subject) -> Result<(f64, String), String> {
        if let Some(letter) = subject.ranking_grade_letter() {
            return YonseiConfig::letter_score(&self.config.vocational_scores, letter)
                .map(|score| (score, format!("vocational grade {letter} -> {score}")))
                .ok_or_else(|| format!("vocational grade {letter} has no score"));
        }
        let grade = subject
            .ranking_grade_number()
            .ok_or_else(|| "no vocational grade".to_string())?;
        self.config
            .grade_scores
            .get(&grade)
            .map(|score| (*score, format!("grade {grade} -> {score}")))
            .ok_or_else(|| format!("grade {grade} has no score"))
    }

    fn career_conversion(&self, subject: &Subject) -> Result<(f64, String), String> {
        let letter = subject
            .achievement_letter()
            .ok_or_else(|| "career elective without achievement".to_string())?;
        YonseiConfig::letter_score(&self.config.career_achievement_scores, letter)
            .map(|score| (score, format!("achievement {letter} -> {score}")))
            .ok_or_else(|| format!("achievement {letter} has no score"))
    }

    fn is_penalized(subject: &Subject) -> bool {
        match subject.ranking_grade_number() {
            Some(grade) => grade == 9,
            None => subject.achievement_letter() == Some('C'),
        }
    }

    fn score_general(&self, student: &mut Student) {
        let mut decisions = Decisions::default();
        let mut tally = GeneralTally::default();

        for (index, subject) in student.subjects.iter().enumerate().filter(|(_, s)| s.is_candidate()) {
            let unit = subject.unit_value();
            let category = self.classify(subject);
            let converted = match category {
                Category::Common | Category::General => self.ranked_conversion(subject),
                Category::Vocational => self.vocational_conversion(subject),
                Category::Career => self.career_conversion(subject),
                Category::SubjectB => {
                    tally.subject_b_units += unit;
                    let penalized = Self::is_penalized(subject);
                    if penalized {
                        tally.penalized_units += unit;
                    }
                    decisions.exclude(
                        index,
                        format!("subject B: counted toward the deduction only (penalized: {penalized})"),
                    );
                    continue;
                }
            };

            match converted {
                Ok((score, formula)) => {
                    let bucket = match category {
                        Category::Common => &mut tally.common,
                        Category::Career => &mut tally.career,
                        _ => &mut tally.general,
                    };
                    bucket.push((score, unit));
                    decisions.select(index, score, unit, formula);
                }
                Err(reason) => decisions.exclude(index, reason),
            }
        }
        decisions.apply(Self::NAME, student);

        let weights = self.config.weights;
        let common = weighted_average(tally.common.iter().copied());
        let general = weighted_average(tally.general.iter().copied());
        let career = weighted_average(tally.career.iter().copied());
        let subject_a = weights.common * common + weights.general * general + weights.career * career;

        let deduction = if tally.subject_b_units > 0.0 {
            tally.penalized_units / tally.subject_b_units * self.config.deduction_max
        } else {
            0.0
        };

        let final_score = round_half_up(subject_a - deduction, self.config.rounding_digits);
        student.set_score(
            final_score,
            format!(
                "subject A = {} x {common} + {} x {general} + {} x {career} = {subject_a}; \
                 deduction = ({} / {}) x {} = {deduction}; final = {final_score}",
                weights.common,
                weights.general,
                weights.career,
                tally.penalized_units,
                tally.subject_b_units,
                self.config.deduction_max,
            ),
        );
    }

    fn talent_conversion(&self, subject: &Subject) -> Result<(f64, String), String> {
        let config = &self.config;
        if let Some(grade) = subject.ranking_grade_number() {
            return config
                .grade_scores
                .get(&grade)
                .map(|score| (*score, format!("grade {grade} -> {score}")))
                .ok_or_else(|| format!("grade {grade} has no score"));
        }
        if subject.ranking_grade_letter().is_some() {
            return self.vocational_conversion(subject);
        }
        let letter = subject
            .achievement_letter()
            .ok_or_else(|| "no grade or achievement".to_string())?;
        YonseiConfig::letter_score(&config.talent_achievement_scores, letter)
            .map(|score| (score, format!("achievement {letter} -> {score}")))
            .ok_or_else(|| format!("achievement {letter} has no score"))
    }

    fn score_talent(&self, student: &mut Student) {
        let mut decisions = Decisions::default();

        for (index, subject) in student.subjects.iter().enumerate().filter(|(_, s)| s.is_candidate()) {
            if !self.config.talent_groups.contains(&subject.subject_group) {
                decisions.exclude(
                    index,
                    format!("subject group '{}' is not reflected for this track", subject.subject_group),
                );
                continue;
            }
            match self.talent_conversion(subject) {
                Ok((score, formula)) => decisions.select(index, score, subject.unit_value(), formula),
                Err(reason) => decisions.exclude(index, reason),
            }
        }

        let weighted = decisions.apply(Self::NAME, student);
        if weighted.is_empty() {
            student.set_score(0.0, "no eligible subjects");
            return;
        }
        let count = weighted.len();
        let average = weighted_average(weighted);
        let final_score = round_half_up(average, self.config.rounding_digits);
        student.set_score(
            final_score,
            format!("credit-weighted average {average} = {final_score} ({count} subjects)"),
        );
    }
}

impl Handler for YonseiScoreHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let student = &mut *context.student;
        if self.config.is_talent(&student.recruitment_type_code) {
            self.score_talent(student);
        } else if self.config.is_general(&student.recruitment_type_code) {
            self.score_general(student);
        } else {
            tracing::debug!(
                "{}: admission {} has no track",
                Self::NAME,
                student.recruitment_type_code
            );
        }
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "국어, 수학, 영어, 사회, 과학, 한국사",
            "Subject A (0.3 common + 0.5 general + 0.2 career) minus subject B deduction; talent track uses a credit-weighted average",
            Self::NAME,
            self.config.as_ref(),
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
