use super::config::{Department, TukoreaConfig};
use crate::app::calculators::Decisions;
use crate::core::chain::CalculationContext;
use crate::core::handlers::handler_info;
use crate::domain::model::{HandlerInfo, HandlerKind, Student, Subject};
use crate::domain::ports::Handler;
use crate::utils::numeric::{parse_number, percentile_rank, round_half_up, weighted_average};
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    group: String,
    score: f64,
    unit: f64,
    /// Achievement letter, present only for career electives.
    achievement: Option<char>,
    formula: String,
}

fn by_score_then_unit(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.unit.total_cmp(&a.unit))
}

fn by_achievement_then_unit(a: &Candidate, b: &Candidate) -> Ordering {
    a.achievement
        .cmp(&b.achievement)
        .then_with(|| b.unit.total_cmp(&a.unit))
}

fn unit_sum(pool: &[Candidate], group: &str) -> f64 {
    pool.iter().filter(|c| c.group == group).map(|c| c.unit).sum()
}

/// Whole Tukorea scoring step: track branching, group caps and final average.
pub struct TukoreaScoreHandler {
    config: Arc<TukoreaConfig>,
}

impl TukoreaScoreHandler {
    pub const NAME: &'static str = "TukoreaScoreHandler";

    pub fn new(config: Arc<TukoreaConfig>) -> Self {
        Self { config }
    }

    /// Score from the ranking grade, or from class percentile for old graduates.
    fn ranked_score(&self, subject: &Subject, graduate_year: Option<i32>) -> Result<(f64, String), String> {
        if let Some(grade) = subject.ranking_grade_number() {
            return self
                .config
                .rank_scores
                .get(&grade)
                .map(|score| (*score, format!("grade {grade} -> {score}")))
                .ok_or_else(|| format!("grade {grade} has no score"));
        }

        let percentile_allowed = graduate_year.is_some_and(|year| year < self.config.percentile_cutoff_year);
        if !percentile_allowed {
            return Err("no ranking grade".to_string());
        }

        let rank = parse_number(subject.rank.as_deref());
        let count = parse_number(subject.student_count.as_deref());
        let same_rank = parse_number(subject.same_rank.as_deref()).unwrap_or(1.0);
        let (Some(rank), Some(count)) = (rank, count) else {
            return Err("no ranking grade or class rank".to_string());
        };
        let percentile = percentile_rank(rank, same_rank, count)
            .ok_or_else(|| "class rank cannot be converted to a percentile".to_string())?;
        let score = self
            .config
            .band_score(percentile)
            .ok_or_else(|| format!("percentile {percentile} is outside every band"))?;

        Ok((
            score,
            format!("percentile ({rank} + ({same_rank} - 1) / 2) / {count} x 100 = {percentile} -> {score}"),
        ))
    }

    fn candidate(&self, index: usize, subject: &Subject, graduate_year: Option<i32>) -> Result<Candidate, String> {
        let unit = subject.unit_value();
        if subject.is_career_elective() {
            let letter = subject
                .achievement_letter()
                .ok_or_else(|| "career elective without achievement".to_string())?;
            let score = self
                .config
                .achievement_score(letter)
                .ok_or_else(|| format!("achievement {letter} is not reflected"))?;
            return Ok(Candidate {
                index,
                group: subject.subject_group.clone(),
                score,
                unit,
                achievement: Some(letter),
                formula: format!("achievement {letter} -> {score} (unit counted as 1)"),
            });
        }

        let (score, formula) = self.ranked_score(subject, graduate_year)?;
        Ok(Candidate {
            index,
            group: subject.subject_group.clone(),
            score,
            unit,
            achievement: None,
            formula,
        })
    }

    fn vocational_decisions(&self, student: &Student) -> Decisions {
        let mut decisions = Decisions::default();
        for (index, subject) in student.subjects.iter().enumerate().filter(|(_, s)| s.is_candidate()) {
            if subject.is_career_elective() {
                decisions.exclude(index, "career electives are not reflected for this track");
                continue;
            }
            match self.ranked_score(subject, student.graduate_year) {
                Ok((score, formula)) => decisions.select(index, score, subject.unit_value(), formula),
                Err(reason) => decisions.exclude(index, reason),
            }
        }
        decisions
    }

    fn general_decisions(&self, student: &Student, department: Department) -> Decisions {
        let config = &self.config;
        let groups = config.groups_for(department);
        let mut decisions = Decisions::default();
        let mut pool: Vec<Candidate> = Vec::new();
        let mut history: Vec<Candidate> = Vec::new();

        for (index, subject) in student.subjects.iter().enumerate().filter(|(_, s)| s.is_candidate()) {
            let is_history = subject.subject_group == config.korean_history_group;
            if !is_history && !groups.contains(&subject.subject_group) {
                decisions.exclude(
                    index,
                    format!(
                        "subject group '{}' is not reflected for {} units",
                        subject.subject_group,
                        department.as_str()
                    ),
                );
                continue;
            }
            match self.candidate(index, subject, student.graduate_year) {
                Ok(candidate) if is_history => history.push(candidate),
                Ok(candidate) => pool.push(candidate),
                Err(reason) => decisions.exclude(index, reason),
            }
        }

        let history_target = match department {
            Department::Engineering => config.science_group.clone(),
            Department::Business => {
                let social = unit_sum(&pool, &config.social_group);
                let science = unit_sum(&pool, &config.science_group);
                let (dropped, kept) = if social < science {
                    (&config.social_group, &config.science_group)
                } else {
                    (&config.science_group, &config.social_group)
                };
                let reason = format!(
                    "{dropped} excluded: {social} social units vs {science} science units"
                );
                pool.retain(|candidate| {
                    if candidate.group == *dropped {
                        decisions.exclude(candidate.index, reason.clone());
                        false
                    } else {
                        true
                    }
                });
                kept.clone()
            }
        };

        history.sort_by(by_score_then_unit);
        let mut history = history.into_iter();
        if let Some(mut best) = history.next() {
            best.formula = format!("{} (Korean history counted as {})", best.formula, history_target);
            best.group = history_target;
            pool.push(best);
        }
        for rest in history {
            decisions.exclude(rest.index, "only the best Korean history subject is reflected");
        }

        for group in groups {
            let (mut career, mut ranked): (Vec<Candidate>, Vec<Candidate>) = pool
                .iter()
                .filter(|c| c.group == *group)
                .cloned()
                .partition(|c| c.achievement.is_some());
            ranked.sort_by(by_score_then_unit);
            career.sort_by(by_achievement_then_unit);

            keep_top(&mut decisions, ranked, config.ranked_cap, group, "ranked");
            keep_top(&mut decisions, career, config.career_cap, group, "career-elective");
        }

        decisions
    }
}

fn keep_top(decisions: &mut Decisions, members: Vec<Candidate>, cap: usize, group: &str, label: &str) {
    for (position, candidate) in members.into_iter().enumerate() {
        if position < cap {
            let weight = if candidate.achievement.is_some() { 1.0 } else { candidate.unit };
            decisions.select(candidate.index, candidate.score, weight, candidate.formula);
        } else {
            decisions.exclude(
                candidate.index,
                format!("{group}: not within the top {cap} {label} subjects"),
            );
        }
    }
}

impl Handler for TukoreaScoreHandler {
    fn process(&self, context: &mut CalculationContext<'_>) {
        let student = &mut *context.student;
        let admission = student.recruitment_type_code.clone();

        let decisions = if self.config.is_vocational(&admission) {
            self.vocational_decisions(student)
        } else if self.config.is_general(&admission) {
            let Some(department) = self.config.department(&student.recruitment_unit_code) else {
                tracing::debug!("{}: unit {} has no department", Self::NAME, student.recruitment_unit_code);
                return;
            };
            self.general_decisions(student, department)
        } else {
            tracing::debug!("{}: admission {} has no track", Self::NAME, admission);
            return;
        };

        let weighted = decisions.apply(Self::NAME, student);
        if weighted.is_empty() {
            student.set_score(0.0, "no eligible subjects");
            return;
        }

        let count = weighted.len();
        let average = weighted_average(weighted);
        let (raw, derivation) = if self.config.is_essay(&admission) {
            (average, format!("credit-weighted average {average}"))
        } else {
            (
                average * self.config.scale,
                format!("credit-weighted average {average} x {}", self.config.scale),
            )
        };
        let final_score = round_half_up(raw, self.config.rounding_digits);
        student.set_score(final_score, format!("{derivation} = {final_score} ({count} subjects)"));
    }

    fn info(&self) -> HandlerInfo {
        handler_info(
            HandlerKind::Calc,
            "국어, 수학, 영어, 사회, 과학, 한국사",
            "Top 4 ranked and top 2 career-elective subjects per group, credit-weighted average (x5 except essay track)",
            Self::NAME,
            self.config.as_ref(),
        )
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
