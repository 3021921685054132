//! Per-university calculators.

pub mod seonggonghoe;
pub mod tukorea;
pub mod yonsei;

use crate::domain::model::Student;

/// A subject picked by a monolithic handler, with its averaging weight.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    pub index: usize,
    pub score: f64,
    pub weight: f64,
    pub formula: String,
}

/// Verdicts collected while reading the transcript, applied in one pass.
#[derive(Debug, Default)]
pub(crate) struct Decisions {
    pub selected: Vec<Selection>,
    pub excluded: Vec<(usize, String)>,
}

impl Decisions {
    pub fn select(&mut self, index: usize, score: f64, weight: f64, formula: impl Into<String>) {
        self.selected.push(Selection {
            index,
            score,
            weight,
            formula: formula.into(),
        });
    }

    pub fn exclude(&mut self, index: usize, reason: impl Into<String>) {
        self.excluded.push((index, reason.into()));
    }

    /// Writes every verdict onto the student; returns `(score, weight)` pairs.
    pub fn apply(self, handler: &'static str, student: &mut Student) -> Vec<(f64, f64)> {
        for (index, reason) in self.excluded {
            if let Some(subject) = student.subjects.get_mut(index) {
                tracing::debug!("{}: {} excluded ({})", handler, subject.subject_name, reason);
                subject.exclude(handler, reason);
            }
        }

        self.selected
            .into_iter()
            .filter_map(|selection| {
                let subject = student.subjects.get_mut(selection.index)?;
                subject.reflect(handler, selection.score, selection.formula);
                Some((selection.score, selection.weight))
            })
            .collect()
    }
}
