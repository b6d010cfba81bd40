//! Student records and class statistics.

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Keyed};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub grades: Vec<f32>,
    pub total: f32,
    pub average: f32,
}

impl Keyed for Student {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Student {
    /// A zeroed record with room for `subject_count` grades.
    pub fn blank(subject_count: usize) -> Self {
        Self {
            grades: vec![0.0; subject_count],
            ..Self::default()
        }
    }

    /// Recompute `total` and `average` from `grades`.
    ///
    /// A student with no subjects averages zero.
    pub fn compute_totals(&mut self) {
        self.total = self.grades.iter().sum();
        self.average = if self.grades.is_empty() {
            0.0
        } else {
            self.total / self.grades.len() as f32
        };
    }

    pub fn row(&self) -> String {
        let mut row = format!("{:<5} {:<20} ", self.id, self.name);
        for grade in &self.grades {
            row.push_str(&format!("{grade:<10.2} "));
        }
        row.push_str(&format!("{:<10.2}", self.average));
        row
    }
}

/// A student's name paired with their average.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub average: f32,
}

impl From<&Student> for Standing {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            average: student.average,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassStatistics {
    /// Mean of the student averages.
    pub class_average: f32,
    pub highest: Standing,
    pub lowest: Standing,
    pub students: usize,
}

/// Single front-to-back scan; ties keep the first student met.
///
/// Returns `None` for an empty roster.
pub fn class_statistics(roster: &Collection<Student>) -> Option<ClassStatistics> {
    let mut students = roster.iter();
    let first = students.next()?;

    let mut sum = first.average;
    let mut count = 1_usize;
    let mut highest = first;
    let mut lowest = first;

    for student in students {
        sum += student.average;
        count += 1;
        if student.average > highest.average {
            highest = student;
        }
        if student.average < lowest.average {
            lowest = student;
        }
    }

    Some(ClassStatistics {
        class_average: sum / count as f32,
        highest: highest.into(),
        lowest: lowest.into(),
        students: count,
    })
}
