//! Student grade manager.
//!
//! Menu:
//! 1. add a student (id, name, then one grade per subject)
//! 2. display all students
//! 3. class statistics
//! 4. exit, releasing every student

mod student;

pub use student::{class_statistics, ClassStatistics, Standing, Student};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coerce::{leading_float, leading_int, truncate_chars};
use crate::collection::Collection;
use crate::config::Config;
use crate::core::State;
use crate::session::{Program, Reply};

const MENU: &str = "\n=== Dynamic Student Grade Management System ===\n\
1. Add Student\n\
2. Display All Students\n\
3. Calculate Class Statistics\n\
4. Exit\n\
Enter your choice:\n";

/// The multi-step operation a step belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GradebookOp {
    AddStudent,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum GradebookStep {
    AtMenu,
    AddId,
    AddName,
    /// Waiting for the grade of the zero-based subject.
    AddGrade(usize),
    Exited,
}

impl GradebookStep {
    /// The operation in progress, or `None` at the menu or after exit.
    pub fn operation(&self) -> Option<GradebookOp> {
        match self {
            Self::AtMenu | Self::Exited => None,
            Self::AddId | Self::AddName | Self::AddGrade(_) => Some(GradebookOp::AddStudent),
        }
    }

    /// Index of the expected field: id, name, then each grade.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            Self::AtMenu | Self::Exited => None,
            Self::AddId => Some(0),
            Self::AddName => Some(1),
            Self::AddGrade(subject) => Some(2 + subject),
        }
    }
}

impl State for GradebookStep {
    fn name(&self) -> &str {
        match self {
            Self::AtMenu => "AtMenu",
            Self::AddId => "AddId",
            Self::AddName => "AddName",
            Self::AddGrade(_) => "AddGrade",
            Self::Exited => "Exited",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Exited)
    }
}

/// Gradebook program state: the roster and the student being entered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gradebook {
    students: Collection<Student>,
    staging: Student,
    subject_count: usize,
    name_max_len: usize,
}

impl Default for Gradebook {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Gradebook {
    pub fn new(config: &Config) -> Self {
        Self {
            students: Collection::new(config.max_records),
            staging: Student::blank(config.subject_count),
            subject_count: config.subject_count,
            name_max_len: config.name_max_len,
        }
    }

    pub fn students(&self) -> &Collection<Student> {
        &self.students
    }

    pub fn staging(&self) -> &Student {
        &self.staging
    }

    pub fn subject_count(&self) -> usize {
        self.subject_count
    }

    /// Fields in one student build: id, name and the grades.
    pub fn field_count(&self) -> usize {
        2 + self.subject_count
    }

    pub fn listing(&self) -> String {
        if self.students.is_empty() {
            return "No students to display.\n".to_string();
        }

        let mut out = String::from("\n=== Student Information ===\n");
        out.push_str(&format!("{:<5} {:<20} ", "ID", "Name"));
        for subject in 1..=self.subject_count {
            out.push_str(&format!("{:<10} ", format!("Grade{subject}")));
        }
        out.push_str(&format!("{:<10}\n", "Average"));
        for student in &self.students {
            out.push_str(&student.row());
            out.push('\n');
        }
        out
    }

    pub fn statistics_report(&self) -> String {
        match class_statistics(&self.students) {
            Some(stats) => format!(
                "\nClass Average: {:.2}\nHighest Average: {:.2}, Student: {}\nLowest Average: {:.2}, Student: {}\n",
                stats.class_average,
                stats.highest.average,
                stats.highest.name,
                stats.lowest.average,
                stats.lowest.name
            ),
            None => "No students available to calculate statistics.\n".to_string(),
        }
    }

    fn menu_choice(&mut self, line: &str) -> Reply<GradebookStep> {
        match leading_int(line) {
            1 => {
                self.staging = Student::blank(self.subject_count);
                Reply::silent(GradebookStep::AddId)
            }
            2 => Reply::new(GradebookStep::AtMenu, self.listing()),
            3 => Reply::new(GradebookStep::AtMenu, self.statistics_report()),
            4 => {
                let freed = self.students.len();
                self.students.clear();
                self.staging = Student::blank(self.subject_count);
                info!(freed, "roster released");
                Reply::new(GradebookStep::Exited, "Exiting the program. Goodbye!\n")
            }
            _ => Reply::new(GradebookStep::AtMenu, "Invalid choice. Please try again.\n"),
        }
    }

    /// The step after `subject`'s grade, committing when it was the last.
    fn after_grade(&mut self, subject: usize) -> Reply<GradebookStep> {
        if subject + 1 < self.subject_count {
            Reply::silent(GradebookStep::AddGrade(subject + 1))
        } else {
            self.commit()
        }
    }

    fn commit(&mut self) -> Reply<GradebookStep> {
        let mut student = std::mem::replace(&mut self.staging, Student::blank(self.subject_count));
        student.compute_totals();
        let name = student.name.clone();
        let average = student.average;

        match self.students.insert_front(student) {
            Ok(()) => {
                info!(student = %name, average, total = self.students.len(), "student added");
                Reply::new(GradebookStep::AtMenu, "Student data added successfully!\n")
            }
            Err(err) => {
                warn!(student = %name, error = %err, "student abandoned");
                Reply::new(
                    GradebookStep::AtMenu,
                    "Memory allocation failed for new student.\n",
                )
            }
        }
    }
}

impl Program for Gradebook {
    type Step = GradebookStep;

    fn reset(&mut self) -> GradebookStep {
        self.students.clear();
        self.staging = Student::blank(self.subject_count);
        GradebookStep::AtMenu
    }

    fn prompt(&self, step: &GradebookStep) -> String {
        match step {
            GradebookStep::AtMenu => MENU.to_string(),
            GradebookStep::AddId => "\nEnter student details:\nID:\n".to_string(),
            GradebookStep::AddName => "Name:\n".to_string(),
            GradebookStep::AddGrade(subject) => format!("Grade for subject {}:\n", subject + 1),
            GradebookStep::Exited => String::new(),
        }
    }

    fn validate(&self, step: &GradebookStep) -> Result<(), String> {
        if self.staging.grades.len() != self.subject_count {
            return Err(format!(
                "staged student has {} grades, expected {}",
                self.staging.grades.len(),
                self.subject_count
            ));
        }
        if let GradebookStep::AddGrade(subject) = step {
            if *subject >= self.subject_count {
                return Err(format!(
                    "grade step {} beyond {} subjects",
                    subject + 1,
                    self.subject_count
                ));
            }
        }
        if let Some(student) = self
            .students
            .iter()
            .find(|s| s.grades.len() != self.subject_count)
        {
            return Err(format!(
                "student '{}' has {} grades, expected {}",
                student.name,
                student.grades.len(),
                self.subject_count
            ));
        }
        Ok(())
    }

    fn handle(&mut self, step: &GradebookStep, line: &str) -> Reply<GradebookStep> {
        match step {
            GradebookStep::AtMenu => self.menu_choice(line),
            GradebookStep::AddId => {
                self.staging.id = leading_int(line);
                Reply::silent(GradebookStep::AddName)
            }
            GradebookStep::AddName => {
                self.staging.name = truncate_chars(line.trim(), self.name_max_len);
                if self.subject_count == 0 {
                    self.commit()
                } else {
                    Reply::silent(GradebookStep::AddGrade(0))
                }
            }
            GradebookStep::AddGrade(subject) => {
                if let Some(grade) = self.staging.grades.get_mut(*subject) {
                    *grade = leading_float(line);
                }
                self.after_grade(*subject)
            }
            GradebookStep::Exited => Reply::silent(GradebookStep::Exited),
        }
    }
}
