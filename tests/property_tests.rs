//! Property-based tests for steps, history, coercion and collections.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::Utc;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use stepform::coerce::{leading_float, leading_int, truncate_chars};
use stepform::programs::gradebook::Student;
use stepform::programs::inventory::{Details, Product};
use stepform::programs::{Inventory, InventoryStep};
use stepform::{Collection, Keyed, Session, State, StateHistory, StateTransition};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
enum TestStep {
    AtMenu,
    Field,
    Exited,
}

impl State for TestStep {
    fn name(&self) -> &str {
        match self {
            Self::AtMenu => "AtMenu",
            Self::Field => "Field",
            Self::Exited => "Exited",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Exited)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Record(String);

impl Keyed for Record {
    fn key(&self) -> &str {
        &self.0
    }
}

/// Raw lines for one inventory add, branching on dimensions.
#[derive(Clone, Debug)]
struct AddLines {
    name: String,
    quantity: String,
    price: String,
    dimensions: Option<(i32, i32, i32)>,
    description: String,
}

impl AddLines {
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "1".to_string(),
            self.name.clone(),
            self.quantity.clone(),
            self.price.clone(),
        ];
        match self.dimensions {
            Some((length, width, height)) => {
                lines.push("1".to_string());
                lines.extend([length, width, height].iter().map(i32::to_string));
            }
            None => {
                lines.push("0".to_string());
                lines.push(self.description.clone());
            }
        }
        lines
    }

    /// The record the lines should commit, using the default limits.
    fn expected(&self) -> Product {
        Product {
            name: truncate_chars(&self.name, 49),
            quantity: leading_int(&self.quantity),
            price: leading_float(&self.price),
            details: match self.dimensions {
                Some((length, width, height)) => Details::Dimensions {
                    length,
                    width,
                    height,
                },
                None => Details::Description(truncate_chars(&self.description, 99)),
            },
        }
    }
}

prop_compose! {
    fn add_lines()(
        name in "[A-Za-z][A-Za-z0-9 ]{0,70}",
        quantity in "-?[0-9]{1,7}[a-z]{0,3}",
        price in "[0-9]{1,5}(\\.[0-9]{1,3})?",
        dimensions in prop::option::of((0i32..10_000, 0i32..10_000, 0i32..10_000)),
        description in "[a-zA-Z0-9 ,.]{0,140}",
    ) -> AddLines {
        AddLines { name, quantity, price, dimensions, description }
    }
}

fn stocked(names: &[String]) -> Session<Inventory> {
    let mut session = Session::new(Inventory::default());
    session.start_session();
    for (i, name) in names.iter().enumerate() {
        let quantity = i.to_string();
        for line in ["1", name.as_str(), quantity.as_str(), "1.50", "0", "stock"] {
            session.submit_line(line);
        }
    }
    session
}

fn snapshot(session: &Session<Inventory>) -> Vec<Product> {
    session.program().products().iter().cloned().collect()
}

prop_compose! {
    fn arbitrary_step()(variant in 0..3u8) -> TestStep {
        match variant {
            0 => TestStep::AtMenu,
            1 => TestStep::Field,
            _ => TestStep::Exited,
        }
    }
}

fn history_of(steps: &[TestStep]) -> StateHistory<TestStep> {
    let mut history = StateHistory::new();
    let mut from = TestStep::AtMenu;
    for (i, to) in steps.iter().enumerate() {
        history = history.record(StateTransition {
            from: from.clone(),
            to: to.clone(),
            timestamp: Utc::now(),
            line: i + 1,
        });
        from = to.clone();
    }
    history
}

proptest! {
    #[test]
    fn step_name_is_stable(step in arbitrary_step()) {
        prop_assert_eq!(step.name(), step.name());
        prop_assert_eq!(step.is_final(), step.is_final());
    }

    #[test]
    fn history_path_starts_at_first_source(steps in prop::collection::vec(arbitrary_step(), 1..10)) {
        let history = history_of(&steps);
        let path = history.get_path();

        prop_assert_eq!(path.len(), steps.len() + 1);
        prop_assert_eq!(path[0], &TestStep::AtMenu);
        for (i, step) in steps.iter().enumerate() {
            prop_assert_eq!(path[i + 1], step);
        }
    }

    #[test]
    fn history_lines_are_consecutive(steps in prop::collection::vec(arbitrary_step(), 0..10)) {
        let history = history_of(&steps);
        for (i, transition) in history.transitions().iter().enumerate() {
            prop_assert_eq!(transition.line, i + 1);
        }
    }

    #[test]
    fn history_roundtrip_serialization(steps in prop::collection::vec(arbitrary_step(), 0..5)) {
        let history = history_of(&steps);
        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestStep> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(history.len(), deserialized.len());
        prop_assert_eq!(history.get_path(), deserialized.get_path());
    }

    #[test]
    fn leading_int_reads_plain_numbers(n in any::<i32>()) {
        prop_assert_eq!(leading_int(&n.to_string()), n);
        prop_assert_eq!(leading_int(&format!("  {n}xyz")), n);
    }

    #[test]
    fn leading_int_never_panics(input in ".*") {
        let _ = leading_int(&input);
    }

    #[test]
    fn non_numeric_text_is_zero(input in "[a-zA-Z][a-zA-Z ]*") {
        prop_assert_eq!(leading_int(&input), 0);
        prop_assert_eq!(leading_float(&input), 0.0);
    }

    #[test]
    fn leading_float_reads_two_decimals(cents in 0u32..1_000_000) {
        let text = format!("{}.{:02}", cents / 100, cents % 100);
        let expected: f32 = text.parse().unwrap();
        prop_assert_eq!(leading_float(&text), expected);
    }

    #[test]
    fn truncation_bounds_length(input in ".*", max in 0usize..60) {
        let truncated = truncate_chars(&input, max);
        prop_assert!(truncated.chars().count() <= max);
        prop_assert!(input.starts_with(&truncated));
    }

    #[test]
    fn collection_lists_newest_first(names in prop::collection::vec("[a-z]{1,8}", 0..12)) {
        let mut collection = Collection::new(None);
        for name in &names {
            collection.insert_front(Record(name.clone())).unwrap();
        }

        let listed: Vec<&str> = collection.keys().collect();
        let expected: Vec<&str> = names.iter().rev().map(String::as_str).collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn capacity_is_never_exceeded(cap in 0usize..6, inserts in 0usize..12) {
        let mut collection = Collection::new(Some(cap));
        for i in 0..inserts {
            let _ = collection.insert_front(Record(i.to_string()));
        }
        prop_assert_eq!(collection.len(), inserts.min(cap));
    }

    #[test]
    fn remove_takes_out_only_first_match(
        names in prop::collection::vec("[ab]", 1..10),
        target in "[ab]",
    ) {
        let mut collection = Collection::new(None);
        for name in &names {
            collection.insert_front(Record(name.clone())).unwrap();
        }

        let before = collection.len();
        let matches = names.iter().filter(|n| **n == target).count();
        let removed = collection.remove(&target);

        prop_assert_eq!(removed.is_some(), matches > 0);
        let after_matches = collection.keys().filter(|k| *k == target).count();
        prop_assert_eq!(after_matches, matches.saturating_sub(1));
        prop_assert_eq!(collection.len(), before - usize::from(matches > 0));
    }

    #[test]
    fn student_average_is_total_over_subjects(grades in prop::collection::vec(0.0f32..100.0, 1..8)) {
        let mut student = Student {
            grades: grades.clone(),
            ..Student::default()
        };
        student.compute_totals();

        let total: f32 = grades.iter().sum();
        prop_assert_eq!(student.total, total);
        prop_assert_eq!(student.average, total / grades.len() as f32);
    }

    #[test]
    fn inventory_never_panics_on_arbitrary_lines(lines in prop::collection::vec(".{0,12}", 0..40)) {
        let mut session = Session::new(Inventory::default());
        session.start_session();
        for line in &lines {
            session.submit_line(line);
        }

        prop_assert_eq!(session.is_alive(), !session.current_step().is_final());
        if session.current_step() == &InventoryStep::Exited {
            prop_assert!(session.program().products().is_empty());
        }
    }

    #[test]
    fn add_commits_coerced_fields_at_front(
        existing in prop::collection::vec("[a-z]{1,8}", 0..4),
        add in add_lines(),
    ) {
        let mut session = stocked(&existing);
        let before = snapshot(&session);

        for line in add.lines() {
            session.submit_line(&line);
        }

        prop_assert_eq!(session.current_step(), &InventoryStep::AtMenu);
        let after = snapshot(&session);
        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after[0], &add.expected());
        prop_assert_eq!(&after[1..], &before[..]);
    }

    #[test]
    fn update_rewrites_only_the_named_field(
        names in prop::collection::hash_set("[a-z]{1,8}", 1..5),
        target in any::<prop::sample::Index>(),
        price_update in any::<bool>(),
        value in "-?[0-9]{1,6}(\\.[0-9]{1,2})?",
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut session = stocked(&names);
        let before = snapshot(&session);
        let position = target.index(before.len());
        let name = before[position].name.clone();

        let choice = if price_update { "4" } else { "3" };
        for line in [choice, name.as_str(), value.as_str()] {
            session.submit_line(line);
        }

        let mut expected = before.clone();
        if price_update {
            expected[position].price = leading_float(&value);
        } else {
            expected[position].quantity = leading_int(&value);
        }
        prop_assert_eq!(session.current_step(), &InventoryStep::AtMenu);
        prop_assert_eq!(snapshot(&session), expected);
    }

    #[test]
    fn update_of_missing_name_changes_nothing(
        names in prop::collection::vec("[a-z]{1,8}", 0..4),
        missing in "[A-Z]{1,8}",
        price_update in any::<bool>(),
    ) {
        let mut session = stocked(&names);
        let before = snapshot(&session);

        let choice = if price_update { "4" } else { "3" };
        let reply = session.submit_line(choice);
        prop_assert!(!reply.contains("not found"));
        let reply = session.submit_line(&missing);

        let expected_reply = format!("Product '{}' not found.", missing);
        prop_assert!(reply.starts_with(&expected_reply));
        prop_assert_eq!(session.current_step(), &InventoryStep::AtMenu);
        prop_assert_eq!(snapshot(&session), before);
    }
}
