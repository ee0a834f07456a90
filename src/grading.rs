use crate::model::{AnswerKey, Label, QuizDefinition};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Se intentó corregir sin ninguna opción marcada. No cuenta como fallo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptySelection;

/// Normaliza lo que llega del navegador ("b", " D ") a etiquetas canónicas.
pub fn normalize_selection<'a>(raw: impl IntoIterator<Item = &'a str>) -> BTreeSet<Label> {
    raw.into_iter()
        .map(Label::new)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Todo o nada: en `multi` no hay puntuación parcial.
pub fn grade(
    definition: &QuizDefinition,
    selected: &BTreeSet<Label>,
) -> Result<Verdict, EmptySelection> {
    if selected.is_empty() {
        return Err(EmptySelection);
    }

    let correct = match &definition.answer_key {
        AnswerKey::Single(answer) => selected.len() == 1 && selected.contains(answer),
        AnswerKey::Multi(answers) => selected == answers,
    };

    Ok(if correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    })
}

pub fn verdict_message(definition: &QuizDefinition, verdict: Verdict) -> String {
    match verdict {
        Verdict::Correct => match &definition.explanation {
            Some(explanation) => format!("✅ Correct! {explanation}"),
            None => "✅ Correct!".to_string(),
        },
        Verdict::Incorrect => "❌ Not quite. Try again!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizOption;
    use proptest::prelude::*;

    fn quiz(labels: &[&str], key: AnswerKey, explanation: Option<&str>) -> QuizDefinition {
        QuizDefinition {
            id: "fixture".into(),
            prompt: String::new(),
            options: labels
                .iter()
                .map(|l| QuizOption {
                    label: Label::new(l),
                    text: format!("option {l}"),
                })
                .collect(),
            answer_key: key,
            explanation: explanation.map(str::to_string),
        }
    }

    fn multi_bd() -> QuizDefinition {
        quiz(
            &["A", "B", "C", "D"],
            AnswerKey::Multi(normalize_selection(["B", "D"])),
            None,
        )
    }

    fn single_c() -> QuizDefinition {
        quiz(
            &["A", "B", "C"],
            AnswerKey::Single(Label::new("C")),
            Some("C is the only one that works."),
        )
    }

    #[test]
    fn multi_scenarios() {
        let q = multi_bd();
        assert_eq!(grade(&q, &normalize_selection(["D", "B"])), Ok(Verdict::Correct));
        assert_eq!(grade(&q, &normalize_selection(["B"])), Ok(Verdict::Incorrect));
        assert_eq!(
            grade(&q, &normalize_selection(["A", "B", "C", "D"])),
            Ok(Verdict::Incorrect)
        );
    }

    #[test]
    fn single_scenarios() {
        let q = single_c();
        assert_eq!(grade(&q, &normalize_selection(["c"])), Ok(Verdict::Correct));
        assert_eq!(grade(&q, &normalize_selection(["A"])), Ok(Verdict::Incorrect));
        assert_eq!(
            verdict_message(&q, Verdict::Correct),
            "✅ Correct! C is the only one that works."
        );
        assert_eq!(verdict_message(&q, Verdict::Incorrect), "❌ Not quite. Try again!");
    }

    #[test]
    fn empty_selection_is_not_a_verdict() {
        assert_eq!(grade(&single_c(), &BTreeSet::new()), Err(EmptySelection));
        assert_eq!(grade(&multi_bd(), &normalize_selection(["  "])), Err(EmptySelection));
    }

    #[test]
    fn single_with_extra_selection_is_incorrect() {
        let q = single_c();
        assert_eq!(grade(&q, &normalize_selection(["C", "A"])), Ok(Verdict::Incorrect));
    }

    #[test]
    fn correct_without_explanation_has_no_trailing_text() {
        assert_eq!(verdict_message(&multi_bd(), Verdict::Correct), "✅ Correct!");
    }

    proptest! {
        #[test]
        fn multi_key_matches_any_order_and_case(
            key in prop::collection::btree_set(0usize..6, 1..=4),
            reverse in any::<bool>(),
            lower in any::<bool>(),
        ) {
            let labels = ["A", "B", "C", "D", "E", "F"];
            let answer: Vec<&str> = key.iter().map(|i| labels[*i]).collect();
            let q = quiz(&labels, AnswerKey::Multi(normalize_selection(answer.iter().copied())), None);

            let mut picked: Vec<String> = answer
                .iter()
                .map(|l| if lower { l.to_lowercase() } else { l.to_string() })
                .collect();
            if reverse {
                picked.reverse();
            }
            let selected = normalize_selection(picked.iter().map(String::as_str));
            prop_assert_eq!(grade(&q, &selected), Ok(Verdict::Correct));
        }

        #[test]
        fn multi_key_rejects_any_other_set(
            key in prop::collection::btree_set(0usize..6, 1..=4),
            picked in prop::collection::btree_set(0usize..6, 1..=4),
        ) {
            prop_assume!(key != picked);
            let labels = ["A", "B", "C", "D", "E", "F"];
            let q = quiz(
                &labels,
                AnswerKey::Multi(normalize_selection(key.iter().map(|i| labels[*i]))),
                None,
            );
            let selected = normalize_selection(picked.iter().map(|i| labels[*i]));
            prop_assert_eq!(grade(&q, &selected), Ok(Verdict::Incorrect));
        }

        #[test]
        fn single_key_accepts_only_the_answer(answer in 0usize..4, picked in 0usize..4) {
            let labels = ["A", "B", "C", "D"];
            let q = quiz(&labels, AnswerKey::Single(Label::new(labels[answer])), None);
            let verdict = grade(&q, &normalize_selection([labels[picked].to_lowercase().as_str()]));
            let expected = if answer == picked { Verdict::Correct } else { Verdict::Incorrect };
            prop_assert_eq!(verdict, Ok(expected));
        }
    }
}
