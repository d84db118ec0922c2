//! The built-in day-of questionnaire and activity generation.

use std::collections::HashMap;

use jiff::civil::Date;
use log::debug;

use super::answers::AnswerSet;
use super::condition::Condition;
use super::duration::resolve_duration;
use super::question::{ChoiceOption, Question, QuestionKind};
use crate::models::{ActivityDraft, Category};
use crate::schedule::ScheduleMode;

/// Answer set key for the dual-ceremony switch.
pub const DUAL_CEREMONY_OPTION: &str = "double_ceremonie";

/// Values that turn on the dual-ceremony branch.
const YES_VALUES: &[&str] = &["oui", "yes", "true"];

/// Schedule mode selected by the dual-ceremony answer.
pub fn schedule_mode(answers: &AnswerSet) -> ScheduleMode {
    if answers.is_yes(DUAL_CEREMONY_OPTION) {
        ScheduleMode::Dual
    } else {
        ScheduleMode::Single
    }
}

/// The built-in questionnaire for a wedding day.
///
/// The second preparation/travel/ceremony block is gated on the
/// dual-ceremony switch; everything else is always visible.
pub fn default_questionnaire() -> Vec<Question> {
    let dual = || Condition::one_of(DUAL_CEREMONY_OPTION, YES_VALUES);

    vec![
        Question::new(
            Category::Custom,
            "Deux ceremonies ?",
            DUAL_CEREMONY_OPTION,
            QuestionKind::Choice,
        )
        .with_options(vec![ChoiceOption::plain("oui"), ChoiceOption::plain("non")])
        .control(),
        Question::new(
            Category::Preparation,
            "Coiffure",
            "coiffure",
            QuestionKind::Choice,
        )
        .with_options(vec![
            ChoiceOption::timed("coiffure simple", 45),
            ChoiceOption::timed("coiffure elaboree", 75),
        ]),
        Question::new(
            Category::Preparation,
            "Maquillage",
            "maquillage",
            QuestionKind::Choice,
        )
        .with_options(vec![
            ChoiceOption::timed("maquillage leger", 30),
            ChoiceOption::timed("maquillage complet", 60),
        ]),
        Question::new(
            Category::Preparation,
            "Habillage",
            "habillage",
            QuestionKind::Fixed,
        )
        .with_duration(30),
        Question::new(
            Category::Travel(1),
            "Trajet vers la ceremonie",
            "trajet_1",
            QuestionKind::Number,
        ),
        Question::new(
            Category::Ceremony,
            "Heure de la ceremonie",
            "heure_ceremonie",
            QuestionKind::TimeOfDay,
        ),
        Question::new(
            Category::Ceremony,
            "Ceremonie",
            "ceremonie",
            QuestionKind::Choice,
        )
        .with_options(vec![
            ChoiceOption::plain("laique"),
            ChoiceOption::plain("religieuse"),
            ChoiceOption::plain("civile (45 minutes)"),
        ]),
        Question::new(
            Category::Travel(2),
            "Trajet retour",
            "trajet_2",
            QuestionKind::Number,
        ),
        Question::new(
            Category::Travel(3),
            "Trajet vers la seconde preparation",
            "trajet_3",
            QuestionKind::Number,
        )
        .visible_if(dual()),
        Question::new(
            Category::PreparationSecond,
            "Seconde preparation",
            "preparation_2",
            QuestionKind::Fixed,
        )
        .with_duration(30)
        .visible_if(dual()),
        Question::new(
            Category::Travel(4),
            "Trajet vers la seconde ceremonie",
            "trajet_4",
            QuestionKind::Number,
        )
        .visible_if(dual()),
        Question::new(
            Category::CeremonySecond,
            "Heure de la seconde ceremonie",
            "heure_ceremonie_2",
            QuestionKind::TimeOfDay,
        )
        .visible_if(dual()),
        Question::new(
            Category::CeremonySecond,
            "Seconde ceremonie",
            "ceremonie_2",
            QuestionKind::Choice,
        )
        .with_options(vec![
            ChoiceOption::plain("laique"),
            ChoiceOption::plain("religieuse"),
        ])
        .visible_if(dual()),
        Question::new(
            Category::Photos,
            "Photos de groupe",
            "photos",
            QuestionKind::Choice,
        )
        .with_options(vec![ChoiceOption::plain("oui"), ChoiceOption::plain("non")]),
        Question::new(
            Category::Cocktail,
            "Cocktail",
            "cocktail",
            QuestionKind::Choice,
        )
        .with_options(vec![
            ChoiceOption::timed("cocktail simple", 60),
            ChoiceOption::timed("cocktail prolonge", 120),
        ]),
        Question::new(Category::Meal, "Repas", "repas", QuestionKind::Choice).with_options(vec![
            ChoiceOption::timed("repas assis", 180),
            ChoiceOption::timed("buffet", 120),
        ]),
        Question::new(
            Category::EveningParty,
            "Soiree dansante",
            "soiree",
            QuestionKind::Choice,
        )
        .with_options(vec![ChoiceOption::plain("oui"), ChoiceOption::plain("non")]),
    ]
}

/// Produce activity drafts from a questionnaire and its answers.
///
/// Time-of-day questions contribute anchors (pinned starts) for their
/// category instead of activities; control questions contribute nothing.
/// A question whose answer declines the activity is skipped before
/// duration resolution. Unanswered questions are skipped entirely, except
/// `Fixed` ones which always contribute when visible.
pub fn generate_drafts(
    questions: &[Question],
    answers: &AnswerSet,
    wedding_date: Date,
) -> Vec<ActivityDraft> {
    // First pass: per-category anchors from answered time questions.
    let mut anchors: HashMap<Category, jiff::civil::DateTime> = HashMap::new();
    for question in questions {
        if question.kind != QuestionKind::TimeOfDay || !question.is_visible(answers) {
            continue;
        }
        let time = answers
            .get(&question.option_name)
            .and_then(|answer| answer.as_time());
        if let Some(time) = time {
            anchors.insert(question.category, wedding_date.to_datetime(time));
        }
    }

    // Second pass: one draft per visible, answered, non-declined question.
    let mut drafts = Vec::new();
    for question in questions {
        if !question.produces_activity || !question.is_visible(answers) {
            continue;
        }

        let answer = answers.get(&question.option_name);
        let minutes = match answer {
            Some(value) => {
                if value.declines_activity() {
                    debug!("answer for '{}' declines the activity", question.option_name);
                    continue;
                }
                resolve_duration(question, value)
            }
            None if question.kind == QuestionKind::Fixed => {
                resolve_duration(question, &super::answers::AnswerValue::Bool(true))
            }
            None => continue,
        };

        let mut draft = ActivityDraft::new(question.label.clone(), question.category, minutes);
        if let Some(anchor) = anchors.get(&question.category) {
            draft.fixed_start = Some(*anchor);
        }
        drafts.push(draft);
    }

    drafts
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn single_answers() -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers.insert(DUAL_CEREMONY_OPTION, "non");
        answers.insert("coiffure", "coiffure simple");
        answers.insert("maquillage", "maquillage complet");
        answers.insert("heure_ceremonie", "15:00");
        answers.insert("ceremonie", "laique");
        answers.insert("trajet_1", 20);
        answers.insert("photos", "oui");
        answers.insert("cocktail", "cocktail prolonge");
        answers.insert("repas", "repas assis");
        answers.insert("soiree", "non");
        answers
    }

    #[test]
    fn test_schedule_mode_from_answers() {
        assert_eq!(schedule_mode(&single_answers()), ScheduleMode::Single);

        let mut dual = single_answers();
        dual.insert(DUAL_CEREMONY_OPTION, "oui");
        assert_eq!(schedule_mode(&dual), ScheduleMode::Dual);
    }

    #[test]
    fn test_generate_single_ceremony_drafts() {
        let drafts = generate_drafts(
            &default_questionnaire(),
            &single_answers(),
            date(2026, 6, 20),
        );

        // habillage is Fixed and contributes even unanswered; soiree is
        // declined; trajet_2 is unanswered; the dual block is hidden; the
        // control question never contributes.
        let titles: Vec<&str> = drafts.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Coiffure",
                "Maquillage",
                "Habillage",
                "Trajet vers la ceremonie",
                "Ceremonie",
                "Photos de groupe",
                "Cocktail",
                "Repas",
            ]
        );

        let ceremony = drafts.iter().find(|d| d.category == Category::Ceremony).unwrap();
        assert_eq!(
            ceremony.fixed_start,
            Some(date(2026, 6, 20).at(15, 0, 0, 0))
        );
        assert!(ceremony.is_highlight);
        // "laique" has no per-option duration; keyword default applies.
        assert_eq!(ceremony.duration_minutes, 60);

        let coiffure = drafts.iter().find(|d| d.title == "Coiffure").unwrap();
        assert_eq!(coiffure.duration_minutes, 45);

        let travel = drafts.iter().find(|d| d.category == Category::Travel(1)).unwrap();
        assert_eq!(travel.duration_minutes, 20);
        assert!(!travel.is_highlight);

        let cocktail = drafts.iter().find(|d| d.category == Category::Cocktail).unwrap();
        assert_eq!(cocktail.duration_minutes, 120);
    }

    #[test]
    fn test_generate_dual_ceremony_drafts() {
        let mut answers = single_answers();
        answers.insert(DUAL_CEREMONY_OPTION, "oui");
        answers.insert("heure_ceremonie", "11:00");
        answers.insert("heure_ceremonie_2", "16:00");
        answers.insert("ceremonie_2", "religieuse");
        answers.insert("trajet_2", 20);
        answers.insert("trajet_3", 20);
        answers.insert("preparation_2", true);
        answers.insert("trajet_4", 20);

        let drafts = generate_drafts(&default_questionnaire(), &answers, date(2026, 6, 20));

        let first = drafts
            .iter()
            .find(|d| d.category == Category::Ceremony)
            .unwrap();
        let second = drafts
            .iter()
            .find(|d| d.category == Category::CeremonySecond)
            .unwrap();
        assert_eq!(first.fixed_start, Some(date(2026, 6, 20).at(11, 0, 0, 0)));
        assert_eq!(second.fixed_start, Some(date(2026, 6, 20).at(16, 0, 0, 0)));
        assert!(second.is_highlight);

        let legs: Vec<&ActivityDraft> = drafts
            .iter()
            .filter(|d| matches!(d.category, Category::Travel(_)))
            .collect();
        assert_eq!(legs.len(), 4);
    }

    #[test]
    fn test_dual_block_hidden_in_single_mode() {
        let drafts = generate_drafts(
            &default_questionnaire(),
            &single_answers(),
            date(2026, 6, 20),
        );
        assert!(!drafts
            .iter()
            .any(|d| d.category == Category::CeremonySecond
                || d.category == Category::PreparationSecond));
    }

    #[test]
    fn test_declined_answer_produces_no_activity() {
        let mut answers = single_answers();
        answers.insert("photos", "Non");
        answers.insert("trajet_1", 0);

        let drafts = generate_drafts(&default_questionnaire(), &answers, date(2026, 6, 20));
        assert!(!drafts.iter().any(|d| d.category == Category::Photos));
        assert!(!drafts
            .iter()
            .any(|d| matches!(d.category, Category::Travel(_))));
    }
}
