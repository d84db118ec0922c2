//! Duration resolution for questionnaire answers.
//!
//! Resolution order, first hit wins:
//!
//! 1. the question's own fixed duration, when positive;
//! 2. the per-option duration table, matched on the answer's value
//!    (summed over the selection for multi-choice answers);
//! 3. a duration embedded in the raw value as "(N minutes)";
//! 4. a positive numeric answer taken as minutes directly;
//! 5. the keyword default table over the question's option name;
//! 6. 30 minutes.
//!
//! Declined answers never reach this module; the generator drops them
//! first.

use super::answers::AnswerValue;
use super::question::Question;

/// Last-resort duration when nothing else matches, in minutes.
pub const FALLBACK_MINUTES: i64 = 30;

/// Default durations keyed by option-name substrings. Travel ("trajet")
/// is handled separately since its default depends on the leg.
const KEYWORD_DEFAULT_MINUTES: &[(&str, i64)] = &[
    ("coiffure", 60),
    ("maquillage", 45),
    ("habillage", 30),
    ("ceremonie", 60),
    ("cocktail", 90),
    ("repas", 180),
    ("soiree", 240),
    ("photos", 30),
];

/// Resolve the duration in minutes for an answered question.
pub fn resolve_duration(question: &Question, value: &AnswerValue) -> i64 {
    if let Some(minutes) = question.duration_minutes {
        if minutes > 0 {
            return minutes;
        }
    }

    match value {
        AnswerValue::Text(selected) => {
            if let Some(minutes) = option_minutes(question, selected) {
                return minutes;
            }
            if let Some(minutes) = parse_embedded_minutes(selected) {
                return minutes;
            }
        }
        AnswerValue::List(selection) => {
            let total: i64 = selection
                .iter()
                .filter_map(|selected| option_minutes(question, selected))
                .sum();
            if total > 0 {
                return total;
            }
        }
        AnswerValue::Number(minutes) if *minutes > 0 => return *minutes,
        _ => {}
    }

    keyword_default(&question.option_name)
}

/// Duration declared by the option whose value matches the selection.
fn option_minutes(question: &Question, selected: &str) -> Option<i64> {
    question
        .options
        .iter()
        .find(|option| option.value() == selected)
        .and_then(|option| option.minutes())
}

/// Scan a raw value for an embedded "(N minutes)" duration.
fn parse_embedded_minutes(value: &str) -> Option<i64> {
    let mut rest = value;
    while let Some(open) = rest.find('(') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find(')') else {
            return None;
        };
        let inner = tail[..close].trim();
        let number = inner
            .strip_suffix("minutes")
            .or_else(|| inner.strip_suffix("minute"))
            .map(str::trim);
        if let Some(minutes) = number.and_then(|n| n.parse::<i64>().ok()) {
            if minutes > 0 {
                return Some(minutes);
            }
        }
        rest = &tail[close + 1..];
    }
    None
}

/// Default duration from the option name's keywords.
fn keyword_default(option_name: &str) -> i64 {
    let name = option_name.to_lowercase();

    if name.contains("trajet") || name.contains("travel") {
        return travel_default(&name);
    }

    KEYWORD_DEFAULT_MINUTES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, minutes)| *minutes)
        .unwrap_or(FALLBACK_MINUTES)
}

/// Travel legs 1-2 default to 30 minutes, the short hops 3-4 around the
/// second ceremony block to 15.
fn travel_default(name: &str) -> i64 {
    let leg = name
        .chars()
        .rev()
        .find(char::is_ascii_digit)
        .and_then(|digit| digit.to_digit(10));
    match leg {
        Some(leg) if leg >= 3 => 15,
        _ => 30,
    }
}
