use anyhow::{Context, Result};
use serde_json::Value;

use crate::model::stats::{StatDelta, StatKey};
use crate::model::turn::{Choice, ChoiceKind, EndingKind, TurnData};

/// The narrator never offers more than three moves; extras are dropped.
const MAX_CHOICES: usize = 3;

/// Decode a raw narrator reply. A reply that is not JSON at all is a
/// transport-class failure and bubbles up so the caller can substitute
/// the fallback turn; anything that parses is normalized field by field
/// and can never fail.
pub fn decode_turn(raw: &str) -> Result<TurnData> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .context("narrator reply is not valid JSON")?;
    Ok(turn_from_value(&value))
}

/// Total: every field is defaulted independently when absent or of the
/// wrong type. The narrator is an untrusted generator; its output must
/// never crash the engine.
pub fn turn_from_value(value: &Value) -> TurnData {
    let next = value.get("nextMonth");

    TurnData {
        month: next
            .and_then(|n| n.get("month"))
            .and_then(int_value)
            .unwrap_or(1),
        title: next
            .and_then(|n| n.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string(),
        description: next
            .and_then(|n| n.get("description"))
            .and_then(Value::as_str)
            .unwrap_or("Something glitched in the simulation...")
            .to_string(),
        stats_change: delta_from_value(value.get("statsChange")),
        outcome_text: value
            .get("outcomeText")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        choices: choices_from_value(next.and_then(|n| n.get("choices"))),
        is_game_over: value.get("isGameOver").map(bool_value).unwrap_or(false),
        ending: value
            .get("endingType")
            .and_then(Value::as_str)
            .and_then(EndingKind::parse),
    }
}

/// The fixed turn substituted when the narrator is unreachable or its
/// reply is unparseable. Keeps the session alive with a single safe move.
pub fn fallback_turn(month: i32) -> TurnData {
    TurnData {
        month,
        title: "Server Down".to_string(),
        description: "The narrator is not responding (the GPUs may be on \
                      fire). Try again shortly..."
            .to_string(),
        stats_change: StatDelta::new(),
        outcome_text: String::new(),
        choices: vec![Choice {
            id: "wait".to_string(),
            text: "Wait it out".to_string(),
            kind: Some(ChoiceKind::Safe),
        }],
        is_game_over: false,
        ending: None,
    }
}

fn delta_from_value(value: Option<&Value>) -> StatDelta {
    let mut delta = StatDelta::new();
    let Some(Value::Object(map)) = value else {
        return delta;
    };
    for (name, raw) in map {
        let Some(key) = StatKey::parse(name) else {
            continue;
        };
        if let Some(amount) = int_value(raw) {
            delta.set(key, amount);
        }
    }
    delta
}

fn choices_from_value(value: Option<&Value>) -> Vec<Choice> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let text = item.get("text")?.as_str()?.trim();
            if text.is_empty() {
                return None;
            }
            let id = match item.get("id") {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => (i + 1).to_string(),
            };
            Some(Choice {
                id,
                text: text.to_string(),
                kind: item
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(ChoiceKind::parse),
            })
        })
        .take(MAX_CHOICES)
        .collect()
}

/// Integers pass through; fractional numbers are floored so stat math
/// stays integral.
fn int_value(value: &Value) -> Option<i32> {
    if let Some(i) = value.as_i64() {
        return Some(i.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }
    value
        .as_f64()
        .map(|f| f.floor().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

fn bool_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Models love wrapping JSON in markdown fences despite instructions.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_reply_decodes() {
        let raw = json!({
            "outcomeText": "The demo went viral.",
            "statsChange": { "cash": -200, "traction": 30 },
            "isGameOver": false,
            "endingType": null,
            "nextMonth": {
                "month": 4,
                "title": "The Clone Wars",
                "description": "A rival shipped your roadmap.",
                "choices": [
                    { "id": "1", "text": "Cut prices", "type": "safe" },
                    { "id": "2", "text": "Sue them", "type": "risky" },
                    { "id": "3", "text": "Pivot to hardware", "type": "wild" }
                ]
            }
        })
        .to_string();

        let turn = decode_turn(&raw).unwrap();
        assert_eq!(turn.month, 4);
        assert_eq!(turn.title, "The Clone Wars");
        assert_eq!(turn.stats_change.get(StatKey::Cash), Some(-200));
        assert_eq!(turn.stats_change.get(StatKey::Traction), Some(30));
        assert_eq!(turn.choices.len(), 3);
        assert_eq!(turn.choices[1].kind, Some(ChoiceKind::Risky));
        assert!(!turn.is_game_over);
        assert_eq!(turn.ending, None);
    }

    #[test]
    fn empty_object_yields_placeholder_turn() {
        let turn = decode_turn("{}").unwrap();
        assert_eq!(turn.month, 1);
        assert_eq!(turn.title, "Unknown error");
        assert!(turn.stats_change.is_empty());
        assert_eq!(turn.outcome_text, "");
        assert!(turn.choices.is_empty());
        assert!(!turn.is_game_over);
        assert_eq!(turn.ending, None);
    }

    #[test]
    fn every_field_is_independently_defaulted() {
        let raw = json!({
            "outcomeText": 42,
            "statsChange": "broke",
            "isGameOver": "yes",
            "endingType": "rapture",
            "nextMonth": {
                "month": "soon",
                "title": null,
                "choices": { "not": "an array" }
            }
        })
        .to_string();

        let turn = decode_turn(&raw).unwrap();
        assert_eq!(turn.month, 1);
        assert_eq!(turn.title, "Unknown error");
        assert_eq!(turn.outcome_text, "");
        assert!(turn.stats_change.is_empty());
        assert!(turn.choices.is_empty());
        assert!(!turn.is_game_over);
        assert_eq!(turn.ending, None);
    }

    #[test]
    fn unknown_delta_keys_are_dropped_and_floats_floored() {
        let raw = json!({
            "statsChange": {
                "cash": -10.7,
                "valuation": 9000,
                "stress": "lots",
                "team": 3
            }
        })
        .to_string();

        let turn = decode_turn(&raw).unwrap();
        assert_eq!(turn.stats_change.get(StatKey::Cash), Some(-11));
        assert_eq!(turn.stats_change.get(StatKey::Team), Some(3));
        assert_eq!(turn.stats_change.get(StatKey::Stress), None);
    }

    #[test]
    fn choices_are_capped_at_three_and_blank_ones_skipped() {
        let raw = json!({
            "nextMonth": {
                "choices": [
                    { "text": "  " },
                    { "text": "a" },
                    { "id": 2, "text": "b" },
                    { "text": "c", "type": "bold" },
                    { "text": "d" }
                ]
            }
        })
        .to_string();

        let turn = decode_turn(&raw).unwrap();
        let texts: Vec<_> = turn.choices.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
        // Missing ids fall back to the 1-based position.
        assert_eq!(turn.choices[0].id, "2");
        assert_eq!(turn.choices[1].id, "2");
        assert_eq!(turn.choices[2].kind, None);
    }

    #[test]
    fn fenced_json_is_accepted() {
        let raw = "```json\n{\"isGameOver\": true, \"endingType\": \"unicorn\"}\n```";
        let turn = decode_turn(raw).unwrap();
        assert!(turn.is_game_over);
        assert_eq!(turn.ending, Some(EndingKind::Unicorn));
    }

    #[test]
    fn non_json_reply_is_an_error() {
        assert!(decode_turn("I am afraid I can't do that.").is_err());
        assert!(decode_turn("").is_err());
    }

    #[test]
    fn fallback_turn_keeps_the_session_alive() {
        let turn = fallback_turn(7);
        assert_eq!(turn.month, 7);
        assert!(!turn.is_game_over);
        assert!(turn.stats_change.is_empty());
        assert_eq!(turn.choices.len(), 1);
        assert_eq!(turn.choices[0].id, "wait");
    }
}
