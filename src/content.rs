//! Raw content records and their normalization into the canonical shape.
//!
//! The content bank has been authored by several generations of tooling, so
//! stored records disagree on field names, kind tags, and which payload
//! fields exist. Everything permissive lives here: the rest of the crate
//! only ever sees `QuestionKind` and `NormalizedQuestion`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
  MapPoint, MatchingPair, NormalizedQuestion, QuestionKind, TrueFalseItem, DEFAULT_MAP_TOLERANCE,
};

/// Placeholder some authoring tools wrote instead of leaving the text empty.
const MISSING_TEXT_PLACEHOLDER: &str = "Question Text Missing";

/// Substitute prompt for true/false questions without usable display text.
const TRUE_FALSE_INSTRUCTION: &str = "Σημειώστε αν κάθε πρόταση είναι Σωστή (Σ) ή Λάθος (Λ).";

/// Which pipeline asked for normalization. Only `Reading` carries a
/// context-specific display-text rule; the others exist so call sites stay
/// explicit about where an item came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizeContext {
  Theory,
  Reading,
  Listening,
}

/// A content record as stored, shape varying by source collection and age.
/// Unknown fields (titles, audio URLs, passage text, …) are kept in `extra`
/// so lesson records survive a round trip untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawContentItem {
  #[serde(default)]
  pub id: String,
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind_tag: Option<String>,

  // Display text, under whichever name the authoring tool used.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub question: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub question_text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prompt: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instruction: Option<String>,
  #[serde(default, rename = "imageUrl", skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,

  // Choice questions.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  #[serde(default, rename = "optionsA", skip_serializing_if = "Option::is_none")]
  pub options_a: Option<String>,
  #[serde(default, rename = "optionsB", skip_serializing_if = "Option::is_none")]
  pub options_b: Option<String>,
  #[serde(default, rename = "optionsC", skip_serializing_if = "Option::is_none")]
  pub options_c: Option<String>,
  #[serde(default, rename = "optionsD", skip_serializing_if = "Option::is_none")]
  pub options_d: Option<String>,
  #[serde(
    default,
    rename = "correctAnswerIndex",
    alias = "correctIndex",
    skip_serializing_if = "Option::is_none"
  )]
  pub correct_answer_index: Option<i64>,
  #[serde(default, rename = "correctIndices", skip_serializing_if = "Option::is_none")]
  pub correct_indices: Option<Vec<i64>>,

  // True/false questions.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items: Option<Vec<TrueFalseItem>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub statement: Option<String>,
  #[serde(default, rename = "isTrue", skip_serializing_if = "Option::is_none")]
  pub is_true: Option<bool>,
  #[serde(default, rename = "correctAnswer", skip_serializing_if = "Option::is_none")]
  pub correct_answer: Option<String>,

  // Gap-fill questions.
  #[serde(default, rename = "textParts", skip_serializing_if = "Option::is_none")]
  pub text_parts: Option<Vec<String>>,
  #[serde(default, rename = "wordBank", skip_serializing_if = "Option::is_none")]
  pub word_bank: Option<Vec<String>>,
  #[serde(default, rename = "inlineChoices", skip_serializing_if = "Option::is_none")]
  pub inline_choices: Option<Vec<Value>>,
  #[serde(default, rename = "correctAnswers", skip_serializing_if = "Option::is_none")]
  pub correct_answers: Option<Vec<String>>,

  // Matching / map questions.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pairs: Option<Vec<MatchingPair>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub points: Option<Vec<MapPoint>>,
  // Sometimes a number, sometimes a stringified number, sometimes garbage.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tolerance: Option<Value>,

  // Open questions.
  #[serde(default, rename = "modelAnswer", skip_serializing_if = "Option::is_none")]
  pub model_answer: Option<String>,

  // Sequence/difficulty marker; number or stringified number.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub order: Option<Value>,

  // Composite lesson records bundle their sub-questions here.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parts: Option<RawParts>,

  #[serde(flatten)]
  pub extra: serde_json::Map<String, Value>,
}

/// Sub-question arrays of a composite lesson record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawParts {
  #[serde(default, rename = "partA", skip_serializing_if = "Option::is_none")]
  pub part_a: Option<Vec<RawContentItem>>,
  #[serde(default, rename = "partB", skip_serializing_if = "Option::is_none")]
  pub part_b: Option<Vec<RawContentItem>>,
}

impl RawContentItem {
  /// Numeric value of `order`, accepting numbers and numeric strings.
  pub fn order_value(&self) -> Option<f64> {
    match self.order.as_ref()? {
      Value::Number(n) => n.as_f64(),
      Value::String(s) => s.trim().parse::<f64>().ok(),
      _ => None,
    }
  }

  /// True for the designated introductory lesson marker (`order` of 0).
  pub fn order_is_zero(&self) -> bool {
    self.order_value() == Some(0.0)
  }
}

/// Map a record onto the closed kind set.
///
/// A `correctIndices` array always wins: legacy tooling wrote multi-answer
/// questions with single-choice tags. A tag that already is a canonical
/// name decodes directly; anything else goes through the substring rules
/// that accumulated around the old free-form tags, and whatever is left
/// counts as SINGLE.
pub fn resolve_kind(raw: &RawContentItem) -> QuestionKind {
  if raw.correct_indices.is_some() {
    return QuestionKind::Multi;
  }
  let tag = raw
    .kind_tag
    .as_deref()
    .map(|t| t.trim().to_uppercase())
    .filter(|t| !t.is_empty())
    .unwrap_or_else(|| "SINGLE".to_string());

  match tag.as_str() {
    "SINGLE" => QuestionKind::Single,
    "MULTI" => QuestionKind::Multi,
    "TRUE_FALSE" => QuestionKind::TrueFalse,
    "FILL_GAP" => QuestionKind::FillGap,
    "MATCHING" => QuestionKind::Matching,
    "MAP" => QuestionKind::Map,
    "OPEN" => QuestionKind::Open,
    other => legacy_kind(other),
  }
}

// Precedence of these rules is load-bearing: e.g. "MULTIPLE_TRUE" was a
// single-choice tag in the oldest bank exports.
fn legacy_kind(tag: &str) -> QuestionKind {
  if tag.contains("MULTIPLE") || tag.contains("CHOICE") {
    QuestionKind::Single
  } else if tag.contains("TRUE") {
    QuestionKind::TrueFalse
  } else if tag.contains("FILL") || tag.contains("INLINE") || tag.contains("TEXT") {
    QuestionKind::FillGap
  } else if tag.contains("MATCH") {
    QuestionKind::Matching
  } else if tag.contains("MAP") {
    QuestionKind::Map
  } else if tag.contains("OPEN") || tag.contains("SHORT") {
    QuestionKind::Open
  } else {
    QuestionKind::Single
  }
}

/// Normalize one stored record into the canonical shape.
pub fn normalize_question(raw: &RawContentItem, ctx: NormalizeContext) -> NormalizedQuestion {
  normalize_question_as(raw, ctx, None)
}

/// Like [`normalize_question`], but with the resolved kind overridden.
/// Listening lessons don't reliably tag their sub-questions, so the
/// assembler forces part A to SINGLE and part B to TRUE_FALSE.
pub fn normalize_question_as(
  raw: &RawContentItem,
  ctx: NormalizeContext,
  forced: Option<QuestionKind>,
) -> NormalizedQuestion {
  let kind = forced.unwrap_or_else(|| resolve_kind(raw));

  let mut question = first_non_empty(&[&raw.question, &raw.question_text, &raw.prompt, &raw.text]);
  let mut text_parts = raw.text_parts.clone().unwrap_or_default();

  // Reading gap-fill items store "<prompt> -> <gap text>" in one field.
  if ctx == NormalizeContext::Reading && kind == QuestionKind::FillGap {
    let instruction = raw
      .instruction
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty());
    let split = question
      .split_once("->")
      .map(|(left, right)| (left.trim().to_string(), right.trim().to_string()));
    if let Some((prompt, gap_text)) = split {
      question = match instruction {
        Some(instr) => format!("{} «{}»", instr, prompt),
        None => format!("«{}»", prompt),
      };
      text_parts = vec![gap_text];
    } else {
      if text_parts.is_empty() && !question.is_empty() {
        text_parts = vec![question.clone()];
      }
      if let Some(instr) = instruction {
        question = instr.to_string();
      }
    }
  }

  if kind == QuestionKind::TrueFalse
    && (question.trim().is_empty() || question == MISSING_TEXT_PLACEHOLDER)
  {
    question = TRUE_FALSE_INSTRUCTION.to_string();
  }

  let options = match &raw.options {
    Some(o) if !o.is_empty() => o.clone(),
    _ if kind == QuestionKind::Single => legacy_options(raw),
    _ => Vec::new(),
  };

  let items = match &raw.items {
    Some(items) => items.clone(),
    None if kind == QuestionKind::TrueFalse => synthesized_items(raw),
    None => Vec::new(),
  };

  let tolerance = raw
    .tolerance
    .as_ref()
    .and_then(Value::as_f64)
    .filter(|t| *t > 0.0)
    .unwrap_or(DEFAULT_MAP_TOLERANCE);

  NormalizedQuestion {
    id: raw.id.clone(),
    kind,
    category: None,
    question,
    image_url: raw.image_url.clone(),

    options,
    correct_index: raw
      .correct_answer_index
      .filter(|i| *i >= 0)
      .map(|i| i as usize)
      .unwrap_or(0),
    correct_indices: raw
      .correct_indices
      .iter()
      .flatten()
      .filter(|i| **i >= 0)
      .map(|i| *i as usize)
      .collect(),

    items,

    text_parts,
    word_bank: raw.word_bank.clone().unwrap_or_default(),
    inline_choices: raw.inline_choices.clone().unwrap_or_default(),
    correct_answers: raw.correct_answers.clone().unwrap_or_default(),

    pairs: raw.pairs.clone().unwrap_or_default(),

    points: raw.points.clone().unwrap_or_default(),
    tolerance,

    model_answer: raw.model_answer.clone().unwrap_or_default(),
  }
}

fn first_non_empty(candidates: &[&Option<String>]) -> String {
  candidates
    .iter()
    .filter_map(|c| c.as_deref())
    .find(|s| !s.trim().is_empty())
    .unwrap_or_default()
    .to_string()
}

// The oldest bank exports spread the four choices over optionsA..optionsD.
fn legacy_options(raw: &RawContentItem) -> Vec<String> {
  let legacy = [&raw.options_a, &raw.options_b, &raw.options_c, &raw.options_d];
  if legacy.iter().all(|o| o.is_none()) {
    return Vec::new();
  }
  legacy
    .into_iter()
    .map(|o| o.clone().unwrap_or_default())
    .collect()
}

fn synthesized_items(raw: &RawContentItem) -> Vec<TrueFalseItem> {
  let statement = match raw.statement.as_deref().filter(|s| !s.trim().is_empty()) {
    Some(s) => s.to_string(),
    None => return Vec::new(),
  };
  // "Σ" (Σωστό) marks a true statement in the legacy single-statement shape.
  let is_true = raw
    .is_true
    .unwrap_or_else(|| raw.correct_answer.as_deref() == Some("Σ"));
  vec![TrueFalseItem { statement, is_true }]
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn raw(value: Value) -> RawContentItem {
    serde_json::from_value(value).expect("raw item")
  }

  #[test]
  fn missing_kind_tag_resolves_to_single() {
    let item = raw(json!({ "id": "q1", "question": "Ποιο είναι το εθνικό νόμισμα;" }));
    assert_eq!(resolve_kind(&item), QuestionKind::Single);
  }

  #[test]
  fn correct_indices_override_any_tag() {
    let item = raw(json!({
      "id": "q2",
      "type": "SINGLE",
      "question": "Επιλέξτε όσα ισχύουν.",
      "correctIndices": [0, 2]
    }));
    assert_eq!(resolve_kind(&item), QuestionKind::Multi);
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert_eq!(q.kind, QuestionKind::Multi);
    assert_eq!(q.correct_indices, vec![0, 2]);
  }

  #[test]
  fn legacy_tags_map_through_substring_rules() {
    for (tag, expected) in [
      ("multiple_choice", QuestionKind::Single),
      ("TRUE-FALSE-OLD", QuestionKind::TrueFalse),
      ("inline_text", QuestionKind::FillGap),
      ("map_click", QuestionKind::Map),
      ("matching_pairs", QuestionKind::Matching),
      ("short_answer", QuestionKind::Open),
      ("κάτι άλλο", QuestionKind::Single),
    ] {
      let item = raw(json!({ "id": "q", "type": tag }));
      assert_eq!(resolve_kind(&item), expected, "tag {tag}");
    }
  }

  #[test]
  fn map_defaults_are_always_defined() {
    let item = raw(json!({ "id": "m1", "type": "MAP", "question": "Βρείτε την Κρήτη", "tolerance": "πολύ" }));
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert!(q.points.is_empty());
    assert_eq!(q.tolerance, 30.0);

    let item = raw(json!({ "id": "m2", "type": "MAP", "question": "x", "tolerance": 12 }));
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert_eq!(q.tolerance, 12.0);
  }

  #[test]
  fn matching_pairs_default_to_empty() {
    let item = raw(json!({ "id": "p1", "type": "MATCHING", "question": "Αντιστοιχίστε" }));
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert!(q.pairs.is_empty());
  }

  #[test]
  fn legacy_option_fields_synthesize_a_choice_list() {
    let item = raw(json!({
      "id": "q3",
      "question_text": "Πρωτεύουσα της Ελλάδας;",
      "optionsA": "Αθήνα",
      "optionsB": "Θεσσαλονίκη",
      "optionsC": "Πάτρα",
      "correctAnswerIndex": 0
    }));
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert_eq!(q.kind, QuestionKind::Single);
    assert_eq!(q.options, vec!["Αθήνα", "Θεσσαλονίκη", "Πάτρα", ""]);
    assert_eq!(q.correct_index, 0);
  }

  #[test]
  fn single_statement_true_false_synthesizes_one_item() {
    let item = raw(json!({
      "id": "tf1",
      "type": "TRUE_FALSE",
      "statement": "Η Ελλάδα έχει 13 περιφέρειες.",
      "correctAnswer": "Σ"
    }));
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert_eq!(q.items.len(), 1);
    assert!(q.items[0].is_true);
    assert_eq!(q.question, TRUE_FALSE_INSTRUCTION);
  }

  #[test]
  fn true_false_placeholder_text_is_replaced() {
    let item = raw(json!({
      "id": "tf2",
      "type": "TRUE_FALSE",
      "question": "Question Text Missing",
      "items": [{ "statement": "Ο Όλυμπος είναι το ψηλότερο βουνό.", "isTrue": true }]
    }));
    let q = normalize_question(&item, NormalizeContext::Theory);
    assert_eq!(q.question, TRUE_FALSE_INSTRUCTION);
    assert_eq!(q.items.len(), 1);
  }

  #[test]
  fn reading_gap_text_splits_on_arrow() {
    let item = raw(json!({
      "id": "g1",
      "type": "FILL_GAP",
      "text": "instruction text -> the gap answer"
    }));
    let q = normalize_question(&item, NormalizeContext::Reading);
    assert!(q.question.contains("instruction text"), "question: {}", q.question);
    assert_eq!(q.text_parts, vec!["the gap answer"]);
  }

  #[test]
  fn reading_gap_without_arrow_uses_instruction_as_prompt() {
    let item = raw(json!({
      "id": "g2",
      "type": "FILL_GAP",
      "text": "Συμπληρώστε το κενό",
      "instruction": "Διαβάστε την παράγραφο."
    }));
    let q = normalize_question(&item, NormalizeContext::Reading);
    assert_eq!(q.question, "Διαβάστε την παράγραφο.");
    assert_eq!(q.text_parts, vec!["Συμπληρώστε το κενό"]);
  }

  #[test]
  fn normalization_is_idempotent() {
    let original = raw(json!({
      "id": "g1",
      "type": "FILL_GAP",
      "text": "instruction text -> the gap answer",
      "wordBank": ["α", "β"]
    }));
    let once = normalize_question(&original, NormalizeContext::Reading);
    let reparsed: RawContentItem =
      serde_json::from_value(serde_json::to_value(&once).expect("to json")).expect("from json");
    let twice = normalize_question(&reparsed, NormalizeContext::Reading);

    assert_eq!(once.kind, twice.kind);
    assert_eq!(once.question, twice.question);
    assert_eq!(once.text_parts, twice.text_parts);
    assert_eq!(once.word_bank, twice.word_bank);
    assert_eq!(once.correct_index, twice.correct_index);
  }

  #[test]
  fn forced_kind_wins_over_stored_tag() {
    let item = raw(json!({
      "id": "l1",
      "type": "FILL_GAP",
      "question": "Τι άκουσες;",
      "options": ["ναι", "όχι"]
    }));
    let q = normalize_question_as(&item, NormalizeContext::Listening, Some(QuestionKind::Single));
    assert_eq!(q.kind, QuestionKind::Single);
    assert_eq!(q.options, vec!["ναι", "όχι"]);
  }
}
