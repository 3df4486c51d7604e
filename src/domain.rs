//! Domain models used by the backend: question kinds, normalized questions,
//! theory categories, and the assembled exam package.

use serde::{Deserialize, Serialize};

use crate::content::RawContentItem;

/// Default click radius (in image-coordinate units) for map questions that
/// don't carry their own tolerance.
pub const DEFAULT_MAP_TOLERANCE: f64 = 30.0;

/// The closed set of question shapes the exam runner understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
  /// One option list, one correct index.
  Single,
  /// One option list, several correct indices.
  Multi,
  /// A list of statements, each true or false ("Σ"/"Λ").
  TrueFalse,
  /// Gap-fill text with a word bank and/or inline choices.
  FillGap,
  /// Match left entries to right entries.
  Matching,
  /// Click targets on a map image.
  Map,
  /// Free-text answer graded against a model answer.
  Open,
}
impl Default for QuestionKind {
  fn default() -> Self { QuestionKind::Single }
}

/// Theory topic label attached to assembled theory questions.
/// Geography is split into two difficulty bands by the `order` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  History,
  Politics,
  Culture,
  GeographyEasy,
  GeographyHard,
}

/// One true/false statement inside a TRUE_FALSE question.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseItem {
  #[serde(default)] pub statement: String,
  #[serde(default)] pub is_true: bool,
}

/// One left/right pair inside a MATCHING question.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatchingPair {
  #[serde(default)] pub left: String,
  #[serde(default)] pub right: String,
}

/// One click target inside a MAP question.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapPoint {
  #[serde(default)] pub x: f64,
  #[serde(default)] pub y: f64,
  #[serde(default)] pub label: String,
}

/// Canonical in-memory question shape. Stored records come in many legacy
/// variants; after normalization every field the runner reads for the
/// resolved kind is present and type-correct. Array payloads irrelevant to
/// the kind stay as empty (but defined) containers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuestion {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: QuestionKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<Category>,
  pub question: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,

  // SINGLE / MULTI
  #[serde(default)] pub options: Vec<String>,
  #[serde(default)] pub correct_index: usize,
  // Present only when non-empty: a defined-but-empty list would read back
  // as a multi-answer marker.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub correct_indices: Vec<usize>,

  // TRUE_FALSE
  #[serde(default)] pub items: Vec<TrueFalseItem>,

  // FILL_GAP
  #[serde(default)] pub text_parts: Vec<String>,
  #[serde(default)] pub word_bank: Vec<String>,
  #[serde(default)] pub inline_choices: Vec<serde_json::Value>,
  #[serde(default)] pub correct_answers: Vec<String>,

  // MATCHING
  #[serde(default)] pub pairs: Vec<MatchingPair>,

  // MAP
  #[serde(default)] pub points: Vec<MapPoint>,
  #[serde(default = "default_tolerance")] pub tolerance: f64,

  // OPEN
  #[serde(default)] pub model_answer: String,
}

fn default_tolerance() -> f64 { DEFAULT_MAP_TOLERANCE }

/// Reading/listening section of an exam: the chosen source lesson record
/// plus its two normalized sub-question sequences. All three stay empty
/// when the lesson pool is empty.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSection {
  pub data: Option<RawContentItem>,
  pub part_a: Vec<NormalizedQuestion>,
  pub part_b: Vec<NormalizedQuestion>,
}

/// Speaking section: the designated introductory lesson and one random
/// lesson drawn from the rest of the pool.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingSection {
  pub lesson_zero: Option<RawContentItem>,
  pub lesson_random: Option<RawContentItem>,
}

/// The assembled exam, built fresh per request and never persisted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExamPackage {
  pub theory: Vec<NormalizedQuestion>,
  pub reading: SkillSection,
  pub listening: SkillSection,
  pub speaking: SpeakingSection,
}
