//! Exam assembly: fetch the seven content collections, sample a diversified
//! theory set under fixed per-topic quotas, and pick one lesson per language
//! skill. The package is built fresh per request and never cached.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::content::{
  normalize_question, normalize_question_as, NormalizeContext, RawContentItem,
};
use crate::domain::{Category, ExamPackage, NormalizedQuestion, QuestionKind, SkillSection, SpeakingSection};
use crate::sampling::select_diverse;
use crate::store::{Collection, ContentError, ContentStore};

pub const THEORY_HISTORY_COUNT: usize = 6;
pub const THEORY_POLITICS_COUNT: usize = 6;
pub const THEORY_CULTURE_COUNT: usize = 4;
pub const THEORY_GEO_EASY_COUNT: usize = 2;
pub const THEORY_GEO_HARD_COUNT: usize = 2;

/// Geography difficulty bands by the `order` field: easy runs up to 50,
/// hard from there up to 70. Items above 70 or without an order belong to
/// neither band and never reach the theory set.
const GEO_EASY_MAX_ORDER: f64 = 50.0;
const GEO_HARD_MAX_ORDER: f64 = 70.0;

/// Reserved id of the introductory speaking lesson.
const SPEAKING_INTRO_ID: &str = "lesson_0";

/// Assemble one exam package.
///
/// The seven collection reads are issued concurrently and awaited jointly;
/// a failed fetch aborts the whole assembly. Empty pools produce short or
/// empty sections, never an error.
#[instrument(level = "info", skip(store, rng))]
pub async fn generate_exam<R: Rng>(
  store: &ContentStore,
  rng: &mut R,
) -> Result<ExamPackage, ContentError> {
  let (history, politics, culture, geography, reading, listening, speaking) = tokio::try_join!(
    store.fetch(Collection::HistoryQuestions),
    store.fetch(Collection::PoliticsQuestions),
    store.fetch(Collection::CultureQuestions),
    store.fetch(Collection::GeographyQuestions),
    store.fetch(Collection::ReadingLessons),
    store.fetch(Collection::ListeningLessons),
    store.fetch(Collection::SpeakingLessons),
  )?;

  let (geo_easy, geo_hard, geo_excluded) = split_geography(&geography);
  if geo_excluded > 0 {
    debug!(target: "exam", excluded = geo_excluded, "Geography items outside both difficulty bands");
  }

  let mut theory = Vec::with_capacity(
    THEORY_HISTORY_COUNT
      + THEORY_POLITICS_COUNT
      + THEORY_CULTURE_COUNT
      + THEORY_GEO_EASY_COUNT
      + THEORY_GEO_HARD_COUNT,
  );
  push_theory(&mut theory, &history, THEORY_HISTORY_COUNT, Category::History, rng);
  push_theory(&mut theory, &politics, THEORY_POLITICS_COUNT, Category::Politics, rng);
  push_theory(&mut theory, &culture, THEORY_CULTURE_COUNT, Category::Culture, rng);
  push_theory(&mut theory, &geo_easy, THEORY_GEO_EASY_COUNT, Category::GeographyEasy, rng);
  push_theory(&mut theory, &geo_hard, THEORY_GEO_HARD_COUNT, Category::GeographyHard, rng);

  let reading = pick_lesson_section(&reading, NormalizeContext::Reading, None, None, rng);
  // Listening sub-questions don't reliably tag their kind; part A is always
  // a choice list and part B always true/false, so force both.
  let listening = pick_lesson_section(
    &listening,
    NormalizeContext::Listening,
    Some(QuestionKind::Single),
    Some(QuestionKind::TrueFalse),
    rng,
  );
  let speaking = pick_speaking(&speaking, rng);

  info!(
    target: "exam",
    theory = theory.len(),
    has_reading = reading.data.is_some(),
    has_listening = listening.data.is_some(),
    has_speaking = speaking.lesson_zero.is_some(),
    "Exam package assembled"
  );

  Ok(ExamPackage {
    theory,
    reading,
    listening,
    speaking,
  })
}

fn split_geography(pool: &[RawContentItem]) -> (Vec<RawContentItem>, Vec<RawContentItem>, usize) {
  let mut easy = Vec::new();
  let mut hard = Vec::new();
  let mut excluded = 0usize;
  for item in pool {
    match item.order_value() {
      Some(order) if order <= GEO_EASY_MAX_ORDER => easy.push(item.clone()),
      Some(order) if order <= GEO_HARD_MAX_ORDER => hard.push(item.clone()),
      _ => excluded += 1,
    }
  }
  (easy, hard, excluded)
}

fn push_theory<R: Rng>(
  out: &mut Vec<NormalizedQuestion>,
  pool: &[RawContentItem],
  quota: usize,
  category: Category,
  rng: &mut R,
) {
  for item in select_diverse(pool, quota, rng) {
    let mut question = normalize_question(&item, NormalizeContext::Theory);
    question.category = Some(category);
    out.push(question);
  }
}

fn pick_lesson_section<R: Rng>(
  pool: &[RawContentItem],
  ctx: NormalizeContext,
  force_a: Option<QuestionKind>,
  force_b: Option<QuestionKind>,
  rng: &mut R,
) -> SkillSection {
  let data = pool.choose(rng).cloned();
  let (part_a, part_b) = match &data {
    Some(lesson) => (
      normalize_part(lesson, |p| p.part_a.as_ref(), ctx, force_a),
      normalize_part(lesson, |p| p.part_b.as_ref(), ctx, force_b),
    ),
    None => (Vec::new(), Vec::new()),
  };
  SkillSection { data, part_a, part_b }
}

fn normalize_part<'a>(
  lesson: &'a RawContentItem,
  select: impl Fn(&'a crate::content::RawParts) -> Option<&'a Vec<RawContentItem>>,
  ctx: NormalizeContext,
  force: Option<QuestionKind>,
) -> Vec<NormalizedQuestion> {
  lesson
    .parts
    .as_ref()
    .and_then(select)
    .map(|items| {
      items
        .iter()
        .map(|item| normalize_question_as(item, ctx, force))
        .collect()
    })
    .unwrap_or_default()
}

fn pick_speaking<R: Rng>(pool: &[RawContentItem], rng: &mut R) -> SpeakingSection {
  let lesson_zero = pool
    .iter()
    .find(|l| l.order_is_zero() || l.id == SPEAKING_INTRO_ID)
    .or_else(|| pool.first())
    .cloned();
  let zero_id = lesson_zero.as_ref().map(|l| l.id.clone());
  let remainder: Vec<&RawContentItem> = pool
    .iter()
    .filter(|l| Some(&l.id) != zero_id.as_ref())
    .collect();
  let lesson_random = remainder.choose(rng).map(|l| (*l).clone());
  SpeakingSection {
    lesson_zero,
    lesson_random,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use serde_json::json;

  fn question(id: &str, tag: &str) -> RawContentItem {
    serde_json::from_value(json!({
      "id": id,
      "type": tag,
      "question": format!("Ερώτηση {id}"),
      "options": ["α", "β", "γ", "δ"],
      "correctAnswerIndex": 0
    }))
    .expect("raw item")
  }

  fn bank(prefix: &str, n: usize) -> Vec<RawContentItem> {
    (0..n).map(|i| question(&format!("{prefix}{i}"), "SINGLE")).collect()
  }

  async fn store_with_theory() -> ContentStore {
    let store = ContentStore::empty();
    store.insert(Collection::HistoryQuestions, bank("h", 10)).await;
    store.insert(Collection::PoliticsQuestions, bank("p", 10)).await;
    store.insert(Collection::CultureQuestions, bank("c", 10)).await;
    // Orders 5, 10, …, 100: ten in the easy band, four in the hard band,
    // six in neither.
    let geography: Vec<RawContentItem> = (1..=20)
      .map(|i| {
        serde_json::from_value(json!({
          "id": format!("g{i}"),
          "type": "SINGLE",
          "question": "Γεωγραφία",
          "order": i * 5
        }))
        .expect("raw item")
      })
      .collect();
    store.insert(Collection::GeographyQuestions, geography).await;
    store
  }

  #[tokio::test]
  async fn theory_quotas_hold() {
    let store = store_with_theory().await;
    let mut rng = StdRng::seed_from_u64(11);
    let package = generate_exam(&store, &mut rng).await.expect("package");

    assert_eq!(package.theory.len(), 20);
    let count = |cat: Category| package.theory.iter().filter(|q| q.category == Some(cat)).count();
    assert_eq!(count(Category::History), 6);
    assert_eq!(count(Category::Politics), 6);
    assert_eq!(count(Category::Culture), 4);
    assert_eq!(count(Category::GeographyEasy), 2);
    assert_eq!(count(Category::GeographyHard), 2);
  }

  #[tokio::test]
  async fn geography_bands_respect_order_thresholds() {
    let store = store_with_theory().await;
    let mut rng = StdRng::seed_from_u64(3);
    let package = generate_exam(&store, &mut rng).await.expect("package");

    let geography = store.fetch(Collection::GeographyQuestions).await.expect("pool");
    let order_of = |id: &str| {
      geography
        .iter()
        .find(|g| g.id == id)
        .and_then(RawContentItem::order_value)
        .expect("order")
    };
    for q in &package.theory {
      match q.category {
        Some(Category::GeographyEasy) => assert!(order_of(&q.id) <= 50.0),
        Some(Category::GeographyHard) => {
          let order = order_of(&q.id);
          assert!(order > 50.0 && order <= 70.0);
        }
        _ => {}
      }
    }
  }

  #[tokio::test]
  async fn empty_lesson_pools_produce_empty_sections() {
    let store = ContentStore::empty();
    let mut rng = StdRng::seed_from_u64(5);
    let package = generate_exam(&store, &mut rng).await.expect("package");

    assert!(package.reading.data.is_none());
    assert!(package.reading.part_a.is_empty());
    assert!(package.reading.part_b.is_empty());
    assert!(package.speaking.lesson_zero.is_none());
    assert!(package.speaking.lesson_random.is_none());
  }

  #[tokio::test]
  async fn speaking_intro_is_stable_and_random_pick_excludes_it() {
    let store = ContentStore::empty();
    let mut lessons = vec![serde_json::from_value::<RawContentItem>(json!({
      "id": "s-intro",
      "order": 0,
      "title": "Γνωριμία"
    }))
    .expect("raw item")];
    for i in 1..=4 {
      lessons.push(
        serde_json::from_value(json!({ "id": format!("s{i}"), "order": i * 10 })).expect("raw item"),
      );
    }
    store.insert(Collection::SpeakingLessons, lessons).await;

    for seed in 0..25 {
      let mut rng = StdRng::seed_from_u64(seed);
      let package = generate_exam(&store, &mut rng).await.expect("package");
      let zero = package.speaking.lesson_zero.expect("intro lesson");
      assert_eq!(zero.id, "s-intro");
      let random = package.speaking.lesson_random.expect("random lesson");
      assert_ne!(random.id, zero.id);
    }
  }

  #[tokio::test]
  async fn listening_parts_are_forced_to_fixed_kinds() {
    let store = ContentStore::empty();
    let lesson: RawContentItem = serde_json::from_value(json!({
      "id": "l1",
      "audioUrl": "https://cdn.example/lessons/l1.mp3",
      "parts": {
        "partA": [
          { "id": "l1a1", "question": "Πού πηγαίνει η Μαρία;", "options": ["σχολείο", "αγορά"] },
          { "id": "l1a2", "type": "FILL_GAP", "question": "Τι ώρα φτάνει;" }
        ],
        "partB": [
          { "id": "l1b1", "statement": "Η Μαρία ταξιδεύει με τρένο.", "correctAnswer": "Σ" }
        ]
      }
    }))
    .expect("raw lesson");
    store.insert(Collection::ListeningLessons, vec![lesson]).await;

    let mut rng = StdRng::seed_from_u64(1);
    let package = generate_exam(&store, &mut rng).await.expect("package");

    assert!(package.listening.part_a.iter().all(|q| q.kind == QuestionKind::Single));
    assert!(package.listening.part_b.iter().all(|q| q.kind == QuestionKind::TrueFalse));
    let tf = &package.listening.part_b[0];
    assert_eq!(tf.items.len(), 1);
    assert!(tf.items[0].is_true);
  }
}
