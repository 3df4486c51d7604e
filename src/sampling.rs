//! Diversity-aware random sampling over one content pool.
//!
//! The theory section reads badly when five matching grids land in a row, so
//! selection is biased against runs of one question shape without promising
//! a strict balance. The randomness source is injected; request handlers
//! seed it from entropy and tests pin it.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::{resolve_kind, RawContentItem};
use crate::domain::QuestionKind;

/// Soft cap on items of one resolved kind inside a selection.
pub const MAX_PER_KIND: usize = 2;

/// Pick up to `count` distinct items from `pool`, preferring shape variety.
///
/// Uniformly shuffles the pool, then greedily takes items while each kind
/// stays under [`MAX_PER_KIND`]; if the cap leaves the selection short, the
/// remainder is filled from the still-unselected items in shuffle order.
/// A pool smaller than `count` is returned whole (shuffled) — callers must
/// tolerate short results.
pub fn select_diverse<R: Rng>(pool: &[RawContentItem], count: usize, rng: &mut R) -> Vec<RawContentItem> {
  let mut shuffled: Vec<RawContentItem> = pool.to_vec();
  shuffled.shuffle(rng);

  let target = count.min(shuffled.len());
  let mut taken = vec![false; shuffled.len()];
  let mut picked: Vec<RawContentItem> = Vec::with_capacity(target);
  let mut per_kind: HashMap<QuestionKind, usize> = HashMap::new();

  for (i, item) in shuffled.iter().enumerate() {
    if picked.len() == target {
      break;
    }
    let seen = per_kind.entry(resolve_kind(item)).or_insert(0);
    if *seen < MAX_PER_KIND {
      *seen += 1;
      taken[i] = true;
      picked.push(item.clone());
    }
  }

  // Cap left us short: top up in shuffle order, kind no longer matters.
  if picked.len() < target {
    for (i, item) in shuffled.iter().enumerate() {
      if picked.len() == target {
        break;
      }
      if !taken[i] {
        taken[i] = true;
        picked.push(item.clone());
      }
    }
  }

  picked
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use serde_json::json;
  use std::collections::HashSet;

  fn pool_of(tags: &[&str]) -> Vec<RawContentItem> {
    tags
      .iter()
      .enumerate()
      .map(|(i, tag)| {
        serde_json::from_value(json!({ "id": format!("q{i}"), "type": tag, "question": "…" }))
          .expect("raw item")
      })
      .collect()
  }

  #[test]
  fn large_pool_yields_exactly_count_distinct_items() {
    let pool = pool_of(&["SINGLE"; 12]);
    let mut rng = StdRng::seed_from_u64(7);
    let picked = select_diverse(&pool, 6, &mut rng);
    assert_eq!(picked.len(), 6);
    let ids: HashSet<_> = picked.iter().map(|q| q.id.clone()).collect();
    assert_eq!(ids.len(), 6, "no item may be selected twice");
  }

  #[test]
  fn short_pool_is_returned_whole() {
    let pool = pool_of(&["SINGLE", "MAP", "OPEN"]);
    let mut rng = StdRng::seed_from_u64(7);
    let picked = select_diverse(&pool, 6, &mut rng);
    assert_eq!(picked.len(), 3);
  }

  #[test]
  fn kind_cap_holds_while_variety_allows_it() {
    // Two of each of three kinds fill a six-item request without any kind
    // exceeding the cap, whatever the shuffle order.
    let pool = pool_of(&["SINGLE", "SINGLE", "SINGLE", "SINGLE", "MAP", "MAP", "MATCHING", "MATCHING"]);
    for seed in 0..20 {
      let mut rng = StdRng::seed_from_u64(seed);
      let picked = select_diverse(&pool, 6, &mut rng);
      assert_eq!(picked.len(), 6);
      let singles = picked.iter().filter(|q| resolve_kind(q) == QuestionKind::Single).count();
      assert!(singles <= MAX_PER_KIND, "seed {seed}: {singles} singles");
    }
  }

  #[test]
  fn cap_is_soft_when_the_pool_lacks_variety() {
    let pool = pool_of(&["SINGLE"; 8]);
    let mut rng = StdRng::seed_from_u64(3);
    let picked = select_diverse(&pool, 5, &mut rng);
    assert_eq!(picked.len(), 5, "backfill ignores the kind cap");
  }
}
