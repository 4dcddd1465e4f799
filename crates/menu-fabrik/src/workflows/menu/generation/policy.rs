use rand::seq::IndexedRandom;
use rand::Rng;

use super::super::domain::SideDish;
use super::rules::CandidateScore;

/// Picks uniformly among the candidates scoring within `tolerance` of the best one.
///
/// Returns `None` only when there is nothing to choose from.
pub fn select_candidate<'r, R: Rng + ?Sized>(
    mut candidates: Vec<CandidateScore<'r>>,
    tolerance: i32,
    rng: &mut R,
) -> Option<CandidateScore<'r>> {
    candidates.sort_by(|a, b| b.total.cmp(&a.total));

    let top_score = candidates.first()?.total;
    let floor = top_score.saturating_sub(tolerance);
    let band_len = candidates
        .iter()
        .take_while(|candidate| candidate.total >= floor)
        .count();

    // A negative tolerance still keeps the best candidate.
    let index = rng.random_range(0..band_len.max(1));
    Some(candidates.swap_remove(index))
}

/// Random side among the recipe's suggestions, avoiding `previous` while another choice exists.
pub fn pick_side_dish<R: Rng + ?Sized>(
    sides: &[SideDish],
    previous: Option<&SideDish>,
    rng: &mut R,
) -> Option<SideDish> {
    let mut pool: Vec<&SideDish> = sides.iter().collect();

    if let Some(previous) = previous {
        if pool.len() > 1 {
            let fresh: Vec<&SideDish> = pool
                .iter()
                .copied()
                .filter(|side| *side != previous)
                .collect();
            if !fresh.is_empty() {
                pool = fresh;
            }
        }
    }

    pool.choose(rng).map(|side| (*side).clone())
}
