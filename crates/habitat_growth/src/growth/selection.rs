//! Heliotropic selection among accepted candidates.
//!
//! Each candidate is scored by the alignment of its growth direction with the
//! sun: `dot(normalize(candidate - cursor), sun)`, in `[-1, 1]`. The strictly
//! highest score wins; equal scores keep the earliest candidate, so ties follow
//! the sensing pattern order.
use glam::Vec3;

/// Index and score of the winning candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Index into the candidate sequence passed to [`pick_most_sun_aligned`].
    pub index: usize,
    /// Solar alignment score of the winner.
    pub score: f32,
}

/// Solar alignment of growing from `cursor` to `candidate`.
///
/// A candidate coinciding with the cursor has no direction and scores `0`.
#[inline]
pub fn solar_score(candidate: Vec3, cursor: Vec3, sun: Vec3) -> f32 {
    (candidate - cursor).normalize_or_zero().dot(sun)
}

/// Picks the candidate most aligned with `sun`, or `None` for an empty input.
pub fn pick_most_sun_aligned<I>(candidates: I, cursor: Vec3, sun: Vec3) -> Option<Selection>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut best: Option<Selection> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = solar_score(candidate, cursor, sun);
        if best.is_none_or(|b| score > b.score) {
            best = Some(Selection { index, score });
        }
    }
    best
}
