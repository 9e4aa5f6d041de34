//! Brute-force spatial queries
//!
//! Populations here are tens of agents and a handful of food items, so a
//! linear scan beats maintaining an index.

use glam::Vec2;

use super::state::Positioned;

/// All items whose distance to `origin` is at most `radius`
pub fn find_within_radius<'a, T, I>(origin: Vec2, radius: f32, items: I) -> Vec<&'a T>
where
    T: Positioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| origin.distance(item.position()) <= radius)
        .collect()
}

/// The item closest to `origin`; the first one wins ties
pub fn nearest<'a, T, I>(origin: Vec2, items: I) -> Option<&'a T>
where
    T: Positioned + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(&'a T, f32)> = None;
    for item in items {
        let dist = origin.distance(item.position());
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((item, dist)),
        }
    }
    best.map(|(item, _)| item)
}
