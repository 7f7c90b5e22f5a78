//! Weighted draws of secondary stats without replacement.
//!
//! Drawing stat `i` when the stats of `drawn` are already taken has
//! probability `w_i / (W - W(drawn))`. The probability of ending up with a
//! given set sums over every order the set can be drawn in, which the
//! table computes bottom-up over bit masks:
//!
//! ```text
//! p(∅)    = 1
//! p(mask) = Σ_{i ∈ mask} p(mask \ i) · w_i / (W - W(mask \ i))
//! ```

use crate::stats::tables::{SUBSTAT_DRAW_COUNT, substat_weight};
use crate::stats::{SubStat, SubStatSet};

const MASKS: usize = 1 << SubStat::COUNT;

/// Probabilities of every reachable set of drawn secondary stats.
#[derive(Clone, Debug)]
pub struct DrawTable {
    pool: SubStatSet,
    probability: Vec<f64>,
}

impl DrawTable {
    /// Builds the table for an item whose main stat excludes `excluded` from
    /// the secondary pool.
    pub fn new(excluded: Option<SubStat>) -> Self {
        let pool = match excluded {
            Some(stat) => SubStatSet::all().without(stat),
            None => SubStatSet::all(),
        };

        let weights = SubStat::all().map(|stat| if pool.has(stat) { substat_weight(stat) } else { 0.0 });
        let total: f64 = weights.iter().sum();

        let mut drawn_weight = vec![0.0f64; MASKS];
        let mut probability = vec![0.0f64; MASKS];
        probability[0] = 1.0;

        for mask in 1..MASKS {
            let bits = mask as u16;
            if !SubStatSet::from_bits_retain(bits).is_subset_of(pool)
                || bits.count_ones() as usize > SUBSTAT_DRAW_COUNT
            {
                continue;
            }

            let lowest = bits.trailing_zeros() as usize;
            drawn_weight[mask] = drawn_weight[mask & (mask - 1)] + weights[lowest];

            let mut value = 0.0;
            for (index, weight) in weights.iter().enumerate() {
                if mask & (1 << index) == 0 {
                    continue;
                }
                let before = mask & !(1 << index);
                let remaining = total - drawn_weight[before];
                if remaining > 0.0 {
                    value += probability[before] * weight / remaining;
                }
            }
            probability[mask] = value;
        }

        Self { pool, probability }
    }

    /// Stats that can be drawn at all.
    pub fn pool(&self) -> SubStatSet {
        self.pool
    }

    /// Probability that exactly the stats of `drawn` are drawn first, in any
    /// order.
    pub fn probability(&self, drawn: SubStatSet) -> f64 {
        self.probability[usize::from(drawn.bits())]
    }

    /// Every complete draw (four stats) with its probability.
    pub fn outcomes(&self) -> impl Iterator<Item = (SubStatSet, f64)> + '_ {
        (0..MASKS).filter_map(move |mask| {
            let drawn = SubStatSet::from_bits_retain(mask as u16);
            (drawn.len() == SUBSTAT_DRAW_COUNT && drawn.is_subset_of(self.pool))
                .then(|| (drawn, self.probability[mask]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn complete_draws_sum_to_one() {
        for excluded in [None, Some(SubStat::FlatHp), Some(SubStat::CritRate)] {
            let table = DrawTable::new(excluded);
            assert_close(table.outcomes().map(|(_, p)| p).sum(), 1.0);
            assert_eq!(table.outcomes().count(), if excluded.is_some() { 126 } else { 210 });
        }
    }

    #[test]
    fn single_draw_follows_weights() {
        let table = DrawTable::new(None);
        // 3 x 6 + 5 x 4 + 2 x 3
        let total = 44.0;
        assert_close(table.probability(SubStatSet::FLAT_HP), 6.0 / total);
        assert_close(table.probability(SubStatSet::CRIT_RATE), 3.0 / total);
    }

    #[test]
    fn pair_sums_both_orders() {
        let table = DrawTable::new(None);
        let total = 44.0;
        let expected = 3.0 / total * 6.0 / (total - 3.0) + 6.0 / total * 3.0 / (total - 6.0);
        assert_close(
            table.probability(SubStatSet::CRIT_RATE | SubStatSet::FLAT_HP),
            expected,
        );
    }

    #[test]
    fn excluded_stat_never_appears() {
        let table = DrawTable::new(Some(SubStat::CritDamage));
        assert!(!table.pool().has(SubStat::CritDamage));
        assert!(table.outcomes().all(|(drawn, _)| !drawn.has(SubStat::CritDamage)));
        assert_eq!(table.probability(SubStatSet::CRIT_DAMAGE), 0.0);
    }
}
