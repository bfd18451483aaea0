use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::model::color::{Color, PASTEL_COLORS};

/// Session-stable mapping from CRN to display color.
///
/// Colors are drawn without replacement from a shuffled copy of
/// [`PASTEL_COLORS`]. Once bound, a CRN keeps its color even after it is
/// removed from the selection. When every palette entry has been handed out
/// the pool is refilled with a fresh shuffle, so colors start repeating.
pub struct ColorAssignment {
    rng: StdRng,
    pool: Vec<Color>,
    assigned: HashMap<String, Color>,
}

impl ColorAssignment {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic shuffle, for tests and reproducible renders.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let pool = shuffled_palette(&mut rng);
        ColorAssignment {
            rng,
            pool,
            assigned: HashMap::new(),
        }
    }

    /// Color already bound to `crn`, if any.
    pub fn get(&self, crn: &str) -> Option<Color> {
        self.assigned.get(crn).copied()
    }

    /// Returns the color bound to `crn`, binding the next unused one first if needed.
    pub fn color_for(&mut self, crn: &str) -> Color {
        if let Some(color) = self.assigned.get(crn) {
            return *color;
        }
        let color = match self.pool.pop() {
            Some(color) => color,
            None => {
                log::warn!(
                    "all {} palette colors are in use, recycling colors for CRN {}",
                    PASTEL_COLORS.len(),
                    crn
                );
                self.pool = shuffled_palette(&mut self.rng);
                // A refilled pool is never empty.
                self.pool.pop().unwrap_or(PASTEL_COLORS[0])
            }
        };
        self.assigned.insert(crn.to_string(), color);
        color
    }
}

impl Default for ColorAssignment {
    fn default() -> Self {
        Self::new()
    }
}

fn shuffled_palette(rng: &mut StdRng) -> Vec<Color> {
    let mut colors = PASTEL_COLORS.to_vec();
    colors.shuffle(rng);
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_crn_keeps_its_color() {
        let mut colors = ColorAssignment::with_seed(7);
        let first = colors.color_for("20540");
        colors.color_for("20541");
        assert_eq!(colors.color_for("20540"), first);
        assert_eq!(colors.get("20540"), Some(first));
        assert_eq!(colors.assigned.len(), 2);
    }

    #[test]
    fn distinct_crns_get_distinct_colors_until_exhausted() {
        let mut colors = ColorAssignment::with_seed(42);
        let drawn: HashSet<Color> = (0..PASTEL_COLORS.len())
            .map(|i| colors.color_for(&i.to_string()))
            .collect();
        assert_eq!(drawn.len(), PASTEL_COLORS.len());
        assert!(colors.pool.is_empty());
    }

    #[test]
    fn exhausted_palette_recycles() {
        let mut colors = ColorAssignment::with_seed(1);
        for i in 0..PASTEL_COLORS.len() {
            colors.color_for(&i.to_string());
        }
        let extra = colors.color_for("overflow");
        assert!(PASTEL_COLORS.contains(&extra));
        assert_eq!(colors.pool.len(), PASTEL_COLORS.len() - 1);
    }

    #[test]
    fn seeds_shuffle_reproducibly() {
        let mut a = ColorAssignment::with_seed(99);
        let mut b = ColorAssignment::with_seed(99);
        assert_eq!(a.color_for("1"), b.color_for("1"));
    }
}
