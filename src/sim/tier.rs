//! Tier catalog: the ordered merge progression
//!
//! Tier `i` merges into tier `i + 1`. The last tier is terminal and has no
//! successor, so two terminal pieces only ever bounce off each other.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Index into the tier catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(pub usize);

impl TierId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single rank in the progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Display name (cosmetic)
    pub name: String,
    /// Single glyph renderers may draw on the piece (cosmetic)
    #[serde(default)]
    pub glyph: String,
    /// 0xRRGGBB fill colour (cosmetic)
    #[serde(default)]
    pub color: u32,
    /// Collision radius
    pub radius: f32,
    /// Points this piece contributes when consumed by a merge
    pub score: u32,
}

impl Tier {
    fn fruit(name: &str, glyph: &str, color: u32, radius: f32, score: u32) -> Self {
        Self {
            name: name.to_string(),
            glyph: glyph.to_string(),
            color,
            radius,
            score,
        }
    }
}

/// Immutable ordered list of tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierCatalog {
    tiers: Vec<Tier>,
}

impl Default for TierCatalog {
    fn default() -> Self {
        Self::fruits()
    }
}

impl TierCatalog {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// The classic six-fruit progression, cherry through watermelon
    pub fn fruits() -> Self {
        Self::new(vec![
            Tier::fruit("cherry", "🍒", 0xff6b6b, 10.0, 1),
            Tier::fruit("strawberry", "🍓", 0xff4757, 15.0, 3),
            Tier::fruit("grape", "🍇", 0xa55eea, 20.0, 6),
            Tier::fruit("orange", "🍊", 0xffa502, 25.0, 10),
            Tier::fruit("apple", "🍎", 0xff3838, 30.0, 15),
            Tier::fruit("watermelon", "🍉", 0x2ed573, 40.0, 25),
        ])
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn contains(&self, id: TierId) -> bool {
        id.0 < self.tiers.len()
    }

    /// Look up a tier. Ids handed out by the simulation are always in range.
    pub fn get(&self, id: TierId) -> &Tier {
        &self.tiers[id.0]
    }

    /// Tier produced by merging two pieces of `id`, or `None` for the terminal tier
    pub fn successor(&self, id: TierId) -> Option<TierId> {
        let next = id.0 + 1;
        (next < self.tiers.len()).then_some(TierId(next))
    }

    pub fn is_terminal(&self, id: TierId) -> bool {
        self.successor(id).is_none()
    }

    pub fn last(&self) -> Option<TierId> {
        self.tiers.len().checked_sub(1).map(TierId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TierId, &Tier)> {
        self.tiers.iter().enumerate().map(|(i, t)| (TierId(i), t))
    }

    /// Check catalog shape: non-empty, positive increasing radii, positive scores
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut prev_radius = 0.0_f32;
        for (i, tier) in self.tiers.iter().enumerate() {
            if !tier.radius.is_finite() || tier.radius <= 0.0 {
                return Err(ConfigError::InvalidRadius {
                    index: i,
                    radius: tier.radius,
                });
            }
            if i > 0 && tier.radius <= prev_radius {
                return Err(ConfigError::RadiusNotIncreasing {
                    index: i,
                    radius: tier.radius,
                    previous: prev_radius,
                });
            }
            if tier.score == 0 {
                return Err(ConfigError::ZeroScore { index: i });
            }
            prev_radius = tier.radius;
        }
        Ok(())
    }
}
