//! Food catalogue: every kind a boss (or the parry gate) can throw, and its taste.

use rand::Rng;

/// Binary taste mode. The player mouth is always in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Salty,
    Sweet,
}

impl Category {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Category::Salty => Category::Sweet,
            Category::Sweet => Category::Salty,
        }
    }

    /// Uniform pick between the two tastes.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) { Category::Salty } else { Category::Sweet }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    // Level 1
    Doritos,
    Burgers,
    Fries,
    IceCream,
    Soda,
    Cake,
    // Level 2
    FriedChicken,
    TaiwanBurger,
    StinkyTofu,
    Ribs,
    HotDog,
    BubbleTea,
    MangoIce,
    TofuPudding,
    Donut,
    Cupcake,
    // Level 3
    BeefSoup,
    RiceBowlCake,
    TainanPorridge,
    TainanPudding,
    TainanIceCream,
    TainanTofuIce,
    // Halves of a split hot dog
    Dog,
    Bread,
}

impl FoodKind {
    /// The only kind that can be deflected back at a boss.
    pub const PARRY: FoodKind = FoodKind::BeefSoup;

    /// Seconds before a composite food falls apart.
    pub const SPLIT_DELAY: f32 = 0.8;

    pub fn category(self) -> Category {
        use FoodKind::*;
        match self {
            Doritos | Burgers | Fries | FriedChicken | TaiwanBurger | StinkyTofu | Ribs
            | HotDog | BeefSoup | RiceBowlCake | TainanPorridge | Dog | Bread => Category::Salty,
            IceCream | Soda | Cake | BubbleTea | MangoIce | TofuPudding | Donut | Cupcake
            | TainanPudding | TainanIceCream | TainanTofuIce => Category::Sweet,
        }
    }

    #[inline]
    pub fn is_parry_kind(self) -> bool {
        self == Self::PARRY
    }

    /// Heavy foods steer harder when homing.
    #[inline]
    pub fn strong_homing(self) -> bool {
        matches!(self, FoodKind::Burgers | FoodKind::Cake)
    }

    /// Children produced when this kind splits, if it is a composite.
    pub fn split_into(self) -> Option<[FoodKind; 2]> {
        match self {
            FoodKind::HotDog => Some([FoodKind::Dog, FoodKind::Bread]),
            _ => None,
        }
    }
}

/// A non-empty set of kinds to draw from uniformly.
///
/// The parry kind is never part of an attack pool; an empty pool after filtering is replaced
/// by a fixed fallback so picking can never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodPool {
    kinds: Vec<FoodKind>,
}

impl FoodPool {
    pub const SALTY_FALLBACK: [FoodKind; 2] = [FoodKind::Fries, FoodKind::Doritos];
    pub const SWEET_FALLBACK: [FoodKind; 2] = [FoodKind::IceCream, FoodKind::Soda];
    pub const MIXED_FALLBACK: [FoodKind; 2] = [FoodKind::Doritos, FoodKind::Soda];

    pub fn new(kinds: impl IntoIterator<Item = FoodKind>, fallback: [FoodKind; 2]) -> Self {
        let mut kept: Vec<FoodKind> = Vec::new();
        for k in kinds {
            if !k.is_parry_kind() && !kept.contains(&k) {
                kept.push(k);
            }
        }
        if kept.is_empty() {
            kept.extend(fallback);
        }
        Self { kinds: kept }
    }

    /// Same pool minus `excluded`, falling back when nothing is left.
    pub fn without(&self, excluded: FoodKind, fallback: [FoodKind; 2]) -> Self {
        Self::new(self.kinds.iter().copied().filter(|k| *k != excluded), fallback)
    }

    /// Union of two pools, duplicates removed.
    pub fn merged(&self, other: &FoodPool, fallback: [FoodKind; 2]) -> Self {
        Self::new(self.kinds.iter().chain(other.kinds.iter()).copied(), fallback)
    }

    #[inline]
    pub fn kinds(&self) -> &[FoodKind] {
        &self.kinds
    }

    pub fn choose(&self, rng: &mut impl Rng) -> FoodKind {
        self.kinds[rng.random_range(0..self.kinds.len())]
    }
}

/// Per-pattern food pools of a boss.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodPools {
    pub ring_salty: FoodPool,
    pub ring_sweet: FoodPool,
    pub burst: FoodPool,
    pub beam: FoodPool,
}

impl FoodPools {
    pub fn new(
        ring_salty: impl IntoIterator<Item = FoodKind>,
        ring_sweet: impl IntoIterator<Item = FoodKind>,
        burst: impl IntoIterator<Item = FoodKind>,
        beam: impl IntoIterator<Item = FoodKind>,
    ) -> Self {
        Self {
            ring_salty: FoodPool::new(ring_salty, FoodPool::SALTY_FALLBACK),
            ring_sweet: FoodPool::new(ring_sweet, FoodPool::SWEET_FALLBACK),
            burst: FoodPool::new(burst, FoodPool::MIXED_FALLBACK),
            beam: FoodPool::new(beam, FoodPool::MIXED_FALLBACK),
        }
    }

    #[inline]
    pub fn ring(&self, category: Category) -> &FoodPool {
        match category {
            Category::Salty => &self.ring_salty,
            Category::Sweet => &self.ring_sweet,
        }
    }

    /// Coin flip between the ring pools; the category follows the pool side.
    pub fn any(&self, rng: &mut impl Rng) -> (FoodKind, Category) {
        let category = Category::random(rng);
        (self.ring(category).choose(rng), category)
    }
}

impl Default for FoodPools {
    fn default() -> Self {
        use FoodKind::*;
        Self::new(
            [Doritos, Fries, Burgers],
            [IceCream, Soda, Cake],
            [Doritos, Fries, Soda, IceCream],
            [Doritos, Soda],
        )
    }
}
