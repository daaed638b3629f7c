use alloc::vec::Vec;
use core::ops::RangeInclusive;

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmojiCategory {
    Food,
    Animals,
    Fruits,
    SunSigns,
}

impl EmojiCategory {
    pub const ALL: [EmojiCategory; 4] = [Self::Food, Self::Animals, Self::Fruits, Self::SunSigns];

    pub const fn code_points(self) -> RangeInclusive<u32> {
        use EmojiCategory::*;
        match self {
            Food => 0x1F950..=0x1F96F,
            Animals => 0x1F980..=0x1F9AE,
            Fruits => 0x1F345..=0x1F353,
            SunSigns => 0x2648..=0x2653,
        }
    }

    pub fn len(self) -> usize {
        self.symbols().count()
    }

    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        self.code_points().filter_map(char::from_u32).map(Symbol::from)
    }
}

/// Draws all symbols of a level from a single emoji category, picked at random among those big enough.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EmojiProvider;

impl ContentProvider for EmojiProvider {
    fn supply(&mut self, count: usize, entropy: &mut dyn Entropy) -> Result<Vec<Symbol>> {
        if count == 0 {
            return Err(GameError::EmptyContentRequest);
        }

        let eligible: Vec<EmojiCategory> = EmojiCategory::ALL
            .into_iter()
            .filter(|category| category.len() >= count)
            .collect();

        if eligible.is_empty() {
            log::warn!(
                "No emoji category holds {} symbols, largest has {}",
                count,
                self.capacity()
            );
            return Err(GameError::NotEnoughContent {
                requested: count,
                available: self.capacity(),
            });
        }

        let category = eligible[entropy.pick(eligible.len())];
        log::debug!("Using {:?} emoji for {} pairs", category, count);
        Ok(category.symbols().take(count).collect())
    }

    fn capacity(&self) -> usize {
        EmojiCategory::ALL
            .into_iter()
            .map(EmojiCategory::len)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    #[test]
    fn category_sizes() {
        assert_eq!(EmojiCategory::Food.len(), 32);
        assert_eq!(EmojiCategory::Animals.len(), 47);
        assert_eq!(EmojiCategory::Fruits.len(), 15);
        assert_eq!(EmojiCategory::SunSigns.len(), 12);
        assert_eq!(EmojiProvider.capacity(), 47);
    }

    #[test]
    fn supplies_distinct_symbols_in_range_order() {
        let symbols = EmojiProvider.supply(8, &mut FixedEntropy).unwrap();

        assert_eq!(symbols.len(), 8);
        assert_eq!(symbols[0], Symbol::from('\u{1F950}'));
        assert_eq!(symbols[1], Symbol::from('\u{1F951}'));
        let unique: BTreeSet<_> = symbols.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn only_large_enough_categories_are_eligible() {
        // only animals hold 40
        for seed in 0..16 {
            let symbols = EmojiProvider
                .supply(40, &mut SeededEntropy::new(seed))
                .unwrap();
            assert_eq!(symbols[0], Symbol::from('\u{1F980}'));
        }
    }

    #[test]
    fn rejects_requests_no_category_can_hold() {
        let err = EmojiProvider.supply(50, &mut FixedEntropy).unwrap_err();
        assert_eq!(
            err,
            GameError::NotEnoughContent {
                requested: 50,
                available: 47
            }
        );
    }

    #[test]
    fn rejects_empty_requests() {
        assert_eq!(
            EmojiProvider.supply(0, &mut FixedEntropy),
            Err(GameError::EmptyContentRequest)
        );
    }
}
