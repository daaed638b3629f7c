use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use super::*;

/// Hands out a fixed list of symbols, first ones first.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedProvider {
    symbols: Vec<Symbol>,
}

impl FixedProvider {
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        let unique: BTreeSet<&Symbol> = symbols.iter().collect();
        if unique.len() != symbols.len() {
            return Err(GameError::DuplicateContent);
        }
        Ok(Self { symbols })
    }
}

impl ContentProvider for FixedProvider {
    fn supply(&mut self, count: usize, _entropy: &mut dyn Entropy) -> Result<Vec<Symbol>> {
        if count == 0 {
            return Err(GameError::EmptyContentRequest);
        }
        if count > self.symbols.len() {
            log::warn!(
                "Fixed content holds {} symbols, {} requested",
                self.symbols.len(),
                count
            );
            return Err(GameError::NotEnoughContent {
                requested: count,
                available: self.symbols.len(),
            });
        }
        Ok(self.symbols[..count].to_vec())
    }

    fn capacity(&self) -> usize {
        self.symbols.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplies_a_prefix() {
        let mut provider = FixedProvider::new(["A", "B", "C"]).unwrap();

        let symbols = provider.supply(2, &mut FixedEntropy).unwrap();

        assert_eq!(symbols, [Symbol::from("A"), Symbol::from("B")]);
        assert_eq!(provider.capacity(), 3);
    }

    #[test]
    fn rejects_duplicates() {
        assert_eq!(
            FixedProvider::new(["A", "A"]),
            Err(GameError::DuplicateContent)
        );
    }

    #[test]
    fn short_supply_is_an_error_not_a_smaller_grid() {
        let mut provider = FixedProvider::new(["A"]).unwrap();

        let err = provider.supply(2, &mut FixedEntropy).unwrap_err();

        assert_eq!(
            err,
            GameError::NotEnoughContent {
                requested: 2,
                available: 1
            }
        );
    }
}
