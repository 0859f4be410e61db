use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Policy, FASCIST_POLICY_CARDS, LIBERAL_POLICY_CARDS};

// Deck and discard for the 17 policy cards. The top of the deck is the end
// of the vec. Cards leave the supply only by being enacted; the reshuffle
// is invisible to callers.
#[derive(Clone)]
pub(crate) struct PolicySupply {
    pub(crate) deck: Vec<Policy>,
    pub(crate) discard: Vec<Policy>,
}

impl PolicySupply {
    pub(crate) fn new<R: Rng>(rng: &mut R) -> Self {
        let mut deck: Vec<Policy> = std::iter::repeat(Policy::Liberal)
            .take(LIBERAL_POLICY_CARDS)
            .chain(std::iter::repeat(Policy::Fascist).take(FASCIST_POLICY_CARDS))
            .collect();

        deck.shuffle(rng);

        Self {
            deck,
            discard: Vec::new(),
        }
    }

    // draw the president's three-card hand, top of deck first
    pub(crate) fn draw_hand<R: Rng>(&mut self, rng: &mut R) -> [Policy; 3] {
        let mut hand = [Policy::Liberal; 3];
        for card in hand.iter_mut() {
            *card = self.draw_one(rng);
        }
        hand
    }

    pub(crate) fn draw_one<R: Rng>(&mut self, rng: &mut R) -> Policy {
        if self.deck.is_empty() {
            self.reshuffle_discard(rng);
        }

        match self.deck.pop() {
            Some(card) => card,
            // the 17-card composition makes this unreachable; anything else
            // means enacted cards leaked back out of the game
            None => panic!("policy supply exhausted: deck and discard are both empty"),
        }
    }

    pub(crate) fn discard(&mut self, card: Policy) {
        self.discard.push(card);
    }

    fn reshuffle_discard<R: Rng>(&mut self, rng: &mut R) {
        self.deck.append(&mut self.discard);
        self.deck.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::PolicySupply;
    use crate::{GameRng, Policy, FASCIST_POLICY_CARDS, LIBERAL_POLICY_CARDS};

    fn count(supply: &PolicySupply, policy: Policy) -> usize {
        supply
            .deck
            .iter()
            .chain(&supply.discard)
            .filter(|&&card| card == policy)
            .count()
    }

    #[test]
    fn fresh_supply_composition() {
        let mut rng = GameRng::seed_from_u64(0);
        let supply = PolicySupply::new(&mut rng);

        assert_eq!(supply.deck.len(), 17);
        assert!(supply.discard.is_empty());
        assert_eq!(count(&supply, Policy::Liberal), LIBERAL_POLICY_CARDS);
        assert_eq!(count(&supply, Policy::Fascist), FASCIST_POLICY_CARDS);
    }

    #[test]
    fn reshuffle_is_transparent() {
        let mut rng = GameRng::seed_from_u64(1);
        let mut supply = PolicySupply::new(&mut rng);

        // draw five full hands, discarding everything drawn
        for _ in 0..5 {
            for card in supply.draw_hand(&mut rng) {
                supply.discard(card);
            }
        }
        assert_eq!(supply.deck.len(), 2);
        assert_eq!(supply.discard.len(), 15);

        // the next hand needs the discard folded back in
        let hand = supply.draw_hand(&mut rng);
        assert_eq!(hand.len(), 3);
        assert_eq!(supply.deck.len() + supply.discard.len(), 14);
        assert_eq!(
            count(&supply, Policy::Liberal) + count(&supply, Policy::Fascist),
            14
        );
    }

    #[test]
    #[should_panic(expected = "policy supply exhausted")]
    fn exhausted_supply_fails_fast() {
        let mut rng = GameRng::seed_from_u64(2);
        let mut supply = PolicySupply::new(&mut rng);

        // drain all 17 cards without ever discarding
        for _ in 0..17 {
            supply.draw_one(&mut rng);
        }

        supply.draw_one(&mut rng);
    }
}
