// heuristic seat strategies, one per allegiance

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{GameRng, Party, PlayerId, Policy, Role, NUM_PLAYERS};

// suspicion score at which liberals stop trusting a government
const SUSPICION_THRESHOLD: i64 = 50;

// Read-only snapshot a seat gets for each decision: public board state plus
// the seat's own accumulated knowledge. Owned, so strategies stay decoupled
// from the engine's mutable state.
#[derive(Clone, Debug)]
pub struct View {
    pub seat: PlayerId,
    // seating order, ascending ids, dead seats removed
    pub alive: Vec<PlayerId>,
    pub liberal_enacted: usize,
    pub fascist_enacted: usize,
    pub failed_elections: u8,
    pub veto_unlocked: bool,
    // term-limit reference: None once cleared by a forced enactment or when
    // the previous chancellor is dead
    pub chancellor: Option<PlayerId>,
    pub(crate) suspicion: [i64; NUM_PLAYERS],
    pub(crate) parties: [Option<Party>; NUM_PLAYERS],
    pub(crate) roles: [Option<Role>; NUM_PLAYERS],
}

impl View {
    // A known fascist reads as maximally suspicious and a known liberal as
    // minimally suspicious; heuristic scores only apply to unknown seats.
    pub fn suspicion(&self, seat: PlayerId) -> i64 {
        match self.parties[seat] {
            Some(Party::Fascist) => i64::MAX,
            Some(Party::Liberal) => i64::MIN,
            None => self.suspicion[seat],
        }
    }

    pub fn known_party(&self, seat: PlayerId) -> Option<Party> {
        self.parties[seat]
    }

    pub fn known_role(&self, seat: PlayerId) -> Option<Role> {
        self.roles[seat]
    }

    pub fn others(&self) -> Vec<PlayerId> {
        self.alive
            .iter()
            .copied()
            .filter(|&seat| seat != self.seat)
            .collect()
    }

    // legal chancellor nominees: alive, not the nominating president, not
    // the previous chancellor (the previous president is deliberately never
    // excluded)
    pub fn eligible_chancellors(&self) -> Vec<PlayerId> {
        self.alive
            .iter()
            .copied()
            .filter(|&seat| seat != self.seat && Some(seat) != self.chancellor)
            .collect()
    }

    // ties go to the lowest seat id
    pub fn least_suspicious_of(&self, candidates: &[PlayerId]) -> PlayerId {
        let mut best = candidates[0];
        for &seat in &candidates[1..] {
            if self.suspicion(seat) < self.suspicion(best) {
                best = seat;
            }
        }
        best
    }

    pub fn most_suspicious_of(&self, candidates: &[PlayerId]) -> PlayerId {
        let mut best = candidates[0];
        for &seat in &candidates[1..] {
            if self.suspicion(seat) > self.suspicion(best) {
                best = seat;
            }
        }
        best
    }

    fn fellow_fascist(&self) -> Option<PlayerId> {
        self.alive
            .iter()
            .copied()
            .find(|&seat| seat != self.seat && self.roles[seat] == Some(Role::Fascist))
    }

    fn hitler(&self) -> Option<PlayerId> {
        self.alive
            .iter()
            .copied()
            .find(|&seat| self.roles[seat] == Some(Role::Hitler))
    }
}

// Every decision point a seat can be asked to resolve. Implementations must
// return eligible seats and in-range card indexes; the engine treats
// anything else as a fatal contract violation.
pub trait Strategy {
    fn nominate_chancellor(&self, view: &View, rng: &mut GameRng) -> PlayerId;
    // index into the president's three-card hand to discard
    fn discard_from_hand(&self, view: &View, hand: &[Policy; 3], rng: &mut GameRng) -> usize;
    // index into the offered pair to discard; the other card is enacted
    fn enact_from_pair(&self, view: &View, pair: &[Policy; 2], rng: &mut GameRng) -> usize;
    fn vote(
        &self,
        view: &View,
        president: PlayerId,
        chancellor: PlayerId,
        rng: &mut GameRng,
    ) -> bool;
    fn investigate(&self, view: &View, rng: &mut GameRng) -> PlayerId;
    fn choose_president(&self, view: &View, rng: &mut GameRng) -> PlayerId;
    fn choose_execution(&self, view: &View, rng: &mut GameRng) -> PlayerId;
    fn veto(&self, view: &View, pair: &[Policy; 2], rng: &mut GameRng) -> bool;
}

pub fn strategy_for_role(role: Role) -> Box<dyn Strategy> {
    match role {
        Role::Liberal => Box::new(LiberalStrategy),
        Role::Fascist => Box::new(FascistStrategy),
        Role::Hitler => Box::new(HitlerStrategy),
    }
}

fn pick(seats: &[PlayerId], rng: &mut GameRng) -> PlayerId {
    *seats.choose(rng).expect("no eligible seat to pick from")
}

// shared fascist-side card handling
fn fascist_discard_index(hand: &[Policy; 3]) -> usize {
    hand.iter().position(|card| card.is_liberal()).unwrap_or(0)
}

fn fascist_enact_index(view: &View, pair: &[Policy; 2]) -> usize {
    if view.fascist_enacted < 3 {
        // blend in: put a liberal policy on the board while it is cheap
        if pair[0].is_liberal() {
            1
        } else {
            0
        }
    } else if pair[0].is_fascist() {
        1
    } else {
        0
    }
}

fn fascist_vote(view: &View, chancellor: PlayerId) -> bool {
    !(view.liberal_enacted == 5 && view.known_party(chancellor) == Some(Party::Liberal))
}

fn fascist_veto(pair: &[Policy; 2]) -> bool {
    pair.iter().all(|card| card.is_liberal())
}

pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn nominate_chancellor(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        pick(&view.eligible_chancellors(), rng)
    }

    fn discard_from_hand(&self, _view: &View, _hand: &[Policy; 3], rng: &mut GameRng) -> usize {
        rng.gen_range(0..3)
    }

    fn enact_from_pair(&self, _view: &View, _pair: &[Policy; 2], rng: &mut GameRng) -> usize {
        rng.gen_range(0..2)
    }

    fn vote(
        &self,
        view: &View,
        _president: PlayerId,
        _chancellor: PlayerId,
        rng: &mut GameRng,
    ) -> bool {
        // electing Hitler cannot end the game yet, so there is no reason to
        // obstruct
        view.fascist_enacted < 3 || rng.gen()
    }

    fn investigate(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        pick(&view.others(), rng)
    }

    fn choose_president(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        pick(&view.others(), rng)
    }

    fn choose_execution(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        pick(&view.others(), rng)
    }

    fn veto(&self, _view: &View, _pair: &[Policy; 2], rng: &mut GameRng) -> bool {
        rng.gen()
    }
}

pub struct LiberalStrategy;

impl Strategy for LiberalStrategy {
    fn nominate_chancellor(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.least_suspicious_of(&view.eligible_chancellors())
    }

    fn discard_from_hand(&self, _view: &View, hand: &[Policy; 3], _rng: &mut GameRng) -> usize {
        hand.iter()
            .position(|card| card.is_fascist())
            .unwrap_or(0)
    }

    fn enact_from_pair(&self, _view: &View, pair: &[Policy; 2], _rng: &mut GameRng) -> usize {
        if pair[0].is_liberal() {
            1
        } else {
            0
        }
    }

    fn vote(
        &self,
        view: &View,
        president: PlayerId,
        chancellor: PlayerId,
        _rng: &mut GameRng,
    ) -> bool {
        chancellor == view.seat
            || view.fascist_enacted < 3
            || view.failed_elections > 1
            || (view.suspicion(president) < SUSPICION_THRESHOLD
                && view.suspicion(chancellor) < SUSPICION_THRESHOLD)
    }

    fn investigate(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.most_suspicious_of(&view.others())
    }

    fn choose_president(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.least_suspicious_of(&view.others())
    }

    fn choose_execution(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.most_suspicious_of(&view.others())
    }

    fn veto(&self, _view: &View, pair: &[Policy; 2], _rng: &mut GameRng) -> bool {
        pair.iter().all(|card| card.is_fascist())
    }
}

pub struct FascistStrategy;

impl Strategy for FascistStrategy {
    fn nominate_chancellor(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        let eligible = view.eligible_chancellors();

        // push the partner while electing Hitler is harmless, then set up
        // the Hitler-chancellor win; term-limited preferences fall through
        let preferred: Vec<PlayerId> = if view.fascist_enacted < 3 {
            view.fellow_fascist().into_iter().chain(view.hitler()).collect()
        } else {
            view.hitler().into_iter().collect()
        };

        match preferred.into_iter().find(|target| eligible.contains(target)) {
            Some(target) => target,
            None => pick(&eligible, rng),
        }
    }

    fn discard_from_hand(&self, _view: &View, hand: &[Policy; 3], _rng: &mut GameRng) -> usize {
        fascist_discard_index(hand)
    }

    fn enact_from_pair(&self, view: &View, pair: &[Policy; 2], _rng: &mut GameRng) -> usize {
        fascist_enact_index(view, pair)
    }

    fn vote(
        &self,
        view: &View,
        _president: PlayerId,
        chancellor: PlayerId,
        _rng: &mut GameRng,
    ) -> bool {
        fascist_vote(view, chancellor)
    }

    fn investigate(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        pick(&view.others(), rng)
    }

    fn choose_president(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        view.fellow_fascist()
            .or_else(|| view.hitler())
            .unwrap_or_else(|| pick(&view.others(), rng))
    }

    fn choose_execution(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        // shoot a known liberal, never the partner or Hitler
        let liberals: Vec<PlayerId> = view
            .others()
            .into_iter()
            .filter(|&seat| view.known_role(seat) == Some(Role::Liberal))
            .collect();

        if liberals.is_empty() {
            pick(&view.others(), rng)
        } else {
            pick(&liberals, rng)
        }
    }

    fn veto(&self, _view: &View, pair: &[Policy; 2], _rng: &mut GameRng) -> bool {
        fascist_veto(pair)
    }
}

// Hitler plays the fascist card game but starts with no role knowledge, so
// targeting decisions run on suspicion alone.
pub struct HitlerStrategy;

impl Strategy for HitlerStrategy {
    fn nominate_chancellor(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.most_suspicious_of(&view.eligible_chancellors())
    }

    fn discard_from_hand(&self, _view: &View, hand: &[Policy; 3], _rng: &mut GameRng) -> usize {
        fascist_discard_index(hand)
    }

    fn enact_from_pair(&self, view: &View, pair: &[Policy; 2], _rng: &mut GameRng) -> usize {
        fascist_enact_index(view, pair)
    }

    fn vote(
        &self,
        view: &View,
        _president: PlayerId,
        chancellor: PlayerId,
        _rng: &mut GameRng,
    ) -> bool {
        fascist_vote(view, chancellor)
    }

    fn investigate(&self, view: &View, rng: &mut GameRng) -> PlayerId {
        pick(&view.others(), rng)
    }

    fn choose_president(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.most_suspicious_of(&view.others())
    }

    fn choose_execution(&self, view: &View, _rng: &mut GameRng) -> PlayerId {
        view.most_suspicious_of(&view.others())
    }

    fn veto(&self, _view: &View, pair: &[Policy; 2], _rng: &mut GameRng) -> bool {
        fascist_veto(pair)
    }
}
