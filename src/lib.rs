pub mod action;
pub mod ai;
pub mod player;
mod supply;

pub use action::Action;
pub use ai::{FascistStrategy, HitlerStrategy, LiberalStrategy, RandomStrategy, Strategy, View};
pub use player::Player;

use std::fmt::{Debug, Formatter};

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::supply::PolicySupply;

pub type PlayerId = usize;
pub type GameRng = rand_pcg::Pcg64Mcg;

pub const NUM_PLAYERS: usize = 7;
pub const LIBERAL_POLICY_CARDS: usize = 6;
pub const FASCIST_POLICY_CARDS: usize = 11;
pub const LIBERAL_POLICIES_TO_WIN: usize = 5;
pub const FASCIST_POLICIES_TO_WIN: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Policy {
    Liberal,
    Fascist,
}

impl Policy {
    pub fn is_liberal(self) -> bool {
        matches!(self, Policy::Liberal)
    }

    pub fn is_fascist(self) -> bool {
        matches!(self, Policy::Fascist)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Party {
    Liberal,
    Fascist,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Role {
    Liberal,
    Fascist,
    Hitler,
}

impl Role {
    pub fn party(self) -> Party {
        match self {
            Role::Liberal => Party::Liberal,
            Role::Fascist | Role::Hitler => Party::Fascist,
        }
    }
}

static ROLE_DISTRIBUTION: [Role; NUM_PLAYERS] = [
    Role::Liberal,
    Role::Liberal,
    Role::Liberal,
    Role::Liberal,
    Role::Fascist,
    Role::Fascist,
    Role::Hitler,
];

// A strategy breaking its decision contract is a programming error, not a
// game state; the game that hits one is unrecoverable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("president {president} nominated ineligible chancellor {nominee}")]
    IneligibleNominee {
        president: PlayerId,
        nominee: PlayerId,
    },
    #[error("player {actor} targeted ineligible seat {target}")]
    IneligibleTarget { actor: PlayerId, target: PlayerId },
    #[error("player {actor} chose card index {index} outside the offered cards")]
    CardIndexOutOfRange { actor: PlayerId, index: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Party,
    pub rounds: u32,
}

pub struct SecretHitler {
    players: Vec<Player>,
    // seating order; ids stay ascending since removal preserves order
    alive: Vec<PlayerId>,
    dead: Vec<PlayerId>,
    supply: PolicySupply,
    liberal_enacted: Vec<Policy>,
    fascist_enacted: Vec<Policy>,
    president: PlayerId,
    chancellor: Option<PlayerId>,
    failed_elections: u8,
    // one-way latch, set with the fifth fascist policy
    veto_unlocked: bool,
    // one-shot rotation override after a direct presidential pick
    president_picks: bool,
    rounds: u32,
    log: Vec<Action>,
    strategies: Vec<Box<dyn Strategy>>,
    rng: GameRng,
}

impl Debug for SecretHitler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            format!(
                "R {} | P {} | C {:?} | lib {} fas {} | tracker {} | {} actions\n",
                self.rounds,
                self.president,
                self.chancellor,
                self.liberal_enacted.len(),
                self.fascist_enacted.len(),
                self.failed_elections,
                self.log.len()
            )
            .as_str(),
        )?;
        for &id in &self.alive {
            f.write_str(format!("\tP {id}: {:?}\n", self.players[id].role).as_str())?;
        }
        for &id in &self.dead {
            f.write_str(format!("\tP {id}: {:?} (dead)\n", self.players[id].role).as_str())?;
        }
        Ok(())
    }
}

impl SecretHitler {
    pub fn new(seed: u64) -> Self {
        Self::with_strategies(seed, |_, role| ai::strategy_for_role(role))
    }

    // Strategies are an injectable capability fixed at construction; the
    // assignment closure sees each seat's rolled role.
    pub fn with_strategies<F>(seed: u64, mut assign: F) -> Self
    where
        F: FnMut(PlayerId, Role) -> Box<dyn Strategy>,
    {
        let mut rng = GameRng::seed_from_u64(seed);

        let mut roles = ROLE_DISTRIBUTION;
        roles.shuffle(&mut rng);

        let mut players: Vec<Player> = roles
            .iter()
            .enumerate()
            .map(|(id, &role)| Player::new(id, role))
            .collect();

        // fascists are shown the whole table once, before any decisions;
        // Hitler stays in the dark
        for id in 0..NUM_PLAYERS {
            if roles[id] == Role::Fascist {
                for (other, &role) in roles.iter().enumerate() {
                    players[id].knowledge.learn_role(other, role);
                }
            }
        }

        let supply = PolicySupply::new(&mut rng);
        let strategies = roles
            .iter()
            .enumerate()
            .map(|(id, &role)| assign(id, role))
            .collect();

        Self {
            players,
            alive: (0..NUM_PLAYERS).collect(),
            dead: Vec::new(),
            supply,
            liberal_enacted: Vec::new(),
            fascist_enacted: Vec::new(),
            // parked one seat before the start so the first rotation lands
            // on seat 0
            president: NUM_PLAYERS - 1,
            chancellor: None,
            failed_elections: 0,
            veto_unlocked: false,
            president_picks: false,
            rounds: 0,
            log: Vec::new(),
            strategies,
            rng,
        }
    }

    pub fn run_to_completion(&mut self) -> Result<Outcome, GameError> {
        loop {
            if let Some(winner) = self.round()? {
                debug!("game over after {} rounds: {winner:?} victory", self.rounds);
                return Ok(Outcome {
                    winner,
                    rounds: self.rounds,
                });
            }
        }
    }

    fn round(&mut self) -> Result<Option<Party>, GameError> {
        self.rounds += 1;

        if self.president_picks {
            self.president_picks = false;
        } else {
            self.president = self.next_alive_after(self.president);
        }
        let president = self.president;

        // nomination, term-limited to exclude only the previous chancellor
        let view = self.view(president);
        let eligible = view.eligible_chancellors();
        let nominee = self.strategies[president].nominate_chancellor(&view, &mut self.rng);
        if !eligible.contains(&nominee) {
            return Err(GameError::IneligibleNominee { president, nominee });
        }
        self.chancellor = Some(nominee);
        self.record(Action::Select(president, nominee));

        let chancellor = nominee;
        let roster = self.alive.clone();
        let mut yes = 0usize;
        for &voter in &roster {
            let view = self.view(voter);
            if self.strategies[voter].vote(&view, president, chancellor, &mut self.rng) {
                yes += 1;
                self.record(Action::VoteYes(voter, president, chancellor));
            } else {
                self.record(Action::VoteNo(voter, president, chancellor));
            }
        }
        trace!(
            "round {}: {yes}/{} for government {president}/{chancellor}",
            self.rounds,
            roster.len()
        );

        // strictly more than half; ties fail
        if 2 * yes > roster.len() {
            if self.fascist_enacted.len() > 3 && self.players[chancellor].role == Role::Hitler {
                debug!("round {}: Hitler elected chancellor", self.rounds);
                return Ok(Some(Party::Fascist));
            }
            self.legislative_session(president, chancellor)?;
        } else {
            self.failed_elections += 1;
        }

        if self.failed_elections == 3 {
            self.forced_enactment();
        }

        Ok(self.winner())
    }

    fn legislative_session(
        &mut self,
        president: PlayerId,
        chancellor: PlayerId,
    ) -> Result<(), GameError> {
        let hand = self.supply.draw_hand(&mut self.rng);

        let view = self.view(president);
        let index = self.strategies[president].discard_from_hand(&view, &hand, &mut self.rng);
        if index >= hand.len() {
            return Err(GameError::CardIndexOutOfRange {
                actor: president,
                index,
            });
        }
        let discarded = hand[index];
        let pair = match index {
            0 => [hand[1], hand[2]],
            1 => [hand[0], hand[2]],
            _ => [hand[0], hand[1]],
        };
        self.supply.discard(discarded);
        self.record(Action::Discard(president, Some(discarded)));
        self.record(Action::Offer(president, pair.map(Some)));

        if self.veto_unlocked {
            let chancellor_view = self.view(chancellor);
            let president_view = self.view(president);
            let agreed = self.strategies[chancellor].veto(&chancellor_view, &pair, &mut self.rng)
                && self.strategies[president].veto(&president_view, &pair, &mut self.rng);
            if agreed {
                // a veto is a failed government: both cards go to the
                // discard and the tracker advances
                self.record(Action::Veto(president, pair));
                self.supply.discard(pair[0]);
                self.supply.discard(pair[1]);
                self.failed_elections += 1;
                debug!("round {}: government vetoed the agenda", self.rounds);
                return Ok(());
            }
        }

        let view = self.view(chancellor);
        let index = self.strategies[chancellor].enact_from_pair(&view, &pair, &mut self.rng);
        if index >= pair.len() {
            return Err(GameError::CardIndexOutOfRange {
                actor: chancellor,
                index,
            });
        }
        let discarded = pair[index];
        let played = pair[1 - index];
        self.supply.discard(discarded);
        self.record(Action::Discard(chancellor, Some(discarded)));
        self.record(Action::Play(chancellor, played));
        self.failed_elections = 0;

        match played {
            Policy::Liberal => self.liberal_enacted.push(played),
            Policy::Fascist => {
                self.fascist_enacted.push(played);
                self.resolve_power(president)?;
            }
        }

        Ok(())
    }

    // Count-indexed presidential powers. Each fires exactly once: the
    // fascist count only grows, and forced tracker enactments skip this
    // path entirely.
    fn resolve_power(&mut self, president: PlayerId) -> Result<(), GameError> {
        match self.fascist_enacted.len() {
            2 => {
                let view = self.view(president);
                let target = self.strategies[president].investigate(&view, &mut self.rng);
                if target == president || !self.alive.contains(&target) {
                    return Err(GameError::IneligibleTarget {
                        actor: president,
                        target,
                    });
                }
                // only the investigator learns the result; the table just
                // sees that an investigation happened
                let party = self.players[target].role.party();
                self.players[president].knowledge.learn_party(target, party);
                self.record(Action::Investigate(president, target));
            }
            3 => {
                let view = self.view(president);
                let target = self.strategies[president].choose_president(&view, &mut self.rng);
                if target == president || !self.alive.contains(&target) {
                    return Err(GameError::IneligibleTarget {
                        actor: president,
                        target,
                    });
                }
                self.record(Action::Select(president, target));
                self.president = target;
                self.president_picks = true;
            }
            4 => self.execute_power(president)?,
            5 => {
                self.execute_power(president)?;
                self.veto_unlocked = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn execute_power(&mut self, president: PlayerId) -> Result<(), GameError> {
        let view = self.view(president);
        let target = self.strategies[president].choose_execution(&view, &mut self.rng);
        if target == president || !self.alive.contains(&target) {
            return Err(GameError::IneligibleTarget {
                actor: president,
                target,
            });
        }
        // recorded before removal so the victim sees their own execution
        self.record(Action::Execute(president, target));
        self.alive.retain(|&seat| seat != target);
        self.dead.push(target);
        debug!("round {}: player {target} executed", self.rounds);
        Ok(())
    }

    fn forced_enactment(&mut self) {
        let card = self.supply.draw_one(&mut self.rng);
        debug!("round {}: tracker at 3, forcing a {card:?} policy", self.rounds);
        match card {
            Policy::Liberal => self.liberal_enacted.push(card),
            Policy::Fascist => self.fascist_enacted.push(card),
        }
        self.failed_elections = 0;
        // term-limit memory does not survive a forced enactment
        self.chancellor = None;
    }

    fn winner(&self) -> Option<Party> {
        if self.fascist_enacted.len() == FASCIST_POLICIES_TO_WIN {
            Some(Party::Fascist)
        } else if self.liberal_enacted.len() == LIBERAL_POLICIES_TO_WIN || self.hitler_dead() {
            Some(Party::Liberal)
        } else {
            None
        }
    }

    fn hitler_dead(&self) -> bool {
        self.dead
            .iter()
            .any(|&seat| self.players[seat].role == Role::Hitler)
    }

    fn next_alive_after(&self, seat: PlayerId) -> PlayerId {
        let mut idx = seat;
        loop {
            idx = (idx + 1) % NUM_PLAYERS;
            if self.alive.contains(&idx) {
                return idx;
            }
        }
    }

    fn view(&self, seat: PlayerId) -> View {
        let knowledge = &self.players[seat].knowledge;
        View {
            seat,
            alive: self.alive.clone(),
            liberal_enacted: self.liberal_enacted.len(),
            fascist_enacted: self.fascist_enacted.len(),
            failed_elections: self.failed_elections,
            veto_unlocked: self.veto_unlocked,
            chancellor: self.chancellor.filter(|seat| self.alive.contains(seat)),
            suspicion: knowledge.suspicion,
            parties: knowledge.parties,
            roles: knowledge.roles,
        }
    }

    // Append to the master log, then deliver each active seat the version
    // it is allowed to see, which feeds that seat's suspicion model.
    fn record(&mut self, action: Action) {
        trace!("{action:?}");
        let president = self.president;
        let chancellor = self.chancellor;
        self.log.push(action);
        for &id in &self.alive {
            let seen = action.visible_to(id, president, chancellor);
            self.players[id].knowledge.observe(seen);
        }
    }
}
