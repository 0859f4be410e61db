use crate::action::Action;
use crate::{Party, PlayerId, Policy, Role, NUM_PLAYERS};

#[derive(Clone)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) role: Role,
    pub(crate) knowledge: Knowledge,
}

impl Player {
    pub(crate) fn new(id: PlayerId, role: Role) -> Self {
        Self {
            id,
            role,
            knowledge: Knowledge::new(id, role),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn party(&self) -> Party {
        self.role.party()
    }
}

// What one seat has seen and concluded about every other seat. Feeds hold
// the (possibly redacted) actions this seat was allowed to observe, keyed
// by the acting seat. A party learned through setup knowledge or an
// investigation is permanent and switches that actor from heuristic scoring
// to a fixed maximally/minimally suspicious reading.
#[derive(Clone)]
pub(crate) struct Knowledge {
    me: PlayerId,
    feeds: [Vec<Action>; NUM_PLAYERS],
    pub(crate) suspicion: [i64; NUM_PLAYERS],
    pub(crate) parties: [Option<Party>; NUM_PLAYERS],
    pub(crate) roles: [Option<Role>; NUM_PLAYERS],
}

impl Knowledge {
    pub(crate) fn new(me: PlayerId, role: Role) -> Self {
        let mut parties = [None; NUM_PLAYERS];
        let mut roles = [None; NUM_PLAYERS];
        parties[me] = Some(role.party());
        roles[me] = Some(role);

        Self {
            me,
            feeds: std::array::from_fn(|_| Vec::new()),
            suspicion: [0; NUM_PLAYERS],
            parties,
            roles,
        }
    }

    pub(crate) fn observe(&mut self, action: Action) {
        let actor = action.actor();
        self.suspicion[actor] += self.suspicion_delta(&action);
        self.feeds[actor].push(action);
    }

    pub(crate) fn learn_party(&mut self, seat: PlayerId, party: Party) {
        self.parties[seat] = Some(party);
    }

    pub(crate) fn learn_role(&mut self, seat: PlayerId, role: Role) {
        self.roles[seat] = Some(role);
        self.parties[seat] = Some(role.party());
    }

    // Heuristic weight of a single observed action, applied to the actor.
    // Scoring is skipped entirely once the actor's party is known; redacted
    // policy payloads carry no resolvable card and contribute nothing.
    fn suspicion_delta(&self, action: &Action) -> i64 {
        if self.parties[action.actor()].is_some() {
            return 0;
        }

        match *action {
            Action::Play(_, _) => 10,
            Action::Discard(_, Some(Policy::Fascist)) => 5,
            Action::Discard(_, Some(Policy::Liberal)) => 25,
            // suspicion by association, truncated toward zero
            Action::Select(_, target) => self.suspicion[target] / 2,
            Action::Accuse(_, target) if target == self.me => 50,
            _ => 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn feed(&self, actor: PlayerId) -> &[Action] {
        &self.feeds[actor]
    }
}

#[cfg(test)]
mod tests {
    use super::Knowledge;
    use crate::action::Action;
    use crate::{Party, Policy, Role};

    fn knowledge() -> Knowledge {
        Knowledge::new(0, Role::Liberal)
    }

    #[test]
    fn playing_any_policy_scores_ten() {
        let mut k = knowledge();
        k.observe(Action::Play(1, Policy::Liberal));
        assert_eq!(k.suspicion[1], 10);

        k.observe(Action::Play(1, Policy::Fascist));
        assert_eq!(k.suspicion[1], 20);
    }

    #[test]
    fn declared_discards_score_by_card() {
        let mut k = knowledge();
        k.observe(Action::Discard(1, Some(Policy::Fascist)));
        assert_eq!(k.suspicion[1], 5);

        k.observe(Action::Discard(2, Some(Policy::Liberal)));
        assert_eq!(k.suspicion[2], 25);
    }

    #[test]
    fn redacted_policies_score_nothing() {
        let mut k = knowledge();
        k.observe(Action::Discard(1, None));
        k.observe(Action::Offer(1, [None, None]));
        assert_eq!(k.suspicion[1], 0);
    }

    #[test]
    fn selection_inherits_half_the_target_suspicion() {
        let mut k = knowledge();
        k.suspicion[2] = 25;
        k.observe(Action::Select(1, 2));
        assert_eq!(k.suspicion[1], 12);
    }

    #[test]
    fn selection_delta_truncates_toward_zero() {
        let mut k = knowledge();
        k.suspicion[2] = -25;
        k.observe(Action::Select(1, 2));
        assert_eq!(k.suspicion[1], -12);
    }

    #[test]
    fn accusations_only_offend_the_accused() {
        let mut k = knowledge();
        k.observe(Action::Accuse(1, 0));
        assert_eq!(k.suspicion[1], 50);

        k.observe(Action::Accuse(2, 3));
        assert_eq!(k.suspicion[2], 0);
    }

    #[test]
    fn votes_and_powers_score_nothing() {
        let mut k = knowledge();
        k.observe(Action::VoteYes(1, 0, 2));
        k.observe(Action::VoteNo(1, 0, 2));
        k.observe(Action::Investigate(1, 3));
        k.observe(Action::Execute(1, 3));
        k.observe(Action::Veto(1, [Policy::Liberal, Policy::Liberal]));
        assert_eq!(k.suspicion[1], 0);
    }

    #[test]
    fn known_party_skips_heuristic_scoring() {
        let mut k = knowledge();
        k.learn_party(1, Party::Fascist);
        k.observe(Action::Discard(1, Some(Policy::Liberal)));
        assert_eq!(k.suspicion[1], 0);
    }

    #[test]
    fn own_actions_never_accumulate_suspicion() {
        // seat 0 knows its own party from the start
        let mut k = knowledge();
        k.observe(Action::Play(0, Policy::Fascist));
        k.observe(Action::Discard(0, Some(Policy::Liberal)));
        assert_eq!(k.suspicion[0], 0);
    }

    #[test]
    fn feeds_keep_observed_actions_in_order() {
        let mut k = knowledge();
        k.observe(Action::Select(1, 2));
        k.observe(Action::Discard(1, None));
        assert_eq!(
            k.feed(1),
            [Action::Select(1, 2), Action::Discard(1, None)].as_slice()
        );
        assert!(k.feed(2).is_empty());
    }

    #[test]
    fn learned_roles_imply_parties() {
        let mut k = knowledge();
        k.learn_role(6, Role::Hitler);
        assert_eq!(k.parties[6], Some(Party::Fascist));
        assert_eq!(k.roles[6], Some(Role::Hitler));
    }
}
