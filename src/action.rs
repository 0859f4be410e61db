use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::{PlayerId, Policy};

// Every game event, in the shape each observer is allowed to see it. Policy
// payloads use `None` for a card whose value was redacted; the cardinality
// of the original event is always preserved.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum Action {
    // president names a chancellor nominee, or (after the third fascist
    // policy) the sitting president names the next president outright
    Select(PlayerId, PlayerId),
    VoteYes(PlayerId, PlayerId, PlayerId),
    VoteNo(PlayerId, PlayerId, PlayerId),
    Discard(PlayerId, Option<Policy>),
    // president hands the chancellor the two remaining cards
    Offer(PlayerId, [Option<Policy>; 2]),
    Play(PlayerId, Policy),
    Veto(PlayerId, [Policy; 2]),
    Investigate(PlayerId, PlayerId),
    Execute(PlayerId, PlayerId),
    Accuse(PlayerId, PlayerId),
}

impl Action {
    pub fn actor(&self) -> PlayerId {
        match *self {
            Action::Select(actor, _)
            | Action::VoteYes(actor, _, _)
            | Action::VoteNo(actor, _, _)
            | Action::Discard(actor, _)
            | Action::Offer(actor, _)
            | Action::Play(actor, _)
            | Action::Veto(actor, _)
            | Action::Investigate(actor, _)
            | Action::Execute(actor, _)
            | Action::Accuse(actor, _) => actor,
        }
    }

    // The version of this action a given observer receives. Discards are
    // known only to the discarding player and the sitting president; the
    // offered pair only to president and chancellor. Everything else is
    // public, including an execution from the victim's point of view.
    pub fn visible_to(
        &self,
        observer: PlayerId,
        president: PlayerId,
        chancellor: Option<PlayerId>,
    ) -> Action {
        match *self {
            Action::Discard(actor, _) if observer != actor && observer != president => {
                Action::Discard(actor, None)
            }
            Action::Offer(actor, _) if observer != president && Some(observer) != chancellor => {
                Action::Offer(actor, [None, None])
            }
            other => other,
        }
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Select(player_idx, target_idx) => {
                f.write_fmt(format_args!("Player {player_idx} selects {target_idx}"))
            }
            Action::VoteYes(player_idx, president_idx, chancellor_idx) => f.write_fmt(format_args!(
                "Player {player_idx} votes yes on {president_idx}/{chancellor_idx}"
            )),
            Action::VoteNo(player_idx, president_idx, chancellor_idx) => f.write_fmt(format_args!(
                "Player {player_idx} votes no on {president_idx}/{chancellor_idx}"
            )),
            Action::Discard(player_idx, Some(policy)) => f.write_fmt(format_args!(
                "Player {player_idx} discards a {policy:?} policy"
            )),
            Action::Discard(player_idx, None) => {
                f.write_fmt(format_args!("Player {player_idx} discards a hidden policy"))
            }
            Action::Offer(player_idx, [Some(first), Some(second)]) => f.write_fmt(format_args!(
                "Player {player_idx} offers {first:?} and {second:?}"
            )),
            Action::Offer(player_idx, _) => f.write_fmt(format_args!(
                "Player {player_idx} offers two hidden policies"
            )),
            Action::Play(player_idx, policy) => {
                f.write_fmt(format_args!("Player {player_idx} plays a {policy:?} policy"))
            }
            Action::Veto(player_idx, [first, second]) => f.write_fmt(format_args!(
                "Player {player_idx} vetoes {first:?} and {second:?}"
            )),
            Action::Investigate(player_idx, target_idx) => f.write_fmt(format_args!(
                "Player {player_idx} investigates {target_idx}"
            )),
            Action::Execute(player_idx, target_idx) => {
                f.write_fmt(format_args!("Player {player_idx} executes {target_idx}"))
            }
            Action::Accuse(player_idx, target_idx) => {
                f.write_fmt(format_args!("Player {player_idx} accuses {target_idx}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Action;
    use crate::Policy;

    #[test]
    fn discard_is_redacted_for_bystanders() {
        let action = Action::Discard(2, Some(Policy::Fascist));

        // the actor and the president see the card
        assert_eq!(
            action.visible_to(2, 0, Some(2)),
            Action::Discard(2, Some(Policy::Fascist))
        );
        assert_eq!(
            action.visible_to(0, 0, Some(2)),
            Action::Discard(2, Some(Policy::Fascist))
        );

        // everyone else sees a single hidden card, chancellor included
        for observer in [1, 3, 4, 5, 6] {
            assert_eq!(action.visible_to(observer, 0, Some(2)), Action::Discard(2, None));
        }
    }

    #[test]
    fn offer_is_redacted_outside_the_government() {
        let pair = [Some(Policy::Liberal), Some(Policy::Fascist)];
        let action = Action::Offer(0, pair);

        assert_eq!(action.visible_to(0, 0, Some(3)), Action::Offer(0, pair));
        assert_eq!(action.visible_to(3, 0, Some(3)), Action::Offer(0, pair));

        for observer in [1, 2, 4, 5, 6] {
            assert_eq!(
                action.visible_to(observer, 0, Some(3)),
                Action::Offer(0, [None, None])
            );
        }
    }

    #[test]
    fn public_actions_are_broadcast_unchanged() {
        let actions = [
            Action::Select(0, 3),
            Action::VoteYes(4, 0, 3),
            Action::VoteNo(5, 0, 3),
            Action::Play(3, Policy::Fascist),
            Action::Veto(0, [Policy::Liberal, Policy::Liberal]),
            Action::Investigate(0, 5),
            Action::Execute(0, 6),
            Action::Accuse(1, 2),
        ];

        for action in actions {
            for observer in 0..7 {
                assert_eq!(action.visible_to(observer, 0, Some(3)), action);
            }
        }
    }

    #[test]
    fn execution_is_visible_to_the_victim() {
        let action = Action::Execute(0, 6);
        assert_eq!(action.visible_to(6, 0, None), action);
    }
}
