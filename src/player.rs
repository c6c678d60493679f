//! Players seated at a game session
//!
//! A session talks to both seats through [`Player`] and never knows which
//! kind it is driving. Humans answer through [`Player::claim_turn`]; computer
//! players answer asynchronously through [`Player::poll_move`].

use crate::board::{Board, Stone};
use crate::config::Difficulty;
use crate::coordinator::{MoveCoordinator, MoveEvent, MoveSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

pub trait Player {
    fn kind(&self) -> PlayerKind;

    fn stone(&self) -> Stone;

    /// Ask this player for a move on `board`.
    fn request_move(&mut self, board: &Board);

    /// Withdraw an outstanding request.
    fn cancel_move(&mut self) {}

    fn is_thinking(&self) -> bool {
        false
    }

    /// Non-blocking check for an answer to the last request.
    fn poll_move(&mut self) -> Option<MoveEvent> {
        None
    }

    /// Block until the last request is answered.
    fn wait_move(&mut self) -> Option<MoveEvent> {
        None
    }

    /// Consume an outstanding request for interactive input.
    ///
    /// Returns `true` only for a human who was asked to move.
    fn claim_turn(&mut self) -> bool {
        false
    }

    fn set_difficulty(&mut self, _difficulty: Difficulty) {}
}

/// Seat whose moves come from outside the engine.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    stone: Stone,
    waiting: bool,
}

impl HumanPlayer {
    pub fn new(stone: Stone) -> Self {
        Self {
            stone,
            waiting: false,
        }
    }

    /// Check if a move has been requested and not yet played
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }
}

impl Player for HumanPlayer {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn stone(&self) -> Stone {
        self.stone
    }

    fn request_move(&mut self, _board: &Board) {
        self.waiting = true;
    }

    fn cancel_move(&mut self) {
        self.waiting = false;
    }

    fn claim_turn(&mut self) -> bool {
        std::mem::replace(&mut self.waiting, false)
    }
}

impl<S: MoveSource> Player for MoveCoordinator<S> {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Computer
    }

    fn stone(&self) -> Stone {
        MoveCoordinator::stone(self)
    }

    fn request_move(&mut self, board: &Board) {
        MoveCoordinator::request_move(self, board);
    }

    fn cancel_move(&mut self) {
        MoveCoordinator::cancel_move(self);
    }

    fn is_thinking(&self) -> bool {
        MoveCoordinator::is_thinking(self)
    }

    fn poll_move(&mut self) -> Option<MoveEvent> {
        self.poll()
    }

    fn wait_move(&mut self) -> Option<MoveEvent> {
        self.wait()
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        MoveCoordinator::set_difficulty(self, difficulty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;
    use crate::engine::AIEngine;

    #[test]
    fn test_human_claims_turn_once() {
        let mut human = HumanPlayer::new(Stone::Black);
        assert!(!human.claim_turn());
        human.request_move(&Board::new());
        assert!(human.is_waiting());
        assert!(human.claim_turn());
        assert!(!human.claim_turn());
    }

    #[test]
    fn test_human_cancel_clears_request() {
        let mut human = HumanPlayer::new(Stone::White);
        human.request_move(&Board::new());
        human.cancel_move();
        assert!(!human.claim_turn());
        assert_eq!(human.poll_move(), None);
    }

    #[test]
    fn test_computer_player_through_trait() {
        let mut seat: Box<dyn Player> =
            Box::new(MoveCoordinator::new(AIEngine::new(), Stone::Black));
        assert_eq!(seat.kind(), PlayerKind::Computer);
        assert!(!seat.claim_turn());
        seat.request_move(&Board::new());
        assert_eq!(seat.wait_move(), Some(MoveEvent::Ready(Pos::CENTER)));
        assert!(!seat.is_thinking());
    }
}
