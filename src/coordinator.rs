//! Asynchronous move computation
//!
//! [`MoveCoordinator`] runs one search at a time on a worker thread and hands
//! the outcome back through a channel. Requests made while a search is in
//! flight are ignored. Cancelling raises the worker's stop flag, joins the
//! thread and drops its channel, so a cancelled search can never deliver a
//! move; the caller gets [`MoveEvent::Cancelled`] instead. Every request
//! yields exactly one event, in request order: a cancellation notice that
//! has not been polled yet comes before the next request's outcome.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::Difficulty;
use crate::engine::{AIEngine, MoveResult};
use crate::error::EngineError;

/// Whatever computes a move on the worker thread.
///
/// Implementations should poll `stop` and return `EngineError::Cancelled`
/// when it is raised; the coordinator tolerates ones that don't.
pub trait MoveSource: Clone + Send + 'static {
    fn compute_move(
        &self,
        board: &Board,
        color: Stone,
        stop: &AtomicBool,
    ) -> Result<MoveResult, EngineError>;

    fn set_difficulty(&mut self, _difficulty: Difficulty) {}
}

impl MoveSource for AIEngine {
    fn compute_move(
        &self,
        board: &Board,
        color: Stone,
        stop: &AtomicBool,
    ) -> Result<MoveResult, EngineError> {
        self.select_move_with_stop(board, color, stop)
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        AIEngine::set_difficulty(self, difficulty);
    }
}

/// Outcome of one move request, delivered exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// The search finished with a move
    Ready(Pos),
    /// The search finished without a move
    Unavailable(EngineError),
    /// The request was cancelled; its result, if any, was discarded
    Cancelled,
}

/// AI computation state
enum SearchState {
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult, EngineError>>,
        handle: JoinHandle<()>,
        stop: Arc<AtomicBool>,
        start_time: Instant,
    },
}

/// Runs searches off the caller's thread, one at a time.
pub struct MoveCoordinator<S: MoveSource = AIEngine> {
    source: S,
    stone: Stone,
    state: SearchState,
    /// Cancellation notices not yet polled, delivered before any later
    /// request's outcome
    pending: VecDeque<MoveEvent>,
    last_result: Option<MoveResult>,
}

impl<S: MoveSource> MoveCoordinator<S> {
    /// Coordinator computing moves for `stone` with `source`.
    pub fn new(source: S, stone: Stone) -> Self {
        Self {
            source,
            stone,
            state: SearchState::Idle,
            pending: VecDeque::new(),
            last_result: None,
        }
    }

    #[inline]
    pub fn stone(&self) -> Stone {
        self.stone
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Applies to the next request, not to a search already running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.source.set_difficulty(difficulty);
    }

    /// Statistics of the last search that delivered a move.
    #[inline]
    pub fn last_result(&self) -> Option<&MoveResult> {
        self.last_result.as_ref()
    }

    /// Check if a search is in flight (or finished but not yet polled)
    #[inline]
    pub fn is_thinking(&self) -> bool {
        matches!(self.state, SearchState::Thinking { .. })
    }

    /// Start searching `board` on a worker thread.
    ///
    /// Returns `false` without doing anything if a search is already in
    /// flight. The board is cloned, so the caller may keep using it.
    pub fn request_move(&mut self, board: &Board) -> bool {
        if self.is_thinking() {
            debug!(stone = %self.stone, "search already in flight, request ignored");
            return false;
        }

        let snapshot = board.clone();
        let source = self.source.clone();
        let color = self.stone;
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);
        let (tx, rx) = channel();

        let handle = thread::spawn(move || {
            let result = source.compute_move(&snapshot, color, &worker_stop);
            // Receiver is gone once the request was cancelled
            let _ = tx.send(result);
        });

        info!(stone = %color, moves = board.history().len(), "move requested");
        self.state = SearchState::Thinking {
            receiver: rx,
            handle,
            stop,
            start_time: Instant::now(),
        };
        true
    }

    /// Non-blocking check for the outcome of the current request.
    pub fn poll(&mut self) -> Option<MoveEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        let received = match &self.state {
            SearchState::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => None,
            },
            SearchState::Idle => return None,
        };
        Some(self.finish(received))
    }

    /// Block until the current request completes.
    ///
    /// Returns `None` when nothing was requested.
    pub fn wait(&mut self) -> Option<MoveEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        let received = match &self.state {
            SearchState::Thinking { receiver, .. } => receiver.recv().ok(),
            SearchState::Idle => return None,
        };
        Some(self.finish(received))
    }

    /// Stop the in-flight search and wait for its thread to exit.
    ///
    /// The search's result is discarded and the next poll reports
    /// [`MoveEvent::Cancelled`]. Returns `false` if nothing was running.
    pub fn cancel_move(&mut self) -> bool {
        let SearchState::Thinking {
            receiver,
            handle,
            stop,
            start_time,
        } = std::mem::replace(&mut self.state, SearchState::Idle)
        else {
            return false;
        };

        stop.store(true, Ordering::Relaxed);
        if handle.join().is_err() {
            warn!(stone = %self.stone, "search worker panicked during cancellation");
        }
        drop(receiver);

        info!(
            stone = %self.stone,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "move request cancelled"
        );
        self.pending.push_back(MoveEvent::Cancelled);
        true
    }

    fn finish(&mut self, received: Option<Result<MoveResult, EngineError>>) -> MoveEvent {
        let SearchState::Thinking {
            handle, start_time, ..
        } = std::mem::replace(&mut self.state, SearchState::Idle)
        else {
            return MoveEvent::Unavailable(EngineError::WorkerLost);
        };
        if handle.join().is_err() {
            warn!(stone = %self.stone, "search worker panicked");
        }
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        match received {
            Some(Ok(result)) => {
                info!(
                    stone = %self.stone,
                    best = %result.best_move,
                    score = result.score,
                    nodes = result.nodes,
                    elapsed_ms,
                    "move ready"
                );
                let pos = result.best_move;
                self.last_result = Some(result);
                MoveEvent::Ready(pos)
            }
            Some(Err(EngineError::Cancelled)) => MoveEvent::Cancelled,
            Some(Err(err)) => {
                warn!(stone = %self.stone, error = %err, elapsed_ms, "search produced no move");
                MoveEvent::Unavailable(err)
            }
            None => {
                warn!(stone = %self.stone, "search worker exited without a result");
                MoveEvent::Unavailable(EngineError::WorkerLost)
            }
        }
    }
}

impl<S: MoveSource> Drop for MoveCoordinator<S> {
    fn drop(&mut self) {
        self.cancel_move();
    }
}
