//! In-memory board repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Board, BoardId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
///
/// Applies the same whole-board validation and version check as the
/// `PostgreSQL` adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<HashMap<BoardId, Board>>>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Returns a copy of `board` stamped with the next version.
fn next_version(board: &Board) -> Board {
    let mut data = board.clone().into_persisted();
    data.version += 1;
    Board::from_persisted(data)
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        board.ensure_unique_column_titles()?;
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&board.id()) {
            return Err(BoardRepositoryError::DuplicateBoard(board.id()));
        }
        state.insert(board.id(), board.clone());
        Ok(())
    }

    async fn update(&self, board: &Board) -> BoardRepositoryResult<()> {
        board.ensure_unique_column_titles()?;
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .get(&board.id())
            .ok_or(BoardRepositoryError::NotFound(board.id()))?;
        if stored.version() != board.version() {
            return Err(BoardRepositoryError::VersionConflict {
                id: board.id(),
                expected: board.version(),
            });
        }
        state.insert(board.id(), next_version(board));
        Ok(())
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[BoardId]) -> BoardRepositoryResult<Vec<Board>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(ids.iter().filter_map(|id| state.get(id).cloned()).collect())
    }

    async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.remove(&id);
        Ok(())
    }
}
