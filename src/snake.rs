use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::Direction::{self, *};

/// Segments of the starting snake, head first.
pub const START_BODY: [Position; 3] = [Position::new(6, 4), Position::new(5, 4), Position::new(4, 4)];
pub const START_DIRECTION: Direction = Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    pub fn new(body: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        Snake { body: body.into_iter().collect(), direction }
    }

    pub fn starting() -> Self {
        Snake::new(START_BODY, START_DIRECTION)
    }

    /// Segments in draw order, head first.
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Position {
        // never empty: built from a non-empty shape and only ever grows or shifts
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Direction applied on the last completed move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves the head onto `new_head`. Unless `grow` is set the tail follows,
    /// and its old position is returned.
    pub fn advance(&mut self, new_head: Position, direction: Direction, grow: bool) -> Option<Position> {
        self.body.push_front(new_head);
        self.direction = direction;

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_keeps_length_unless_growing() {
        let mut snake = Snake::starting();
        let tail = snake.advance(Position::new(7, 4), Right, false);
        assert_eq!(tail, Some(Position::new(4, 4)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(7, 4));

        assert_eq!(snake.advance(Position::new(7, 5), Down, true), None);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.direction(), Down);
    }
}
