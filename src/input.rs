use crate::grid::Position;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }

    /// The neighbouring tile in this direction, or `None` when it would leave
    /// the coordinate space altogether.
    pub fn step(self, pos: Position) -> Option<Position> {
        let (x, y) = match self {
            Up => (Some(pos.x), pos.y.checked_sub(1)),
            Down => (Some(pos.x), pos.y.checked_add(1)),
            Left => (pos.x.checked_sub(1), Some(pos.y)),
            Right => (pos.x.checked_add(1), Some(pos.y)),
        };
        Some(Position::new(x?, y?))
    }
}

/// What the host can ask of the engine between ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Turn(Direction),
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Ignored,
    Committed,
    Buffered,
}

/// Two-slot direction queue.
///
/// The first slot holds the direction committed for the upcoming tick, the
/// second a single turn queued for the tick after that. Once a keypress has
/// committed the first slot in the current tick cycle, further turns go to the
/// second slot; anything beyond that is dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    committed: Option<Direction>,
    commit_used: bool,
    buffered: Option<Direction>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `effective` is the direction the snake moved on the last completed tick.
    pub fn submit(&mut self, requested: Direction, effective: Direction) -> Submission {
        if requested.is_reverse_of(effective) {
            return Submission::Ignored;
        }

        if self.buffered.is_some() {
            return Submission::Ignored;
        }

        if self.commit_used {
            self.buffered = Some(requested);
            return Submission::Buffered;
        }

        self.committed = Some(requested);
        self.commit_used = true;
        Submission::Committed
    }

    /// Direction to move in on the upcoming tick.
    pub fn next_direction(&self, effective: Direction) -> Direction {
        self.committed.unwrap_or(effective)
    }

    /// Closes the tick cycle after a successful move in `applied`. The buffered
    /// turn, if any, becomes the committed one, unless it would reverse `applied`.
    pub fn complete_tick(&mut self, applied: Direction) {
        self.commit_used = false;
        self.committed = match self.buffered.take() {
            Some(dir) if !dir.is_reverse_of(applied) => Some(dir),
            _ => None,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn committed(&self) -> Option<Direction> {
        self.committed
    }

    pub fn buffered(&self) -> Option<Direction> {
        self.buffered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_ignored() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.submit(Left, Right), Submission::Ignored);
        assert_eq!(buf.next_direction(Right), Right);
    }

    #[test]
    fn first_turn_commits_second_buffers_third_drops() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.submit(Down, Right), Submission::Committed);
        assert_eq!(buf.submit(Up, Right), Submission::Buffered);
        assert_eq!(buf.submit(Right, Right), Submission::Ignored);

        assert_eq!(buf.committed(), Some(Down));
        assert_eq!(buf.buffered(), Some(Up));
        assert_eq!(buf.next_direction(Right), Down);
    }

    #[test]
    fn buffered_turn_is_promoted_after_tick() {
        let mut buf = InputBuffer::new();
        buf.submit(Down, Right);
        assert_eq!(buf.submit(Right, Right), Submission::Buffered);
        buf.complete_tick(Down);

        assert_eq!(buf.next_direction(Down), Right);
        assert_eq!(buf.buffered(), None);

        // the promoted turn doesn't lock the commit slot
        assert_eq!(buf.submit(Down, Down), Submission::Committed);
        assert_eq!(buf.next_direction(Down), Down);
    }

    #[test]
    fn promoted_reversal_is_dropped() {
        let mut buf = InputBuffer::new();
        buf.submit(Down, Right);
        buf.submit(Up, Right);
        buf.complete_tick(Down);

        assert_eq!(buf.committed(), None);
        assert_eq!(buf.next_direction(Down), Down);
    }

    #[test]
    fn step_refuses_to_underflow() {
        assert_eq!(Up.step(Position::new(3, 0)), None);
        assert_eq!(Left.step(Position::new(0, 3)), None);
        assert_eq!(Right.step(Position::new(6, 4)), Some(Position::new(7, 4)));
        assert_eq!(Down.step(Position::new(6, 4)), Some(Position::new(6, 5)));
    }

    #[test]
    fn clear_resets_both_slots() {
        let mut buf = InputBuffer::new();
        buf.submit(Up, Right);
        buf.submit(Left, Right);
        buf.clear();
        assert_eq!(buf, InputBuffer::new());
    }
}
