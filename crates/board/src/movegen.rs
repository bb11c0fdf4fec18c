//! Legal move generation.
//!
//! Inline moves are generated per marble and direction: the marble is the
//! trailing end of the column that travels. Broadside moves are generated per
//! line, enumerating each line once along one of [`Direction::LINE_AXES`].

use crate::{Cell, Direction, Move, Position};

/// Largest group of marbles that may move together.
pub const MAX_GROUP: u8 = 3;

/// What lies ahead of a marble along a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlineProbe {
    /// Own marbles in the column, starting with the trailing one (capped at 4)
    pub own: u8,
    /// Opposing marbles directly ahead of the column
    pub opposing: u8,
    /// First cell past the own marbles, None if that is off the board
    pub head: Option<Cell>,
    /// First cell past the opposing marbles (equals `head` when there are
    /// none), None if that is off the board
    pub beyond: Option<Cell>,
}

impl InlineProbe {
    /// True if the column may move: a plain step into an empty cell, or a push
    /// of a smaller opposing column into an empty cell or off the board.
    #[inline]
    pub fn is_legal(&self, position: &Position) -> bool {
        if self.own == 0 || self.own > MAX_GROUP {
            return false;
        }
        if self.opposing == 0 {
            // Own marbles are never pushed off
            return self.head.is_some_and(|cell| position.marble_at(cell).is_none());
        }
        self.opposing < self.own
            && self
                .beyond
                .map_or(true, |cell| position.marble_at(cell).is_none())
    }
}

/// The 2 or 3 cells of a broadside group and the axis it lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BroadsideLine {
    axis: Direction,
    cells: [Cell; 3],
    len: usize,
}

impl BroadsideLine {
    #[inline]
    pub fn axis(&self) -> Direction {
        self.axis
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.len]
    }
}

impl Position {
    /// Walk from `trailing` along `dir` counting own then opposing marbles.
    pub fn probe_inline(&self, trailing: Cell, dir: Direction) -> InlineProbe {
        let us = self.side_to_move();
        let them = us.opposite();

        let mut own = 0;
        let mut cursor = Some(trailing);
        while let Some(cell) = cursor {
            if self.marble_at(cell) != Some(us) || own > MAX_GROUP {
                break;
            }
            own += 1;
            cursor = cell.neighbor(dir);
        }
        let head = cursor;

        let mut opposing = 0;
        while let Some(cell) = cursor {
            if self.marble_at(cell) != Some(them) || opposing > MAX_GROUP {
                break;
            }
            opposing += 1;
            cursor = cell.neighbor(dir);
        }

        InlineProbe {
            own,
            opposing,
            head,
            beyond: cursor,
        }
    }

    /// The line from `first` to `last` if both lie on a common axis 1 or 2
    /// steps apart. Either end may come first.
    pub fn broadside_line(&self, first: Cell, last: Cell) -> Option<BroadsideLine> {
        let delta = last.cube() - first.cube();
        for steps in 1..MAX_GROUP as i32 {
            if let Some(axis) = Direction::ALL
                .into_iter()
                .find(|d| d.offset().scale(steps) == delta)
            {
                let mut cells = [first; 3];
                for i in 1..=steps as usize {
                    cells[i] = cells[i - 1].neighbor(axis)?;
                }
                return Some(BroadsideLine {
                    axis,
                    cells,
                    len: steps as usize + 1,
                });
            }
        }
        None
    }

    fn broadside_is_legal(&self, line: &BroadsideLine, dir: Direction) -> bool {
        if line.axis().is_parallel(dir) {
            return false;
        }
        let own = self.marbles(self.side_to_move());
        let occupied = self.occupied();
        line.cells().iter().all(|&cell| {
            own.contains(cell)
                && cell
                    .neighbor(dir)
                    .is_some_and(|dest| !occupied.contains(dest))
        })
    }

    /// Check whether a move is legal for the side to move
    pub fn is_legal(&self, mv: Move) -> bool {
        match mv {
            Move::Inline {
                trailing,
                direction,
            } => self.probe_inline(trailing, direction).is_legal(self),
            Move::Broadside {
                first,
                last,
                direction,
            } => self
                .broadside_line(first, last)
                .is_some_and(|line| self.broadside_is_legal(&line, direction)),
        }
    }

    /// Generate all legal moves for the side to move.
    ///
    /// A finished game has no legal moves.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(96);
        if self.is_terminal() {
            return moves;
        }

        let us = self.side_to_move();
        let own = self.marbles(us);

        for cell in own {
            for dir in Direction::ALL {
                if self.probe_inline(cell, dir).is_legal(self) {
                    moves.push(Move::inline(cell, dir));
                }
            }
        }

        for cell in own {
            for axis in Direction::LINE_AXES {
                let mut last = cell;
                for _ in 1..MAX_GROUP {
                    match last.neighbor(axis) {
                        Some(next) if own.contains(next) => last = next,
                        _ => break,
                    }
                    let Some(line) = self.broadside_line(cell, last) else {
                        break;
                    };
                    for dir in Direction::ALL {
                        if self.broadside_is_legal(&line, dir) {
                            moves.push(Move::broadside(cell, last, dir));
                        }
                    }
                }
            }
        }

        moves
    }
}
