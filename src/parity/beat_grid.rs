//! Bomb interval grids.
//!
//! Bombs that fall within a small beat window form one [`BeatGrid`]. Each
//! grid is checked against the hand position and the direction the blade
//! would continue in; a blocked path pushes the hand away from the bombs
//! and flips a rolling parity. Walking all grids between two swings tells
//! whether the player most likely reset around the bombs.

use crate::config::ParityConfig;
use crate::geometry::direction_for_angle;
use crate::models::{Bomb, CutDirection, GRID_COLUMNS, GRID_ROWS, Hand, Parity, Swing};

type Cell = (i32, i32);
type BlockPredicate = fn(Cell, i32, i32, Parity) -> bool;

fn blocks_up(hand: Cell, x: i32, y: i32, _parity: Parity) -> bool {
    ((y >= hand.1 && y != 0) || (y > hand.1 && y > 0)) && x == hand.0
}

fn blocks_down(hand: Cell, x: i32, y: i32, _parity: Parity) -> bool {
    ((y <= hand.1 && y != 2) || (y < hand.1 && y < 2)) && x == hand.0
}

fn blocks_left(hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    let (hx, hy) = hand;
    match parity {
        Parity::Forehand => {
            (y == hy || y == hy - 1) && ((hx != 3 && x < hx) || (hx < 3 && x <= hx))
        }
        Parity::Backhand => y == hy && ((hx != 0 && x < hx) || (hx > 0 && x <= hx)),
    }
}

fn blocks_right(hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    let (hx, hy) = hand;
    match parity {
        Parity::Forehand => {
            (y == hy || y == hy - 1) && ((hx != 0 && x > hx) || (hx > 0 && x >= hx))
        }
        Parity::Backhand => y == hy && ((hx != 3 && x > hx) || (hx < 3 && x >= hx)),
    }
}

fn blocks_up_left(hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    blocks_up(hand, x, y, parity) && !(x == 3 && y == 1) && parity != Parity::Forehand
}

fn blocks_up_right(hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    blocks_up(hand, x, y, parity) && !(x == 0 && y == 1) && parity != Parity::Forehand
}

fn blocks_down_left(hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    blocks_down(hand, x, y, parity) && !(x == 3 && y == 1) && parity != Parity::Backhand
}

fn blocks_down_right(hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    blocks_down(hand, x, y, parity) && !(x == 0 && y == 1) && parity != Parity::Backhand
}

fn blocks_nothing(_hand: Cell, _x: i32, _y: i32, _parity: Parity) -> bool {
    false
}

// Indexed by cut direction id.
const BLOCK_PREDICATES: [BlockPredicate; 9] = [
    blocks_up,
    blocks_down,
    blocks_left,
    blocks_right,
    blocks_up_left,
    blocks_up_right,
    blocks_down_left,
    blocks_down_right,
    blocks_nothing,
];

/// Whether a bomb at (`x`, `y`) sits in the path of a blade at `hand`
/// continuing in `direction` with `parity`.
pub fn bomb_blocks(direction: CutDirection, hand: Cell, x: i32, y: i32, parity: Parity) -> bool {
    BLOCK_PREDICATES[direction.id()](hand, x, y, parity)
}

/// Step that moves a hand at `cell` away from the bombs around it.
pub fn avoidance_vector(cell: Cell) -> Cell {
    match cell {
        (0, 0) => (1, 1),
        (0, 1) => (1, 0),
        (0, 2) => (1, -1),
        (1, 0) => (0, 2),
        (1, 1) => (1, 0),
        (1, 2) => (0, -2),
        (2, 0) => (0, 2),
        (2, 1) => (-1, 0),
        (2, 2) => (0, -2),
        (3, 0) => (-1, -1),
        (3, 1) => (0, -1),
        (3, 2) => (-1, -1),
        _ => (0, 0),
    }
}

fn is_center(cell: Cell) -> bool {
    matches!(cell, (1, 1) | (2, 1))
}

/// Bombs sharing (roughly) one beat, as occupied grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatGrid {
    pub beat: f32,
    cells: Vec<Cell>,
}

impl BeatGrid {
    /// Bombs off the 4x3 grid are ignored.
    pub fn new(beat: f32, bombs: &[Bomb]) -> Self {
        let mut cells: Vec<Cell> = bombs
            .iter()
            .filter(|b| (0..GRID_COLUMNS).contains(&b.x) && (0..GRID_ROWS).contains(&b.y))
            .map(|b| (b.x, b.y))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        Self { beat, cells }
    }

    /// Groups beat-sorted bombs into grids; a bomb joins the open grid when
    /// it lies within `time_snap` beats of that grid's first bomb.
    pub fn group(bombs: &[Bomb], time_snap: f32) -> Vec<BeatGrid> {
        let mut grids = Vec::new();
        let mut pending: Vec<Bomb> = Vec::new();
        for bomb in bombs {
            if let Some(first) = pending.first() {
                if (bomb.beat - first.beat).abs() > time_snap {
                    grids.push(BeatGrid::new(first.beat, &pending));
                    pending.clear();
                }
            }
            pending.push(*bomb);
        }
        if let Some(first) = pending.first() {
            grids.push(BeatGrid::new(first.beat, &pending));
        }
        grids
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether any bomb blocks the blade. Bombs in the two centre cells
    /// never block. `x_offset` shifts bombs by two columns per dodge step.
    pub fn blocks(
        &self,
        hand: Cell,
        direction: CutDirection,
        parity: Parity,
        x_offset: i32,
    ) -> bool {
        self.cells
            .iter()
            .filter(|cell| !is_center(**cell))
            .any(|&(x, y)| bomb_blocks(direction, hand, x - x_offset * 2, y, parity))
    }

    /// Moves the hand out of the way when blocked. Returns the new hand cell
    /// and whether parity flipped.
    pub fn step(
        &self,
        hand: Cell,
        direction: CutDirection,
        parity: Parity,
        x_offset: i32,
    ) -> (Cell, bool) {
        if !self.blocks(hand, direction, parity, x_offset) {
            return (hand, false);
        }
        let (dx, dy) = avoidance_vector(hand);
        let moved = (
            (hand.0 + dx).clamp(0, GRID_COLUMNS - 1),
            (hand.1 + dy).clamp(0, GRID_ROWS - 1),
        );
        (moved, true)
    }
}

/// Outcome of walking every bomb grid between two swings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BombScan {
    pub hand: Cell,
    /// Rolling parity after the last grid.
    pub parity: Parity,
    pub grids: usize,
}

impl BombScan {
    /// Walks the bomb grids from the exit of `last`, flipping a rolling
    /// parity each time the hand has to dodge.
    pub fn run(
        last: &Swing,
        hand: Hand,
        bombs: &[Bomb],
        x_offset: i32,
        config: &ParityConfig,
    ) -> Self {
        let interval = if last.all_dots() {
            0.0
        } else {
            config.angle_interval
        };
        let grids = BeatGrid::group(bombs, config.bomb_time_snap);
        let mut cell = (last.end.x, last.end.y);
        let mut parity = last.parity;
        for grid in &grids {
            let direction = direction_for_angle(last.end.angle, parity, hand, interval);
            let (moved, flipped) = grid.step(cell, direction, parity, x_offset);
            cell = moved;
            if flipped {
                parity = parity.opposite();
            }
        }
        Self {
            hand: cell,
            parity,
            grids: grids.len(),
        }
    }

    /// A reset is indicated when the bombs left the hand in the opposite
    /// parity to the one it exited `last` with.
    pub fn reset_indicated(&self, last: Parity) -> bool {
        self.parity != last
    }
}
