use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::config::{GRID_HEIGHT, GRID_WIDTH};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The fixed playing field
pub struct Grid;

impl Grid {
    pub const WIDTH: i32 = GRID_WIDTH;
    pub const HEIGHT: i32 = GRID_HEIGHT;

    /// Check if a position is within the grid bounds
    pub fn contains(pos: Position) -> bool {
        pos.x >= 0 && pos.x < Self::WIDTH && pos.y >= 0 && pos.y < Self::HEIGHT
    }

    /// Every cell, row by row
    pub fn cells() -> impl Iterator<Item = Position> {
        (0..Self::HEIGHT).flat_map(|y| (0..Self::WIDTH).map(move |x| Position::new(x, y)))
    }

    pub fn cell_count() -> usize {
        (Self::WIDTH * Self::HEIGHT) as usize
    }
}

/// A snake on the field
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the next move
    pub direction: Direction,
    /// Direction used by the last move
    heading: Direction,
    /// Keep the tail on the next move
    pub pending_growth: bool,
    pub alive: bool,
    spawn: Position,
    spawn_direction: Direction,
}

impl Snake {
    /// Create a single-cell snake at its spawn
    pub fn new(spawn: Position, direction: Direction) -> Self {
        Self {
            body: vec![spawn],
            direction,
            heading: direction,
            pending_growth: false,
            alive: true,
            spawn,
            spawn_direction: direction,
        }
    }

    /// Put the snake back where it started
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push(self.spawn);
        self.direction = self.spawn_direction;
        self.heading = self.spawn_direction;
        self.pending_growth = false;
        self.alive = true;
    }

    /// Request a new direction for the next move.
    ///
    /// A request that reverses either the pending direction or the direction
    /// of the last move is dropped, so two quick turns inside one tick cannot
    /// fold the snake back onto its neck.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction.is_opposite(direction) || self.heading.is_opposite(direction) {
            return;
        }
        self.direction = direction;
    }

    /// Advance one cell in the current direction
    pub fn move_forward(&mut self) {
        if !self.alive {
            return;
        }

        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !self.pending_growth {
            self.body.pop();
        }
        self.pending_growth = false;
        self.heading = self.direction;
    }

    /// Keep the tail on the next move
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn spawn(&self) -> Position {
        self.spawn
    }

    /// Check if the head left the field
    pub fn check_wall_collision(&self) -> bool {
        !Grid::contains(self.head())
    }

    /// Check if the head overlaps any other segment
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    /// Check if the head lies anywhere on `other`, its head included
    pub fn check_collision_with(&self, other: &Snake) -> bool {
        other.occupies(self.head())
    }

    /// Check if position is covered by any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
