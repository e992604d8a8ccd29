//! Coordinate work in two dimensions.

use std::fmt;

use crate::Position;

/// A movement direction in two dimensions.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// Enumerates all directions of movement in "reading order",
    /// i.e. such that the resulting points are in reading order
    /// from the current position.
    pub fn all() -> impl Iterator<Item = Self> {
        DIRECTIONS.iter().cloned()
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

/// A location in 2D space.
///
/// Essentially a 2-tuple of x and y position, with y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Position,
    pub y: Position,
}

impl Point {
    /// Build a new point from coordinates.
    pub fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    /// Returns a point at (0, 0)
    pub fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Step in a given direction.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
        }
    }

    /// Manhattan distance between two points is the distance along
    /// each coordinate
    pub fn manhattan_distance(self, other: Point) -> Position {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A rectangle of cells, stored row by row in a flat buffer.
///
/// Converts between flat indices and points, and keeps movement
/// inside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Number of cells on the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// The point for a flat index, or `None` past the end of the grid.
    pub fn point(&self, index: usize) -> Option<Point> {
        if index >= self.len() {
            return None;
        }
        Some(Point::new(
            (index % self.width) as Position,
            (index / self.width) as Position,
        ))
    }

    /// The flat index for a point, or `None` off the grid.
    pub fn index(&self, point: Point) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        Some(point.y as usize * self.width + point.x as usize)
    }

    /// Step in a direction, staying on the grid.
    pub fn step(&self, point: Point, direction: Direction) -> Option<Point> {
        let next = point.step(direction);
        if self.contains(next) {
            Some(next)
        } else {
            None
        }
    }

    /// Directions which lead to another cell from `point`, with the cell
    /// reached.
    pub fn moves(&self, point: Point) -> impl Iterator<Item = (Direction, Point)> + '_ {
        Direction::all().filter_map(move |d| self.step(point, d).map(|p| (d, p)))
    }
}
