use glam::IVec2;

/// Heading of a beam, in grid coordinates (`y` grows downwards).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step taken by a beam travelling in this direction.
    pub const fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Reflects the heading off a diagonal mirror.
    ///
    /// The plain reflection swaps the vector components, `(dx, dy) -> (dy, dx)`,
    /// which is what a `\` mirror does. The reverted one also negates them,
    /// `(dx, dy) -> (-dy, -dx)`, which is what a `/` mirror does.
    pub const fn reflect_diagonally(self, reverted: bool) -> Direction {
        match (self, reverted) {
            (Direction::Up, false) => Direction::Left,
            (Direction::Down, false) => Direction::Right,
            (Direction::Left, false) => Direction::Up,
            (Direction::Right, false) => Direction::Down,
            (Direction::Up, true) => Direction::Right,
            (Direction::Down, true) => Direction::Left,
            (Direction::Left, true) => Direction::Down,
            (Direction::Right, true) => Direction::Up,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of directions packed into the low four bits of a byte.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Adds `direction`, returning `false` if it was already present.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let fresh = !self.contains(direction);
        self.0 |= direction.bit();
        fresh
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
