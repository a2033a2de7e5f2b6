use std::iter;

use crate::direction::{Direction, DirectionSet};

/// Optical element occupying a cell of the contraption.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileType {
    /// `.`
    EmptySpace,
    /// `\`
    Mirror,
    /// `/`
    ReverseMirror,
    /// `|`
    VerticalSplitter,
    /// `-`
    HorizontalSplitter,
}

impl TileType {
    pub const ALL: [TileType; 5] = [
        TileType::EmptySpace,
        TileType::Mirror,
        TileType::ReverseMirror,
        TileType::VerticalSplitter,
        TileType::HorizontalSplitter,
    ];

    pub const fn symbol(self) -> char {
        match self {
            TileType::EmptySpace => '.',
            TileType::Mirror => '\\',
            TileType::ReverseMirror => '/',
            TileType::VerticalSplitter => '|',
            TileType::HorizontalSplitter => '-',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<TileType> {
        match symbol {
            '.' => Some(TileType::EmptySpace),
            '\\' => Some(TileType::Mirror),
            '/' => Some(TileType::ReverseMirror),
            '|' => Some(TileType::VerticalSplitter),
            '-' => Some(TileType::HorizontalSplitter),
            _ => None,
        }
    }

    /// Directions of the beams leaving this tile when a beam enters it heading `entry`.
    ///
    /// Always yields one direction, except for a splitter hit on its flat
    /// side, which yields the two directions perpendicular to `entry`.
    pub fn outgoing_directions(self, entry: Direction) -> impl Iterator<Item = Direction> {
        let (first, second) = match self {
            TileType::EmptySpace => (entry, None),
            TileType::Mirror => (entry.reflect_diagonally(false), None),
            TileType::ReverseMirror => (entry.reflect_diagonally(true), None),
            TileType::VerticalSplitter | TileType::HorizontalSplitter => {
                let aligned =
                    entry.is_horizontal() == (self == TileType::HorizontalSplitter);
                if aligned {
                    (entry, None)
                } else {
                    (
                        entry.reflect_diagonally(false),
                        Some(entry.reflect_diagonally(true)),
                    )
                }
            }
        };
        iter::once(first).chain(second)
    }
}

impl TryFrom<char> for TileType {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        TileType::from_symbol(symbol).ok_or(symbol)
    }
}

/// A grid cell together with the state of the trace currently running.
#[derive(Clone, Debug)]
pub struct Tile {
    pub kind: TileType,
    pub energized: bool,
    /// Entry directions already expanded at this cell.
    pub visited: DirectionSet,
}

impl Tile {
    pub fn new(kind: TileType) -> Self {
        Self {
            kind,
            energized: false,
            visited: DirectionSet::default(),
        }
    }

    pub fn reset(&mut self) {
        self.energized = false;
        self.visited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use Direction::*;

    #[rstest]
    #[case(TileType::EmptySpace, Right, &[Right])]
    #[case(TileType::EmptySpace, Up, &[Up])]
    #[case(TileType::Mirror, Right, &[Down])]
    #[case(TileType::Mirror, Up, &[Left])]
    #[case(TileType::ReverseMirror, Right, &[Up])]
    #[case(TileType::ReverseMirror, Down, &[Left])]
    #[case(TileType::VerticalSplitter, Down, &[Down])]
    #[case(TileType::VerticalSplitter, Right, &[Down, Up])]
    #[case(TileType::VerticalSplitter, Left, &[Up, Down])]
    #[case(TileType::HorizontalSplitter, Left, &[Left])]
    #[case(TileType::HorizontalSplitter, Up, &[Left, Right])]
    #[case(TileType::HorizontalSplitter, Down, &[Right, Left])]
    fn outgoing(
        #[case] kind: TileType,
        #[case] entry: Direction,
        #[case] expected: &[Direction],
    ) {
        let outgoing: Vec<_> = kind.outgoing_directions(entry).collect();
        assert_eq!(outgoing, expected);
    }

    #[test]
    fn splits_are_perpendicular_to_entry() {
        for kind in [TileType::VerticalSplitter, TileType::HorizontalSplitter] {
            for entry in Direction::ALL {
                let outgoing: Vec<_> = kind.outgoing_directions(entry).collect();
                assert!(outgoing.len() <= 2);
                if outgoing.len() == 2 {
                    assert!(outgoing
                        .iter()
                        .all(|d| d.is_horizontal() != entry.is_horizontal()));
                }
            }
        }
    }

    #[test]
    fn symbols_round_trip() {
        for kind in TileType::ALL {
            assert_eq!(TileType::try_from(kind.symbol()), Ok(kind));
        }
        assert_eq!(TileType::try_from('#'), Err('#'));
    }

    #[test]
    fn reset_clears_trace_state() {
        let mut tile = Tile::new(TileType::Mirror);
        tile.energized = true;
        tile.visited.insert(Left);
        tile.reset();
        assert!(!tile.energized);
        assert!(tile.visited.is_empty());
        assert_eq!(tile.kind, TileType::Mirror);
    }
}
