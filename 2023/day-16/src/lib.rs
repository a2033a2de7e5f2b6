pub mod direction;
pub mod grid;
pub mod tile;

pub mod part1;
pub mod part2;
