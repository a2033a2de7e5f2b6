use miette::*;

use crate::direction::Direction;
use crate::grid::Grid;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let mut grid = Grid::parse(input)?;

    // The beam enters the top-left tile from the left
    grid.send_beam(0, 0, Direction::Right);

    Ok(grid.energized_count().to_string())
}
