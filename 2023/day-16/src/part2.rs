use miette::*;
use rayon::prelude::*;

use crate::grid::Grid;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input)?;

    // Every worker traces on its own copy of the grid so traces never share tile state
    let best = grid
        .border_entries()
        .into_par_iter()
        .map_init(|| grid.clone(), |grid, beam| grid.energize_from(beam))
        .max()
        .ok_or_else(|| miette!("Grid has no border to send a beam from"))?;

    Ok(best.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const EXAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("51", process(EXAMPLE)?);
        Ok(())
    }

    #[rstest]
    #[case(EXAMPLE)]
    #[case("..|..\n.....")]
    #[case("/.\\\n...\n\\./")]
    fn matches_sequential_search(#[case] input: &str) -> Result<()> {
        let mut grid = Grid::parse(input)?;
        assert_eq!(grid.max_energization().to_string(), process(input)?);
        Ok(())
    }
}
