use std::collections::VecDeque;
use std::str::FromStr;

use chumsky::prelude::*;
use glam::IVec2;
use itertools::Itertools;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::direction::Direction;
use crate::tile::{Tile, TileType};

#[derive(Debug, Error, Diagnostic)]
pub enum GridError {
    #[error("could not parse grid: {reason}")]
    #[diagnostic(
        code(day_16::grid::parse),
        help("tiles must be one of `.`, `\\`, `/`, `|` or `-`, one row per line")
    )]
    Parse {
        reason: String,
        #[source_code]
        src: String,
        #[label("unexpected input")]
        span: SourceSpan,
    },

    #[error("malformed grid: no tiles")]
    #[diagnostic(code(day_16::grid::empty))]
    Empty,

    #[error("malformed grid: row {row} has {found} tiles, expected {expected}")]
    #[diagnostic(code(day_16::grid::ragged))]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A beam about to enter the tile at `position`, heading `direction`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Beam {
    pub position: IVec2,
    pub direction: Direction,
}

impl Beam {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            position: IVec2::new(x, y),
            direction,
        }
    }

    /// The beam leaving the current tile towards `direction`.
    fn advance(self, direction: Direction) -> Self {
        Self {
            position: self.position + direction.vector(),
            direction,
        }
    }
}

/// The contraption: a rectangular field of tiles plus the beams still to be traced.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major, `y * width + x`.
    tiles: Vec<Tile>,
    scheduled: VecDeque<Beam>,
}

/// Parses the contraption layout into rows of tiles. Shape is checked by [`Grid::new`].
fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<TileType>>, extra::Err<Rich<'a, char>>> {
    let tile = choice((
        just('.').to(TileType::EmptySpace),
        just('\\').to(TileType::Mirror),
        just('/').to(TileType::ReverseMirror),
        just('|').to(TileType::VerticalSplitter),
        just('-').to(TileType::HorizontalSplitter),
    ));

    let row = tile.repeated().at_least(1).collect::<Vec<_>>();

    // Blank lines and indentation between rows are insignificant
    let separator = text::inline_whitespace()
        .then(text::newline())
        .repeated()
        .at_least(1)
        .then(text::inline_whitespace());

    row.separated_by(separator)
        .allow_trailing()
        .collect::<Vec<_>>()
        .padded()
}

impl Grid {
    pub fn new(rows: Vec<Vec<TileType>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);

        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        if let Some((row, tiles)) = rows.iter().find_position(|tiles| tiles.len() != width) {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found: tiles.len(),
            });
        }

        let tiles = rows.into_iter().flatten().map(Tile::new).collect();

        Ok(Self {
            width,
            height,
            tiles,
            scheduled: VecDeque::new(),
        })
    }

    pub fn parse(input: &str) -> Result<Self, GridError> {
        let rows = parser().parse(input).into_result().map_err(|errors| {
            // Only the first error is reported, the rest usually cascade from it
            let error = &errors[0];
            let span = error.span();
            GridError::Parse {
                reason: error.to_string(),
                src: input.to_string(),
                span: (span.start, span.end.saturating_sub(span.start)).into(),
            }
        })?;

        Self::new(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, position: IVec2) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Sends a beam into the tile at `(x, y)` heading `direction` and traces it,
    /// along with every beam it splits into, until none are left.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn send_beam(&mut self, x: i32, y: i32, direction: Direction) {
        self.scheduled.push_back(Beam::new(x, y, direction));
        self.run_scheduled_beams();
    }

    fn run_scheduled_beams(&mut self) {
        let mut expanded = 0usize;

        while let Some(beam) = self.scheduled.pop_front() {
            let Some(index) = self.index(beam.position) else {
                tracing::trace!(?beam, "beam left the grid");
                continue;
            };

            let tile = &mut self.tiles[index];
            if !tile.visited.insert(beam.direction) {
                tracing::trace!(?beam, "beam already traced from this direction");
                continue;
            }
            tile.energized = true;
            expanded += 1;

            for direction in tile.kind.outgoing_directions(beam.direction) {
                self.scheduled.push_back(beam.advance(direction));
            }
        }

        tracing::debug!(
            expanded,
            energized = self.energized_count(),
            "beams traced"
        );
    }

    pub fn energized_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.energized).count()
    }

    /// Clears every tile's trace state and drops pending beams.
    ///
    /// Must be called between independent traces on the same grid, otherwise
    /// tiles energized by the previous trace are counted again.
    pub fn reset(&mut self) {
        self.tiles.iter_mut().for_each(Tile::reset);
        self.scheduled.clear();
    }

    /// Energized tile count for a single trace of `beam` on a freshly reset grid.
    pub fn energize_from(&mut self, beam: Beam) -> usize {
        self.reset();
        self.send_beam(beam.position.x, beam.position.y, beam.direction);
        self.energized_count()
    }

    /// Every beam that can enter the contraption from its edge, heading inwards.
    ///
    /// Corner tiles appear twice, once for each edge they touch.
    pub fn border_entries(&self) -> Vec<Beam> {
        let (width, height) = (self.width as i32, self.height as i32);

        let from_sides = (0..height).flat_map(|y| {
            [
                Beam::new(0, y, Direction::Right),
                Beam::new(width - 1, y, Direction::Left),
            ]
        });
        let from_top_and_bottom = (0..width).flat_map(|x| {
            [
                Beam::new(x, 0, Direction::Down),
                Beam::new(x, height - 1, Direction::Up),
            ]
        });

        from_sides.chain(from_top_and_bottom).collect()
    }

    /// Best energized count over all border entries, reusing this grid for every trace.
    pub fn max_energization(&mut self) -> usize {
        self.border_entries()
            .into_iter()
            .map(|beam| self.energize_from(beam))
            .max()
            .unwrap_or(0)
    }

    fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    pub fn render(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|tile| tile.kind.symbol()).collect::<String>())
            .join("\n")
    }

    pub fn render_energization(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|tile| if tile.energized { '#' } else { '.' })
                    .collect::<String>()
            })
            .join("\n")
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s)
    }
}
