use std::iter;

use bitfall_engine::{Board, HEIGHT, WIDTH};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Text,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{CellDisplay, style};

/// Width of the `row:` label column.
const LABEL_WIDTH: u16 = 4;

/// Draws every row of a [`Board`], top row first, each prefixed with its row number.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        LABEL_WIDTH
            + WIDTH as u16 * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        HEIGHT as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_constraints = (0..HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let col_constraints = iter::once(Constraint::Length(LABEL_WIDTH))
            .chain((0..WIDTH).map(|_| Constraint::Length(CellDisplay::width())));
        let vertical = Layout::vertical(row_constraints);
        let horizontal = Layout::horizontal(col_constraints);

        let grid_rows = area.layout::<HEIGHT>(&vertical);
        for (row, (grid_row, cells)) in iter::zip(grid_rows, self.board.rows()).enumerate() {
            let [label_area, cell_areas @ ..] = grid_row.layout::<{ WIDTH + 1 }>(&horizontal);
            Text::from(format!("{row}:"))
                .style(style::ROW_LABEL)
                .render(label_area, buf);
            for (cell_area, occupied) in iter::zip(cell_areas, cells) {
                CellDisplay::from_occupied(occupied).render(cell_area, buf);
            }
        }
    }
}
