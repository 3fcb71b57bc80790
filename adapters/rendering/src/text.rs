use maze_carver_core::{CellView, Dimensions};

const CORNER: char = '+';
const HORIZONTAL_WALL: &str = "---";
const OPEN_FLOOR: &str = "   ";
const UNVISITED_FLOOR: &str = "###";

/// Draws a maze with ASCII glyphs, one text row per cell row plus wall rows.
///
/// `cells` are consumed in row-major order; missing trailing cells are drawn
/// untouched. Unvisited cells are filled with `#`. The result has no trailing
/// newline.
#[must_use]
pub fn render_text<I>(dimensions: Dimensions, cells: I) -> String
where
    I: IntoIterator<Item = CellView>,
{
    let columns = dimensions.columns() as usize;
    let mut cells = cells.into_iter();
    let mut lines = Vec::with_capacity(dimensions.rows() as usize * 2 + 1);

    let mut top = String::from(CORNER);
    for _ in 0..columns {
        top.push_str(HORIZONTAL_WALL);
        top.push(CORNER);
    }
    lines.push(top);

    for _ in 0..dimensions.rows() {
        let row: Vec<CellView> = (0..columns)
            .map(|_| cells.next().unwrap_or(CellView::UNTOUCHED))
            .collect();

        let mut body = String::from('|');
        let mut floor = String::from(CORNER);
        for cell in &row {
            body.push_str(if cell.visited {
                OPEN_FLOOR
            } else {
                UNVISITED_FLOOR
            });
            body.push(if cell.wall_right { '|' } else { ' ' });
            floor.push_str(if cell.wall_bottom {
                HORIZONTAL_WALL
            } else {
                OPEN_FLOOR
            });
            floor.push(CORNER);
        }
        lines.push(body);
        lines.push(floor);
    }

    lines.join("\n")
}
