//! Text rendering of a room graph for terminals and snapshot checks.
//! Each room is one cell; `-` and `|` between cells are doors.

use std::collections::HashMap;

use warren_core::{Direction, Pos, RoomGraph, RoomId, RoomTag};

/// A room to draw with a custom glyph on top of its tag, such as an agent.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    pub room: RoomId,
    pub glyph: char,
}

pub fn tag_glyph(tag: RoomTag) -> char {
    match tag {
        RoomTag::Normal => 'o',
        RoomTag::Home => 'H',
        RoomTag::Exit => 'E',
        RoomTag::Collectible => 'C',
    }
}

pub fn render_map(graph: &RoomGraph, markers: &[Marker]) -> String {
    let size = graph.room_size();
    let cells: Vec<(Pos, char, bool, bool)> = graph
        .rooms()
        .map(|room| {
            let cell = Pos::new(room.pos().x.div_euclid(size), room.pos().y.div_euclid(size));
            let glyph = markers
                .iter()
                .rev()
                .find(|marker| marker.room == room.id())
                .map_or_else(|| tag_glyph(room.tag()), |marker| marker.glyph);
            (cell, glyph, room.has_door(Direction::Right), room.has_door(Direction::Down))
        })
        .collect();

    let Some(min_x) = cells.iter().map(|(cell, ..)| cell.x).min() else {
        return String::new();
    };
    let min_y = cells.iter().map(|(cell, ..)| cell.y).min().unwrap_or(0);
    let max_x = cells.iter().map(|(cell, ..)| cell.x).max().unwrap_or(min_x);
    let max_y = cells.iter().map(|(cell, ..)| cell.y).max().unwrap_or(min_y);

    let columns = (2 * (max_x - min_x) + 1) as usize;
    let rows = (2 * (max_y - min_y) + 1) as usize;
    let mut canvas: HashMap<(usize, usize), char> = HashMap::new();
    for (cell, glyph, right, down) in cells {
        let column = (2 * (cell.x - min_x)) as usize;
        let row = (2 * (cell.y - min_y)) as usize;
        canvas.insert((row, column), glyph);
        if right {
            canvas.insert((row, column + 1), '-');
        }
        if down {
            canvas.insert((row + 1, column), '|');
        }
    }

    let mut out = String::with_capacity(rows * (columns + 1));
    for row in 0..rows {
        let line: String =
            (0..columns).map(|column| canvas.get(&(row, column)).copied().unwrap_or(' ')).collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
