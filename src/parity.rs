//! Read-only solvability hints. Nothing here feeds back into the search.

use crate::board::Board;

/// Parity vector from the fixed 3-coloring of cells by `(row + col) mod 3`.
///
/// Pegs are counted per class mod 2, giving `p`; the vector is
/// `[p1 + p2, p0 + p2, p0 + p1]` mod 2.
pub fn parity_vector(board: &Board) -> [u8; 3] {
    let mut class_parity = [0u8; 3];

    for (row, col) in board.coords() {
        if board.get((row, col)) != 0 {
            let class = ((row + col) % 3) as usize;
            class_parity[class] ^= 1;
        }
    }

    let [p0, p1, p2] = class_parity;
    [p1 ^ p2, p0 ^ p2, p0 ^ p1]
}

/// Cells counted as X in the side-5 SAX count.
const SAX_X_CELLS: [(i32, i32); 6] = [(0, 0), (2, 0), (2, 2), (4, 0), (4, 2), (4, 4)];

/// Cells counted as A in the side-5 SAX count.
const SAX_A_CELLS: [(i32, i32); 3] = [(2, 1), (3, 1), (3, 2)];

/// Edge triples; each holding two or more pegs adds one to S.
const SAX_S_EDGES: [[(i32, i32); 3]; 3] = [
    [(1, 0), (2, 0), (3, 0)],
    [(4, 1), (4, 2), (4, 3)],
    [(1, 1), (2, 2), (3, 3)],
];

/// S + A - X count for side-5 boards; `None` for any other size.
pub fn sax_count_t5(board: &Board) -> Option<i32> {
    if board.side() != 5 {
        return None;
    }

    let pegs = |cells: &[(i32, i32)]| {
        cells
            .iter()
            .filter(|&&coord| board.get(coord) != 0)
            .count() as i32
    };

    let x = pegs(&SAX_X_CELLS);
    let a = pegs(&SAX_A_CELLS);
    let s = SAX_S_EDGES.iter().filter(|edge| pegs(&edge[..]) >= 2).count() as i32;

    Some(s + a - x)
}
