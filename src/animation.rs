//! Console playback of a solution.

use pegjump::board::format_board;
use pegjump::moves::Move;
use pegjump::parity::parity_vector;
use pegjump::solver::replay;
use pegjump::Board;

/// Prints the start board, then the board after every move.
///
/// With `show_vector`, each board is followed by its parity vector.
pub fn play(board: &Board, moves: &[Move], show_vector: bool) {
    let states = replay(board, moves);

    for (step, state) in states.iter().enumerate() {
        match step.checked_sub(1).and_then(|index| moves.get(index)) {
            Some(mv) => println!("Move {step}: {mv}"),
            None => println!("Start:"),
        }
        println!("{}", format_board(state));
        if show_vector {
            println!("parity vector: {:?}", parity_vector(state));
        }
        println!();
    }
}

/// Prints the move list, one move per line.
pub fn print_solution(moves: &[Move]) {
    for mv in moves {
        println!("{mv}");
    }
    println!("End of this one.");
}
