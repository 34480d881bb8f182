//! Built-in demonstration puzzles.

use stepdoku_core::Board;

/// Names accepted by `--puzzle`, in menu order
pub const NAMES: &[&str] = &["easy", "hard", "mega"];

const EASY: &str = "\
000260701\
680070090\
190004500\
820100040\
004602900\
050003028\
009300074\
040050036\
703018000";

const HARD: &str = "\
001302000\
003007045\
007000009\
006500070\
200000001\
090001400\
500000900\
610200800\
000908500";

// 16x16; the naive search takes a while on this one
const MEGA: &str = "
 6  0  0  0   2  0  0 12   0  0  0 14   0  5  3  0
 0 14  0 13   9  1  0  7  12  0  0  0   0  0  0 16
 3 15  0  0   5  0  0 13   0  0  0  0  14  0  8  0
 0  9  2 10   0  0  0  0   7  0  0  0  13  6  0  0

 0  0  0  2   0  7 11  9   0  0 15  6   0 10  0  8
 0  0  8  0   0 12  3 14  16  0  9  0   6  0  0  0
16  0  4 15   0  0  0  0   0 10 14  7  11  0  0  9
 7  3  9  0   4  0 13 10   0  0 12  5   0  0 14  0

 9 10  0  0   0  0  0 16   6  7  0  3   0 15  0  0
 1  7 13  0  14  0  5  8   0 15  0  0   0  0  2  0
 0  0  3  0   0  0  7  0   5  2 16  9   0  0 12 13
 0  0  0 16  12  0  0 15   8 14  0  1   0 11  0  7

11  0  0  0  13  0 16  1   0  0  0  0   0  8  9  6
12  0 15  0   0  8  0  0   9  0  4  0   0  0  0  5
 0  2  0  1  10  9  0  0   0 16  5 11   0 14 15  0
 0  0  0  9  11  2  4  5   0  0  0  0   1  3  0  0";

/// Look up a built-in puzzle by name.
pub fn builtin(name: &str) -> Option<Board> {
    let text = match name {
        "easy" => EASY,
        "hard" => HARD,
        "mega" => MEGA,
        _ => return None,
    };
    Some(text.parse().expect("built-in puzzles are well-formed"))
}
