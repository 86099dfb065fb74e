//! Deterministic brick layout generation
//!
//! A pure function of the level number. Levels 1-3 use hand-tuned shapes;
//! level 4 and up repeat a fixed grid with a skip pattern. Ids restart from
//! zero each level and ascend in generation order, which is also the
//! collision iteration order.

use glam::Vec2;

use super::state::Brick;
use crate::consts::*;

/// Left edge that centers `count` bricks in the play area
fn centered_row_start(count: u32) -> f32 {
    let row_width = count as f32 * BRICK_WIDTH + count.saturating_sub(1) as f32 * BRICK_SPACING;
    (PLAY_WIDTH - row_width) / 2.0
}

fn brick_at(id: u32, x: f32, row: u32, hits_required: u32) -> Brick {
    Brick {
        id,
        pos: Vec2::new(x, BRICK_TOP_OFFSET + row as f32 * (BRICK_HEIGHT + BRICK_SPACING)),
        hits_required,
        destroyed: false,
    }
}

/// Generate the brick layout for a level.
///
/// - Level 1: six uniform rows of six
/// - Level 2: rows narrow by one brick every two rows
/// - Level 3: diamond, widest in the middle
/// - Level 4+: full 7x6 grid with a checkerboard-like skip pattern and three
///   reinforced top rows
pub fn generate_level(level: u32) -> Vec<Brick> {
    let mut bricks = Vec::new();
    let mut next_id = 0u32;

    let grid_start_x = centered_row_start(GRID_COLS);

    for row in 0..GRID_ROWS {
        // Top two rows are reinforced in the hand-tuned levels
        let hits_required = if row < 2 { 2 } else { 1 };

        if level >= 4 {
            for col in 0..GRID_COLS {
                let skip = (row % 2 == 0 && col % 2 != 0) || (row % 3 == 1 && col % 3 == 0);
                if skip {
                    continue;
                }
                let x = grid_start_x + col as f32 * (BRICK_WIDTH + BRICK_SPACING);
                bricks.push(brick_at(next_id, x, row, if row < 3 { 2 } else { 1 }));
                next_id += 1;
            }
            continue;
        }

        let bricks_in_row = match level {
            1 => 6,
            2 => GRID_COLS - row / 2,
            _ => {
                let distance_from_center = (row as i32 - (GRID_ROWS / 2) as i32).unsigned_abs();
                match (GRID_COLS + 1).checked_sub(distance_from_center * 2) {
                    Some(n) if n >= 1 => n,
                    _ => continue,
                }
            }
        };

        let row_start_x = centered_row_start(bricks_in_row);
        for col in 0..bricks_in_row {
            let x = row_start_x + col as f32 * (BRICK_WIDTH + BRICK_SPACING);
            bricks.push(brick_at(next_id, x, row, hits_required));
            next_id += 1;
        }
    }

    debug_assert!(!bricks.is_empty(), "level {level} generated no bricks");
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        for level in 1..=8 {
            let a = generate_level(level);
            let b = generate_level(level);
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b.iter()) {
                assert_eq!(x.id, y.id);
                assert_eq!(x.pos, y.pos);
                assert_eq!(x.hits_required, y.hits_required);
            }
        }
    }

    #[test]
    fn test_ids_are_unique_and_ascending() {
        for level in 1..=8 {
            let bricks = generate_level(level);
            for (i, brick) in bricks.iter().enumerate() {
                assert_eq!(brick.id, i as u32);
                assert!(!brick.destroyed);
            }
        }
    }

    #[test]
    fn test_level_one_shape() {
        let bricks = generate_level(1);
        // Six rows of six
        assert_eq!(bricks.len(), 36);

        // Top two rows reinforced, the rest single-hit
        for brick in &bricks {
            let row = (brick.id / 6) as u32;
            let expected = if row < 2 { 2 } else { 1 };
            assert_eq!(brick.hits_required, expected, "brick {}", brick.id);
        }

        // Each row centered: first brick of row 0 mirrors the last
        let first = &bricks[0];
        let last_in_row = &bricks[5];
        let left_gap = first.pos.x;
        let right_gap = PLAY_WIDTH - (last_in_row.pos.x + BRICK_WIDTH);
        assert!((left_gap - right_gap).abs() < 1e-3);
    }

    #[test]
    fn test_level_two_narrows_every_other_row() {
        let bricks = generate_level(2);
        // Rows of 7, 7, 6, 6, 5, 5
        assert_eq!(bricks.len(), 36);

        let mut row_counts = [0u32; GRID_ROWS as usize];
        for brick in &bricks {
            let row =
                ((brick.pos.y - BRICK_TOP_OFFSET) / (BRICK_HEIGHT + BRICK_SPACING)).round() as usize;
            row_counts[row] += 1;
        }
        assert_eq!(row_counts, [7, 7, 6, 6, 5, 5]);
    }

    #[test]
    fn test_level_three_diamond() {
        let bricks = generate_level(3);
        let mut row_counts = [0u32; GRID_ROWS as usize];
        for brick in &bricks {
            let row =
                ((brick.pos.y - BRICK_TOP_OFFSET) / (BRICK_HEIGHT + BRICK_SPACING)).round() as usize;
            row_counts[row] += 1;
        }
        // Widest at the center row
        assert_eq!(row_counts, [2, 4, 6, 8, 6, 4]);
    }

    #[test]
    fn test_level_four_skip_pattern() {
        let bricks = generate_level(4);
        let grid_start_x = centered_row_start(GRID_COLS);

        for brick in &bricks {
            let row =
                ((brick.pos.y - BRICK_TOP_OFFSET) / (BRICK_HEIGHT + BRICK_SPACING)).round() as u32;
            let col = ((brick.pos.x - grid_start_x) / (BRICK_WIDTH + BRICK_SPACING)).round() as u32;

            // No brick may occupy a skipped cell
            let skip = (row % 2 == 0 && col % 2 != 0) || (row % 3 == 1 && col % 3 == 0);
            assert!(!skip, "brick {} occupies skipped cell ({row},{col})", brick.id);

            // Top three rows reinforced
            let expected = if row < 3 { 2 } else { 1 };
            assert_eq!(brick.hits_required, expected);
        }

        // Row 0 keeps even columns only: 0, 2, 4, 6
        let row0: Vec<u32> = bricks
            .iter()
            .filter(|b| b.pos.y == BRICK_TOP_OFFSET)
            .map(|b| ((b.pos.x - grid_start_x) / (BRICK_WIDTH + BRICK_SPACING)).round() as u32)
            .collect();
        assert_eq!(row0, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_later_levels_reuse_grid_layout() {
        let a = generate_level(4);
        let b = generate_level(9);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.pos, y.pos);
        }
    }
}
