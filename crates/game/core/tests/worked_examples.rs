use std::collections::HashSet;

use targeting_core::grid::{Offset, Symmetry, symmetrize};
use targeting_core::rule::{ParsedRule, custom_aoe_offsets};
use targeting_core::{Board, Cell, Grid, RenderOptions, Scenario, TargetingScenario, VariableRegistry};

fn build(text: &str) -> Scenario {
    let mut variables = VariableRegistry::new();
    targeting_core::render(text, Grid::default(), &mut variables, &RenderOptions::default())
        .expect("rule should render")
        .expect("rule should not be blank")
        .scenario
}

fn targetable(scenario: &Scenario, board: &Board) -> HashSet<Cell> {
    board
        .grid()
        .cells()
        .filter(|&cell| scenario.is_targetable(board, cell))
        .collect()
}

/// A bare self-cast targets only the actor and affects nothing else.
#[test]
fn self_cast_without_area() {
    let scenario = build("target_mode none");
    let board = Board::default();
    let center = board.center();

    assert_eq!(targetable(&scenario, &board), HashSet::from([center]));
    assert!(scenario.aoe_cells(&board, center).is_empty());
}

/// Tile range 0–2 covers the Manhattan diamond and nothing at distance 3.
#[test]
fn tile_manhattan_band() {
    let scenario = build("target_mode tile\nmin_range 0\nmax_range 2\nrange_mode standard");
    let board = Board::default();
    let center = board.center();
    let cells = targetable(&scenario, &board);

    assert_eq!(cells.len(), 13);
    assert!(cells.contains(&center));
    assert!(cells.iter().all(|cell| cell.manhattan(center) <= 2));
    assert!(!scenario.is_targetable(&board, center.offset(3, 0)));
    assert!(!scenario.is_targetable(&board, center.offset(2, 1)));
}

/// Line of sight hides a cell behind an obstacle; an equidistant open cell stays.
#[test]
fn tile_line_of_sight() {
    let scenario = build(
        "target_mode tile\nmin_range 0\nmax_range 2\nrange_mode standard\nrestrictions [must_have_line_of_sight]",
    );
    let mut board = Board::default();
    let center = board.center();
    board.block(center.offset(-1, 0));

    assert!(!scenario.is_targetable(&board, center.offset(-2, 0)));
    assert!(scenario.is_targetable(&board, center.offset(2, 0)));
    // The diagonal only grazes the obstacle's corner.
    assert!(scenario.is_targetable(&board, center.offset(-1, -1)));
    assert!(scenario.is_targetable(&board, center.offset(-1, 0)));
}

/// Direction range 1–3 with a radius-1 splash: only the cardinal arms are selections.
#[test]
fn direction_arms_with_radius_area() {
    let scenario = build(
        "target_mode direction\nmin_range 1\nmax_range 3\naoe_mode standard\nmin_aoe 0\nmax_aoe 1",
    );
    let board = Board::default();
    let center = board.center();
    let cells = targetable(&scenario, &board);

    let mut arms = HashSet::new();
    for step in 1..=3 {
        arms.insert(center.offset(-step, 0));
        arms.insert(center.offset(step, 0));
        arms.insert(center.offset(0, -step));
        arms.insert(center.offset(0, step));
    }
    assert_eq!(cells, arms);

    let tip = center.offset(0, 3);
    let area: HashSet<Cell> = scenario.aoe_cells(&board, tip).into_iter().collect();
    let expected: HashSet<Cell> = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .map(|(d_row, d_col)| tip.offset(d_row, d_col))
        .collect();
    assert_eq!(area, expected);
}

/// Four-way symmetry of `[1 0][0 1]` is the plus shape, not eight offsets.
#[test]
fn four_way_symmetry_is_the_plus_shape() {
    let rule = ParsedRule::parse("target_mode none\naoe_mode custom\ncustom_aoe [1 0][0 1]\naoe_symmetry four_way");
    let offsets = custom_aoe_offsets(&rule);
    assert_eq!(offsets.len(), 4);
    for (row, col) in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)] {
        assert!(offsets.contains(&Offset::new(row, col)), "missing ({row}, {col})");
    }

    let again = symmetrize(&offsets, Symmetry::FourWay);
    assert_eq!(again.len(), offsets.len());
}

/// A custom area spread over several lines still parses as one field.
#[test]
fn multi_line_custom_area() {
    let scenario = build("target {\ntarget_mode none\naoe_mode custom\ncustom_aoe [\n[1 0]\n[2 0]\n]\ndont_orient_aoe true\n}");
    let board = Board::default();
    let center = board.center();
    assert_eq!(
        scenario.aoe_cells(&board, center),
        vec![center.offset(1, 0), center.offset(2, 0)]
    );
}
