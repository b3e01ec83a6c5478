use targeting_core::{Cell, CellFlags, RenderError, RenderOptions, RenderState, Visualizer, Warning};

/// Walks one editing session: load, adjust sliders, edit obstacles, hover, break
/// the rule, and fix it again.
#[test]
fn editing_session() {
    let mut visualizer = Visualizer::default();
    let center = visualizer.grid().center();

    // ================================================================
    // Load a rule with a variable-driven range
    // ================================================================
    visualizer.render(
        "target {\ntarget_mode Tile\nmin_range 1\nmax_range Reach + size\nrestrictions [needs_los]\naoe_chance 50%\n}",
    );
    assert!(matches!(visualizer.state(), RenderState::Ready(_)));
    assert_eq!(visualizer.adjustable_variables(), vec![("Reach".to_owned(), 0)]);
    assert_eq!(
        visualizer.summary(),
        "Mode: Tile · Range 1–Reach + size · Requires line of sight"
    );
    assert_eq!(
        visualizer.warnings(),
        &[Warning::UnsupportedField("aoe_chance".into())]
    );
    // Reach 0 + size 1: the four neighbours.
    assert_eq!(visualizer.frame().cells_with(CellFlags::IN_RANGE).len(), 4);

    // ================================================================
    // Slider changes rebuild with the same spelling
    // ================================================================
    assert_eq!(visualizer.set_variable("reach", 1), Some(1));
    assert_eq!(visualizer.adjustable_variables(), vec![("Reach".to_owned(), 1)]);
    assert_eq!(visualizer.frame().cells_with(CellFlags::IN_RANGE).len(), 12);

    // ================================================================
    // Obstacles take effect without a rebuild
    // ================================================================
    let behind = center.offset(-2, 0);
    assert!(visualizer.hover(behind).is_some());
    visualizer.toggle_obstacle(center.offset(-1, 0));
    assert_eq!(visualizer.hovered(), None);
    assert_eq!(visualizer.hover(behind), None);

    visualizer.clear_obstacles();
    assert!(visualizer.hover(behind).is_some());
    assert!(visualizer.frame().flags(behind).contains(CellFlags::TARGET));

    visualizer.apply_sample_obstacles();
    let frame = visualizer.frame();
    assert_eq!(frame.cells_with(CellFlags::BLOCKED).len(), 8);
    assert!(!frame.flags(center).contains(CellFlags::BLOCKED));

    // ================================================================
    // Breaking and fixing the rule
    // ================================================================
    visualizer.render("min_range 1\nmax_range 2");
    assert_eq!(visualizer.error(), Some(&RenderError::MissingMode { line: 0 }));
    assert_eq!(visualizer.summary(), "Summary unavailable");
    assert!(visualizer.frame().cells_with(CellFlags::IN_RANGE).is_empty());
    assert!(visualizer.adjustable_variables().is_empty());
    // The slider value survives even though the variable is no longer required.
    assert_eq!(visualizer.variable("reach"), Some(1));

    visualizer.render("target_mode none\naoe_mode all");
    assert_eq!(visualizer.frame().cells_with(CellFlags::AOE).len(), 225);
}

#[test]
fn dash_option_and_extra_warnings() {
    let mut visualizer = Visualizer::with_options(
        Default::default(),
        RenderOptions {
            dash_attack: true,
            extra_warnings: vec!["values from patch notes".into()],
        },
    );
    visualizer.render("target_mode direction\nmin_range 1\nmax_range 2\naoe_mode line\nmin_aoe 1\nmax_aoe 1");
    assert!(visualizer.summary().starts_with("Mode: Dash"));
    assert_eq!(
        visualizer.warnings(),
        &[Warning::Extra("values from patch notes".into())]
    );

    let preview = visualizer
        .hover(Cell::new(7, 10))
        .expect("the end of the east lane is a target");
    assert_eq!(preview.aoe, vec![Cell::new(7, 8), Cell::new(7, 9), Cell::new(7, 10)]);

    visualizer.set_options(RenderOptions::default());
    assert!(visualizer.summary().starts_with("Mode: Direction"));
    assert!(visualizer.warnings().is_empty());
}
