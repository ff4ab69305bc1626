use egui::{Color32, pos2};
use sketchpad::{ControlEvent, InputEvent, SketchConfig, SketchError, Sketchpad, Snapshot, Tool};

fn pad(size: u32) -> Sketchpad {
    Sketchpad::new(&SketchConfig {
        surface_size: size,
        ..SketchConfig::default()
    })
}

fn draw(pad: &mut Sketchpad, points: &[(f32, f32)]) {
    let (x, y) = points[0];
    pad.handle_input(InputEvent::PointerDown { position: pos2(x, y) });
    for &(x, y) in &points[1..] {
        pad.handle_input(InputEvent::PointerMove { position: pos2(x, y) });
    }
    let (x, y) = points[points.len() - 1];
    pad.handle_input(InputEvent::PointerUp { position: pos2(x, y) });
}

#[test]
fn test_n_undos_restore_pre_stroke_state() {
    let mut pad = pad(120);
    let blank = Snapshot::capture(pad.surface());

    let strokes: [&[(f32, f32)]; 4] = [
        &[(10.0, 10.0), (100.0, 10.0)],
        &[(10.0, 20.0), (60.0, 90.0), (110.0, 20.0)],
        &[(50.0, 5.0), (50.0, 115.0)],
        &[(0.0, 119.0), (119.0, 0.0)],
    ];
    let colors = [Color32::BLACK, Color32::RED, Color32::BLUE, Color32::GREEN];

    let mut intermediate = Vec::new();
    for (stroke, color) in strokes.iter().zip(colors) {
        intermediate.push(Snapshot::capture(pad.surface()));
        pad.set_color(color);
        draw(&mut pad, stroke);
    }
    assert_eq!(pad.history().len(), strokes.len());

    // each undo steps back exactly one stroke
    for expected in intermediate.iter().rev() {
        pad.undo().unwrap();
        assert_eq!(pad.surface().pixels(), expected.pixels());
    }
    assert_eq!(pad.surface().pixels(), blank.pixels());
    assert!(matches!(pad.undo(), Err(SketchError::NothingToUndo)));
}

#[test]
fn test_checkpoint_then_undo_is_identity() {
    let mut pad = pad(40);
    draw(&mut pad, &[(0.0, 0.0), (40.0, 40.0)]);
    let before = Snapshot::capture(pad.surface());

    let mut history = sketchpad::SnapshotHistory::new(8);
    let mut surface = pad.surface().clone();
    history.checkpoint(&surface);
    history.undo(&mut surface).unwrap();
    assert_eq!(surface.pixels(), before.pixels());
}

#[test]
fn test_undo_on_empty_history_leaves_surface() {
    let mut pad = pad(30);
    pad.set_tool(Tool::Fill);
    pad.click_fill(pos2(1.0, 1.0));
    pad.undo().unwrap();
    assert!(!pad.can_undo());

    let before = Snapshot::capture(pad.surface());
    let result = pad.handle_control(ControlEvent::Undo);
    assert!(matches!(result, Err(SketchError::NothingToUndo)));
    assert_eq!(pad.surface().pixels(), before.pixels());
}

#[test]
fn test_press_without_movement_records_nothing() {
    let mut pad = pad(30);
    pad.handle_input(InputEvent::PointerDown { position: pos2(5.0, 5.0) });
    pad.handle_input(InputEvent::PointerUp { position: pos2(5.0, 5.0) });
    assert!(!pad.can_undo());
}

#[test]
fn test_pointer_leave_completes_stroke() {
    let mut pad = pad(30);
    pad.handle_input(InputEvent::PointerDown { position: pos2(5.0, 5.0) });
    pad.handle_input(InputEvent::PointerMove { position: pos2(25.0, 5.0) });
    pad.handle_input(InputEvent::PointerLeave);
    assert_eq!(pad.history().len(), 1);

    // moving back in without a new press does not draw
    pad.handle_input(InputEvent::PointerMove { position: pos2(5.0, 25.0) });
    assert_eq!(pad.surface().pixel(5, 25), Some(Color32::WHITE));
}

#[test]
fn test_full_surface_operations_are_single_steps() {
    let mut pad = pad(30);
    draw(&mut pad, &[(0.0, 15.0), (30.0, 15.0)]);
    let after_stroke = Snapshot::capture(pad.surface());

    pad.set_color(Color32::RED);
    pad.set_tool(Tool::Fill);
    assert!(pad.click_fill(pos2(3.0, 3.0)));
    let after_fill = Snapshot::capture(pad.surface());

    pad.clear();
    assert_eq!(pad.surface().pixel(0, 0), Some(Color32::WHITE));
    assert_eq!(pad.history().len(), 3);

    pad.undo().unwrap();
    assert_eq!(pad.surface().pixels(), after_fill.pixels());
    pad.undo().unwrap();
    assert_eq!(pad.surface().pixels(), after_stroke.pixels());
}

#[test]
fn test_rejected_image_adds_no_history() {
    let mut pad = pad(30);
    let result = pad.load_image(b"\x89PNG but not really");
    assert!(matches!(result, Err(SketchError::ImageDecode(_))));
    assert!(!pad.can_undo());
}

#[test]
fn test_history_capacity_bounds_undo_depth() {
    let mut pad = Sketchpad::new(&SketchConfig {
        surface_size: 30,
        history_capacity: 3,
        ..SketchConfig::default()
    });
    for y in [5.0, 10.0, 15.0, 20.0, 25.0] {
        draw(&mut pad, &[(0.0, y), (30.0, y)]);
    }
    assert_eq!(pad.history().len(), 3);

    for _ in 0..3 {
        pad.undo().unwrap();
    }
    // the two oldest strokes can no longer be undone
    assert_eq!(pad.surface().pixel(15, 5), Some(Color32::BLACK));
    assert_eq!(pad.surface().pixel(15, 10), Some(Color32::BLACK));
    assert_eq!(pad.surface().pixel(15, 15), Some(Color32::WHITE));
    assert!(pad.undo().is_err());
}
