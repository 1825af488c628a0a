use super::*;

#[test]
fn initial_mode_is_viewing() {
    let controller = ModeController::new();
    assert_eq!(controller.mode(), Mode::Viewing);
}

#[test]
fn enter_drawing_transitions() {
    let mut controller = ModeController::new();
    let t = controller.enter_drawing();
    assert_eq!(t.mode, Mode::Drawing);
    assert!(t.changed);
    assert!(!t.clear_draft);
    assert_eq!(controller.mode(), Mode::Drawing);
}

#[test]
fn enter_drawing_twice_is_noop() {
    let mut controller = ModeController::new();
    controller.enter_drawing();
    let t = controller.enter_drawing();
    assert!(!t.changed);
    assert!(!t.show_instruction);
    assert_eq!(controller.mode(), Mode::Drawing);
}

#[test]
fn exit_drawing_always_clears_draft() {
    let mut controller = ModeController::new();
    controller.enter_drawing();
    let t = controller.exit_drawing();
    assert_eq!(t.mode, Mode::Viewing);
    assert!(t.changed);
    assert!(t.clear_draft);
}

#[test]
fn exit_while_viewing_is_noop() {
    let mut controller = ModeController::new();
    let t = controller.exit_drawing();
    assert!(!t.changed);
    assert!(!t.clear_draft);
    assert_eq!(controller.mode(), Mode::Viewing);
}

#[test]
fn toggle_alternates_modes() {
    let mut controller = ModeController::new();
    assert_eq!(controller.toggle().mode, Mode::Drawing);
    assert_eq!(controller.toggle().mode, Mode::Viewing);
    assert_eq!(controller.toggle().mode, Mode::Drawing);
}

#[test]
fn instruction_shows_only_on_first_entry() {
    let mut controller = ModeController::new();
    assert!(controller.enter_drawing().show_instruction);
    controller.exit_drawing();
    assert!(!controller.enter_drawing().show_instruction);
    controller.exit_drawing();
    assert!(!controller.toggle().show_instruction);
}

#[test]
fn toggle_exit_clears_draft() {
    let mut controller = ModeController::new();
    controller.toggle();
    let t = controller.toggle();
    assert_eq!(t.mode, Mode::Viewing);
    assert!(t.clear_draft);
}
