//! # History Demo
//!
//! Drives a small editing session against the in-memory graph editor:
//! builds a tiny graph, merges a simulated drag, groups edits in a
//! bracket, removes and restores a node through its synthesized inverse,
//! and reconciles the history cursor the way an external transaction
//! system would.

use nodeforge_core::controller::{GraphController, GraphEditor, OperatorRegistry, OperatorSpec};
use nodeforge_core::graph::{Pin, PinDirection};
use nodeforge_core::math::vec2;

fn registry() -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();
    registry.register(
        "math.Add",
        OperatorSpec::new(vec![
            Pin::new("A", PinDirection::Input, "f32"),
            Pin::new("B", PinDirection::Input, "f32"),
            Pin::new("Result", PinDirection::Output, "f32"),
        ]),
    );
    registry.register(
        "math.Scale",
        OperatorSpec::new(vec![
            Pin::new("Value", PinDirection::Input, "f32"),
            Pin::new("Factor", PinDirection::Input, "f32"),
            Pin::new("Result", PinDirection::Output, "f32"),
        ]),
    );
    registry
}

fn print_history(editor: &GraphEditor) {
    let stack = editor.action_stack();
    println!(
        "  history: {} undo / {} redo (cursor {})",
        stack.undo_len(),
        stack.redo_len(),
        stack.cursor()
    );
    for title in stack.undo_titles() {
        println!("    UNDO {title}");
    }
    for title in stack.redo_titles() {
        println!("    REDO {title}");
    }
}

fn main() {
    env_logger::init();

    let mut editor = GraphEditor::new(registry());
    editor.on_modified(|event| log::debug!("graph modified: {event:?}"));

    println!("== build a small graph ==");
    editor
        .add_operator_node("math.Add", "execute", vec2(0.0, 0.0), "Add", true)
        .expect("add node");
    editor
        .add_operator_node("math.Scale", "execute", vec2(200.0, 0.0), "Scale", true)
        .expect("add node");
    editor
        .add_link("Add.Result", "Scale.Value", true)
        .expect("link");
    editor
        .set_pin_default_value("Add.A", "5", true)
        .expect("set pin");
    editor
        .set_pin_default_value("Add.A", "7", true)
        .expect("set pin");
    print_history(&editor);

    println!("== a drag merges into one step ==");
    for x in [10.0, 40.0, 90.0] {
        editor
            .set_node_position_by_name("Scale", vec2(x, 0.0), true)
            .expect("move");
    }
    print_history(&editor);

    println!("== bracketed edits commit as one step ==");
    editor.open_undo_bracket("Recolor pair");
    for name in ["Add", "Scale"] {
        editor
            .set_node_color_by_name(
                name,
                nodeforge_core::math::Color::new(0.8, 0.3, 0.1, 1.0),
                true,
            )
            .expect("recolor");
    }
    editor.close_undo_bracket();
    print_history(&editor);

    println!("== remove and restore through the inverse ==");
    editor.remove_node_by_name("Add", true).expect("remove");
    println!("  removed: graph has {} nodes", editor.graph().nodes.len());
    editor.undo();
    println!(
        "  undone:  graph has {} nodes, Add.A = {:?}",
        editor.graph().nodes.len(),
        editor.graph().find_pin("Add.A").map(|p| &p.default_value)
    );

    println!("== reconcile against an external cursor ==");
    editor.reconcile(2);
    print_history(&editor);
    editor.reconcile(editor.action_stack().undo_len() + editor.action_stack().redo_len());
    print_history(&editor);
}
