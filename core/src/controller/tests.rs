//! End-to-end scenarios driving the editor through the history engine.

use std::cell::RefCell;
use std::rc::Rc;

use crate::graph::{Graph, PinDirection};
use crate::math::{vec2, Color};

use super::*;

fn registry() -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();
    registry.register(
        "math.Add",
        OperatorSpec::new(vec![
            crate::graph::Pin::new("A", PinDirection::Input, "f32"),
            crate::graph::Pin::new("B", PinDirection::Input, "f32"),
            crate::graph::Pin::new("Result", PinDirection::Output, "f32"),
        ]),
    );
    registry.register(
        "math.Scale",
        OperatorSpec::new(vec![
            crate::graph::Pin::new("Value", PinDirection::Input, "f32"),
            crate::graph::Pin::new("Factor", PinDirection::Input, "f32"),
            crate::graph::Pin::new("Result", PinDirection::Output, "f32"),
        ]),
    );
    registry
}

fn editor() -> GraphEditor {
    GraphEditor::new(registry())
}

fn add(editor: &mut GraphEditor, op: &str, name: &str) -> String {
    editor
        .add_operator_node(op, "execute", vec2(0.0, 0.0), name, true)
        .unwrap()
}

/// Normalizes node/link order so histories that recreate nodes in a
/// different order still compare equal.
fn normalized(graph: &Graph) -> Graph {
    let mut graph = graph.clone();
    graph.nodes.sort_by(|a, b| a.name.cmp(&b.name));
    for node in &mut graph.nodes {
        if let Some(inner) = node.subgraph_mut() {
            *inner = normalized(inner);
        }
    }
    graph
        .links
        .sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
    graph
}

fn assert_graphs_match(a: &Graph, b: &Graph) {
    assert_eq!(normalized(a), normalized(b));
}

// --- basic round trips ------------------------------------------------------

#[test]
fn undo_redo_round_trip_restores_state() {
    let mut ed = editor();
    let before = ed.graph().clone();

    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");
    ed.add_link("Add.Result", "Scale.Value", true).unwrap();
    ed.set_node_position_by_name("Scale", vec2(100.0, 0.0), true)
        .unwrap();
    let after = ed.graph().clone();
    let steps = ed.action_stack().undo_len();
    assert_eq!(steps, 4);

    for _ in 0..steps {
        assert!(ed.undo());
    }
    assert_graphs_match(ed.graph(), &before);

    for _ in 0..steps {
        assert!(ed.redo());
    }
    assert_graphs_match(ed.graph(), &after);

    for _ in 0..steps {
        assert!(ed.undo());
    }
    assert_graphs_match(ed.graph(), &before);
}

#[test]
fn undo_on_empty_history_reports_and_returns_false() {
    let mut ed = editor();
    assert!(!ed.undo());
    assert!(!ed.redo());
}

#[test]
fn new_action_after_undo_clears_redo() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");
    ed.undo();
    assert_eq!(ed.action_stack().redo_len(), 1);

    add(&mut ed, "math.Scale", "Other");
    assert_eq!(ed.action_stack().redo_len(), 0);
}

// --- the AddNode + SetPinValue merge scenario --------------------------------

#[test]
fn pin_value_edits_merge_into_one_step() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.set_pin_default_value("Add.A", "5", true).unwrap();
    ed.set_pin_default_value("Add.A", "7", true).unwrap();

    // AddNode plus one merged SetPinDefaultValue.
    assert_eq!(ed.action_stack().undo_len(), 2);
    assert_eq!(
        ed.graph().find_pin("Add.A").unwrap().default_value,
        "7"
    );

    assert!(ed.undo());
    assert!(ed.undo());
    assert!(ed.graph().nodes.is_empty());

    assert!(ed.redo());
    assert!(ed.redo());
    let pin = ed.graph().find_pin("Add.A").unwrap();
    assert_eq!(pin.default_value, "7");
}

#[test]
fn merged_step_undoes_to_oldest_value_in_one_step() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.set_node_position_by_name("Add", vec2(10.0, 0.0), true)
        .unwrap();
    ed.set_node_position_by_name("Add", vec2(20.0, 0.0), true)
        .unwrap();
    ed.set_node_position_by_name("Add", vec2(30.0, 0.0), true)
        .unwrap();
    assert_eq!(ed.action_stack().undo_len(), 2);

    assert!(ed.undo());
    assert_eq!(ed.graph().node("Add").unwrap().position, vec2(0.0, 0.0));
}

#[test]
fn edits_to_different_targets_do_not_merge() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");
    ed.set_node_position_by_name("Add", vec2(1.0, 0.0), true)
        .unwrap();
    ed.set_node_position_by_name("Scale", vec2(2.0, 0.0), true)
        .unwrap();
    assert_eq!(ed.action_stack().undo_len(), 4);
}

// --- brackets ----------------------------------------------------------------

#[test]
fn bracket_commits_one_step() {
    let mut ed = editor();
    let before = ed.graph().clone();

    ed.open_undo_bracket("Build pair");
    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");
    ed.add_link("Add.Result", "Scale.Value", true).unwrap();
    ed.close_undo_bracket();

    assert_eq!(ed.action_stack().undo_len(), 1);
    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &before);
    assert!(ed.redo());
    assert!(ed.graph().has_link("Add.Result", "Scale.Value"));
}

#[test]
fn merge_inside_bracket_collapses_drag() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");

    ed.open_undo_bracket("Drag");
    ed.set_node_position_by_name("Add", vec2(5.0, 0.0), true)
        .unwrap();
    ed.set_node_position_by_name("Add", vec2(9.0, 9.0), true)
        .unwrap();
    ed.close_undo_bracket();

    assert_eq!(ed.action_stack().undo_len(), 2);
    assert!(ed.undo());
    assert_eq!(ed.graph().node("Add").unwrap().position, vec2(0.0, 0.0));
}

#[test]
fn canceled_bracket_keeps_effects_but_records_nothing() {
    let mut ed = editor();
    ed.open_undo_bracket("Doomed");
    add(&mut ed, "math.Add", "Add");
    ed.cancel_undo_bracket();

    // Cancel means "stop recording, accept current state".
    assert!(ed.graph().has_node("Add"));
    assert_eq!(ed.action_stack().undo_len(), 0);
}

// --- remove / inverse --------------------------------------------------------

#[test]
fn remove_node_undo_restores_pins_and_links() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");
    ed.add_link("Add.Result", "Scale.Value", true).unwrap();
    ed.set_pin_default_value("Add.A", "5", true).unwrap();
    let before_remove = ed.graph().clone();

    ed.remove_node_by_name("Add", true).unwrap();
    assert!(!ed.graph().has_node("Add"));
    assert!(!ed.graph().has_link("Add.Result", "Scale.Value"));

    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &before_remove);
    let pin = ed.graph().find_pin("Add.A").unwrap();
    assert_eq!(pin.default_value, "5");
}

#[test]
fn remove_node_inverse_is_stable_across_cycles() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.set_pin_default_value("Add.B", "3", true).unwrap();
    ed.remove_node_by_name("Add", true).unwrap();

    assert!(ed.undo());
    let after_first_undo = ed.graph().clone();

    assert!(ed.redo());
    assert!(!ed.graph().has_node("Add"));
    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &after_first_undo);
}

#[test]
fn remove_comment_and_reroute_round_trip() {
    let mut ed = editor();
    ed.add_comment_node(
        "left side",
        vec2(1.0, 2.0),
        vec2(300.0, 120.0),
        Color::new(0.2, 0.4, 0.6, 1.0),
        "Note",
        true,
    )
    .unwrap();
    ed.add_reroute_node(true, "f32", "0.5", vec2(4.0, 4.0), "Hop", true)
        .unwrap();
    let before = ed.graph().clone();

    ed.remove_node_by_name("Note", true).unwrap();
    ed.remove_node_by_name("Hop", true).unwrap();
    assert!(ed.undo());
    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &before);
}

#[test]
fn remove_node_with_injection_round_trips() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.add_variable_node("Speed", "f32", true, "1.0", vec2(0.0, 50.0), "Speed", true)
        .unwrap();
    ed.add_link("Speed.Value", "Add.A", true).unwrap();
    ed.inject_node_into_pin("Add.A", true, "", "Value", true)
        .unwrap();
    let before = ed.graph().clone();

    ed.remove_node_by_name("Add", true).unwrap();
    assert!(!ed.graph().has_node("Add"));
    assert!(!ed.graph().has_node("Speed"));

    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &before);
    let pin = ed.graph().find_pin("Add.A").unwrap();
    assert_eq!(pin.injections.len(), 1);
    assert_eq!(pin.injections[0].node_name, "Speed");
    assert!(ed.graph().node("Speed").unwrap().injected);
}

#[test]
fn eject_and_reinject_round_trips() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.add_variable_node("Speed", "f32", true, "", vec2(0.0, 0.0), "Speed", true)
        .unwrap();
    ed.add_link("Speed.Value", "Add.A", true).unwrap();
    ed.inject_node_into_pin("Add.A", true, "", "Value", true)
        .unwrap();

    let ejected = ed.eject_node_from_pin("Add.A", true).unwrap();
    assert_eq!(ejected, "Speed");
    assert!(ed.graph().find_pin("Add.A").unwrap().injections.is_empty());

    assert!(ed.undo());
    assert_eq!(ed.graph().find_pin("Add.A").unwrap().injections.len(), 1);
    assert!(ed.redo());
    assert!(ed.graph().find_pin("Add.A").unwrap().injections.is_empty());
}

// --- renames and property edits ----------------------------------------------

#[test]
fn rename_node_rewrites_links_and_undoes() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");
    ed.add_link("Add.Result", "Scale.Value", true).unwrap();

    ed.rename_node("Add", "Sum", true).unwrap();
    assert!(ed.graph().has_link("Sum.Result", "Scale.Value"));

    assert!(ed.undo());
    assert!(ed.graph().has_link("Add.Result", "Scale.Value"));
    assert!(ed.redo());
    assert!(ed.graph().has_node("Sum"));
}

#[test]
fn variable_rename_applies_to_all_nodes() {
    let mut ed = editor();
    ed.add_variable_node("Speed", "f32", true, "", vec2(0.0, 0.0), "Get", true)
        .unwrap();
    ed.add_variable_node("Speed", "f32", false, "", vec2(0.0, 40.0), "Set", true)
        .unwrap();

    ed.rename_variable("Speed", "Velocity", true).unwrap();
    for name in ["Get", "Set"] {
        match &ed.graph().node(name).unwrap().kind {
            crate::graph::NodeKind::Variable { variable, .. } => {
                assert_eq!(variable, "Velocity")
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    assert!(ed.undo());
    match &ed.graph().node("Get").unwrap().kind {
        crate::graph::NodeKind::Variable { variable, .. } => assert_eq!(variable, "Speed"),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn comment_text_round_trips_with_presentation() {
    let mut ed = editor();
    ed.add_comment_node(
        "first",
        vec2(0.0, 0.0),
        vec2(100.0, 40.0),
        Color::WHITE,
        "Note",
        true,
    )
    .unwrap();

    ed.set_comment_text_by_name("Note", "second", 24, true, true)
        .unwrap();
    assert!(ed.undo());
    match &ed.graph().node("Note").unwrap().kind {
        crate::graph::NodeKind::Comment {
            text,
            font_size,
            bubble_visible,
        } => {
            assert_eq!(text, "first");
            assert_eq!(*font_size, 18);
            assert!(!bubble_visible);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn property_setters_reject_missing_nodes() {
    let mut ed = editor();
    let err = ed
        .set_node_position_by_name("Ghost", vec2(0.0, 0.0), true)
        .unwrap_err();
    assert!(matches!(err, ControllerError::NodeNotFound(_)));
    assert_eq!(ed.action_stack().undo_len(), 0);
}

// --- pins --------------------------------------------------------------------

#[test]
fn pin_expansion_and_watch_are_undoable_ui_state() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.mark_saved();

    ed.set_pin_watched("Add.A", true, true).unwrap();
    ed.set_pin_expansion("Add.A", true, true).unwrap();
    assert!(!ed.has_unsaved_changes());

    assert!(ed.undo());
    assert!(!ed.graph().find_pin("Add.A").unwrap().expanded);
    assert!(ed.undo());
    assert!(!ed.graph().find_pin("Add.A").unwrap().watched);
}

#[test]
fn array_pin_insert_and_remove_round_trip() {
    let mut ed = editor();
    ed.add_select_node("f32", vec2(0.0, 0.0), "Pick", true)
        .unwrap();

    let first = ed.insert_array_pin("Pick.Values", 0, "1.0", true).unwrap();
    assert_eq!(first, "Pick.Values.0");
    ed.insert_array_pin("Pick.Values", 1, "2.0", true).unwrap();
    assert_eq!(
        ed.graph().find_pin("Pick.Values").unwrap().sub_pins.len(),
        2
    );

    ed.remove_array_pin("Pick.Values.0", true).unwrap();
    let values = ed.graph().find_pin("Pick.Values").unwrap();
    assert_eq!(values.sub_pins.len(), 1);
    assert_eq!(values.sub_pins[0].default_value, "2.0");

    assert!(ed.undo());
    let values = ed.graph().find_pin("Pick.Values").unwrap();
    assert_eq!(values.sub_pins.len(), 2);
    assert_eq!(values.sub_pins[0].default_value, "1.0");
}

#[test]
fn link_validation_rejects_bad_endpoints() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    add(&mut ed, "math.Scale", "Scale");

    // Input as source.
    assert!(ed.add_link("Add.A", "Scale.Value", true).is_err());
    // Output as target.
    assert!(ed.add_link("Add.Result", "Scale.Result", true).is_err());
    // Unknown pin.
    assert!(matches!(
        ed.add_link("Add.Result", "Scale.Missing", true),
        Err(ControllerError::PinNotFound(_))
    ));
    // Nothing recorded for rejected mutations.
    assert_eq!(ed.action_stack().undo_len(), 2);
}

// --- export / import ---------------------------------------------------------

#[test]
fn export_import_round_trip_uniquifies_names() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.set_pin_default_value("Add.A", "5", true).unwrap();

    let text = ed.export_nodes_to_text(&["Add".to_string()]).unwrap();
    let imported = ed.import_nodes_from_text(&text, true).unwrap();
    assert_eq!(imported, vec!["Add_1".to_string()]);
    assert_eq!(
        ed.graph().find_pin("Add_1.A").unwrap().default_value,
        "5"
    );

    assert!(ed.undo());
    assert!(!ed.graph().has_node("Add_1"));
    assert!(ed.redo());
    assert!(ed.graph().has_node("Add_1"));
}

// --- collapse / expand -------------------------------------------------------

fn collapse_fixture() -> GraphEditor {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Ext");
    add(&mut ed, "math.Add", "A");
    add(&mut ed, "math.Scale", "B");
    ed.add_link("Ext.Result", "A.A", true).unwrap();
    ed.add_link("A.Result", "B.Value", true).unwrap();
    ed
}

#[test]
fn collapse_undo_restores_nodes_and_boundary_link() {
    let mut ed = collapse_fixture();
    let before = ed.graph().clone();

    let collapsed = ed
        .collapse_nodes(&["A".to_string(), "B".to_string()], "Group", true)
        .unwrap();
    assert_eq!(collapsed, "Group");
    assert!(!ed.graph().has_node("A"));
    assert!(ed.graph().has_node("Group"));
    // The boundary link is rewired through the subgraph node.
    assert!(ed
        .graph()
        .links
        .iter()
        .any(|l| l.source == "Ext.Result" && l.target_node() == "Group"));

    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &before);
    assert!(ed.graph().has_link("Ext.Result", "A.A"));
}

#[test]
fn collapse_redo_after_undo_converges() {
    let mut ed = collapse_fixture();
    ed.collapse_nodes(&["A".to_string(), "B".to_string()], "Group", true)
        .unwrap();
    let after_collapse = ed.graph().clone();

    assert!(ed.undo());
    assert!(ed.redo());
    assert_graphs_match(ed.graph(), &after_collapse);
}

#[test]
fn expand_undo_restores_subgraph_node() {
    let mut ed = collapse_fixture();
    ed.collapse_nodes(&["A".to_string(), "B".to_string()], "Group", true)
        .unwrap();
    let collapsed_state = ed.graph().clone();

    let expanded = ed.expand_node("Group", true).unwrap();
    assert_eq!(expanded.len(), 2);
    assert!(!ed.graph().has_node("Group"));
    assert!(ed.graph().has_link("Ext.Result", "A.A"));

    assert!(ed.undo());
    assert_graphs_match(ed.graph(), &collapsed_state);

    assert!(ed.redo());
    assert!(ed.graph().has_node("A"));
    assert!(ed.graph().has_node("B"));
}

// --- graph stack -------------------------------------------------------------

#[test]
fn push_and_pop_graph_are_undoable() {
    let mut ed = collapse_fixture();
    ed.collapse_nodes(&["A".to_string(), "B".to_string()], "Group", true)
        .unwrap();

    ed.push_graph("Group", true).unwrap();
    add(&mut ed, "math.Add", "Inner");
    assert!(ed.edited_graph().unwrap().has_node("Inner"));
    ed.pop_graph(true).unwrap();

    // Undo pop: back inside the subgraph.
    assert!(ed.undo());
    assert!(ed.edited_graph().unwrap().has_node("Inner"));
    // Undo the inner add.
    assert!(ed.undo());
    assert!(!ed.edited_graph().unwrap().has_node("Inner"));
    // Undo push: back at the root.
    assert!(ed.undo());
    assert!(ed.edited_graph().unwrap().has_node("Group"));
}

#[test]
fn push_graph_requires_resident_subgraph() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    assert!(matches!(
        ed.push_graph("Missing", true),
        Err(ControllerError::NodeNotFound(_))
    ));
    assert!(matches!(
        ed.push_graph("Add", true),
        Err(ControllerError::KindMismatch { .. })
    ));
}

#[test]
fn exposed_pins_mirror_onto_subgraph_node() {
    let mut ed = collapse_fixture();
    ed.collapse_nodes(&["A".to_string(), "B".to_string()], "Group", true)
        .unwrap();
    ed.push_graph("Group", true).unwrap();

    ed.add_exposed_pin("Bias", PinDirection::Input, "f32", "0.0", true)
        .unwrap();
    assert!(ed.graph().find_pin("Group.Bias").is_some());

    ed.rename_exposed_pin("Bias", "Offset", true).unwrap();
    assert!(ed.graph().find_pin("Group.Offset").is_some());

    assert!(ed.undo());
    assert!(ed.graph().find_pin("Group.Bias").is_some());
    assert!(ed.undo());
    assert!(ed.graph().find_pin("Group.Bias").is_none());
}

// --- reconcile ---------------------------------------------------------------

#[test]
fn reconcile_converges_to_every_index() {
    let mut ed = editor();
    for name in ["N1", "N2", "N3", "N4"] {
        add(&mut ed, "math.Add", name);
    }
    let history_len = ed.action_stack().undo_len();
    assert_eq!(history_len, 4);

    for desired in (0..=history_len).rev() {
        assert!(ed.reconcile(desired));
        assert_eq!(ed.action_stack().cursor(), desired);
    }
    for desired in 0..=history_len {
        assert!(ed.reconcile(desired));
        assert_eq!(ed.action_stack().cursor(), desired);
    }
    assert!(ed.graph().has_node("N4"));
}

#[test]
fn reconcile_stops_when_history_runs_out() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    assert!(!ed.reconcile(10));
    assert_eq!(ed.action_stack().cursor(), 1);
}

#[test]
fn reconcile_broadcasts_bracket_events() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");

    let events: Rc<RefCell<Vec<GraphEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    ed.on_modified(move |event| sink.borrow_mut().push(event.clone()));

    assert!(ed.reconcile(0));
    let events = events.borrow();
    assert_eq!(events.first(), Some(&GraphEvent::BracketOpened));
    assert_eq!(events.last(), Some(&GraphEvent::BracketClosed));
    assert!(events
        .iter()
        .any(|e| matches!(e, GraphEvent::NodeRemoved { .. })));
}

// --- failure handling --------------------------------------------------------

#[test]
fn failed_undo_drops_the_entry() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    // Pull the rug out without recording.
    ed.remove_node_by_name("Add", false).unwrap();

    assert!(!ed.undo());
    assert_eq!(ed.action_stack().undo_len(), 0);
    assert_eq!(ed.action_stack().redo_len(), 0);
}

#[test]
fn replayed_mutations_do_not_re_record() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    assert_eq!(ed.action_stack().undo_len(), 1);

    assert!(ed.undo());
    assert_eq!(ed.action_stack().undo_len(), 0);
    assert_eq!(ed.action_stack().redo_len(), 1);

    assert!(ed.redo());
    assert_eq!(ed.action_stack().undo_len(), 1);
    assert_eq!(ed.action_stack().redo_len(), 0);
}

// --- notifications and save tracking -----------------------------------------

#[test]
fn observers_see_mutation_events() {
    let mut ed = editor();
    let events: Rc<RefCell<Vec<GraphEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    ed.on_modified(move |event| sink.borrow_mut().push(event.clone()));

    add(&mut ed, "math.Add", "Add");
    ed.set_pin_default_value("Add.A", "5", true).unwrap();

    let events = events.borrow();
    assert!(events.contains(&GraphEvent::NodeAdded { node: "Add".into() }));
    assert!(events.contains(&GraphEvent::PinDefaultValueChanged {
        pin: "Add.A".into()
    }));
}

#[test]
fn suspended_notifications_are_dropped() {
    let mut ed = editor();
    let events: Rc<RefCell<Vec<GraphEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    ed.on_modified(move |event| sink.borrow_mut().push(event.clone()));

    ed.suspend_notifications(true);
    add(&mut ed, "math.Add", "Add");
    ed.suspend_notifications(false);
    assert!(events.borrow().is_empty());
}

#[test]
fn save_tracking_across_undo_redo() {
    let mut ed = editor();
    add(&mut ed, "math.Add", "Add");
    ed.mark_saved();
    assert!(!ed.has_unsaved_changes());

    ed.set_node_position_by_name("Add", vec2(5.0, 5.0), true)
        .unwrap();
    assert!(ed.has_unsaved_changes());

    assert!(ed.undo());
    assert!(!ed.has_unsaved_changes());

    assert!(ed.redo());
    assert!(ed.has_unsaved_changes());
}
