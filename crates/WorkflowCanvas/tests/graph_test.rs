use glam::Vec2;
use std::collections::HashMap;
use workflow_canvas::model::{FieldValue, GraphState, Node, NodeId};

fn graph_with(ids: &[&str]) -> GraphState {
    let mut graph = GraphState::default();
    let inserted = graph.insert_nodes(
        ids.iter()
            .enumerate()
            .map(|(i, id)| Node::new(*id, "start", *id, Vec2::new(200.0 * i as f32, 100.0))),
    );
    assert_eq!(inserted, ids.len());
    graph
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

#[test]
fn test_insert_rejects_duplicate_ids() {
    let mut graph = graph_with(&["a"]);
    assert!(!graph.insert_node(Node::new("a", "export", "Other", Vec2::ZERO)));
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.node(&id("a")).unwrap().module_id, "start");

    let inserted = graph.insert_nodes([
        Node::new("a", "start", "A", Vec2::ZERO),
        Node::new("b", "start", "B", Vec2::ZERO),
    ]);
    assert_eq!(inserted, 1);
    assert_eq!(graph.nodes().len(), 2);
}

#[test]
fn test_positions_are_clamped() {
    let mut graph = GraphState::default();
    graph.insert_node(Node::new("a", "start", "A", Vec2::new(-40.0, 12.0)));
    assert_eq!(graph.node(&id("a")).unwrap().position, Vec2::new(0.0, 12.0));

    assert!(graph.move_node(&id("a"), 35.0, -1.0));
    assert_eq!(graph.node(&id("a")).unwrap().position, Vec2::new(35.0, 0.0));

    assert!(!graph.move_node(&id("missing"), 1.0, 1.0));
}

#[test]
fn test_create_connection_rules() {
    let mut graph = graph_with(&["a", "b"]);

    assert!(graph.create_connection(&id("a"), &id("a")).is_none(), "self-loop");
    assert!(graph.create_connection(&id("a"), &id("ghost")).is_none(), "unknown node");

    let first = graph.create_connection(&id("a"), &id("b")).unwrap();
    assert!(first.as_str().starts_with("conn-"));
    assert!(graph.create_connection(&id("a"), &id("b")).is_none(), "duplicate pair");

    // The reverse direction is a different ordered pair.
    assert!(graph.create_connection(&id("b"), &id("a")).is_some());
    assert_eq!(graph.connections().len(), 2);
    assert!(graph.has_connection(&id("a"), &id("b")));
    assert!(graph.has_connection(&id("b"), &id("a")));
}

#[test]
fn test_delete_connection_is_idempotent() {
    let mut graph = graph_with(&["a", "b"]);
    let conn = graph.create_connection(&id("a"), &id("b")).unwrap();

    assert!(graph.delete_connection(&conn).is_some());
    assert!(graph.delete_connection(&conn).is_none());
    assert!(graph.connections().is_empty());
    assert_eq!(graph.nodes().len(), 2);
}

#[test]
fn test_delete_node_cascades() {
    let mut graph = graph_with(&["a", "b", "c"]);
    graph.create_connection(&id("a"), &id("b"));
    graph.create_connection(&id("b"), &id("c"));
    graph.create_connection(&id("a"), &id("c"));

    let removed = graph.delete_node(&id("b")).unwrap();
    assert_eq!(removed.id, id("b"));
    assert_eq!(graph.connections().len(), 1);
    assert!(graph.has_connection(&id("a"), &id("c")));
    assert!(
        graph
            .connections()
            .iter()
            .all(|c| graph.contains_node(&c.from) && graph.contains_node(&c.to))
    );

    assert!(graph.delete_node(&id("b")).is_none());
}

#[test]
fn test_incoming_and_upstream() {
    let mut graph = graph_with(&["a", "b", "c"]);
    graph.create_connection(&id("a"), &id("c"));
    graph.create_connection(&id("b"), &id("c"));

    let c = id("c");
    assert_eq!(graph.incoming(&c).count(), 2);
    assert_eq!(graph.incoming(&id("a")).count(), 0);
    assert_eq!(graph.upstream_of(&c).map(|n| n.id.clone()), Some(id("a")));
    assert!(graph.upstream_of(&id("a")).is_none());
}

#[test]
fn test_set_field_values() {
    let mut graph = graph_with(&["a"]);
    let values = HashMap::from([
        ("Prompt".to_string(), FieldValue::from("Photosynthesis")),
        ("Count".to_string(), FieldValue::from(3.0)),
    ]);

    assert!(graph.set_field_values(&id("a"), values.clone()));
    assert_eq!(graph.node(&id("a")).unwrap().field_values, values);
    assert!(!graph.set_field_values(&id("ghost"), HashMap::new()));
}

#[test]
fn test_graph_json_shape() {
    let mut graph = graph_with(&["a", "b"]);
    graph.create_connection(&id("a"), &id("b"));

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["nodes"][0]["id"], "a");
    assert_eq!(json["nodes"][1]["position"], serde_json::json!([200.0, 100.0]));
    assert_eq!(json["connections"][0]["from"], "a");
    assert_eq!(json["connections"][0]["to"], "b");

    let back: GraphState = serde_json::from_value(json).unwrap();
    assert_eq!(back.nodes(), graph.nodes());
    assert_eq!(back.connections(), graph.connections());
}

#[test]
fn test_field_values_are_untagged() {
    let values: HashMap<String, FieldValue> = serde_json::from_str(
        r#"{ "Count": 5, "Prompt": "Leaves", "Format": ["Slides", "Asset bundle"] }"#,
    )
    .unwrap();
    assert_eq!(values["Count"], FieldValue::Number(5.0));
    assert_eq!(values["Prompt"], FieldValue::from("Leaves"));
    assert_eq!(
        values["Format"],
        FieldValue::List(vec!["Slides".to_string(), "Asset bundle".to_string()])
    );
}
