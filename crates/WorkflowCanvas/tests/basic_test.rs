use glam::Vec2;
use workflow_canvas::{
    Canvas, CanvasConfig, CanvasProps,
    input::InputState,
    model::{Connection, ConnectionId, GraphState, Node},
    render::{DrawCommand, TextAnchor},
};

fn node_rects(draw_list: &[DrawCommand], size: Vec2) -> Vec<Vec2> {
    draw_list
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Rect { pos, size: s, .. } if *s == size => Some(*pos),
            _ => None,
        })
        .collect()
}

fn beziers(draw_list: &[DrawCommand]) -> usize {
    draw_list
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::Bezier { .. }))
        .count()
}

#[test]
fn test_basic_rendering() {
    let mut graph = GraphState::default();
    graph.insert_node(Node::new("a", "start", "Start", Vec2::new(100.0, 100.0)));

    let config = CanvasConfig::default();
    let node_size = config.node_size;
    let mut canvas = Canvas::new(config);

    let (draw_list, _events) =
        canvas.update(&InputState::default(), 0.016, &graph, &CanvasProps::default());

    assert!(!draw_list.is_empty(), "Draw list should not be empty");

    // No scroll and origin at zero: graph space equals client space.
    assert_eq!(node_rects(&draw_list, node_size), vec![Vec2::new(100.0, 100.0)]);

    let label = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Text { text, pos, .. } if text == "Start" => Some(*pos),
        _ => None,
    });
    assert_eq!(label, Some(Vec2::new(160.0, 130.0)));

    // Two handles, outside the left and right edges.
    let circles: Vec<Vec2> = draw_list
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 2);
    assert!(circles.contains(&Vec2::new(225.0, 130.0)));
    assert!(circles.contains(&Vec2::new(95.0, 130.0)));
}

#[test]
fn test_rendering_respects_origin_and_scroll() {
    let mut graph = GraphState::default();
    graph.insert_node(Node::new("a", "start", "Start", Vec2::new(300.0, 200.0)));

    let config = CanvasConfig::default();
    let node_size = config.node_size;
    let mut canvas = Canvas::new(config);
    canvas.update_viewport(Vec2::new(200.0, 50.0), Vec2::new(400.0, 300.0));
    canvas.view.scroll = Vec2::new(100.0, 40.0);

    let (draw_list, _) =
        canvas.update(&InputState::default(), 0.016, &graph, &CanvasProps::default());

    // client = graph + origin - scroll
    assert_eq!(node_rects(&draw_list, node_size), vec![Vec2::new(400.0, 210.0)]);
}

#[test]
fn test_connection_renders_as_curve() {
    let mut graph = GraphState::default();
    let a = Node::new("a", "start", "A", Vec2::new(0.0, 0.0));
    let b = Node::new("b", "export", "B", Vec2::new(400.0, 0.0));
    let (a_id, b_id) = (a.id.clone(), b.id.clone());
    graph.insert_nodes([a, b]);
    graph.create_connection(&a_id, &b_id);

    let mut canvas = Canvas::new(CanvasConfig::default());
    let (draw_list, _) =
        canvas.update(&InputState::default(), 0.016, &graph, &CanvasProps::default());

    let curve = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Bezier {
            start,
            cp1,
            cp2,
            end,
            dash,
            ..
        } => Some((*start, *cp1, *cp2, *end, *dash)),
        _ => None,
    });
    let (start, cp1, cp2, end, dash) = curve.expect("connection curve");
    assert_eq!(start, Vec2::new(125.0, 30.0));
    assert_eq!(end, Vec2::new(395.0, 30.0));
    // d = 270, offset = clamp(108, 50, 150)
    assert!((cp1.x - 233.0).abs() < 1e-3 && cp1.y == 30.0);
    assert!((cp2.x - 287.0).abs() < 1e-3 && cp2.y == 30.0);
    assert!(dash.is_none());
}

#[test]
fn test_dangling_connection_is_skipped() {
    let json = r#"{
        "nodes": [
            { "id": "a", "module_id": "start", "display_name": "A", "position": [0.0, 0.0] }
        ],
        "connections": [
            { "id": "conn-1", "from": "a", "to": "ghost" }
        ]
    }"#;
    let graph: GraphState = serde_json::from_str(json).unwrap();
    assert_eq!(
        graph.connections(),
        &[Connection {
            id: ConnectionId::from("conn-1"),
            from: "a".into(),
            to: "ghost".into(),
        }]
    );

    let mut canvas = Canvas::new(CanvasConfig::default());
    let (draw_list, _) =
        canvas.update(&InputState::default(), 0.016, &graph, &CanvasProps::default());
    assert_eq!(beziers(&draw_list), 0);
}

#[test]
fn test_empty_canvas_shows_hint() {
    let config = CanvasConfig::default();
    let hint = config.style.empty_hint.clone();
    let mut canvas = Canvas::new(config);
    canvas.update_viewport(Vec2::ZERO, Vec2::new(800.0, 600.0));

    let (draw_list, _) = canvas.update(
        &InputState::default(),
        0.016,
        &GraphState::default(),
        &CanvasProps::default(),
    );

    let text = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Text {
            text, pos, anchor, ..
        } => Some((text.clone(), *pos, *anchor)),
        _ => None,
    });
    assert_eq!(text, Some((hint, Vec2::new(400.0, 300.0), TextAnchor::Center)));
}

#[test]
fn test_hint_hidden_once_nodes_exist() {
    let config = CanvasConfig::default();
    let hint = config.style.empty_hint.clone();
    let mut canvas = Canvas::new(config);
    let mut graph = GraphState::default();
    graph.insert_node(Node::new("a", "start", "Start", Vec2::ZERO));

    let (draw_list, _) =
        canvas.update(&InputState::default(), 0.016, &graph, &CanvasProps::default());
    assert!(!draw_list
        .iter()
        .any(|cmd| matches!(cmd, DrawCommand::Text { text, .. } if *text == hint)));
}

#[test]
fn test_selected_connection_drawn_wider() {
    let mut graph = GraphState::default();
    graph.insert_nodes([
        Node::new("a", "start", "A", Vec2::ZERO),
        Node::new("b", "export", "B", Vec2::new(300.0, 0.0)),
    ]);
    let conn = graph.create_connection(&"a".into(), &"b".into()).unwrap();

    let config = CanvasConfig::default();
    let selected_width = config.style.edge.selected_width;
    let mut canvas = Canvas::new(config);
    let props = CanvasProps {
        selected_connection: Some(conn),
        running: false,
    };
    let (draw_list, _) = canvas.update(&InputState::default(), 0.016, &graph, &props);

    let width = draw_list.iter().find_map(|cmd| match cmd {
        DrawCommand::Bezier { width, .. } => Some(*width),
        _ => None,
    });
    assert_eq!(width, Some(selected_width));
}
