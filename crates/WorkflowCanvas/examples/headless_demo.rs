use glam::Vec2;
use workflow_canvas::input::{InputState, MouseButtons};
use workflow_canvas::{Canvas, CanvasConfig, LogicEvent, ModuleCatalog, WorkflowEditor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== WorkflowCanvas Headless Demo ===");

    let config = CanvasConfig::default();
    let mut editor = WorkflowEditor::with_default_nodes(ModuleCatalog::builtin()?, &config, 400.0);
    let outline = editor.add_module_node("course-outline", Vec2::new(460.0, 230.0))?;

    let mut canvas = Canvas::new(config);
    canvas.update_viewport(Vec2::ZERO, Vec2::new(1280.0, 720.0));

    // Drag a wire from the start node's output to the outline node's input.
    let start = editor
        .graph()
        .nodes()
        .first()
        .map(|n| n.position)
        .ok_or("no start node")?;
    let output = start + Vec2::new(125.0, 30.0);
    let outline_input = editor
        .graph()
        .node(&outline)
        .map(|n| n.position + Vec2::new(-5.0, 30.0))
        .ok_or("no outline node")?;

    let frames = [
        (output, false),
        (output, true),
        (outline_input + Vec2::new(-20.0, 10.0), true),
        (outline_input + Vec2::new(-20.0, 10.0), false),
    ];

    for (i, (pos, down)) in frames.into_iter().enumerate() {
        let input = InputState {
            pointer_pos: pos,
            mouse_buttons: MouseButtons { primary: down },
            ..Default::default()
        };
        let props = editor.canvas_props(false);
        let (draw_list, events) = canvas.update(&input, 0.016, editor.graph(), &props);
        println!(
            "frame {i}: {:?}, {} draw commands",
            canvas.interaction_mode,
            draw_list.len()
        );
        for event in events.iter().filter(|e| **e != LogicEvent::RepaintNeeded) {
            println!("  -> {event:?}");
        }
        editor.apply_all(&events);
    }

    for connection in editor.graph().connections() {
        println!("{}: {} -> {}", connection.id, connection.from, connection.to);
    }
    Ok(())
}
