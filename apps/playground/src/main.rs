use glam::{Vec2, Vec4};
use macroquad::prelude as mq;
use workflow_canvas::input::{ExternalDrag, InputState, Key, MouseButtons};
use workflow_canvas::math::cubic_point;
use workflow_canvas::render::{Dash, DrawCommand, TextAnchor};
use workflow_canvas::{Canvas, CanvasConfig, ModuleCatalog, WorkflowEditor};

const PALETTE_WIDTH: f32 = 220.0;
const ENTRY_HEIGHT: f32 = 28.0;
const HEADER_HEIGHT: f32 = 24.0;
const BEZIER_SEGMENTS: usize = 32;

fn color(c: Vec4) -> mq::Color {
    mq::Color::new(c.x, c.y, c.z, c.w)
}

/// Palette entries with their client-space rectangles, grouped by category.
struct PaletteEntry {
    module_id: String,
    name: String,
    pos: Vec2,
}

fn layout_palette(catalog: &ModuleCatalog) -> (Vec<(String, Vec2)>, Vec<PaletteEntry>) {
    let mut headers = Vec::new();
    let mut entries = Vec::new();
    let mut y = 12.0;
    for (category, modules) in catalog.by_category() {
        headers.push((category.to_string(), Vec2::new(12.0, y)));
        y += HEADER_HEIGHT;
        for module in modules {
            entries.push(PaletteEntry {
                module_id: module.id.clone(),
                name: module.name.clone(),
                pos: Vec2::new(12.0, y),
            });
            y += ENTRY_HEIGHT + 4.0;
        }
        y += 8.0;
    }
    (headers, entries)
}

fn entry_at(entries: &[PaletteEntry], p: Vec2) -> Option<&PaletteEntry> {
    entries.iter().find(|e| {
        p.x >= e.pos.x
            && p.x <= e.pos.x + PALETTE_WIDTH - 24.0
            && p.y >= e.pos.y
            && p.y <= e.pos.y + ENTRY_HEIGHT
    })
}

fn draw_bezier(
    points: [Vec2; 4],
    stroke: mq::Color,
    width: f32,
    dash: Option<Dash>,
) {
    let [start, cp1, cp2, end] = points;
    let mut travelled = 0.0;
    let mut prev = start;
    for i in 1..=BEZIER_SEGMENTS {
        let next = cubic_point(start, cp1, cp2, end, i as f32 / BEZIER_SEGMENTS as f32);
        let len = prev.distance(next);
        let visible = match dash {
            Some(d) if d.dash + d.gap > 0.0 => {
                // Dash offsets run backwards along the curve so the pattern flows forward.
                let phase = (travelled + len * 0.5 - d.offset).rem_euclid(d.dash + d.gap);
                phase < d.dash
            }
            _ => true,
        };
        if visible {
            mq::draw_line(prev.x, prev.y, next.x, next.y, width, stroke);
        }
        travelled += len;
        prev = next;
    }
}

fn render(draw_list: &[DrawCommand]) {
    for cmd in draw_list {
        match cmd {
            DrawCommand::Rect {
                pos,
                size,
                color: fill,
                stroke_width,
                stroke_color,
                ..
            } => {
                mq::draw_rectangle(pos.x, pos.y, size.x, size.y, color(*fill));
                if let Some(sc) = stroke_color {
                    mq::draw_rectangle_lines(pos.x, pos.y, size.x, size.y, *stroke_width, color(*sc));
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color: fill,
                stroke_width,
                stroke_color,
            } => {
                mq::draw_circle(center.x, center.y, *radius, color(*fill));
                if let Some(sc) = stroke_color {
                    mq::draw_circle_lines(center.x, center.y, *radius, *stroke_width, color(*sc));
                }
            }
            DrawCommand::Line {
                start,
                end,
                color: stroke,
                width,
            } => {
                mq::draw_line(start.x, start.y, end.x, end.y, *width, color(*stroke));
            }
            DrawCommand::Bezier {
                start,
                cp1,
                cp2,
                end,
                color: stroke,
                width,
                dash,
            } => draw_bezier([*start, *cp1, *cp2, *end], color(*stroke), *width, *dash),
            DrawCommand::Text {
                pos,
                anchor,
                text,
                color: fill,
                size,
            } => {
                let dims = mq::measure_text(text, None, *size as u16, 1.0);
                let (x, y) = match anchor {
                    TextAnchor::TopLeft => (pos.x, pos.y + dims.offset_y),
                    TextAnchor::Center => (
                        pos.x - dims.width * 0.5,
                        pos.y - dims.height * 0.5 + dims.offset_y,
                    ),
                };
                mq::draw_text(text, x, y, *size, color(*fill));
            }
        }
    }
}

#[macroquad::main("Workflow Playground")]
async fn main() {
    tracing_subscriber::fmt::init();

    let catalog = match ModuleCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load module catalog");
            return;
        }
    };
    let (headers, entries) = layout_palette(&catalog);

    let config = CanvasConfig::default();
    let mut editor = WorkflowEditor::with_default_nodes(catalog, &config, mq::screen_height());
    let mut canvas = Canvas::new(config);

    let mut running = false;
    let mut palette_drag: Option<String> = None;

    loop {
        let screen = Vec2::new(mq::screen_width(), mq::screen_height());
        canvas.update_viewport(
            Vec2::new(PALETTE_WIDTH, 0.0),
            Vec2::new((screen.x - PALETTE_WIDTH).max(0.0), screen.y),
        );

        let (mx, my) = mq::mouse_position();
        let pointer = Vec2::new(mx, my);
        let (wheel_x, wheel_y) = mq::mouse_wheel();

        if mq::is_mouse_button_pressed(mq::MouseButton::Left)
            && let Some(entry) = entry_at(&entries, pointer)
        {
            tracing::debug!(module_id = %entry.module_id, "Palette drag started");
            palette_drag = Some(entry.module_id.clone());
        }
        let primary = mq::is_mouse_button_down(mq::MouseButton::Left);
        let external_drag = palette_drag.as_ref().map(|module_id| ExternalDrag {
            module_id: module_id.clone(),
            released: !primary,
        });
        if !primary {
            palette_drag = None;
        }

        if mq::is_key_pressed(mq::KeyCode::R) {
            running = !running;
            tracing::info!(running, "Toggled running overlay");
        }
        if mq::is_key_pressed(mq::KeyCode::X)
            && let Some(id) = editor.selection().node().cloned()
        {
            editor.delete_node(&id);
        }

        let mut pressed_keys = Vec::new();
        if mq::is_key_pressed(mq::KeyCode::Delete) {
            pressed_keys.push(Key::Delete);
        }
        if mq::is_key_pressed(mq::KeyCode::Backspace) {
            pressed_keys.push(Key::Backspace);
        }

        let input = InputState {
            pointer_pos: pointer,
            mouse_buttons: MouseButtons {
                primary: primary && external_drag.is_none(),
            },
            scroll_delta: Vec2::new(-wheel_x, -wheel_y),
            pressed_keys,
            text_input_focused: false,
            external_drag,
            measured_handles: None,
        };

        let props = editor.canvas_props(running);
        let (draw_list, events) =
            canvas.update(&input, mq::get_frame_time(), editor.graph(), &props);
        for event in &events {
            tracing::trace!(?event, "Logic event");
        }
        editor.apply_all(&events);

        mq::clear_background(mq::WHITE);
        render(&draw_list);

        // Palette
        mq::draw_rectangle(0.0, 0.0, PALETTE_WIDTH, screen.y, mq::Color::from_rgba(243, 244, 246, 255));
        for (category, pos) in &headers {
            mq::draw_text(category, pos.x, pos.y + 16.0, 16.0, mq::DARKGRAY);
        }
        for entry in &entries {
            mq::draw_rectangle(entry.pos.x, entry.pos.y, PALETTE_WIDTH - 24.0, ENTRY_HEIGHT, mq::WHITE);
            mq::draw_rectangle_lines(
                entry.pos.x,
                entry.pos.y,
                PALETTE_WIDTH - 24.0,
                ENTRY_HEIGHT,
                1.0,
                mq::LIGHTGRAY,
            );
            mq::draw_text(&entry.name, entry.pos.x + 8.0, entry.pos.y + 19.0, 18.0, mq::BLACK);
        }
        if let Some(module_id) = &palette_drag {
            mq::draw_rectangle_lines(mx - 60.0, my - 30.0, 120.0, 60.0, 2.0, mq::GRAY);
            mq::draw_text(module_id, mx - 56.0, my + 4.0, 16.0, mq::GRAY);
        }

        // Selected node summary
        if let Some(node) = editor.selected_node() {
            let mut y = screen.y - 20.0;
            if let Some(module) = editor.catalog().get(&node.module_id) {
                for field in module.fields.iter().rev() {
                    let value = editor
                        .field_value(&node.id, &field.name)
                        .map(|v| format!("{v:?}"))
                        .unwrap_or_else(|| "-".to_string());
                    mq::draw_text(
                        &format!("{}: {}", field.name, value),
                        PALETTE_WIDTH + 12.0,
                        y,
                        16.0,
                        mq::DARKGRAY,
                    );
                    y -= 18.0;
                }
            }
            if let Some(upstream) = editor.graph().upstream_of(&node.id) {
                let text = format!("after {}", upstream.display_name);
                mq::draw_text(&text, PALETTE_WIDTH + 12.0, y, 16.0, mq::GRAY);
                y -= 18.0;
            }
            mq::draw_text(&node.display_name, PALETTE_WIDTH + 12.0, y, 20.0, mq::BLACK);
        }

        let status = if running { "running (R)" } else { "idle (R)" };
        mq::draw_text(status, screen.x - 120.0, 20.0, 16.0, mq::DARKGRAY);

        mq::next_frame().await
    }
}
