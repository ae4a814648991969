use macroquad::prelude::*;
use crate::application::InputEvent;

/// Map a window position to a cell coordinate.
/// May be negative or past the grid; the simulation ignores such paints.
pub fn screen_to_cell(pos: (f32, f32), scale: f32) -> (i64, i64) {
    let scale = scale.max(1.0);
    ((pos.0 / scale).floor() as i64, (pos.1 / scale).floor() as i64)
}

/// Poll macroquad for the events the simulation understands:
/// Space starts the run, a held left button paints under the cursor.
pub fn poll_events(scale: f32) -> Vec<InputEvent> {
    let mut events = Vec::new();

    if is_mouse_button_down(MouseButton::Left) {
        let (x, y) = screen_to_cell(mouse_position(), scale);
        events.push(InputEvent::Toggle { x, y });
    }
    if is_key_pressed(KeyCode::Space) {
        events.push(InputEvent::Start);
    }

    events
}
