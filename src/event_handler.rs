use crate::app_state::State;
use crate::coords::{Device, DeviceExtent, Point2D};
use crate::input::{split_world_input, InputEvent, Outcome};

use winit::event::*;
use winit::keyboard::{KeyCode, PhysicalKey};

impl State {
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.gpu.config.width = new_size.width;
            self.gpu.config.height = new_size.height;
            self.gpu
                .surface
                .configure(&self.gpu.device, &self.gpu.config);

            match DeviceExtent::new(new_size.width, new_size.height) {
                Ok(extent) => self.resize_canvas(extent),
                Err(e) => log::warn!("Keeping previous canvas: {}", e),
            }
        }
    }

    /// Returns `true` when the event was consumed.
    pub fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let point = Point2D::<Device>::from_cursor(position.x, position.y);
                self.input.cursor = Some(point);
                self.handle(InputEvent::PointerMoved(point));
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.cursor = None;
                self.input.live = None;
                self.refresh_title();
                true
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(point) = self.input.cursor {
                    self.handle(InputEvent::Clicked(point));
                }
                true
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => self.handle_key(key_event),
            WindowEvent::Ime(Ime::Commit(text)) => {
                if self.typing.active {
                    self.push_text(text);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key_event: &KeyEvent) -> bool {
        if key_event.state != ElementState::Pressed {
            return false;
        }

        if self.typing.active {
            match key_event.physical_key {
                PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => {
                    self.submit_world_input();
                    return true;
                }
                PhysicalKey::Code(KeyCode::Escape) => {
                    self.typing.active = false;
                    self.typing.buffer.clear();
                    self.refresh_title();
                    return true;
                }
                PhysicalKey::Code(KeyCode::Backspace) => {
                    self.typing.buffer.pop();
                    self.refresh_title();
                    return true;
                }
                _ => {}
            }
            if let Some(txt) = &key_event.text {
                self.push_text(txt.as_str());
                return true;
            }
            return false;
        }

        match key_event.physical_key {
            PhysicalKey::Code(KeyCode::KeyW) => {
                self.typing.active = true;
                self.typing.buffer.clear();
                self.input.status = None;
                self.refresh_title();
                true
            }
            PhysicalKey::Code(KeyCode::KeyS) => {
                match self.canvas.save(&self.config.snapshot_path) {
                    Ok(()) => self.input.status = None,
                    Err(e) => {
                        log::error!("{}", e);
                        self.input.status = Some(e.to_string());
                    }
                }
                self.refresh_title();
                true
            }
            _ => false,
        }
    }

    fn push_text(&mut self, text: &str) {
        self.typing
            .buffer
            .extend(text.chars().filter(|ch| !ch.is_control()));
        self.refresh_title();
    }

    fn submit_world_input(&mut self) {
        let (x, y) = split_world_input(&self.typing.buffer);
        self.typing.active = false;
        self.typing.buffer.clear();
        self.handle(InputEvent::SetWorldPoint { x, y });
    }

    /// Runs one event through the engine and reflects the outcome in the UI.
    fn handle(&mut self, event: InputEvent) {
        let outcome = self.engine.dispatch(&mut self.canvas, event);
        match &outcome {
            Ok(Outcome::Preview(_)) => {}
            Ok(Outcome::Selected(result)) => {
                log::info!("Selected pixel\n{}", result);
                self.window.request_redraw();
            }
            Err(e) => log::warn!("{}", e),
        }
        self.input.record(&outcome);
        self.refresh_title();
    }
}
