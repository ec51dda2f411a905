//! SDL2 presentation and input.
//!
//! The window streams the engine's ARGB8888 frame buffer into a texture and
//! stretches it over the whole canvas, so a small render resolution can be
//! shown at any window size. Keyboard and relative mouse state are read into
//! an [`InputState`] once per frame.
//!
//! # Key bindings
//!
//! | Keys            | Action                          |
//! |-----------------|---------------------------------|
//! | W / S / A / D   | Move forward / back / left / right |
//! | Q / E           | Move down / up                  |
//! | Arrows          | Look                            |
//! | Mouse           | Look                            |
//! | R               | Reset view                      |
//! | Space / LCtrl   | Ascend / descend (vehicles)     |
//! | F1 .. F4        | Cycle shading, lighting, filter; toggle shadows |
//! | Escape          | Quit                            |

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;

use crate::input::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    CycleShading,
    CycleLighting,
    CycleTextureFilter,
    ToggleShadows,
}

/// Sleeps out the remainder of each frame interval.
pub struct FrameLimiter {
    previous_frame_time: u64,
    interval_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, interval: Duration) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            interval_ms: interval.as_millis() as u64,
        }
    }

    /// Waits if necessary to maintain the frame rate and returns the time
    /// elapsed since the previous call, in seconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> f32 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < self.interval_ms {
            std::thread::sleep(Duration::from_millis(self.interval_ms - delta_time));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time as f32 / 1000.0
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before the creator so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    #[allow(dead_code)]
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    /// Open a window `scale` times the frame size.
    ///
    /// # Arguments
    /// * `title` - Window title
    /// * `width`, `height` - Frame buffer size in pixels
    /// * `scale` - Initial window size multiplier
    pub fn new(title: &str, width: u32, height: u32, scale: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width * scale.max(1), height * scale.max(1))
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        sdl_context.mouse().set_relative_mouse_mode(true);

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped before the creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("window '{title}' {}x{} (x{scale})", width, height);

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drain pending events. Quit is reported for the close button and
    /// Escape; function keys map to render toggles.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            let mapped = match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(WindowEvent::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match key {
                    Keycode::F1 => Some(WindowEvent::CycleShading),
                    Keycode::F2 => Some(WindowEvent::CycleLighting),
                    Keycode::F3 => Some(WindowEvent::CycleTextureFilter),
                    Keycode::F4 => Some(WindowEvent::ToggleShadows),
                    _ => None,
                },
                _ => None,
            };
            events.extend(mapped);
        }
        events
    }

    /// Snapshot of held keys and mouse motion since the last call.
    pub fn input(&self) -> InputState {
        let keys = self.event_pump.keyboard_state();
        let held = |scancode| keys.is_scancode_pressed(scancode);
        let mouse = self.event_pump.relative_mouse_state();

        InputState {
            forward: held(Scancode::W),
            back: held(Scancode::S),
            left: held(Scancode::A),
            right: held(Scancode::D),
            up: held(Scancode::E),
            down: held(Scancode::Q),
            look_up: held(Scancode::Up),
            look_down: held(Scancode::Down),
            look_left: held(Scancode::Left),
            look_right: held(Scancode::Right),
            reset_view: held(Scancode::R),
            mouse_delta: (mouse.x(), mouse.y()),
            ascend: held(Scancode::Space),
            descend: held(Scancode::LCtrl),
        }
    }

    /// Upload one ARGB8888 frame and stretch it over the window.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
