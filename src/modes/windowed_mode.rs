use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Theme, Window, WindowId},
};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, RecvTimeoutError, SyncSender},
    thread,
};

use crate::data::{delta::Delta, Command, Program};
use crate::error::{Error, Result};

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    prog: Program,
    window: Option<&'static Window>,
    surface: Option<WindowSurface>,
    exit_sender: Option<SyncSender<()>>,
    final_buffer_size: PhysicalSize<u32>,
    delta: Delta,
    error: Option<Error>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so it is
        // created once even if the platform resumes again.
        if let Some(window) = self.window {
            window.request_redraw();
            return;
        }

        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Focused(_) => {
                if let Some(w) = self.window.as_ref() {
                    w.request_redraw()
                }
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                self.final_buffer_size = PhysicalSize::new(width, height);

                if let Err(e) = Self::resize_surface(surface, width, height) {
                    self.fail(event_loop, e);
                    return;
                }

                if let Ok(mut buffer) = surface.buffer_mut() {
                    buffer.fill(0x0);
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                let cmd = match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) | Key::Character("q") => Command::Close,
                    Key::Named(NamedKey::Space) => Command::TogglePause,
                    Key::Character("r") => Command::Reset,
                    _ => Command::Blank,
                };

                if cmd.is_close_requested() {
                    event_loop.exit();
                    return;
                }

                let redraw = self.prog.eval_command(cmd);

                if let Some(w) = self.window.as_ref() {
                    w.set_title(if self.prog.is_paused() { "skyshow (paused)" } else { "skyshow" });

                    if redraw {
                        w.request_redraw()
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let dt = self.delta.tick();
                self.prog.render(dt);

                if let Err(e) = self.present() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        self.prog.print_startup_info();

        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(
            self.prog.pix.width() as u32 * scale,
            self.prog.pix.height() as u32 * scale,
        );

        let window_attributes = Window::default_attributes()
            .with_title("skyshow")
            .with_inner_size(win_size)
            .with_transparent(false)
            .with_resizable(false)
            .with_theme(Some(Theme::Dark));

        let window: &'static Window = Box::leak(Box::new(event_loop.create_window(window_attributes)?));
        self.window = Some(window);

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window)?;
        let mut surface = Surface::new(&context, window)?;
        Self::resize_surface(&mut surface, size.width, size.height)?;
        self.surface = Some(surface);

        // Some window managers ignore the resizable hint.
        window.set_min_inner_size(Some(win_size));
        window.set_max_inner_size(Some(win_size));

        let (exit_send, exit_recv) = mpsc::sync_channel(1);
        self.exit_sender = Some(exit_send);

        let interval = self.prog.refresh_rate();

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".into())
            .spawn(move || loop {
                match exit_recv.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    _ => break,
                }

                if !window.is_minimized().unwrap_or(false) {
                    window.request_redraw();
                }
            })?;

        self.delta = Delta::new();

        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let (Some(window), Some(surface)) = (self.window, self.surface.as_mut()) else {
            return Ok(());
        };

        let mut buffer = surface.buffer_mut()?;

        self.prog.pix.scale_to(
            self.prog.scale() as usize,
            &mut buffer,
            self.final_buffer_size.width as usize,
        );

        window.pre_present_notify();
        buffer.present()?;

        Ok(())
    }

    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> Result<()> {
        // Minimized windows report a zero size; keep the old buffer.
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            return Ok(());
        };

        surface.resize(w, h)?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: Error) {
        if self.error.is_none() {
            self.error = Some(e);
        }
        event_loop.exit();
    }
}

pub fn winit_main(prog: Program) -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        delta: Delta::new(),
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    let result = event_loop.run_app(&mut state);

    if let Some(sender) = state.exit_sender.take() {
        let _ = sender.send(());
    }

    result?;

    match state.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
