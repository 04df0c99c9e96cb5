use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod app;
mod component;
mod config;
mod entity;
mod field;
mod page;
mod particles;
mod renderer;
mod viewport;
mod window;

use app::App;
use config::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    debug!("{:#?}", cli);

    let event_loop = EventLoop::new();

    let window = WindowBuilder::new()
        .with_title("Portfolio")
        .with_transparent(true)
        .with_inner_size(LogicalSize::<u32> {
            width: cli.width,
            height: cli.height,
        })
        .build(&event_loop)
        .context("Failed to build window")?;

    let mut app = App::new(window, &cli);
    app.start()?;

    event_loop.run(move |e, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match e {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    app.dispose();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => app.on_resize(size),
                WindowEvent::ScaleFactorChanged {
                    scale_factor,
                    new_inner_size,
                } => app.on_scale_factor_changed(scale_factor, *new_inner_size),
                WindowEvent::CursorMoved { position, .. } => app.on_cursor_moved(position),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => app.on_key_pressed(key),
                WindowEvent::MouseWheel { delta, .. } => app.on_mouse_wheel(delta),
                _ => (),
            },
            Event::RedrawRequested(..) => app.on_redraw(),
            _ => (),
        }
    });
}
