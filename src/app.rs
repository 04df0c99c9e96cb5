use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use pollster::FutureExt as _;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{MouseScrollDelta, VirtualKeyCode},
    window::Window,
};

use crate::{
    config::{Cli, FieldConfig},
    field::{unix_millis, ParticleField},
    page::{content::Content, PageAssembler, PageEvent, View},
    renderer::Renderer,
    viewport::Viewport,
    window::HasSize,
};

const SCROLL_LINE_HEIGHT: f64 = 40.0;

pub struct App {
    // Declared before `window` so the surface is released first.
    field: Option<ParticleField<Renderer>>,
    viewport: Viewport,
    page: PageAssembler,
    page_path: Option<PathBuf>,
    window: Window,
}

impl App {
    pub fn new(window: Window, cli: &Cli) -> Self {
        let mut viewport = Viewport::new(window.size(), window.scale_factor());

        let field = if cli.no_backdrop {
            info!("Particle backdrop turned off");
            None
        } else {
            let config = FieldConfig::from(cli);
            let created = ParticleField::new(&mut viewport, &config, |scene, particles, metrics| {
                Renderer::new(&window, scene, particles, metrics).block_on()
            });
            match created {
                Ok(field) => Some(field),
                Err(e) => {
                    warn!("Particle backdrop disabled: {:#}", e);
                    None
                }
            }
        };

        let page = build_page(cli.project.as_deref());
        let profile = &page.content().profile;
        window.set_title(&format!("{} | {}", profile.name, profile.headline));

        Self {
            field,
            viewport,
            page,
            page_path: cli.page.clone(),
            window,
        }
    }

    pub fn on_resize(&mut self, size: PhysicalSize<u32>) {
        self.viewport.resize(size.into());
    }

    pub fn on_scale_factor_changed(&mut self, scale_factor: f64, size: PhysicalSize<u32>) {
        self.viewport.set_scale_factor(scale_factor, size.into());
    }

    pub fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let position = position.to_logical::<f64>(self.window.scale_factor()).into();
        self.viewport.pointer_moved(position);
    }

    pub fn on_key_pressed(&mut self, key: VirtualKeyCode) {
        if let Some(event) = key_event(key, &self.page) {
            self.on_page_event(event);
        }
    }

    pub fn on_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        self.on_page_event(scroll_event(delta, self.page.scroll_y()));
    }

    fn on_page_event(&mut self, event: PageEvent) {
        self.page.handle(event);
        if let Some(path) = &self.page_path {
            if let Err(e) = export_page(&self.page, path) {
                error!("{:#}", e);
            }
        }
    }

    /// Writes the page if requested and kicks off the frame loop.
    pub fn start(&self) -> Result<()> {
        if let Some(path) = &self.page_path {
            export_page(&self.page, path)?;
            info!("Wrote page to {}", path.display());
        }
        if self.field.is_some() {
            self.window.request_redraw();
        }
        Ok(())
    }

    pub fn on_redraw(&mut self) {
        let field = match &self.field {
            Some(field) => field,
            None => return,
        };

        let reschedule = match field.frame(unix_millis()) {
            Ok(active) => active,
            Err(e) => {
                error!("Failed to render frame: {:#}", e);
                field.is_active()
            }
        };
        if reschedule {
            self.window.request_redraw();
        }
    }

    pub fn dispose(&mut self) {
        if let Some(field) = self.field.as_mut() {
            field.dispose(&mut self.viewport);
        }
    }
}

/// Page state at startup: the main view, or a project's detail view when one
/// was asked for on the command line.
fn build_page(project: Option<&str>) -> PageAssembler {
    let mut page = PageAssembler::new(Content::portfolio());
    if let Some(number) = project {
        page.handle(PageEvent::ReadMore(number.to_string()));
        if page.view() == &View::Main {
            warn!("No project numbered {}, showing the main view", number);
        }
    }
    page
}

fn export_page(page: &PageAssembler, path: &Path) -> Result<()> {
    std::fs::write(path, page.document())
        .with_context(|| format!("Failed to write page to {}", path.display()))?;
    debug!("Exported {:?} view to {}", page.view(), path.display());
    Ok(())
}

/// Keyboard stand-ins for the page controls. `M` toggles the nav overlay,
/// `1`-`9` open the matching project, `Escape` closes the overlay or leaves
/// the detail view, `Back` leaves the detail view.
fn key_event(key: VirtualKeyCode, page: &PageAssembler) -> Option<PageEvent> {
    let project = |n: u32| Some(PageEvent::ReadMore(format!("{:03}", n)));
    match key {
        VirtualKeyCode::M if page.nav_open() => Some(PageEvent::NavClose),
        VirtualKeyCode::M => Some(PageEvent::NavToggle),
        VirtualKeyCode::Escape if page.nav_open() => Some(PageEvent::NavClose),
        VirtualKeyCode::Escape | VirtualKeyCode::Back => match page.view() {
            View::ProjectDetail { .. } => Some(PageEvent::BackToProjects),
            View::Main => None,
        },
        VirtualKeyCode::Key1 => project(1),
        VirtualKeyCode::Key2 => project(2),
        VirtualKeyCode::Key3 => project(3),
        VirtualKeyCode::Key4 => project(4),
        VirtualKeyCode::Key5 => project(5),
        VirtualKeyCode::Key6 => project(6),
        VirtualKeyCode::Key7 => project(7),
        VirtualKeyCode::Key8 => project(8),
        VirtualKeyCode::Key9 => project(9),
        _ => None,
    }
}

fn scroll_event(delta: MouseScrollDelta, scroll_y: f64) -> PageEvent {
    let dy = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64 * SCROLL_LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    PageEvent::Scroll(scroll_y - dy)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn detail(number: &str, return_scroll: f64) -> View {
        View::ProjectDetail {
            number: number.into(),
            return_scroll,
        }
    }

    #[test]
    fn project_flag_opens_detail_view() {
        let cli = Cli::parse_from(["portfolio", "--project", "002"]);
        let page = build_page(cli.project.as_deref());
        assert_eq!(page.view(), &detail("002", 0.0));
        assert!(page.document().contains("PROJECT 002"));
    }

    #[test]
    fn unknown_project_flag_keeps_main_view() {
        let cli = Cli::parse_from(["portfolio", "--project", "404"]);
        let page = build_page(cli.project.as_deref());
        assert_eq!(page.view(), &View::Main);
    }

    #[test]
    fn keys_drive_navigation() {
        let mut page = build_page(None);

        let event = key_event(VirtualKeyCode::M, &page).unwrap();
        assert_eq!(event, PageEvent::NavToggle);
        page.handle(event);
        assert!(page.nav_open());

        let event = key_event(VirtualKeyCode::Escape, &page).unwrap();
        assert_eq!(event, PageEvent::NavClose);
        page.handle(event);
        assert!(!page.nav_open());
        assert_eq!(key_event(VirtualKeyCode::Escape, &page), None);

        page.handle(scroll_event(MouseScrollDelta::LineDelta(0.0, -10.0), page.scroll_y()));
        assert_eq!(page.scroll_y(), 400.0);

        page.handle(key_event(VirtualKeyCode::Key1, &page).unwrap());
        assert_eq!(page.view(), &detail("001", 400.0));

        page.handle(key_event(VirtualKeyCode::Back, &page).unwrap());
        assert_eq!(page.view(), &View::Main);
        assert_eq!(page.scroll_y(), 400.0);
    }

    #[test]
    fn scroll_never_goes_above_top() {
        let mut page = build_page(None);
        page.handle(scroll_event(MouseScrollDelta::LineDelta(0.0, 3.0), page.scroll_y()));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn export_writes_current_view() {
        let page = build_page(Some("001"));
        let path = std::env::temp_dir().join(format!("portfolio-{}.html", std::process::id()));

        export_page(&page, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written, page.document());
        assert!(written.contains("PROJECT 001"));
    }
}
