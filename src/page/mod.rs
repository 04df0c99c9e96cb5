use log::debug;

pub mod content;
pub mod template;

use content::Content;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Main,
    ProjectDetail { number: String, return_scroll: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    NavToggle,
    NavClose,
    NavLink(String),
    /// A click inside the nav overlay. `on_backdrop` is true when the overlay
    /// element itself was the target rather than one of its children.
    OverlayClick { on_backdrop: bool },
    ReadMore(String),
    BackToProjects,
    Scroll(f64),
}

/// Builds the page markup from static content and tracks the little state the
/// page has: which view fills the app container, whether the nav overlay is
/// open, and the scroll offset.
pub struct PageAssembler {
    content: Content,
    view: View,
    app_html: String,
    nav_open: bool,
    scroll_y: f64,
}

impl PageAssembler {
    pub fn new(content: Content) -> Self {
        let app_html = template::main_view(&content);
        Self {
            content,
            view: View::Main,
            app_html,
            nav_open: false,
            scroll_y: 0.0,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    #[cfg(test)]
    pub fn app_html(&self) -> &str {
        &self.app_html
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn handle(&mut self, event: PageEvent) {
        debug!("Page event {:?}", event);
        match event {
            PageEvent::NavToggle => self.nav_open = true,
            PageEvent::NavClose | PageEvent::NavLink(_) => self.nav_open = false,
            PageEvent::OverlayClick { on_backdrop } => {
                if on_backdrop {
                    self.nav_open = false;
                }
            }
            PageEvent::ReadMore(number) => {
                self.show_project_detail(&number);
            }
            PageEvent::BackToProjects => self.back_to_projects(),
            PageEvent::Scroll(y) => self.scroll_y = y.max(0.0),
        }
    }

    /// Swaps the app content for a project's detail view. Unknown project
    /// numbers leave the page untouched and return false.
    pub fn show_project_detail(&mut self, number: &str) -> bool {
        let project = match self.content.project(number) {
            Some(project) => project,
            None => {
                debug!("No project numbered {}", number);
                return false;
            }
        };

        self.app_html = template::project_detail(project);
        self.view = View::ProjectDetail {
            number: number.to_string(),
            return_scroll: self.scroll_y,
        };
        self.scroll_y = 0.0;
        true
    }

    pub fn back_to_projects(&mut self) {
        let return_scroll = match &self.view {
            View::ProjectDetail { return_scroll, .. } => *return_scroll,
            View::Main => self.scroll_y,
        };
        self.app_html = template::main_view(&self.content);
        self.view = View::Main;
        self.scroll_y = return_scroll;
    }

    /// Full HTML document: navigation surface, the backdrop canvas and the app
    /// container holding the current view.
    pub fn document(&self) -> String {
        let overlay_class = if self.nav_open {
            "nav-overlay active"
        } else {
            "nav-overlay"
        };
        let links: String = [
            ("home", "Home"),
            ("experience", "Experience"),
            ("projects", "Projects"),
            ("skills", "Skills"),
            ("education", "Education"),
            ("resume", "Resume"),
            ("contact", "Contact"),
        ]
        .iter()
        .map(|(anchor, label)| format!(r##"<a href="#{}" class="nav-link">{}</a>"##, anchor, label))
        .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
</head>
<body>
<canvas id="webgl"></canvas>
<button id="nav-toggle" class="nav-toggle">MENU</button>
<div id="nav-overlay" class="{overlay_class}">
<button id="nav-close" class="nav-close">CLOSE</button>
<nav class="nav-links">{links}</nav>
</div>
<div id="app">{app}</div>
</body>
</html>
"#,
            title = self.content.profile.name,
            overlay_class = overlay_class,
            links = links,
            app = self.app_html,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageAssembler {
        PageAssembler::new(Content::portfolio())
    }

    #[test]
    fn starts_on_main_view() {
        let page = page();
        assert_eq!(page.view(), &View::Main);
        assert!(page.app_html().contains(r#"class="main-container""#));
        assert!(!page.nav_open());
    }

    #[test]
    fn nav_overlay_transitions() {
        let mut page = page();

        page.handle(PageEvent::NavToggle);
        assert!(page.nav_open());
        assert!(page.document().contains(r#"class="nav-overlay active""#));

        page.handle(PageEvent::OverlayClick { on_backdrop: false });
        assert!(page.nav_open());

        page.handle(PageEvent::OverlayClick { on_backdrop: true });
        assert!(!page.nav_open());

        page.handle(PageEvent::NavToggle);
        page.handle(PageEvent::NavLink("#skills".into()));
        assert!(!page.nav_open());

        page.handle(PageEvent::NavToggle);
        page.handle(PageEvent::NavClose);
        assert!(!page.nav_open());
        assert!(page.document().contains(r#"class="nav-overlay""#));
    }

    #[test]
    fn read_more_then_back_restores_scroll() {
        let mut page = page();
        page.handle(PageEvent::Scroll(1250.0));

        page.handle(PageEvent::ReadMore("002".into()));
        assert_eq!(
            page.view(),
            &View::ProjectDetail {
                number: "002".into(),
                return_scroll: 1250.0
            }
        );
        assert_eq!(page.scroll_y(), 0.0);
        assert!(page.app_html().contains("Comparative Study of Different Drone Structures"));
        assert!(page.app_html().contains(r#"id="back-to-projects-bottom""#));

        page.handle(PageEvent::Scroll(300.0));
        page.handle(PageEvent::BackToProjects);
        assert_eq!(page.view(), &View::Main);
        assert_eq!(page.scroll_y(), 1250.0);
        assert!(page.app_html().contains(r#"id="projects-container""#));
    }

    #[test]
    fn unknown_project_is_ignored() {
        let mut page = page();
        let before = page.app_html().to_string();
        assert!(!page.show_project_detail("999"));
        assert_eq!(page.view(), &View::Main);
        assert_eq!(page.app_html(), before);
    }

    #[test]
    fn document_wraps_current_view() {
        let mut page = page();
        page.show_project_detail("001");
        let document = page.document();
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains(r#"<canvas id="webgl"></canvas>"#));
        assert!(document.contains(r#"id="nav-toggle""#));
        assert!(document.contains(r#"id="nav-close""#));
        assert_eq!(document.matches(r#"class="nav-link""#).count(), 7);
        assert!(document.contains("PROJECT 001"));
    }
}
