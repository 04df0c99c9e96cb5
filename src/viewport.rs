use log::trace;

use crate::window::{Position, Size};

pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportEvent {
    Resized(Size),
    PointerMoved(Position),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
}

impl ViewportEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ViewportEvent::Resized(_) => EventKind::Resize,
            ViewportEvent::PointerMoved(_) => EventKind::PointerMove,
        }
    }
}

/// Viewport state handed to every listener alongside the event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Metrics {
    /// Logical size, used for aspect ratio and pointer normalization.
    pub size: Size,
    /// Window drawable size in physical pixels. The surface is always this size.
    pub surface_size: Size,
    pub scale_factor: f64,
    pub pixel_ratio: f64,
}

impl Metrics {
    /// Size of the offscreen color target. Equal to the surface size unless the
    /// scale factor exceeds [`MAX_PIXEL_RATIO`], in which case the scene is drawn
    /// at the capped ratio and upscaled into the surface.
    pub fn render_size(&self) -> Size {
        if self.scale_factor <= self.pixel_ratio {
            return self.surface_size;
        }
        let scale = |side: u32| (side as f64 * self.pixel_ratio / self.scale_factor).floor() as u32;
        Size::new(scale(self.surface_size.width), scale(self.surface_size.height))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&ViewportEvent, &Metrics)>;

struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

/// Window-wide resize and pointer signals. Listeners are removed by the id
/// returned from [`Viewport::subscribe`], never by handler identity.
pub struct Viewport {
    surface_size: Size,
    scale_factor: f64,
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Viewport {
    /// `surface_size` is the window's drawable size in physical pixels.
    pub fn new(surface_size: Size, scale_factor: f64) -> Self {
        Self {
            surface_size,
            scale_factor,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.surface_size.to_logical(self.scale_factor)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            size: self.size(),
            surface_size: self.surface_size,
            scale_factor: self.scale_factor,
            pixel_ratio: self.pixel_ratio(),
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&ViewportEvent, &Metrics) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            handler: Box::new(handler),
        });
        trace!("Subscribed {:?} listener {:?}", kind, id);
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        before != self.listeners.len()
    }

    #[cfg(test)]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    pub fn resize(&mut self, surface_size: Size) {
        self.surface_size = surface_size;
        self.dispatch(ViewportEvent::Resized(self.size()));
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64, surface_size: Size) {
        self.scale_factor = scale_factor;
        self.resize(surface_size);
    }

    pub fn pointer_moved(&mut self, position: Position) {
        self.dispatch(ViewportEvent::PointerMoved(position));
    }

    fn dispatch(&mut self, event: ViewportEvent) {
        let metrics = self.metrics();
        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.handler)(&event, &metrics);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn pixel_ratio_is_clamped() {
        assert_eq!(Viewport::new(Size::new(10, 10), 1.0).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(Size::new(10, 10), 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(Size::new(10, 10), 3.0).pixel_ratio(), 2.0);
    }

    #[test]
    fn surface_matches_window_at_any_scale() {
        let mut viewport = Viewport::new(Size::new(1001, 751), 1.5);
        let metrics = viewport.metrics();
        assert_eq!(metrics.surface_size, Size::new(1001, 751));
        assert_eq!(metrics.render_size(), Size::new(1001, 751));

        viewport.set_scale_factor(3.0, Size::new(3840, 2160));
        let metrics = viewport.metrics();
        assert_eq!(metrics.surface_size, Size::new(3840, 2160));
        assert_eq!(metrics.size, Size::new(1280, 720));
        assert_eq!(metrics.pixel_ratio, 2.0);
        assert_eq!(metrics.render_size(), Size::new(2560, 1440));
    }

    #[test]
    fn events_reach_only_matching_listeners() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let resizes = Rc::new(Cell::new(0));
        let moves = Rc::new(Cell::new(0));

        let r = resizes.clone();
        viewport.subscribe(EventKind::Resize, move |event, metrics| {
            assert_eq!(*event, ViewportEvent::Resized(metrics.size));
            r.set(r.get() + 1);
        });
        let m = moves.clone();
        viewport.subscribe(EventKind::PointerMove, move |_, _| m.set(m.get() + 1));

        viewport.resize(Size::new(1024, 768));
        viewport.pointer_moved(Position::new(1.0, 2.0));
        viewport.pointer_moved(Position::new(3.0, 4.0));

        assert_eq!(resizes.get(), 1);
        assert_eq!(moves.get(), 2);
        assert_eq!(viewport.size(), Size::new(1024, 768));
    }

    #[test]
    fn unsubscribe_removes_exactly_one_listener() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let calls = Rc::new(Cell::new(0));

        let c = calls.clone();
        let first = viewport.subscribe(EventKind::Resize, move |_, _| c.set(c.get() + 1));
        let c = calls.clone();
        viewport.subscribe(EventKind::Resize, move |_, _| c.set(c.get() + 10));

        assert!(viewport.unsubscribe(first));
        assert!(!viewport.unsubscribe(first));
        assert_eq!(viewport.listener_count(EventKind::Resize), 1);

        viewport.resize(Size::new(1, 1));
        assert_eq!(calls.get(), 10);
    }
}
