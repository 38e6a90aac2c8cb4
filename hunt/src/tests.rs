use crate::*;

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

#[derive(Clone)]
struct Node(Rc<NodeData>);

struct NodeData {
    name: &'static str,
    offset_top: Cell<f64>,
    height: Cell<f64>,
    parent: Option<Node>,
    connected: Cell<bool>,
}

impl Node {
    fn new(name: &'static str, top: f64, height: f64) -> Self {
        Self::build(name, top, height, None)
    }

    fn child_of(parent: &Node, name: &'static str, top: f64, height: f64) -> Self {
        Self::build(name, top, height, Some(parent.clone()))
    }

    fn build(name: &'static str, top: f64, height: f64, parent: Option<Node>) -> Self {
        Self(Rc::new(NodeData {
            name,
            offset_top: Cell::new(top),
            height: Cell::new(height),
            parent,
            connected: Cell::new(true),
        }))
    }

    fn name(&self) -> &'static str {
        self.0.name
    }

    fn set_top(&self, top: f64) {
        self.0.offset_top.set(top);
    }

    fn detach(&self) {
        self.0.connected.set(false);
    }
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0.name)
    }
}

impl LayoutNode for Node {
    fn offset_top(&self) -> f64 {
        self.0.offset_top.get()
    }

    fn offset_parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    fn client_height(&self) -> f64 {
        self.0.height.get()
    }

    fn is_connected(&self) -> bool {
        self.0.connected.get()
    }
}

struct Window {
    height: Cell<f64>,
    scroll_y: Cell<f64>,
}

impl Viewport for Rc<Window> {
    fn viewport_height(&self) -> f64 {
        self.height.get()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }
}

#[derive(Debug, Default)]
struct Frames {
    requests: usize,
}

impl FrameScheduler for Frames {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

type Tracker = VisibilityTracker<Node, Rc<Window>, Frames>;
type Log = Rc<RefCell<Vec<(&'static str, &'static str)>>>;

/// A tracker whose viewport bottom edge starts at `position`.
fn tracker_at(viewport_height: f64, position: f64) -> (Rc<Window>, Tracker) {
    let window = Rc::new(Window {
        height: Cell::new(viewport_height),
        scroll_y: Cell::new(position - viewport_height),
    });
    let tracker = VisibilityTracker::new(Rc::clone(&window), Frames::default());
    (window, tracker)
}

fn recording(log: &Log) -> TrackOptions<Node> {
    let enter = Rc::clone(log);
    let leave = Rc::clone(log);
    TrackOptions::new()
        .with_on_enter(move |n: &Node| enter.borrow_mut().push(("in", n.name())))
        .with_on_leave(move |n: &Node| leave.borrow_mut().push(("out", n.name())))
}

/// Moves the viewport bottom edge to `position` and runs the frame the scroll requested.
fn scroll_to(window: &Window, tracker: &mut Tracker, position: f64) {
    window.scroll_y.set(position - window.height.get());
    tracker.on_scroll();
    tracker.evaluate();
}

fn count(log: &Log, event: &str, name: &str) -> usize {
    log.borrow()
        .iter()
        .filter(|(e, n)| *e == event && *n == name)
        .count()
}

#[test]
fn offset_top_sums_the_offset_parent_chain() {
    let body = Node::new("body", 8.0, 5000.0);
    let section = Node::child_of(&body, "section", 300.0, 1000.0);
    let card = Node::child_of(&section, "card", 40.0, 120.0);

    assert_eq!(geometry::compute_offset_top(&card), 348.0);
    assert_eq!(geometry::compute_height(&card), 120.0);
    assert_eq!(
        ElementMetrics::probe(&card),
        ElementMetrics {
            top: 348.0,
            height: 120.0
        }
    );
    assert_eq!(ElementMetrics::probe(&card).bottom(), 468.0);
}

#[test]
fn offset_top_without_parent_is_own_offset() {
    let n = Node::new("root", 75.0, 10.0);
    assert_eq!(geometry::compute_offset_top(&n), 75.0);
}

#[test]
fn defaults_fill_unset_options() {
    let cfg = apply_defaults(TrackOptions::<Node>::new());
    assert_eq!(cfg.offset, DEFAULT_OFFSET);
    assert_eq!(cfg.offset, 0.0);
    assert!(!cfg.persist);
    // The default callbacks are no-ops.
    (cfg.on_enter)(&Node::new("x", 0.0, 0.0));
    (cfg.on_leave)(&Node::new("x", 0.0, 0.0));

    let cfg = apply_defaults(TrackOptions::<Node>::new().with_offset(-20.0).with_persist(true));
    assert_eq!(cfg.offset, -20.0);
    assert!(cfg.persist);
}

#[test]
fn non_finite_offset_is_rejected_before_insertion() {
    let (_w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();

    let err = t
        .track(
            vec![Node::new("a", 100.0, 50.0), Node::new("b", 200.0, 50.0)],
            recording(&log).with_offset(f64::NAN),
        )
        .unwrap_err();
    assert!(matches!(err, TrackError::InvalidArgument(_)));

    let err = t
        .track(Node::new("c", 100.0, 50.0), TrackOptions::new().with_offset(f64::INFINITY))
        .unwrap_err();
    assert!(matches!(err, TrackError::InvalidArgument(_)));

    assert!(t.is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn already_visible_element_enters_during_track() {
    // Viewport 0..800; element spans 100..150.
    let (_w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    let hero = Node::new("hero", 100.0, 50.0);

    assert_eq!(t.track(hero, recording(&log)), Ok(1));
    assert_eq!(*log.borrow(), vec![("in", "hero")]);
    assert!(t.elements()[0].is_visible());
    assert_eq!(t.scheduler().requests, 0);
}

#[test]
fn offscreen_element_starts_hidden() {
    let (_w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(Node::new("footer", 2000.0, 50.0), recording(&log))
        .unwrap();

    assert!(log.borrow().is_empty());
    assert_eq!(t.elements()[0].visibility(), Visibility::Hidden);
    assert_eq!(t.len(), 1);
}

#[test]
fn upper_bound_includes_viewport_height() {
    // Window is (2000, 2000 + 50 + 800) = (2000, 2850).
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(Node::new("img", 2000.0, 50.0), recording(&log))
        .unwrap();
    assert_eq!(t.elements()[0].window(800.0), (2000.0, 2850.0));

    scroll_to(&w, &mut t, 2851.0);
    assert!(log.borrow().is_empty());

    scroll_to(&w, &mut t, 2849.0);
    assert_eq!(*log.borrow(), vec![("in", "img")]);
}

#[test]
fn offset_window_boundaries_are_exclusive() {
    // top=1000, height=100, offset=50, viewport=800: window is (950, 1950).
    let cases = [(950.0, false), (1950.0, false), (951.0, true), (1949.0, true)];
    for (position, enters) in cases {
        let (_w, mut t) = tracker_at(800.0, position);
        let log = Log::default();
        t.track(
            Node::new("box", 1000.0, 100.0),
            recording(&log).with_offset(50.0),
        )
        .unwrap();

        assert_eq!(t.elements()[0].window(800.0), (950.0, 1950.0));
        assert_eq!(
            count(&log, "in", "box") == 1,
            enters,
            "position {position}"
        );
    }
}

#[test]
fn negative_offset_shrinks_the_window() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(
        Node::new("ad", 1000.0, 100.0),
        recording(&log).with_offset(-100.0),
    )
    .unwrap();

    // Without the offset 1050 would already be inside (1000, 1900).
    scroll_to(&w, &mut t, 1050.0);
    assert!(log.borrow().is_empty());

    scroll_to(&w, &mut t, 1101.0);
    assert_eq!(count(&log, "in", "ad"), 1);

    scroll_to(&w, &mut t, 1800.0);
    assert_eq!(count(&log, "out", "ad"), 1);
}

#[test]
fn one_shot_element_fires_once_then_is_dropped() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(Node::new("once", 2000.0, 50.0), recording(&log))
        .unwrap();

    scroll_to(&w, &mut t, 2100.0);
    assert_eq!(*log.borrow(), vec![("in", "once")]);
    assert_eq!(t.len(), 1);

    scroll_to(&w, &mut t, 3000.0);
    assert_eq!(*log.borrow(), vec![("in", "once"), ("out", "once")]);
    assert!(t.is_empty());

    for position in [2100.0, 800.0, 2400.0, 5000.0] {
        scroll_to(&w, &mut t, position);
    }
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn persistent_element_toggles_on_every_crossing() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(
        Node::new("banner", 2000.0, 50.0),
        recording(&log).with_persist(true),
    )
    .unwrap();

    for _ in 0..5 {
        scroll_to(&w, &mut t, 2400.0);
        assert!(t.elements()[0].is_visible());
        // Leave through the lower bound (inclusive).
        scroll_to(&w, &mut t, 2000.0);
        assert!(!t.elements()[0].is_visible());
        scroll_to(&w, &mut t, 2400.0);
        // Leave through the upper bound (inclusive).
        scroll_to(&w, &mut t, 2850.0);
        assert_eq!(t.len(), 1);
    }

    assert_eq!(count(&log, "in", "banner"), 10);
    assert_eq!(count(&log, "out", "banner"), 10);
}

#[test]
fn repeated_scroll_events_collapse_into_one_frame() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(Node::new("lazy", 2000.0, 50.0), recording(&log))
        .unwrap();

    // Cross in and back out before the frame runs, then settle inside.
    for position in [1500.0, 2100.0, 2500.0, 3000.0, 4000.0, 2200.0] {
        w.scroll_y.set(position - 800.0);
        t.on_scroll();
        assert!(t.is_evaluation_pending());
    }
    assert_eq!(t.scheduler().requests, 1);

    t.evaluate();
    assert!(!t.is_evaluation_pending());
    assert_eq!(t.scroll_position(), 2200.0);

    // Same outcome as a single pass at the final position.
    let (_w2, mut reference) = tracker_at(800.0, 2200.0);
    let reference_log = Log::default();
    reference
        .track(Node::new("lazy", 2000.0, 50.0), recording(&reference_log))
        .unwrap();
    assert_eq!(*log.borrow(), *reference_log.borrow());
    assert_eq!(*log.borrow(), vec![("in", "lazy")]);

    t.on_scroll();
    assert_eq!(t.scheduler().requests, 2);
}

#[test]
fn simultaneous_leaves_are_all_handled() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    t.track(
        [
            Node::new("a", 100.0, 50.0),
            Node::new("b", 200.0, 50.0),
        ],
        recording(&log),
    )
    .unwrap();
    t.track(
        Node::new("keep", 250.0, 50.0),
        recording(&log).with_persist(true),
    )
    .unwrap();
    t.track(
        vec![Node::new("c", 300.0, 50.0), Node::new("d", 400.0, 50.0)],
        recording(&log),
    )
    .unwrap();
    assert_eq!(log.borrow().len(), 5);

    scroll_to(&w, &mut t, 5000.0);

    for name in ["a", "b", "c", "d", "keep"] {
        assert_eq!(count(&log, "in", name), 1, "{name}");
        assert_eq!(count(&log, "out", name), 1, "{name}");
    }
    assert_eq!(t.len(), 1);
    assert_eq!(t.elements()[0].element().name(), "keep");
}

#[test]
fn update_metrics_refreshes_geometry_without_callbacks() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    let node = Node::new("moving", 3000.0, 50.0);
    t.track(node.clone(), recording(&log)).unwrap();

    node.set_top(500.0);
    w.height.set(600.0);
    t.on_resize();

    assert!(log.borrow().is_empty());
    assert_eq!(t.elements()[0].top(), 500.0);
    assert!(!t.elements()[0].is_visible());
    assert_eq!(
        t.metrics(),
        Metrics {
            viewport_height: 600.0,
            scroll_position: 600.0,
        }
    );

    t.evaluate();
    assert_eq!(*log.borrow(), vec![("in", "moving")]);
}

#[test]
fn refresh_keeps_visibility() {
    let (_w, mut t) = tracker_at(800.0, 800.0);
    let node = Node::new("n", 100.0, 50.0);
    t.track(node.clone(), TrackOptions::new()).unwrap();
    assert!(t.elements()[0].is_visible());

    // Geometry now says it is far below, but only an evaluation may flip the flag.
    node.set_top(9000.0);
    t.update_metrics();
    assert!(t.elements()[0].is_visible());
    assert_eq!(t.elements()[0].top(), 9000.0);
}

#[test]
fn detached_elements_are_evicted_silently() {
    let (_w, mut t) = tracker_at(800.0, 800.0);
    let log = Log::default();
    let gone = Node::new("gone", 100.0, 50.0);
    let stay = Node::new("stay", 200.0, 50.0);
    t.track(
        vec![gone.clone(), stay.clone()],
        recording(&log).with_persist(true),
    )
    .unwrap();
    assert_eq!(log.borrow().len(), 2);

    gone.detach();
    t.evaluate();
    assert_eq!(t.len(), 1);
    assert_eq!(count(&log, "out", "gone"), 0);

    stay.detach();
    t.update_metrics();
    assert!(t.is_empty());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn empty_pass_only_clears_pending() {
    let (w, mut t) = tracker_at(800.0, 800.0);
    t.on_scroll();
    assert!(t.is_evaluation_pending());

    w.scroll_y.set(4000.0);
    t.evaluate();
    assert!(!t.is_evaluation_pending());
    assert_eq!(t.scroll_position(), 800.0);
}

#[test]
fn track_runs_inline_and_clears_pending() {
    let (_w, mut t) = tracker_at(800.0, 800.0);
    t.on_scroll();
    assert_eq!(t.scheduler().requests, 1);

    t.track(Node::new("n", 100.0, 50.0), TrackOptions::new())
        .unwrap();
    assert!(!t.is_evaluation_pending());

    t.on_scroll();
    assert_eq!(t.scheduler().requests, 2);
}

#[test]
fn targets_accept_single_and_collections() {
    let (_w, mut t) = tracker_at(800.0, 0.0);
    let nodes = [Node::new("a", 5000.0, 1.0), Node::new("b", 6000.0, 1.0)];

    assert_eq!(t.track(&nodes[..], TrackOptions::new()), Ok(2));
    assert_eq!(t.track(nodes.clone(), TrackOptions::new()), Ok(2));
    assert_eq!(t.track(Vec::<Node>::new(), TrackOptions::new()), Ok(0));
    assert_eq!(
        t.track(Node::new("c", 7000.0, 1.0), TrackOptions::new()),
        Ok(1)
    );
    assert_eq!(t.len(), 5);

    let targets: Targets<Node> = nodes.to_vec().into();
    assert_eq!(targets.len(), 2);
    assert!(!targets.is_empty());
}
