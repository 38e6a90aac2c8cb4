// Example: a simulated page with a few images, scrolled top to bottom.
use std::cell::Cell;
use std::rc::Rc;

use hunt::{FrameScheduler, LayoutNode, TrackOptions, Viewport, VisibilityTracker};

#[derive(Clone, Debug)]
struct Block {
    name: &'static str,
    top: f64,
    height: f64,
}

impl LayoutNode for Block {
    fn offset_top(&self) -> f64 {
        self.top
    }

    fn offset_parent(&self) -> Option<Self> {
        None
    }

    fn client_height(&self) -> f64 {
        self.height
    }
}

struct Page {
    height: f64,
    scroll_y: Rc<Cell<f64>>,
}

impl Viewport for Page {
    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }
}

#[derive(Default)]
struct NextFrame {
    requested: bool,
}

impl FrameScheduler for NextFrame {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

fn main() {
    let scroll_y = Rc::new(Cell::new(0.0));
    let page = Page {
        height: 800.0,
        scroll_y: Rc::clone(&scroll_y),
    };
    let mut tracker = VisibilityTracker::new(page, NextFrame::default());

    let images: Vec<Block> = (0..5)
        .map(|i| Block {
            name: ["a", "b", "c", "d", "e"][i],
            top: 600.0 * i as f64,
            height: 400.0,
        })
        .collect();

    tracker
        .track(
            images,
            TrackOptions::new()
                .with_offset(100.0)
                .with_on_enter(|b: &Block| println!("load {}", b.name)),
        )
        .expect("valid options");

    tracker
        .track(
            Block {
                name: "ad",
                top: 1500.0,
                height: 250.0,
            },
            TrackOptions::new()
                .with_persist(true)
                .with_on_enter(|b: &Block| println!("{} shown", b.name))
                .with_on_leave(|b: &Block| println!("{} hidden", b.name)),
        )
        .expect("valid options");

    for y in (0..=3000).step_by(250) {
        // Several scroll events per frame; only the first one schedules work.
        for _ in 0..3 {
            scroll_y.set(y as f64);
            tracker.on_scroll();
        }
        if std::mem::take(&mut tracker.scheduler_mut().requested) {
            tracker.evaluate();
        }
        println!("scroll_y={y} tracked={}", tracker.len());
    }
}
