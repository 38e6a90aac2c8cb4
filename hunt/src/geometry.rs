//! Document-relative element geometry.
//!
//! Layout engines usually report an element's vertical position relative to its nearest offset
//! container (`offsetTop` / `offsetParent` in the DOM). The functions here fold that chain into
//! a single offset from the document origin.

/// Read access to the layout of a trackable element.
///
/// Implementations are expected to be cheap handles (an `Rc`, a JS reference, an arena index).
/// `Clone` is only required by the collection conversions in [`crate::Targets`].
pub trait LayoutNode: Sized {
    /// Offset of this node's top edge relative to its offset parent's top edge.
    fn offset_top(&self) -> f64;

    /// The nearest ancestor that acts as an offset container, if any.
    fn offset_parent(&self) -> Option<Self>;

    /// Rendered height of the node, excluding scrollable overflow.
    fn client_height(&self) -> f64;

    /// Whether the node is still attached to the document.
    ///
    /// Detached nodes are dropped by the tracker without a leave callback.
    fn is_connected(&self) -> bool {
        true
    }
}

/// Returns the vertical distance between `node` and the document origin.
pub fn compute_offset_top<N: LayoutNode>(node: &N) -> f64 {
    let mut top = node.offset_top();
    let mut parent = node.offset_parent();
    while let Some(p) = parent {
        top += p.offset_top();
        parent = p.offset_parent();
    }
    top
}

/// Returns the current layout height of `node`.
pub fn compute_height<N: LayoutNode>(node: &N) -> f64 {
    node.client_height()
}

/// A geometry snapshot for one element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementMetrics {
    /// Document-relative offset of the top edge.
    pub top: f64,
    pub height: f64,
}

impl ElementMetrics {
    pub fn probe<N: LayoutNode>(node: &N) -> Self {
        Self {
            top: compute_offset_top(node),
            height: compute_height(node),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}
