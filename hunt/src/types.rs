use alloc::vec::Vec;

/// The two live states of a tracked element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// A lightweight snapshot of the tracker's cached viewport metrics.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub viewport_height: f64,
    /// Bottom edge of the viewport in document coordinates (`viewport_height + scroll_y`).
    pub scroll_position: f64,
}

/// One element or a collection of elements to register.
#[derive(Clone, Debug, PartialEq)]
pub enum Targets<E> {
    One(E),
    Many(Vec<E>),
}

impl<E> Targets<E> {
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<E> {
        match self {
            Self::One(e) => alloc::vec![e],
            Self::Many(v) => v,
        }
    }
}

impl<E> From<E> for Targets<E> {
    fn from(element: E) -> Self {
        Self::One(element)
    }
}

impl<E> From<Vec<E>> for Targets<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::Many(elements)
    }
}

impl<E, const N: usize> From<[E; N]> for Targets<E> {
    fn from(elements: [E; N]) -> Self {
        Self::Many(elements.into())
    }
}

impl<E: Clone> From<&[E]> for Targets<E> {
    fn from(elements: &[E]) -> Self {
        Self::Many(elements.to_vec())
    }
}
