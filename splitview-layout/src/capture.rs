use crate::codec::MAX_DEPTH;
use crate::error::{CaptureError, PanePath};
use crate::node::{LayoutNode, Orientation, Ratio};
use crate::view::ViewDescriptor;

#[derive(Debug, Clone, PartialEq)]
pub enum PaneProbe<P> {
    Split {
        orientation: Orientation,
        /// Current size of the first child along the split axis.
        first_extent: u32,
        /// Size of the whole split along its axis, divider included.
        total_extent: u32,
        divider: u32,
        children: [P; 2],
    },
    View(ViewDescriptor),
    Unrecognized,
}

pub trait PaneSource {
    type Pane: Copy;

    fn root(&self) -> Self::Pane;

    fn probe(&self, pane: Self::Pane) -> PaneProbe<Self::Pane>;
}

/// Snapshot the live pane tree as a [`LayoutNode`].
///
/// Ratios are recomputed from the current pixel sizes. Trees nested deeper
/// than [`MAX_DEPTH`] are refused, since `decode` would not read them back.
pub fn capture<S: PaneSource + ?Sized>(source: &S) -> Result<LayoutNode, CaptureError> {
    let mut path = PanePath::default();
    capture_pane(source, source.root(), &mut path)
}

fn capture_pane<S: PaneSource + ?Sized>(
    source: &S,
    pane: S::Pane,
    path: &mut PanePath,
) -> Result<LayoutNode, CaptureError> {
    match source.probe(pane) {
        PaneProbe::Split {
            orientation,
            first_extent,
            total_extent,
            divider,
            children: [first, second],
        } => {
            if path.0.len() >= MAX_DEPTH {
                tracing::error!("cannot capture layout: split at {} is too deep", path);
                return Err(CaptureError::TooDeep {
                    limit: MAX_DEPTH,
                    path: path.clone(),
                });
            }
            let ratio = measure_ratio(first_extent, total_extent, divider);

            path.0.push(0);
            let first = capture_pane(source, first, path)?;
            path.0.pop();

            path.0.push(1);
            let second = capture_pane(source, second, path)?;
            path.0.pop();

            Ok(LayoutNode::split(orientation, ratio, first, second))
        }
        PaneProbe::View(view) => Ok(LayoutNode::view(view)),
        PaneProbe::Unrecognized => {
            tracing::error!("cannot capture layout: pane at {} is not a view", path);
            Err(CaptureError::InvalidPaneWidget { path: path.clone() })
        }
    }
}

/// Ratio of a split whose first child is `first_extent` long out of
/// `total_extent`, divider included.
pub fn measure_ratio(first_extent: u32, total_extent: u32, divider: u32) -> Ratio {
    let available = total_extent.saturating_sub(divider);
    if available == 0 {
        return Ratio::HALF;
    }
    Ratio::clamped((f64::from(first_extent) / f64::from(available)) as f32)
}
