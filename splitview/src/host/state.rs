use std::collections::HashMap;

use splitview_layout::{
    capture, encode, measure_ratio, partition, rebuild_from_bytes, CaptureError, Instruction,
    Orientation, PaneProbe, PaneSink, PaneSource, Preset, Ratio, RestoreError, Size,
    ViewDescriptor,
};
use thiserror::Error;

use super::{Pane, PaneContent, PaneId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no pane is waiting for a layout instruction")]
    NoPendingPane,
    #[error("unknown pane {0}")]
    UnknownPane(PaneId),
    #[error("pane {0} is not a view")]
    NotAView(PaneId),
}

/// In-memory pane tree: the widget side of layout capture and restore.
pub struct PaneHost {
    panes: HashMap<PaneId, Pane>,
    root: PaneId,
    next_id: PaneId,
    size: Size,
    divider: u32,
    // Regions still waiting for an instruction, next one on top.
    pending: Vec<PaneId>,
}

impl PaneHost {
    pub fn new(size: Size, divider: u32) -> Self {
        let mut host = Self {
            panes: HashMap::new(),
            root: 0,
            next_id: 0,
            size,
            divider,
            pending: Vec::new(),
        };
        host.close_all();
        host
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pane(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(&id)
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn close_all(&mut self) {
        let closed = self.panes.len();
        self.panes.clear();
        self.pending.clear();
        self.next_id = 0;
        self.root = self.allocate(self.size, PaneContent::View(ViewDescriptor::default()));
        if closed > 1 {
            tracing::debug!("Closed {} panes", closed);
        }
    }

    pub fn set_view(&mut self, id: PaneId, view: ViewDescriptor) -> Result<(), HostError> {
        let pane = self.panes.get_mut(&id).ok_or(HostError::UnknownPane(id))?;
        match pane.content {
            PaneContent::Split { .. } => Err(HostError::NotAView(id)),
            PaneContent::View(_) | PaneContent::Empty => {
                pane.content = PaneContent::View(view);
                Ok(())
            }
        }
    }

    /// Split a view pane into two equal halves showing the same view.
    pub fn split(
        &mut self,
        id: PaneId,
        orientation: Orientation,
    ) -> Result<[PaneId; 2], HostError> {
        let pane = self.panes.get(&id).ok_or(HostError::UnknownPane(id))?;
        let view = *pane.view().ok_or(HostError::NotAView(id))?;
        let size = pane.size;

        let (a, b) = partition(size.along(orientation), Ratio::HALF, self.divider);
        let children = self.divide(
            id,
            orientation,
            size.with_extent(orientation, a),
            size.with_extent(orientation, b),
        );
        for child in children {
            self.set_view(child, view)?;
        }

        tracing::info!(
            "Split pane {} {:?} into {} and {}",
            id,
            orientation,
            children[0],
            children[1]
        );
        Ok(children)
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.layout(self.root, size);
    }

    fn layout(&mut self, id: PaneId, size: Size) {
        let Some(pane) = self.panes.get_mut(&id) else {
            return;
        };
        let old = pane.size;
        pane.size = size;

        let PaneContent::Split {
            orientation,
            children: [a, b],
        } = pane.content
        else {
            return;
        };

        let first_extent = self.panes.get(&a).map_or(0, |p| p.size.along(orientation));
        let ratio = measure_ratio(first_extent, old.along(orientation), self.divider);
        let (first, second) = partition(size.along(orientation), ratio, self.divider);
        self.layout(a, size.with_extent(orientation, first));
        self.layout(b, size.with_extent(orientation, second));
    }

    pub fn save(&self) -> Result<Vec<u8>, CaptureError> {
        capture(self).map(|tree| encode(&tree))
    }

    /// Replace the current panes with the layout stored in `bytes`.
    ///
    /// On failure the host is left with the default single view.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), RestoreError<HostError>> {
        self.close_all();
        self.pending.push(self.root);

        let size = self.size;
        let result = rebuild_from_bytes(bytes, size, self);
        let unfilled = std::mem::take(&mut self.pending);

        match result {
            Ok(()) => {
                if !unfilled.is_empty() {
                    tracing::warn!("{} panes left without a view after restore", unfilled.len());
                }
                tracing::info!("Layout restored with {} panes", self.panes.len());
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to restore layout: {}", err);
                self.close_all();
                Err(err)
            }
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Result<(), RestoreError<HostError>> {
        tracing::info!("Applying layout preset {}", preset);
        self.restore(&encode(&preset.build()))
    }

    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_pane(self.root, 0, &mut lines);
        lines
    }

    fn outline_pane(&self, id: PaneId, depth: usize, lines: &mut Vec<String>) {
        let Some(pane) = self.pane(id) else {
            return;
        };
        let id = pane.id;
        let indent = "  ".repeat(depth);
        let size = format!("{}x{}", pane.size.width, pane.size.height);

        match &pane.content {
            PaneContent::Split {
                orientation,
                children,
            } => {
                let orientation = match orientation {
                    Orientation::Horizontal => "horizontal",
                    Orientation::Vertical => "vertical",
                };
                lines.push(format!("{}[{}] {} split {}", indent, id, orientation, size));
                for child in children {
                    self.outline_pane(*child, depth + 1, lines);
                }
            }
            PaneContent::View(view) => {
                let options = match view {
                    ViewDescriptor::Orthogonal3d { plane } => format!(" (plane {})", plane),
                    ViewDescriptor::PointChart { components } => {
                        let axes = [('x', components.x), ('y', components.y), ('z', components.z)];
                        let shown: String = axes
                            .iter()
                            .filter(|(_, on)| *on)
                            .map(|(axis, _)| *axis)
                            .collect();
                        if shown.is_empty() {
                            " (-)".to_string()
                        } else {
                            format!(" ({})", shown)
                        }
                    }
                    ViewDescriptor::AnalogChart { mode } => format!(" (mode {})", mode),
                    ViewDescriptor::Perspective3d | ViewDescriptor::Log => String::new(),
                };
                lines.push(format!(
                    "{}[{}] {}{} {}",
                    indent,
                    id,
                    view.kind().label(),
                    options,
                    size
                ));
            }
            PaneContent::Empty => lines.push(format!("{}[{}] empty {}", indent, id, size)),
        }
    }

    fn allocate(&mut self, size: Size, content: PaneContent) -> PaneId {
        let id = self.next_id;
        self.next_id += 1;
        self.panes.insert(id, Pane::new(id, size, content));
        id
    }

    fn divide(
        &mut self,
        id: PaneId,
        orientation: Orientation,
        first: Size,
        second: Size,
    ) -> [PaneId; 2] {
        let a = self.allocate(first, PaneContent::Empty);
        let b = self.allocate(second, PaneContent::Empty);
        if let Some(pane) = self.panes.get_mut(&id) {
            pane.content = PaneContent::Split {
                orientation,
                children: [a, b],
            };
        }
        [a, b]
    }
}

impl PaneSource for PaneHost {
    type Pane = PaneId;

    fn root(&self) -> PaneId {
        self.root
    }

    fn probe(&self, id: PaneId) -> PaneProbe<PaneId> {
        let Some(pane) = self.panes.get(&id) else {
            return PaneProbe::Unrecognized;
        };
        match pane.content {
            PaneContent::Split {
                orientation,
                children,
            } => PaneProbe::Split {
                orientation,
                first_extent: self
                    .panes
                    .get(&children[0])
                    .map_or(0, |first| first.size.along(orientation)),
                total_extent: pane.size.along(orientation),
                divider: self.divider,
                children,
            },
            PaneContent::View(view) => PaneProbe::View(view),
            PaneContent::Empty => PaneProbe::Unrecognized,
        }
    }
}

impl PaneSink for PaneHost {
    type Error = HostError;

    fn divider_thickness(&self) -> u32 {
        self.divider
    }

    fn apply(&mut self, instruction: &Instruction) -> Result<(), HostError> {
        let id = self.pending.pop().ok_or(HostError::NoPendingPane)?;
        match *instruction {
            Instruction::Split {
                orientation,
                first,
                second,
            } => {
                let [a, b] = self.divide(id, orientation, first, second);
                self.pending.push(b);
                self.pending.push(a);
            }
            Instruction::SetView { view, size } => {
                let pane = self.panes.get_mut(&id).ok_or(HostError::UnknownPane(id))?;
                pane.size = size;
                pane.content = PaneContent::View(view);
            }
        }
        Ok(())
    }
}
