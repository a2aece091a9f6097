use splitview_layout::{Orientation, Size, ViewDescriptor};

pub type PaneId = u32;

#[derive(Debug, Clone, PartialEq)]
pub enum PaneContent {
    Split {
        orientation: Orientation,
        children: [PaneId; 2],
    },
    View(ViewDescriptor),
    /// Region created by a split that has not been given a view yet.
    Empty,
}

#[derive(Debug, Clone)]
pub struct Pane {
    pub id: PaneId,
    pub size: Size,
    pub content: PaneContent,
}

impl Pane {
    pub fn new(id: PaneId, size: Size, content: PaneContent) -> Self {
        Self {
            id,
            size,
            content,
        }
    }

    pub fn view(&self) -> Option<&ViewDescriptor> {
        match &self.content {
            PaneContent::View(view) => Some(view),
            _ => None,
        }
    }
}
