use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::RestoreError;
use crate::node::{LayoutNode, Orientation, Ratio};
use crate::view::ViewDescriptor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn along(self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    pub fn with_extent(self, orientation: Orientation, extent: u32) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(extent, self.height),
            Orientation::Vertical => Self::new(self.width, extent),
        }
    }
}

/// One step of rebuilding a pane tree.
///
/// A sink keeps a current region. `Split` divides it and makes the first
/// child current. `SetView` fills it, after which the next region still
/// waiting in document order becomes current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    Split {
        orientation: Orientation,
        first: Size,
        second: Size,
    },
    SetView {
        view: ViewDescriptor,
        size: Size,
    },
}

pub trait PaneSink {
    type Error;

    /// Thickness of the divider the host draws between two split children.
    fn divider_thickness(&self) -> u32 {
        0
    }

    fn apply(&mut self, instruction: &Instruction) -> Result<(), Self::Error>;
}

/// Split `extent` minus the divider between two children.
///
/// The first child gets `round(ratio * available)`, the second whatever is
/// left, so the two always add up to `available`.
pub fn partition(extent: u32, ratio: Ratio, divider: u32) -> (u32, u32) {
    let available = extent.saturating_sub(divider);
    let first = (f64::from(ratio.get()) * f64::from(available)).round() as u32;
    let first = first.min(available);
    (first, available - first)
}

pub fn rebuild(tree: &LayoutNode, target: Size, divider: u32) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(tree.view_count() * 2);
    emit(tree, target, divider, &mut instructions);
    instructions
}

fn emit(node: &LayoutNode, size: Size, divider: u32, out: &mut Vec<Instruction>) {
    match node {
        LayoutNode::Split(split) => {
            let (a, b) = partition(size.along(split.orientation), split.ratio, divider);
            let first = size.with_extent(split.orientation, a);
            let second = size.with_extent(split.orientation, b);
            out.push(Instruction::Split {
                orientation: split.orientation,
                first,
                second,
            });
            emit(&split.first, first, divider, out);
            emit(&split.second, second, divider, out);
        }
        LayoutNode::View { view } => out.push(Instruction::SetView { view: *view, size }),
    }
}

/// Decode `bytes` and replay them into `sink`. Nothing reaches the sink
/// unless the whole blob decodes.
pub fn rebuild_from_bytes<S: PaneSink>(
    bytes: &[u8],
    target: Size,
    sink: &mut S,
) -> Result<(), RestoreError<S::Error>> {
    let tree = codec::decode(bytes)?;
    let instructions = rebuild(&tree, target, sink.divider_thickness());
    tracing::debug!(
        "replaying {} layout instructions into {}x{}",
        instructions.len(),
        target.width,
        target.height
    );
    for (index, instruction) in instructions.iter().enumerate() {
        sink.apply(instruction)
            .map_err(|source| RestoreError::Sink { index, source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        divider: u32,
        applied: Vec<Instruction>,
        fail_at: Option<usize>,
    }

    impl PaneSink for Recorder {
        type Error = String;

        fn divider_thickness(&self) -> u32 {
            self.divider
        }

        fn apply(&mut self, instruction: &Instruction) -> Result<(), String> {
            if self.fail_at == Some(self.applied.len()) {
                return Err("refused".to_string());
            }
            self.applied.push(instruction.clone());
            Ok(())
        }
    }

    #[test]
    fn test_partition_basic() {
        assert_eq!(partition(1000, Ratio::from_percent(80), 0), (800, 200));
        assert_eq!(partition(1004, Ratio::HALF, 4), (500, 500));
        assert_eq!(partition(101, Ratio::HALF, 0), (51, 50));
        assert_eq!(partition(3, Ratio::HALF, 8), (0, 0));
        assert_eq!(partition(640, Ratio::new(1.0).unwrap(), 6), (634, 0));
    }

    #[test]
    fn test_rebuild_charts_preset() {
        let tree = preset::perspective_3d_with_charts();
        let instructions = rebuild(&tree, Size::new(1284, 800), 4);
        assert_eq!(
            instructions,
            vec![
                Instruction::Split {
                    orientation: Orientation::Horizontal,
                    first: Size::new(640, 800),
                    second: Size::new(640, 800),
                },
                Instruction::SetView {
                    view: ViewDescriptor::Perspective3d,
                    size: Size::new(640, 800),
                },
                Instruction::Split {
                    orientation: Orientation::Vertical,
                    first: Size::new(640, 398),
                    second: Size::new(640, 398),
                },
                Instruction::SetView {
                    view: ViewDescriptor::PointChart {
                        components: crate::ComponentFlags::ALL,
                    },
                    size: Size::new(640, 398),
                },
                Instruction::SetView {
                    view: ViewDescriptor::AnalogChart { mode: 0 },
                    size: Size::new(640, 398),
                },
            ]
        );
    }

    #[test]
    fn test_rebuild_single_view() {
        let instructions = rebuild(&preset::single_perspective_3d(), Size::new(10, 20), 3);
        assert_eq!(
            instructions,
            vec![Instruction::SetView {
                view: ViewDescriptor::Perspective3d,
                size: Size::new(10, 20),
            }]
        );
    }

    #[test]
    fn test_rebuild_from_bytes_feeds_sink() {
        let bytes = codec::encode(&preset::perspective_3d_with_log());
        let mut sink = Recorder {
            divider: 0,
            ..Default::default()
        };
        rebuild_from_bytes(&bytes, Size::new(800, 600), &mut sink).unwrap();
        assert_eq!(
            sink.applied,
            rebuild(&preset::perspective_3d_with_log(), Size::new(800, 600), 0)
        );
        assert_eq!(
            sink.applied[0],
            Instruction::Split {
                orientation: Orientation::Vertical,
                first: Size::new(800, 480),
                second: Size::new(800, 120),
            }
        );
    }

    #[test]
    fn test_bad_blob_never_reaches_sink() {
        let mut bytes = codec::encode(&preset::perspective_3d_with_charts());
        // Corrupt the last view's kind; the earlier views are valid.
        let kind_at = bytes.len() - 8;
        bytes[kind_at..kind_at + 4].copy_from_slice(&99i32.to_be_bytes());

        let mut sink = Recorder::default();
        let err = rebuild_from_bytes(&bytes, Size::new(100, 100), &mut sink).unwrap_err();
        assert!(matches!(
            err,
            RestoreError::Decode(crate::DecodeError::UnknownViewKind { code: 99, .. })
        ));
        assert!(sink.applied.is_empty());
    }

    #[test]
    fn test_sink_error_stops_replay() {
        let bytes = codec::encode(&preset::perspective_3d_with_charts());
        let mut sink = Recorder {
            fail_at: Some(2),
            ..Default::default()
        };
        let err = rebuild_from_bytes(&bytes, Size::new(100, 100), &mut sink).unwrap_err();
        assert!(matches!(err, RestoreError::Sink { index: 2, .. }));
        assert_eq!(sink.applied.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_partition_sums_to_available(
            extent in 0u32..100_000,
            ratio in 0.0f32..=1.0,
            divider in 0u32..32,
        ) {
            let ratio = Ratio::new(ratio).unwrap();
            let available = extent.saturating_sub(divider);
            let (a, b) = partition(extent, ratio, divider);
            prop_assert_eq!(a + b, available);
            prop_assert_eq!(a, (f64::from(ratio.get()) * f64::from(available)).round() as u32);
        }
    }
}
