//! Binary layout blob.
//!
//! ```text
//! magic (i32) | version (i32) | root node
//!
//! split node: 0x0002 | orientation (i32) | ratio (f32) | first | second
//! view node:  0x0001 | kind (i32) | kind-specific option fields (i32 each)
//! ```
//!
//! All fields are big-endian. Nodes are written depth-first, pre-order.
//! There is no length prefix anywhere: the option fields of a view are
//! implied by its kind, see [`ViewKind::option_fields`].

use crate::error::DecodeError;
use crate::node::{LayoutNode, Orientation, Ratio};
use crate::view::{ComponentFlags, ViewDescriptor, ViewKind};

pub const MAGIC: i32 = 0x0abc;
pub const VERSION: i32 = 0x0100;

pub const VIEW_TAG: i32 = 0x0001;
pub const SPLIT_TAG: i32 = 0x0002;

/// Deepest split nesting `decode` accepts.
pub const MAX_DEPTH: usize = 64;

const HEADER_LEN: usize = 8;

pub fn encode(tree: &LayoutNode) -> Vec<u8> {
    let mut writer = Writer::with_capacity(HEADER_LEN + tree.view_count() * 20);
    writer.i32(MAGIC);
    writer.i32(VERSION);
    write_node(&mut writer, tree);
    writer.finish()
}

fn write_node(writer: &mut Writer, node: &LayoutNode) {
    match node {
        LayoutNode::Split(split) => {
            writer.i32(SPLIT_TAG);
            writer.i32(split.orientation.code());
            writer.f32(split.ratio.get());
            write_node(writer, &split.first);
            write_node(writer, &split.second);
        }
        LayoutNode::View { view } => {
            writer.i32(VIEW_TAG);
            writer.i32(view.kind().code());
            match *view {
                ViewDescriptor::Orthogonal3d { plane } => writer.i32(plane),
                ViewDescriptor::PointChart { components } => {
                    writer.flag(components.x);
                    writer.flag(components.y);
                    writer.flag(components.z);
                }
                ViewDescriptor::AnalogChart { mode } => writer.i32(mode),
                ViewDescriptor::Perspective3d | ViewDescriptor::Log => {}
            }
        }
    }
}

pub fn decode(bytes: &[u8]) -> Result<LayoutNode, DecodeError> {
    let mut reader = Reader::new(bytes);

    let magic = reader.i32("magic")?;
    if magic != MAGIC {
        return Err(DecodeError::FormatMismatch {
            found: magic,
            expected: MAGIC,
        });
    }

    let version = reader.i32("version")?;
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            expected: VERSION,
        });
    }

    let root = read_node(&mut reader, 0)?;
    if reader.remaining() > 0 {
        tracing::debug!(
            "ignoring {} trailing bytes after layout root",
            reader.remaining()
        );
    }
    Ok(root)
}

fn read_node(reader: &mut Reader<'_>, depth: usize) -> Result<LayoutNode, DecodeError> {
    let offset = reader.position();
    match reader.i32("node tag")? {
        SPLIT_TAG => {
            if depth >= MAX_DEPTH {
                return Err(DecodeError::TooDeep {
                    limit: MAX_DEPTH,
                    offset,
                });
            }

            let offset = reader.position();
            let code = reader.i32("orientation")?;
            let orientation = Orientation::from_code(code)
                .ok_or(DecodeError::UnknownOrientation { code, offset })?;

            let offset = reader.position();
            let value = reader.f32("ratio")?;
            let ratio =
                Ratio::new(value).map_err(|_| DecodeError::InvalidRatio { value, offset })?;

            let first = read_node(reader, depth + 1)?;
            let second = read_node(reader, depth + 1)?;
            Ok(LayoutNode::split(orientation, ratio, first, second))
        }
        VIEW_TAG => read_view(reader).map(LayoutNode::view),
        tag => Err(DecodeError::UnknownNodeTag { tag, offset }),
    }
}

fn read_view(reader: &mut Reader<'_>) -> Result<ViewDescriptor, DecodeError> {
    let offset = reader.position();
    let code = reader.i32("view kind")?;
    let kind = ViewKind::from_code(code).ok_or(DecodeError::UnknownViewKind { code, offset })?;

    let view = match kind {
        ViewKind::Perspective3d => ViewDescriptor::Perspective3d,
        ViewKind::Orthogonal3d => ViewDescriptor::Orthogonal3d {
            plane: reader.i32("plane index")?,
        },
        ViewKind::PointChart => ViewDescriptor::PointChart {
            components: ComponentFlags {
                x: reader.flag("show x")?,
                y: reader.flag("show y")?,
                z: reader.flag("show z")?,
            },
        },
        ViewKind::AnalogChart => ViewDescriptor::AnalogChart {
            mode: reader.i32("analog mode")?,
        },
        ViewKind::Log => ViewDescriptor::Log,
    };
    Ok(view)
}

struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn flag(&mut self, value: bool) {
        self.i32(i32::from(value));
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take4(&mut self, field: &'static str) -> Result<[u8; 4], DecodeError> {
        let available = self.remaining();
        if available < 4 {
            return Err(DecodeError::TruncatedStream {
                field,
                offset: self.pos,
                needed: 4,
                available,
            });
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(word)
    }

    fn i32(&mut self, field: &'static str) -> Result<i32, DecodeError> {
        self.take4(field).map(i32::from_be_bytes)
    }

    fn f32(&mut self, field: &'static str) -> Result<f32, DecodeError> {
        self.take4(field).map(f32::from_be_bytes)
    }

    // Any non-zero value is set. Older writers stored a tri-state check value.
    fn flag(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        self.i32(field).map(|value| value != 0)
    }
}
