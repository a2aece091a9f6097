//! Pane layout trees for split-pane viewers and the binary blob they are
//! persisted in.
//!
//! A [`LayoutNode`] is either a two-way [`Split`] or a single view. Trees
//! are captured from a live pane host through [`PaneSource`], stored with
//! [`encode`], read back with [`decode`], and replayed into a host through
//! [`PaneSink`] as a list of [`Instruction`]s.

pub mod capture;
pub mod codec;
pub mod error;
pub mod message;
pub mod node;
pub mod preset;
pub mod rebuild;
pub mod view;

pub use capture::{capture, measure_ratio, PaneProbe, PaneSource};
pub use codec::{decode, encode, MAGIC, MAX_DEPTH, VERSION};
pub use error::{CaptureError, DecodeError, PanePath, RatioError, RestoreError};
pub use message::{LayoutMessage, LayoutResult};
pub use node::{LayoutNode, Orientation, Ratio, Split};
pub use preset::Preset;
pub use rebuild::{partition, rebuild, rebuild_from_bytes, Instruction, PaneSink, Size};
pub use view::{ComponentFlags, ViewDescriptor, ViewKind};
