use serde::{Deserialize, Serialize};

use crate::error::RatioError;
use crate::view::ViewDescriptor;

/// Horizontal places the children side by side, Vertical stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn code(self) -> i32 {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Horizontal),
            1 => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Fraction of a split's available extent given to its first child.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Ratio(f32);

impl Ratio {
    pub const HALF: Ratio = Ratio(0.5);

    pub fn new(value: f32) -> Result<Self, RatioError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatioError(value))
        }
    }

    /// Clamp into `[0, 1]`. NaN becomes one half.
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            return Self::HALF;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn from_percent(percent: u8) -> Self {
        Self(f32::from(percent.min(100)) / 100.0)
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::HALF
    }
}

impl TryFrom<f32> for Ratio {
    type Error = RatioError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ratio> for f32 {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub orientation: Orientation,
    pub ratio: Ratio,
    pub first: Box<LayoutNode>,
    pub second: Box<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutNode {
    Split(Split),
    View { view: ViewDescriptor },
}

impl LayoutNode {
    pub fn view(view: ViewDescriptor) -> Self {
        Self::View { view }
    }

    pub fn split(
        orientation: Orientation,
        ratio: Ratio,
        first: LayoutNode,
        second: LayoutNode,
    ) -> Self {
        Self::Split(Split {
            orientation,
            ratio,
            first: Box::new(first),
            second: Box::new(second),
        })
    }

    pub fn view_count(&self) -> usize {
        self.views().count()
    }

    /// Number of nested splits on the deepest path; a single view is 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Split(split) => 1 + split.first.depth().max(split.second.depth()),
            Self::View { .. } => 0,
        }
    }

    pub fn views(&self) -> Views<'_> {
        Views { stack: vec![self] }
    }
}

impl Default for LayoutNode {
    fn default() -> Self {
        Self::view(ViewDescriptor::default())
    }
}

pub struct Views<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for Views<'a> {
    type Item = &'a ViewDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                LayoutNode::Split(split) => {
                    self.stack.push(&split.second);
                    self.stack.push(&split.first);
                }
                LayoutNode::View { view } => return Some(view),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ComponentFlags;

    fn sample() -> LayoutNode {
        LayoutNode::split(
            Orientation::Horizontal,
            Ratio::HALF,
            LayoutNode::view(ViewDescriptor::Perspective3d),
            LayoutNode::split(
                Orientation::Vertical,
                Ratio::from_percent(30),
                LayoutNode::view(ViewDescriptor::PointChart {
                    components: ComponentFlags::ALL,
                }),
                LayoutNode::view(ViewDescriptor::Log),
            ),
        )
    }

    #[test]
    fn test_ratio_validation() {
        assert!(Ratio::new(0.0).is_ok());
        assert!(Ratio::new(1.0).is_ok());
        assert!(Ratio::new(-0.1).is_err());
        assert!(Ratio::new(1.5).is_err());
        assert!(Ratio::new(f32::NAN).is_err());
        assert!(Ratio::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_ratio_clamped() {
        assert_eq!(Ratio::clamped(2.0).get(), 1.0);
        assert_eq!(Ratio::clamped(-3.0).get(), 0.0);
        assert_eq!(Ratio::clamped(f32::NAN), Ratio::HALF);
    }

    #[test]
    fn test_ratio_from_percent_matches_literal() {
        assert_eq!(Ratio::from_percent(80).get(), 0.8f32);
        assert_eq!(Ratio::from_percent(50), Ratio::HALF);
        assert_eq!(Ratio::from_percent(250).get(), 1.0);
    }

    #[test]
    fn test_views_in_document_order() {
        let kinds: Vec<_> = sample().views().map(|v| v.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                crate::ViewKind::Perspective3d,
                crate::ViewKind::PointChart,
                crate::ViewKind::Log,
            ]
        );
    }

    #[test]
    fn test_depth_and_count() {
        let tree = sample();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.view_count(), 3);
        assert_eq!(LayoutNode::default().depth(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let tree = sample();
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: LayoutNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_json_rejects_bad_ratio() {
        let json = r#"{"type":"split","orientation":"vertical","ratio":1.5,
            "first":{"type":"view","view":{"kind":"log"}},
            "second":{"type":"view","view":{"kind":"log"}}}"#;
        assert!(serde_json::from_str::<LayoutNode>(json).is_err());
    }
}
