use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::node::{LayoutNode, Orientation, Ratio};
use crate::view::{ComponentFlags, ViewDescriptor};

pub fn single_perspective_3d() -> LayoutNode {
    LayoutNode::view(ViewDescriptor::Perspective3d)
}

/// 3D perspective view above a log pane, 80/20.
pub fn perspective_3d_with_log() -> LayoutNode {
    LayoutNode::split(
        Orientation::Vertical,
        Ratio::from_percent(80),
        LayoutNode::view(ViewDescriptor::Perspective3d),
        LayoutNode::view(ViewDescriptor::Log),
    )
}

/// 3D perspective view beside a point chart stacked over an analog chart.
pub fn perspective_3d_with_charts() -> LayoutNode {
    perspective_3d_with_charts_showing(ComponentFlags::ALL)
}

pub fn perspective_3d_with_charts_showing(components: ComponentFlags) -> LayoutNode {
    LayoutNode::split(
        Orientation::Horizontal,
        Ratio::HALF,
        LayoutNode::view(ViewDescriptor::Perspective3d),
        LayoutNode::split(
            Orientation::Vertical,
            Ratio::HALF,
            LayoutNode::view(ViewDescriptor::PointChart { components }),
            LayoutNode::view(ViewDescriptor::AnalogChart { mode: 0 }),
        ),
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    #[default]
    #[serde(rename = "3d")]
    Perspective3d,
    #[serde(rename = "3d-log")]
    Perspective3dWithLog,
    #[serde(rename = "3d-charts")]
    Perspective3dWithCharts,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::Perspective3d,
        Preset::Perspective3dWithLog,
        Preset::Perspective3dWithCharts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Perspective3d => "3d",
            Self::Perspective3dWithLog => "3d-log",
            Self::Perspective3dWithCharts => "3d-charts",
        }
    }

    pub fn build(self) -> LayoutNode {
        match self {
            Self::Perspective3d => single_perspective_3d(),
            Self::Perspective3dWithLog => perspective_3d_with_log(),
            Self::Perspective3dWithCharts => perspective_3d_with_charts(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset: {} (use one of {})", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "4d".parse::<Preset>().unwrap_err();
        assert_eq!(err, "unknown preset: 4d (use one of 3d, 3d-log, 3d-charts)");
    }

    #[test]
    fn test_default_is_single_view() {
        assert_eq!(Preset::default().build(), single_perspective_3d());
    }

    #[test]
    fn test_chart_components() {
        let tree = perspective_3d_with_charts_showing(ComponentFlags {
            x: true,
            y: false,
            z: false,
        });
        let views: Vec<_> = tree.views().copied().collect();
        assert_eq!(
            views[1],
            ViewDescriptor::PointChart {
                components: ComponentFlags {
                    x: true,
                    y: false,
                    z: false,
                }
            }
        );
        assert_eq!(views.len(), 3);
    }
}
