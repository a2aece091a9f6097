use serde::{Deserialize, Serialize};

/// Registered view types. The discriminants are the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum ViewKind {
    Perspective3d = 1,
    Orthogonal3d = 2,
    PointChart = 4,
    AnalogChart = 5,
    Log = 7,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Perspective3d,
        ViewKind::Orthogonal3d,
        ViewKind::PointChart,
        ViewKind::AnalogChart,
        ViewKind::Log,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Perspective3d),
            2 => Some(Self::Orthogonal3d),
            4 => Some(Self::PointChart),
            5 => Some(Self::AnalogChart),
            7 => Some(Self::Log),
            _ => None,
        }
    }

    /// Number of int32 option fields that follow the kind on the wire.
    ///
    /// Any change here changes the stream format and needs a version bump.
    pub fn option_fields(self) -> usize {
        match self {
            Self::Perspective3d | Self::Log => 0,
            Self::Orthogonal3d | Self::AnalogChart => 1,
            Self::PointChart => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Perspective3d => "3D perspective",
            Self::Orthogonal3d => "3D orthogonal",
            Self::PointChart => "point chart",
            Self::AnalogChart => "analog chart",
            Self::Log => "log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentFlags {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl ComponentFlags {
    pub const ALL: ComponentFlags = ComponentFlags {
        x: true,
        y: true,
        z: true,
    };
}

impl Default for ComponentFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// Each variant carries exactly the option fields of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewDescriptor {
    Perspective3d,
    Orthogonal3d { plane: i32 },
    PointChart { components: ComponentFlags },
    AnalogChart { mode: i32 },
    Log,
}

impl ViewDescriptor {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Perspective3d => ViewKind::Perspective3d,
            Self::Orthogonal3d { .. } => ViewKind::Orthogonal3d,
            Self::PointChart { .. } => ViewKind::PointChart,
            Self::AnalogChart { .. } => ViewKind::AnalogChart,
            Self::Log => ViewKind::Log,
        }
    }

    pub fn with_defaults(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Perspective3d => Self::Perspective3d,
            ViewKind::Orthogonal3d => Self::Orthogonal3d { plane: 0 },
            ViewKind::PointChart => Self::PointChart {
                components: ComponentFlags::ALL,
            },
            ViewKind::AnalogChart => Self::AnalogChart { mode: 0 },
            ViewKind::Log => Self::Log,
        }
    }
}

impl Default for ViewDescriptor {
    fn default() -> Self {
        Self::Perspective3d
    }
}
