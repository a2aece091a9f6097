use serde::{Deserialize, Serialize};

use crate::node::LayoutNode;
use crate::preset::Preset;
use crate::rebuild::Instruction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutMessage {
    Preset {
        name: Preset,
    },
    Encode {
        tree: LayoutNode,
    },
    Decode {
        bytes: Vec<u8>,
    },
    Rebuild {
        bytes: Vec<u8>,
        width: u32,
        height: u32,
        #[serde(default)]
        divider: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutResult {
    Blob { bytes: Vec<u8> },
    Tree { tree: LayoutNode },
    Instructions { instructions: Vec<Instruction> },
    Error { message: String },
}

impl LayoutResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset_request() {
        let msg: LayoutMessage =
            serde_json::from_str(r#"{"type":"preset","name":"3d-log"}"#).unwrap();
        assert_eq!(
            msg,
            LayoutMessage::Preset {
                name: Preset::Perspective3dWithLog
            }
        );
    }

    #[test]
    fn test_rebuild_divider_defaults_to_zero() {
        let json = r#"{"type":"rebuild","bytes":[0,0,10,188],"width":10,"height":20}"#;
        let msg: LayoutMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            LayoutMessage::Rebuild {
                bytes: vec![0, 0, 10, 188],
                width: 10,
                height: 20,
                divider: 0,
            }
        );
    }

    #[test]
    fn test_error_result_json() {
        let json = serde_json::to_string(&LayoutResult::error("boom")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"boom"}"#);
    }
}
