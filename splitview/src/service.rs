use std::io::{BufRead, Write};

use anyhow::Result;
use splitview_layout::{decode, encode, rebuild, LayoutMessage, LayoutResult, Size};

/// Answer one JSON request per input line until the input ends.
pub fn run(input: impl BufRead, mut output: impl Write) -> Result<()> {
    // A line that is not UTF-8 is answered like any other bad request.
    for line in input.split(b'\n') {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let result = match serde_json::from_slice::<LayoutMessage>(&line) {
            Ok(msg) => handle_message(msg),
            Err(err) => {
                tracing::warn!("Invalid request: {}", err);
                LayoutResult::error(format!("invalid request: {}", err))
            }
        };

        serde_json::to_writer(&mut output, &result)?;
        writeln!(output)?;
        output.flush()?;
    }

    tracing::debug!("Input closed, stopping service");
    Ok(())
}

pub fn handle_message(msg: LayoutMessage) -> LayoutResult {
    match msg {
        LayoutMessage::Preset { name } => LayoutResult::Blob {
            bytes: encode(&name.build()),
        },
        LayoutMessage::Encode { tree } => LayoutResult::Blob {
            bytes: encode(&tree),
        },
        LayoutMessage::Decode { bytes } => match decode(&bytes) {
            Ok(tree) => LayoutResult::Tree { tree },
            Err(err) => LayoutResult::error(err.to_string()),
        },
        LayoutMessage::Rebuild {
            bytes,
            width,
            height,
            divider,
        } => match decode(&bytes) {
            Ok(tree) => LayoutResult::Instructions {
                instructions: rebuild(&tree, Size::new(width, height), divider),
            },
            Err(err) => LayoutResult::error(err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitview_layout::{preset, Instruction, Preset, ViewDescriptor};
    use std::io::Cursor;

    fn serve(input: &[u8]) -> Vec<LayoutResult> {
        let mut output = Vec::new();
        run(Cursor::new(input), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_preset_request() {
        let results = serve(b"{\"type\":\"preset\",\"name\":\"3d\"}\n");
        assert_eq!(
            results,
            vec![LayoutResult::Blob {
                bytes: encode(&preset::single_perspective_3d())
            }]
        );
    }

    #[test]
    fn test_decode_request() {
        let bytes = encode(&Preset::Perspective3dWithCharts.build());
        let request = serde_json::to_string(&LayoutMessage::Decode { bytes }).unwrap();
        let results = serve(request.as_bytes());
        assert_eq!(
            results,
            vec![LayoutResult::Tree {
                tree: preset::perspective_3d_with_charts()
            }]
        );
    }

    #[test]
    fn test_rebuild_request() {
        let result = handle_message(LayoutMessage::Rebuild {
            bytes: encode(&preset::single_perspective_3d()),
            width: 300,
            height: 200,
            divider: 0,
        });
        assert_eq!(
            result,
            LayoutResult::Instructions {
                instructions: vec![Instruction::SetView {
                    view: ViewDescriptor::Perspective3d,
                    size: Size::new(300, 200),
                }]
            }
        );
    }

    #[test]
    fn test_decode_error_is_reported() {
        let result = handle_message(LayoutMessage::Decode {
            bytes: vec![0, 0, 0, 1],
        });
        match result {
            LayoutResult::Error { message } => assert!(message.starts_with("not a layout blob")),
            other => panic!("expected an error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_line_does_not_stop_service() {
        let input = b"not json\n\n\xff\xfe\n{\"type\":\"preset\",\"name\":\"3d-log\"}\n";
        let results = serve(input);
        assert_eq!(results.len(), 3);
        assert!(matches!(results[0], LayoutResult::Error { .. }));
        assert!(matches!(results[1], LayoutResult::Error { .. }));
        assert_eq!(
            results[2],
            LayoutResult::Blob {
                bytes: encode(&preset::perspective_3d_with_log())
            }
        );
    }
}
