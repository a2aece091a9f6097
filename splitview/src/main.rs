mod config;
mod host;
mod service;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use argh::FromArgs;
use splitview_layout::{decode, encode, rebuild, LayoutNode, Orientation, Preset, Size};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::host::PaneHost;

#[derive(FromArgs)]
/// Save, inspect and restore split-pane viewer layouts.
struct Args {
    /// config file (default: ~/.config/splitview/config.json)
    #[argh(option)]
    config: Option<PathBuf>,

    #[argh(subcommand)]
    command: SubCommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Preset(PresetCmd),
    Inspect(InspectCmd),
    Encode(EncodeCmd),
    Rebuild(RebuildCmd),
    Restore(RestoreCmd),
    Split(SplitCmd),
    Serve(ServeCmd),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "preset")]
/// Write a named layout (3d, 3d-log, 3d-charts) as a blob.
struct PresetCmd {
    /// preset name
    #[argh(positional)]
    name: Preset,

    /// output file (default: the configured state file)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "inspect")]
/// Decode a layout blob and print it as JSON.
struct InspectCmd {
    /// layout blob (default: the configured state file)
    #[argh(positional)]
    file: Option<PathBuf>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
/// Encode a JSON layout tree into a blob.
struct EncodeCmd {
    /// JSON file holding the layout tree
    #[argh(positional)]
    tree: PathBuf,

    /// output file (default: the configured state file)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "rebuild")]
/// Print the instructions that rebuild a layout at a given size.
struct RebuildCmd {
    /// layout blob (default: the configured state file)
    #[argh(positional)]
    file: Option<PathBuf>,

    /// width of the pane area
    #[argh(option)]
    width: Option<u32>,

    /// height of the pane area
    #[argh(option)]
    height: Option<u32>,

    /// divider thickness between panes
    #[argh(option)]
    divider: Option<u32>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "restore")]
/// Restore a layout into a pane tree and print the panes.
struct RestoreCmd {
    /// layout blob (default: the configured state file)
    #[argh(positional)]
    file: Option<PathBuf>,

    /// resize the restored panes to this width
    #[argh(option)]
    width: Option<u32>,

    /// resize the restored panes to this height
    #[argh(option)]
    height: Option<u32>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "split")]
/// Split one pane of a saved layout in two and save the result.
struct SplitCmd {
    /// id of the pane to split, as printed by `restore`
    #[argh(positional)]
    pane: u32,

    /// stack the two halves instead of placing them side by side
    #[argh(switch)]
    vertical: bool,

    /// layout blob (default: the configured state file)
    #[argh(option, short = 'f')]
    file: Option<PathBuf>,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
/// Answer JSON layout requests on stdin, one per line.
struct ServeCmd {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();
    let config = Config::load(args.config.as_deref())?;

    match args.command {
        SubCommand::Preset(cmd) => {
            let path = cmd.output.unwrap_or_else(|| config.state_file.clone());
            write_blob(&path, &encode(&cmd.name.build()))?;
            tracing::info!("Wrote preset {} to {}", cmd.name, path.display());
        }
        SubCommand::Inspect(cmd) => {
            let path = cmd.file.unwrap_or_else(|| config.state_file.clone());
            let tree = read_tree(&path)?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        SubCommand::Encode(cmd) => {
            let text = fs::read_to_string(&cmd.tree)
                .with_context(|| format!("Failed to read {}", cmd.tree.display()))?;
            let tree: LayoutNode = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse layout tree {}", cmd.tree.display()))?;
            let path = cmd.output.unwrap_or_else(|| config.state_file.clone());
            write_blob(&path, &encode(&tree))?;
            tracing::info!("Encoded {} views to {}", tree.view_count(), path.display());
        }
        SubCommand::Rebuild(cmd) => {
            let path = cmd.file.unwrap_or_else(|| config.state_file.clone());
            let tree = read_tree(&path)?;
            let size = Size::new(
                cmd.width.unwrap_or(config.width),
                cmd.height.unwrap_or(config.height),
            );
            let divider = cmd.divider.unwrap_or(config.divider);

            let mut stdout = io::stdout().lock();
            for instruction in rebuild(&tree, size, divider) {
                serde_json::to_writer(&mut stdout, &instruction)?;
                writeln!(stdout)?;
            }
        }
        SubCommand::Restore(cmd) => {
            let path = cmd.file.unwrap_or_else(|| config.state_file.clone());
            let mut host = PaneHost::new(config.surface(), config.divider);
            match fs::read(&path) {
                Ok(bytes) => {
                    // A bad blob leaves the host on its default layout.
                    if let Err(err) = host.restore(&bytes) {
                        tracing::warn!("Using default layout: {}", err);
                    }
                }
                Err(err) => {
                    tracing::warn!("No saved layout at {}: {}", path.display(), err);
                    host.apply_preset(Preset::default())?;
                }
            }
            if cmd.width.is_some() || cmd.height.is_some() {
                let current = host.size();
                host.resize(Size::new(
                    cmd.width.unwrap_or(current.width),
                    cmd.height.unwrap_or(current.height),
                ));
            }
            let size = host.size();
            println!("{} panes in {}x{}", host.pane_count(), size.width, size.height);
            for line in host.outline() {
                println!("{}", line);
            }
        }
        SubCommand::Split(cmd) => {
            let path = cmd.file.unwrap_or_else(|| config.state_file.clone());
            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            let mut host = PaneHost::new(config.surface(), config.divider);
            host.restore(&bytes)
                .with_context(|| format!("Failed to restore {}", path.display()))?;

            let orientation = if cmd.vertical {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            host.split(cmd.pane, orientation)?;
            let bytes = host.save().context("Failed to capture layout")?;
            write_blob(&path, &bytes)?;
            for line in host.outline() {
                println!("{}", line);
            }
        }
        SubCommand::Serve(ServeCmd {}) => {
            tracing::info!("splitview layout service starting");
            service::run(io::stdin().lock(), io::stdout())?;
        }
    }

    Ok(())
}

fn read_tree(path: &Path) -> Result<LayoutNode> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tree =
        decode(&bytes).with_context(|| format!("Failed to decode layout {}", path.display()))?;
    Ok(tree)
}

fn write_blob(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
