use crate::output::{OutputStyle, Tone, paint, tree_glyphs};
use crate::{LsArgs, OutputFormat};
use anyhow::Context;
use koma_kmt::fixtures::load_container;
use koma_kmt::vfs::VfsResult;
use koma_kmt::{EntryKind, MemoryVfs, Vfs};
use serde::Serialize;

#[derive(Serialize)]
struct Node {
    path: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

/// Restore a container and list the tree under a path
pub fn handle(args: &LsArgs, format: OutputFormat, style: &OutputStyle) -> anyhow::Result<String> {
    let vfs = load_container(&args.file)
        .and_then(|container| container.restore(&args.restore.options()))
        .with_context(|| format!("failed to restore {}", args.file.display()))?;

    if format == OutputFormat::Text {
        Ok(render_tree(&vfs, &args.path, style)?)
    } else {
        Ok(format.to_json(&collect_nodes(&vfs, &args.path)?)?)
    }
}

/// Render `path` and everything below it as an indented tree
pub fn render_tree(vfs: &MemoryVfs, path: &str, style: &OutputStyle) -> VfsResult<String> {
    let meta = vfs.stat(path)?;
    let mut out = if meta.is_dir() {
        paint(path, Tone::Directory, style)
    } else {
        format!("{path} ({})", meta.size)
    };
    if meta.is_dir() {
        render_children(vfs, path, "", style, &mut out)?;
    }
    Ok(out)
}

fn render_children(
    vfs: &MemoryVfs,
    dir: &str,
    prefix: &str,
    style: &OutputStyle,
    out: &mut String,
) -> VfsResult<()> {
    let (branch, last_branch, continuation, blank) = tree_glyphs(style);
    let children = vfs.list(dir)?;
    let count = children.len();

    for (idx, child) in children.into_iter().enumerate() {
        let last = idx + 1 == count;
        let child_path = join(dir, &child.name);
        out.push('\n');
        out.push_str(prefix);
        out.push_str(if last { last_branch } else { branch });

        match child.kind {
            EntryKind::Directory => {
                out.push_str(&paint(&format!("{}/", child.name), Tone::Directory, style));
                let nested = format!("{prefix}{}", if last { blank } else { continuation });
                render_children(vfs, &child_path, &nested, style, out)?;
            }
            EntryKind::File => {
                let size = vfs.stat(&child_path)?.size;
                out.push_str(&format!("{} ({size})", child.name));
            }
        }
    }
    Ok(())
}

fn collect_nodes(vfs: &MemoryVfs, path: &str) -> VfsResult<Vec<Node>> {
    let meta = vfs.stat(path)?;
    let prefix = if path == "/" {
        "/".to_string()
    } else {
        format!("{path}/")
    };

    let mut nodes = vec![Node {
        path: path.to_string(),
        kind: meta.kind,
        size: meta.is_file().then_some(meta.size),
    }];
    if meta.is_dir() {
        nodes.extend(
            vfs.snapshot()
                .into_iter()
                .filter(|entry| entry.path.starts_with(&prefix))
                .map(|entry| Node {
                    kind: entry.kind(),
                    size: entry.size(),
                    path: entry.path,
                }),
        );
    }
    Ok(nodes)
}

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}
