//! Rendering of target descriptors to Starlark text.
//!
//! Mechanical formatting only; all policy lives in [`crate::targets`]. The
//! document opens with the fixed preamble from [`templates`], continues
//! with one stanza per target in input order, and optionally ends with a
//! user-supplied fragment appended verbatim.

pub mod templates;

use std::fmt::Write;

use crate::targets::{ExecutableWrapper, FileGroup, FileGroupInputs, Target};

/// Renders the complete build-file document.
///
/// `extra` is the optional user override fragment; when present it is
/// concatenated unmodified after the generated targets.
pub fn render(targets: &[Target], extra: Option<&str>) -> String {
    let mut out = String::from(templates::BUILD_FILE_HEADER);

    for target in targets {
        out.push('\n');
        match target {
            Target::FileGroup(group) => render_file_group(&mut out, group),
            Target::ExecutableWrapper(wrapper) => render_wrapper(&mut out, wrapper),
        }
    }

    if let Some(extra) = extra {
        out.push('\n');
        out.push_str(extra);
        if !extra.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

fn render_file_group(out: &mut String, group: &FileGroup) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "filegroup(");
    let _ = writeln!(out, "    name = \"{}\",", group.name);

    match &group.inputs {
        FileGroupInputs::Targets(labels) => {
            render_string_list(out, "srcs", labels, 1);
        }
        FileGroupInputs::Glob { include, exclude } => {
            let _ = writeln!(out, "    srcs = glob(");
            render_string_list(out, "include", include, 2);
            render_string_list(out, "exclude", exclude, 2);
            let _ = writeln!(out, "    ),");
        }
    }

    render_string_list(out, "tags", &group.tags, 1);
    let _ = writeln!(out, ")");
}

fn render_wrapper(out: &mut String, wrapper: &ExecutableWrapper) {
    let _ = writeln!(out, "nodejs_binary(");
    let _ = writeln!(out, "    name = \"{}\",", wrapper.name);
    let _ = writeln!(out, "    entry_point = \"{}\",", wrapper.entry_point);
    let _ = writeln!(out, "    data = [\"{}\"],", wrapper.data);
    let _ = writeln!(out, ")");
}

/// Writes `key = [...]` at the given indent level, one element per line.
/// Empty lists render as `[]` on a single line.
fn render_string_list(out: &mut String, key: &str, values: &[String], level: usize) {
    let pad = "    ".repeat(level);
    if values.is_empty() {
        let _ = writeln!(out, "{pad}{key} = [],");
        return;
    }

    let _ = writeln!(out, "{pad}{key} = [");
    for value in values {
        let _ = writeln!(out, "{pad}    \"{value}\",");
    }
    let _ = writeln!(out, "{pad}],");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> Target {
        Target::FileGroup(FileGroup {
            name: "left".to_string(),
            inputs: FileGroupInputs::Targets(vec![
                ":left__files".to_string(),
                ":right__files".to_string(),
            ]),
            tags: vec!["node_module".to_string()],
        })
    }

    #[test]
    fn test_header_only_when_no_targets() {
        let doc = render(&[], None);
        assert_eq!(doc, templates::BUILD_FILE_HEADER);
    }

    #[test]
    fn test_renders_target_list_group() {
        let doc = render(&[sample_group()], None);
        assert!(doc.contains(
            "filegroup(\n    name = \"left\",\n    srcs = [\n        \":left__files\",\n        \":right__files\",\n    ],\n    tags = [\n        \"node_module\",\n    ],\n)\n"
        ));
    }

    #[test]
    fn test_renders_glob_group() {
        let target = Target::FileGroup(FileGroup {
            name: "left__files".to_string(),
            inputs: FileGroupInputs::Glob {
                include: vec!["left/**/*".to_string()],
                exclude: vec!["left/test/**".to_string()],
            },
            tags: vec![],
        });
        let doc = render(&[target], None);
        assert!(doc.contains("srcs = glob("));
        assert!(doc.contains("include = [\n            \"left/**/*\",\n        ],"));
        assert!(doc.contains("exclude = [\n            \"left/test/**\",\n        ],"));
        assert!(doc.contains("tags = [],"));
    }

    #[test]
    fn test_renders_wrapper() {
        let target = Target::ExecutableWrapper(ExecutableWrapper {
            name: "cli/cli".to_string(),
            entry_point: "cli/bin/run.js".to_string(),
            data: ":cli".to_string(),
        });
        let doc = render(&[target], None);
        assert!(doc.contains(
            "nodejs_binary(\n    name = \"cli/cli\",\n    entry_point = \"cli/bin/run.js\",\n    data = [\":cli\"],\n)\n"
        ));
    }

    #[test]
    fn test_extra_fragment_appended_verbatim() {
        let extra = "# hand-written overrides\nfilegroup(name = \"extra\", srcs = [])";
        let doc = render(&[sample_group()], Some(extra));
        assert!(doc.ends_with(
            "# hand-written overrides\nfilegroup(name = \"extra\", srcs = [])\n"
        ));
    }
}
