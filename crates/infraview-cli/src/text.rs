use infraview_app::{Renderer, TopologyFrame, TreeFrame};
use infraview_core::NodeId;
use infraview_graph::TopologyKind;
use infraview_tree::RowKind;
use std::fmt::Write;

/// Plain-text back-end: an indented row list and a tier-by-tier topology dump.
#[derive(Debug, Default)]
pub struct TextRenderer {
    pub tree: String,
    pub topology: String,
}

fn status_marker(status: Option<infraview_core::Status>) -> &'static str {
    match status {
        Some(infraview_core::Status::Healthy) => "[ok]",
        Some(infraview_core::Status::Warning) => "[warn]",
        Some(infraview_core::Status::Error) => "[err]",
        None => "",
    }
}

impl Renderer for TextRenderer {
    fn render_tree(&mut self, frame: &TreeFrame<'_>) {
        self.tree.clear();
        for &index in &frame.sticky {
            if index < frame.window.start {
                let _ = writeln!(self.tree, "^ row {index} pinned");
            }
        }
        for (offset, row) in frame.rows.iter().enumerate() {
            let absolute = frame.window.start + offset;
            let cursor = if frame.is_selected(absolute) { ">" } else { " " };
            let toggle = match (&row.kind, row.has_children, row.is_expanded) {
                (RowKind::Node, true, true) => "v ",
                (RowKind::Node, true, false) => "> ",
                (RowKind::Node, false, _) => "  ",
                _ => "+ ",
            };
            let _ = writeln!(
                self.tree,
                "{cursor}{:>6} {}{}{} {}",
                absolute,
                "  ".repeat(row.level),
                toggle,
                row.label,
                status_marker(row.status)
            );
        }
        let _ = writeln!(
            self.tree,
            "-- rows {}..{} of {} --",
            frame.window.start, frame.window.end, frame.total_rows
        );
    }

    fn render_topology(&mut self, frame: &TopologyFrame<'_>) {
        self.topology.clear();
        let topology = frame.topology;
        for node in &topology.nodes {
            let indent = match node.kind {
                TopologyKind::Root => "",
                TopologyKind::ServerPool => "  ",
                TopologyKind::Server => "    ",
            };
            let mark = if frame.highlighted == Some(&node.id) { "*" } else { " " };
            let _ = write!(
                self.topology,
                "{mark}{indent}{} ({}) @ {:.0},{:.0}",
                node.label, node.id, node.position.x, node.position.y
            );
            if let Some(counts) = node.status_counts {
                let _ = write!(
                    self.topology,
                    " healthy={} warning={} error={}",
                    counts.healthy, counts.warning, counts.error
                );
            }
            let _ = writeln!(self.topology, " {}", status_marker(node.status));
        }
        for node in frame.sketch.nodes() {
            let _ = writeln!(self.topology, "~ {} ({})", node.label, node.id);
        }
        let _ = writeln!(
            self.topology,
            "-- {} nodes, {} edges --",
            topology.nodes.len(),
            topology.edges.len()
        );
    }

    fn reset_topology(&mut self, env_id: Option<&NodeId>) {
        tracing::debug!("Resetting topology view for {:?}", env_id);
        self.topology.clear();
    }
}
