//! Read-only summaries of mounted stores, printed by the CLI as text or JSON.

use crate::core::cursor::SectionState;
use crate::core::registry::{Domain, WizardRegistry};
use crate::domain::tree::NodeKind;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainReport {
    pub domain: Domain,
    pub steps: u32,
    pub cursor: i64,
    pub active_section: Option<i64>,
    pub sections: Vec<SectionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub index: i64,
    pub label: String,
    pub state: SectionState,
}

/// Node counts of the loaded part of a tree. `services` is set for Equipment only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeReport {
    pub loaded: bool,
    pub nodes: BTreeMap<NodeKind, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<usize>,
}

/// Layout sections are named after the hierarchy level they edit.
pub fn section_label(domain: Domain, index: i64) -> String {
    match domain {
        Domain::Layout => usize::try_from(index - 1)
            .ok()
            .and_then(|i| NodeKind::ALL.get(i))
            .map(|kind| kind.label().to_string())
            .unwrap_or_else(|| format!("Section {}", index)),
        _ => format!("Section {}", index),
    }
}

pub fn build_report(registry: &WizardRegistry, domain: Domain) -> Result<DomainReport> {
    let cursor = registry.cursor(domain)?;
    let sections = cursor
        .sections()
        .map(|(index, state)| SectionReport {
            index,
            label: section_label(domain, index),
            state,
        })
        .collect();

    let tree = match domain {
        Domain::Layout => {
            let snapshot = registry.layout()?.get();
            Some(TreeReport {
                loaded: snapshot.data.areas.is_loaded(),
                nodes: snapshot.data.count_loaded(),
                services: None,
            })
        }
        Domain::Equipment => {
            let snapshot = registry.equipment()?.get();
            Some(TreeReport {
                loaded: snapshot.data.tree.areas.is_loaded(),
                nodes: snapshot.data.tree.count_loaded(),
                services: snapshot.data.services.as_loaded().map(<[_]>::len),
            })
        }
        Domain::Material | Domain::Users => None,
    };

    Ok(DomainReport {
        domain,
        steps: cursor.steps(),
        cursor: cursor.current(),
        active_section: cursor.active_section(),
        sections,
        tree,
    })
}

pub fn render_text(title: &str, reports: &[DomainReport]) -> String {
    let mut lines = vec![title.to_string()];
    for report in reports {
        lines.push(String::new());
        lines.push(format!(
            "== {} ({} steps, cursor {})",
            report.domain, report.steps, report.cursor
        ));
        for section in &report.sections {
            let marker = match section.state {
                SectionState::Expanded => "[v]",
                SectionState::Collapsed => "[>]",
            };
            lines.push(format!("  {} {}. {}", marker, section.index, section.label));
        }
        if report.active_section.is_none() {
            lines.push("  (no section expanded)".to_string());
        }
        if let Some(tree) = &report.tree {
            if tree.loaded {
                let counts: Vec<String> = tree
                    .nodes
                    .iter()
                    .map(|(kind, count)| format!("{} {}", count, kind))
                    .collect();
                lines.push(format!("  tree: {}", counts.join(", ")));
            } else {
                lines.push("  tree: not loaded".to_string());
            }
            if let Some(services) = tree.services {
                lines.push(format!("  services: {}", services));
            }
        }
    }
    lines.join("\n")
}
