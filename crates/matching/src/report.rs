//! Rendering clusters as mailmap text and a human-readable summary.

use std::fmt::Write;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::IdentityCluster;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailmapOptions {
    /// Prepend a `#` header naming the tool and generation time.
    pub comments: bool,
}

impl Default for MailmapOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

/// One `Canonical <email> Alias <email>` line per alias, clusters in order.
/// An empty cluster list renders as an empty string.
///
/// `<`, `>` and `#` are dropped from canonical names. An alias whose name
/// would not read back unchanged is written by email alone.
pub fn generate_mailmap(clusters: &[IdentityCluster], options: &MailmapOptions) -> String {
    let mut out = String::new();
    if clusters.is_empty() {
        return out;
    }

    if options.comments {
        let aliases: usize = clusters.iter().map(|c| c.aliases.len()).sum();
        let _ = writeln!(out, "# Generated by authormap {}", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(
            out,
            "# {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(
            out,
            "# {} identities consolidated into {} people",
            aliases + clusters.len(),
            clusters.len()
        );
        out.push('\n');
    }

    for cluster in clusters {
        let canonical = canonical_prefix(&cluster.canonical.name, &cluster.canonical.email);
        for alias in &cluster.aliases {
            if alias_name_round_trips(&alias.name) {
                let _ = writeln!(out, "{canonical} {} <{}>", alias.name, alias.email);
            } else {
                let _ = writeln!(out, "{canonical} <{}>", alias.email);
            }
        }
    }
    out
}

/// The parser trims names and splits on `<`, so only names it would read back
/// unchanged can key a mailmap line.
fn alias_name_round_trips(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.contains(['<', '>'])
}

fn canonical_prefix(name: &str, email: &str) -> String {
    let cleaned: String = name.chars().filter(|c| !matches!(c, '<' | '>' | '#')).collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        format!("<{email}>")
    } else {
        format!("{cleaned} <{email}>")
    }
}

/// Block per cluster: the canonical identity, a `←` line per alias, then the
/// cluster total. Blocks are separated by a blank line.
pub fn format_mapping_summary(clusters: &[IdentityCluster]) -> String {
    let blocks: Vec<String> = clusters
        .iter()
        .map(|cluster| {
            let mut block = format!(
                "{} ({})\n",
                cluster.canonical,
                commits_label(cluster.canonical.commits)
            );
            for alias in &cluster.aliases {
                let _ = writeln!(block, "  ← {} ({})", alias, commits_label(alias.commits));
            }
            let _ = writeln!(block, "  Total: {}", commits_label(cluster.total_commits()));
            block
        })
        .collect();
    blocks.join("\n")
}

fn commits_label(n: u64) -> String {
    if n == 1 {
        "1 commit".to_string()
    } else {
        format!("{n} commits")
    }
}
