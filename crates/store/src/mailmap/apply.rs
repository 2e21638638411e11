use std::collections::HashMap;

use crate::identity::models::Identity;

use super::models::Mailmap;

/// Rewrite identities to their mapped canonical form, merging any that
/// collapse onto the same (name, email). Commits are summed; first-seen
/// order is kept.
pub fn apply_mailmap(identities: &[Identity], mailmap: &Mailmap) -> Vec<Identity> {
    let mut merged: Vec<Identity> = Vec::with_capacity(identities.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut rewritten = 0usize;

    for identity in identities {
        let mapped = match mailmap.resolve(&identity.name, &identity.email) {
            Some(entry) => {
                rewritten += 1;
                Identity {
                    name: if entry.canonical_name.is_empty() {
                        identity.name.clone()
                    } else {
                        entry.canonical_name.clone()
                    },
                    email: entry.canonical_email.clone(),
                    commits: identity.commits,
                }
            }
            None => identity.clone(),
        };

        match positions.get(&mapped.mailmap_key()) {
            Some(&pos) => {
                merged[pos].commits = merged[pos].commits.saturating_add(mapped.commits)
            }
            None => {
                positions.insert(mapped.mailmap_key(), merged.len());
                merged.push(mapped);
            }
        }
    }

    tracing::debug!(
        input = identities.len(),
        rewritten,
        output = merged.len(),
        "applied mailmap"
    );
    merged
}
