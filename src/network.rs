// network.rs
use anyhow::{anyhow, Result};
use indexmap::{IndexMap, IndexSet};
use log::{debug, info};

use crate::models::{Link, NetworkGraph, Participant, ParticipantRow};

/// Every link carries the same weight, one link per shared space.
pub const LINK_VALUE: u32 = 1;

/// Groups distinct participant names by space, regardless of role.
/// Spaces and members keep the order they were first seen in.
pub fn space_memberships(rows: &[ParticipantRow]) -> IndexMap<String, IndexSet<String>> {
    let mut space_participants: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for row in rows {
        space_participants
            .entry(row.space_url.clone())
            .or_default()
            .insert(row.name.clone());
    }
    debug!("Found {} distinct spaces", space_participants.len());
    space_participants
}

/// Emits one link per unordered pair of members in each space.
pub fn build_links(
    space_participants: &IndexMap<String, IndexSet<String>>,
    name_to_id: &IndexMap<String, String>,
) -> Result<Vec<Link>> {
    let mut links = Vec::new();

    for (space, participants) in space_participants {
        let ids = participants
            .iter()
            .map(|name| {
                name_to_id
                    .get(name)
                    .cloned()
                    .ok_or_else(|| anyhow!("Participant '{}' in space {} has no assigned id", name, space))
            })
            .collect::<Result<Vec<String>>>()?;

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                links.push(Link {
                    source: ids[i].clone(),
                    target: ids[j].clone(),
                    value: LINK_VALUE,
                });
            }
        }
    }

    Ok(links)
}

/// Builds the co-participation graph over the already numbered participants.
pub fn build_network(
    participants: &[Participant],
    rows: &[ParticipantRow],
    name_to_id: &IndexMap<String, String>,
) -> Result<NetworkGraph> {
    info!("Building network data...");
    let space_participants = space_memberships(rows);
    let links = build_links(&space_participants, name_to_id)?;

    let network = NetworkGraph {
        nodes: participants.to_vec(),
        links,
    };
    info!(
        "Processed {} nodes and {} links",
        network.nodes.len(),
        network.links.len()
    );
    Ok(network)
}
