// summary.rs
use indexmap::IndexMap;
use log::info;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::aggregate::{ROLE_BOTH, ROLE_HOST, ROLE_SPEAKER};
use crate::models::NetworkGraph;

const TOP_CONNECTED_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedParticipant {
    pub id: String,
    pub name: String,
    pub co_participants: usize,
    pub shared_spaces: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub participants: usize,
    pub hosts: usize,
    pub speakers: usize,
    pub both: usize,
    pub other_roles: usize,
    pub links: usize,
    pub distinct_pairs: usize,
    pub components: usize,
    pub largest_component: usize,
    pub isolated: usize,
    pub top_connected: Vec<ConnectedParticipant>,
}

/// Collapses the link list into one undirected edge per pair, weighted by
/// the number of spaces the pair shared.
fn co_participation_graph(network: &NetworkGraph) -> (UnGraph<String, u32>, IndexMap<String, NodeIndex>) {
    let mut graph = UnGraph::<String, u32>::new_undirected();
    let mut node_map: IndexMap<String, NodeIndex> = IndexMap::new();

    for node in &network.nodes {
        let idx = graph.add_node(node.id.clone());
        node_map.insert(node.id.clone(), idx);
    }

    for link in &network.links {
        let source = *node_map
            .entry(link.source.clone())
            .or_insert_with(|| graph.add_node(link.source.clone()));
        let target = *node_map
            .entry(link.target.clone())
            .or_insert_with(|| graph.add_node(link.target.clone()));
        match graph.find_edge(source, target) {
            Some(edge) => graph[edge] += link.value,
            None => {
                graph.add_edge(source, target, link.value);
            }
        }
    }

    (graph, node_map)
}

/// Sizes of the connected components, in node order of discovery.
fn component_sizes(graph: &UnGraph<String, u32>) -> Vec<usize> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut sizes = Vec::new();

    for start in graph.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut stack = vec![start];
        let mut size = 0;
        while let Some(current) = stack.pop() {
            if visited.insert(current) {
                size += 1;
                for neighbor in graph.neighbors(current) {
                    if !visited.contains(&neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }
        sizes.push(size);
    }

    sizes
}

impl NetworkSummary {
    pub fn from_graph(network: &NetworkGraph) -> Self {
        let mut hosts = 0;
        let mut speakers = 0;
        let mut both = 0;
        let mut other_roles = 0;
        for node in &network.nodes {
            match node.role.as_str() {
                ROLE_HOST => hosts += 1,
                ROLE_SPEAKER => speakers += 1,
                ROLE_BOTH => both += 1,
                _ => other_roles += 1,
            }
        }

        let (graph, node_map) = co_participation_graph(network);
        let sizes = component_sizes(&graph);
        let isolated = graph
            .node_indices()
            .filter(|idx| graph.neighbors(*idx).next().is_none())
            .count();

        let mut top_connected: Vec<ConnectedParticipant> = network
            .nodes
            .iter()
            .filter_map(|node| {
                let idx = *node_map.get(&node.id)?;
                let co_participants = graph.neighbors(idx).count();
                if co_participants == 0 {
                    return None;
                }
                let shared_spaces = graph.edges(idx).map(|edge| *edge.weight()).sum();
                Some(ConnectedParticipant {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    co_participants,
                    shared_spaces,
                })
            })
            .collect();
        // Stable sort keeps id order among ties
        top_connected.sort_by(|a, b| {
            b.co_participants
                .cmp(&a.co_participants)
                .then(b.shared_spaces.cmp(&a.shared_spaces))
        });
        top_connected.truncate(TOP_CONNECTED_LIMIT);

        NetworkSummary {
            participants: network.nodes.len(),
            hosts,
            speakers,
            both,
            other_roles,
            links: network.links.len(),
            distinct_pairs: graph.edge_count(),
            components: sizes.len(),
            largest_component: sizes.iter().copied().max().unwrap_or(0),
            isolated,
            top_connected,
        }
    }
}

pub fn log_summary(summary: &NetworkSummary) {
    info!(
        "Network summary: {} participants ({} hosts, {} speakers, {} both, {} other), {} links over {} distinct pairs.",
        summary.participants,
        summary.hosts,
        summary.speakers,
        summary.both,
        summary.other_roles,
        summary.links,
        summary.distinct_pairs
    );
    info!(
        "Network has {} connected components (largest {}), {} isolated participants.",
        summary.components, summary.largest_component, summary.isolated
    );
    if let Some(top) = summary.top_connected.first() {
        info!(
            "Most connected participant: {} (id {}) with {} co-participants.",
            top.name, top.id, top.co_participants
        );
    }
}

/// Plain-text report for terminal output.
pub fn render_report(summary: &NetworkSummary, generated_at: &str) -> String {
    let totals = [
        ("Participants", summary.participants),
        ("  Hosts", summary.hosts),
        ("  Speakers", summary.speakers),
        ("  Both", summary.both),
        ("  Other roles", summary.other_roles),
        ("Links", summary.links),
        ("Distinct pairs", summary.distinct_pairs),
        ("Components", summary.components),
        ("Largest component", summary.largest_component),
        ("Isolated", summary.isolated),
    ];

    let mut lines = vec!["SPACE NETWORK SUMMARY".to_string(), String::new()];
    lines.extend(totals.iter().map(|(label, count)| format!("{:<24}{}", label, count)));

    if !summary.top_connected.is_empty() {
        lines.push(String::new());
        lines.push("MOST CONNECTED".to_string());
        lines.push(format!("{:<6}{:<32}{:>16}{:>16}", "Id", "Name", "Co-participants", "Shared spaces"));
        for p in &summary.top_connected {
            lines.push(format!("{:<6}{:<32}{:>16}{:>16}", p.id, p.name, p.co_participants, p.shared_spaces));
        }
    }

    lines.push(String::new());
    lines.push(format!("Generated {}", generated_at));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
