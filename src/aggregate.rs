// aggregate.rs
use indexmap::IndexMap;
use log::{debug, info};

use crate::models::{Participant, ParticipantRow, ParticipantStats};

pub const ROLE_HOST: &str = "host";
pub const ROLE_SPEAKER: &str = "speaker";
pub const ROLE_BOTH: &str = "both";

/// Lowercases a role and folds the plural "speakers" into "speaker".
/// Unknown roles are kept as they are.
pub fn normalize_role(raw: &str) -> String {
    let role = raw.to_lowercase();
    if role == "speakers" {
        ROLE_SPEAKER.to_string()
    } else {
        role
    }
}

/// Folds rows into per-name statistics, keyed in first-appearance order.
pub fn aggregate_rows(rows: &[ParticipantRow]) -> IndexMap<String, ParticipantStats> {
    let mut participant_stats: IndexMap<String, ParticipantStats> = IndexMap::new();

    for row in rows {
        let role = normalize_role(&row.role);
        let stats = participant_stats.entry(row.name.clone()).or_default();

        // Only count unique spaces
        if stats.space_urls.insert(row.space_url.clone()) {
            stats.spaces += 1;
        }

        // Role counts follow appearances, not unique spaces
        if role == ROLE_HOST {
            stats.host_spaces += 1;
        } else if role == ROLE_SPEAKER {
            stats.speaker_spaces += 1;
        }
        stats.roles.insert(role);

        if let Some(handle) = row.twitter_handle() {
            stats.twitter = handle.to_string();
        }
    }

    debug!("Aggregated {} rows into {} participants", rows.len(), participant_stats.len());
    participant_stats
}

fn display_role(stats: &ParticipantStats) -> String {
    if stats.roles.len() > 1 {
        ROLE_BOTH.to_string()
    } else {
        stats.roles.first().cloned().unwrap_or_default()
    }
}

/// Assigns sequential ids ("1", "2", ...) in the map's order and returns
/// the output records along with the name to id lookup.
pub fn build_participants(
    participant_stats: &IndexMap<String, ParticipantStats>,
) -> (Vec<Participant>, IndexMap<String, String>) {
    let mut participants = Vec::with_capacity(participant_stats.len());
    let mut name_to_id = IndexMap::with_capacity(participant_stats.len());

    for (idx, (name, stats)) in participant_stats.iter().enumerate() {
        let id = (idx + 1).to_string();
        participants.push(Participant {
            id: id.clone(),
            name: name.clone(),
            role: display_role(stats),
            spaces: stats.spaces,
            host_spaces: stats.host_spaces,
            speaker_spaces: stats.speaker_spaces,
            twitter: stats.twitter.clone(),
        });
        name_to_id.insert(name.clone(), id);
    }

    info!("Processed {} unique participants", participants.len());
    (participants, name_to_id)
}
