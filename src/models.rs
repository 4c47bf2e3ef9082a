use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// Raw CSV record; extra columns are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParticipantRow {
    pub name: String,
    pub role: String,
    pub space_url: String,
    #[serde(default)]
    pub twitter_link: Option<String>,
}

impl ParticipantRow {
    /// The contact handle, if the row carries a non-blank one.
    pub fn twitter_handle(&self) -> Option<&str> {
        self.twitter_link
            .as_deref()
            .filter(|handle| !handle.trim().is_empty())
    }

    /// The first required field left blank, if any.
    pub fn blank_required_field(&self) -> Option<&'static str> {
        [("name", &self.name), ("role", &self.role), ("space_url", &self.space_url)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }
}

/// Running totals for one participant name while rows are folded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantStats {
    pub roles: IndexSet<String>,
    pub spaces: usize,
    pub space_urls: IndexSet<String>,
    pub host_spaces: usize,
    pub speaker_spaces: usize,
    pub twitter: String,
}

// Output records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: String,
    pub spaces: usize,
    pub host_spaces: usize,
    pub speaker_spaces: usize,
    pub twitter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub nodes: Vec<Participant>,
    pub links: Vec<Link>,
}
