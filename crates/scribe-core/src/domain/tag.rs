use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - a label attached to posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// Sort tags alphabetically, ignoring the casing they were stored with.
pub fn sort_tags(tags: &mut [Tag]) {
    tags.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}
