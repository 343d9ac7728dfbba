//! Per-model table of auxiliary loads (material libraries, texture images).
//!
//! The parser records a [`LoadRequest`] for every `mtllib`/`map_Kd` it meets. A
//! collaborator drains the requests with [`ResourceTracker::take_requests`],
//! performs the fetch however it likes, and reports back by [`RequestId`]. The
//! model is renderable once no record is left pending.

use crate::texture::TextureData;

/// Stable handle for one load request, unique within its model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    MaterialLibrary,
    Texture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceState {
    Pending,
    Ready,
    /// Fetch or decode failed. Settled, but carries no data.
    Missing,
}

/// What the collaborator hands back for a finished request.
#[derive(Debug)]
pub enum Completion {
    /// Material library text.
    Text(String),
    /// Decoded texture image.
    Image(TextureData),
    /// Not found or unreadable.
    Missing,
}

/// Work item for the fetch collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: RequestId,
    pub kind: ResourceKind,
    pub url: String,
}

#[derive(Debug)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub url: String,
    pub state: ResourceState,
    /// Decoded image, set once a texture record becomes ready.
    pub texture: Option<TextureData>,
}

#[derive(Debug, Default)]
pub struct ResourceTracker {
    records: Vec<ResourceRecord>,
    outbox: Vec<LoadRequest>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pending load and queues it for the collaborator.
    pub fn request(&mut self, kind: ResourceKind, url: String) -> RequestId {
        let id = RequestId(self.records.len() as u32);
        log::debug!("Load request {:?}: {:?} '{}'", id, kind, url);
        self.outbox.push(LoadRequest {
            id,
            kind,
            url: url.clone(),
        });
        self.records.push(ResourceRecord {
            kind,
            url,
            state: ResourceState::Pending,
            texture: None,
        });
        id
    }

    /// Requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<LoadRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn get(&self, id: RequestId) -> Option<&ResourceRecord> {
        self.records.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: RequestId) -> Option<&mut ResourceRecord> {
        self.records.get_mut(id.0 as usize)
    }

    pub fn records(&self) -> impl Iterator<Item = (RequestId, &ResourceRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RequestId(i as u32), r))
    }

    /// `true` when no record of `kind` is still pending.
    pub fn settled(&self, kind: ResourceKind) -> bool {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .all(|r| r.state != ResourceState::Pending)
    }

    pub fn pending(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.state == ResourceState::Pending)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_requests_drain_once() {
        let mut tracker = ResourceTracker::new();
        let a = tracker.request(ResourceKind::MaterialLibrary, "a.mtl".into());
        let b = tracker.request(ResourceKind::Texture, "b.png".into());
        assert_eq!((a, b), (RequestId(0), RequestId(1)));

        let reqs = tracker.take_requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[1].url, "b.png");
        assert!(tracker.take_requests().is_empty());
    }

    #[test]
    fn settled_per_kind() {
        let mut tracker = ResourceTracker::new();
        assert!(tracker.settled(ResourceKind::Texture));

        let lib = tracker.request(ResourceKind::MaterialLibrary, "a.mtl".into());
        let tex = tracker.request(ResourceKind::Texture, "b.png".into());
        assert_eq!(tracker.pending(), 2);

        if let Some(r) = tracker.get_mut(lib) {
            r.state = ResourceState::Missing;
        }
        assert!(tracker.settled(ResourceKind::MaterialLibrary));
        assert!(!tracker.settled(ResourceKind::Texture));

        if let Some(r) = tracker.get_mut(tex) {
            r.state = ResourceState::Ready;
        }
        assert!(tracker.settled(ResourceKind::Texture));
        assert_eq!(tracker.pending(), 0);
    }
}
