//! Collaboration sync between editor instances.
//!
//! A [`SyncHub`] connects any number of [`SyncPeer`]s on the same thread.
//! Every update travels as JSON text, `{"type":"SCHEMA_UPDATE","payload":<tree>}`,
//! so a peer fed from another transport goes through [`SyncPeer::deliver`]
//! with the same bytes. A peer never receives its own broadcasts, and a
//! received tree replaces the receiver's tree wholesale.

use crate::error::SyncError;
use indexmap::IndexMap;
use orion_core::Node;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A message on the sync channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SyncMessage {
    #[serde(rename = "SCHEMA_UPDATE")]
    SchemaUpdate(Node),
}

impl SyncMessage {
    pub fn encode(&self) -> Result<String, SyncError> {
        serde_json::to_string(self).map_err(SyncError::Encode)
    }

    pub fn decode(raw: &str) -> Result<Self, SyncError> {
        serde_json::from_str(raw).map_err(SyncError::Decode)
    }
}

type Listener = Rc<dyn Fn(&Node)>;

#[derive(Default)]
struct HubState {
    peers: IndexMap<u64, IndexMap<u64, Listener>>,
    next_id: u64,
}

impl HubState {
    fn issue_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared channel connecting peers. Clones refer to the same channel.
#[derive(Clone, Default)]
pub struct SyncHub {
    state: Rc<RefCell<HubState>>,
}

impl fmt::Debug for SyncHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHub").field("peers", &self.peer_count()).finish()
    }
}

impl SyncHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the channel as a new peer.
    pub fn connect(&self) -> SyncPeer {
        let mut state = self.state.borrow_mut();
        let id = state.issue_id();
        state.peers.insert(id, IndexMap::new());
        tracing::debug!(peer = id, "sync peer connected");
        SyncPeer {
            id,
            state: self.state.clone(),
        }
    }

    /// Number of connected peers.
    pub fn peer_count(&self) -> usize {
        self.state.borrow().peers.len()
    }
}

/// One participant on a [`SyncHub`].
pub struct SyncPeer {
    id: u64,
    state: Rc<RefCell<HubState>>,
}

impl fmt::Debug for SyncPeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncPeer")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish()
    }
}

impl SyncPeer {
    pub fn is_open(&self) -> bool {
        self.state.borrow().peers.contains_key(&self.id)
    }

    /// Register a callback for trees received from other peers.
    pub fn subscribe(&self, listener: impl Fn(&Node) + 'static) -> Result<Subscription, SyncError> {
        let mut state = self.state.borrow_mut();
        let listener_id = state.issue_id();
        let listeners = state.peers.get_mut(&self.id).ok_or(SyncError::Closed)?;
        listeners.insert(listener_id, Rc::new(listener));
        Ok(Subscription {
            peer: self.id,
            listener: listener_id,
            state: Rc::downgrade(&self.state),
        })
    }

    /// Send `tree` to every other peer. Returns how many peers received it.
    pub fn broadcast_update(&self, tree: &Node) -> Result<usize, SyncError> {
        if !self.is_open() {
            return Err(SyncError::Closed);
        }
        let raw = SyncMessage::SchemaUpdate(tree.clone()).encode()?;
        let peers: Vec<u64> = self
            .state
            .borrow()
            .peers
            .keys()
            .copied()
            .filter(|id| *id != self.id)
            .collect();

        let mut reached = 0;
        for peer in peers {
            notify(&self.state, peer, &raw)?;
            reached += 1;
        }
        tracing::info!(peer = self.id, reached, nodes = tree.len(), "broadcast schema update");
        Ok(reached)
    }

    /// Hand an encoded message from an external transport to this peer's
    /// listeners. Returns how many listeners ran.
    pub fn deliver(&self, raw: &str) -> Result<usize, SyncError> {
        if !self.is_open() {
            return Err(SyncError::Closed);
        }
        notify(&self.state, self.id, raw)
    }

    /// Leave the channel. Later broadcasts and deliveries fail with
    /// [`SyncError::Closed`].
    pub fn close(&self) {
        if self.state.borrow_mut().peers.shift_remove(&self.id).is_some() {
            tracing::debug!(peer = self.id, "sync peer closed");
        }
    }
}

impl Drop for SyncPeer {
    fn drop(&mut self) {
        self.close();
    }
}

fn notify(state: &Rc<RefCell<HubState>>, peer: u64, raw: &str) -> Result<usize, SyncError> {
    let SyncMessage::SchemaUpdate(tree) = SyncMessage::decode(raw)?;
    // Listeners run without the hub borrowed so they may broadcast in turn.
    let listeners: Vec<Listener> = match state.borrow().peers.get(&peer) {
        Some(listeners) => listeners.values().cloned().collect(),
        None => return Ok(0),
    };
    for listener in &listeners {
        listener(&tree);
    }
    Ok(listeners.len())
}

/// Handle returned by [`SyncPeer::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    peer: u64,
    listener: u64,
    state: Weak<RefCell<HubState>>,
}

impl Subscription {
    /// Stop receiving updates.
    pub fn unsubscribe(self) {
        if let Some(state) = self.state.upgrade() {
            if let Some(listeners) = state.borrow_mut().peers.get_mut(&self.peer) {
                listeners.shift_remove(&self.listener);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orion_core::{NodeKind, Props};
    use serde_json::json;
    use std::cell::Cell;

    fn tree(id: &str) -> Node {
        Node::with_props(id, Props::palette(NodeKind::Container))
    }

    fn recorder(peer: &SyncPeer) -> (Rc<RefCell<Vec<String>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = peer.subscribe(move |tree| sink.borrow_mut().push(tree.id.to_string())).unwrap();
        (seen, sub)
    }

    #[test]
    fn test_wire_format() {
        let raw = SyncMessage::SchemaUpdate(tree("r")).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["type"], json!("SCHEMA_UPDATE"));
        assert_eq!(value["payload"]["id"], json!("r"));
        assert_eq!(value["payload"]["type"], json!("Container"));
    }

    #[test]
    fn test_broadcast_skips_sender() {
        let hub = SyncHub::new();
        let a = hub.connect();
        let b = hub.connect();
        let c = hub.connect();
        let (seen_a, _sa) = recorder(&a);
        let (seen_b, _sb) = recorder(&b);
        let (seen_c, _sc) = recorder(&c);

        assert_eq!(a.broadcast_update(&tree("t1")).unwrap(), 2);
        assert!(seen_a.borrow().is_empty());
        assert_eq!(*seen_b.borrow(), vec!["t1".to_string()]);
        assert_eq!(*seen_c.borrow(), vec!["t1".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hub = SyncHub::new();
        let a = hub.connect();
        let b = hub.connect();
        let (seen, sub) = recorder(&b);

        a.broadcast_update(&tree("one")).unwrap();
        sub.unsubscribe();
        a.broadcast_update(&tree("two")).unwrap();
        assert_eq!(*seen.borrow(), vec!["one".to_string()]);
    }

    #[test]
    fn test_closed_peer() {
        let hub = SyncHub::new();
        let a = hub.connect();
        let b = hub.connect();
        b.close();
        assert_eq!(hub.peer_count(), 1);
        assert_eq!(a.broadcast_update(&tree("t")).unwrap(), 0);
        assert!(matches!(b.broadcast_update(&tree("t")), Err(SyncError::Closed)));
        assert!(matches!(b.subscribe(|_| {}), Err(SyncError::Closed)));
    }

    #[test]
    fn test_dropped_peer_leaves_hub() {
        let hub = SyncHub::new();
        {
            let _peer = hub.connect();
            assert_eq!(hub.peer_count(), 1);
        }
        assert_eq!(hub.peer_count(), 0);
    }

    #[test]
    fn test_deliver_rejects_other_messages() {
        let hub = SyncHub::new();
        let peer = hub.connect();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let _sub = peer.subscribe(move |_| counter.set(counter.get() + 1)).unwrap();

        assert!(matches!(peer.deliver(r#"{"type":"CURSOR","payload":{}}"#), Err(SyncError::Decode(_))));
        let raw = SyncMessage::SchemaUpdate(tree("x")).encode().unwrap();
        assert_eq!(peer.deliver(&raw).unwrap(), 1);
        assert_eq!(count.get(), 1);
    }
}
