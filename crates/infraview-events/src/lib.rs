use crossbeam_channel::{unbounded, Receiver, Sender};
use infraview_core::NodeId;
use serde::{Deserialize, Serialize};

/// Which view a node activation came from. Topology activations carry a
/// topology node id, tree activations a model id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivationOrigin {
    Tree,
    Topology,
}

/// Raw UI input handed to the view controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    // Tree
    ExpandToggle {
        id: NodeId,
    },
    ExpandAll,
    CollapseAll,
    LoadMore {
        pool_id: NodeId,
    },
    LoadAll {
        pool_id: NodeId,
    },

    // Search
    SearchInput {
        text: String,
    },

    // Selection
    NodeActivate {
        id: String,
        origin: ActivationOrigin,
    },
    ClearSelection,

    // Viewport
    ViewportResize {
        width: f32,
        height: f32,
    },
    Scroll {
        offset: f32,
    },

    // ========================================================================
    // Topology sketching
    // ========================================================================
    /// Connect two topology nodes with an ad-hoc edge.
    SketchConnect {
        source: String,
        target: String,
    },
    /// A connection dragged from `source` and released on empty canvas.
    SketchDrop {
        source: String,
        x: f32,
        y: f32,
    },
}

/// State changes the controller reports back to renderers and shells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Notification {
    SelectionChanged {
        id: Option<NodeId>,
    },
    ActiveEnvironmentChanged {
        previous: Option<NodeId>,
        current: Option<NodeId>,
    },
    /// The debounced search term was applied to the derived views.
    SearchApplied {
        term: String,
    },
    RowsInvalidated,
    /// Renderer-side state (pan, zoom, sketches) of the old projection is void.
    TopologyReset {
        env_id: Option<NodeId>,
    },
    LookupMiss {
        id: String,
    },
}

#[derive(Clone)]
pub struct EventBus<T = Event> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<T> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<T> {
        self.rx.clone()
    }

    pub fn publish(&self, message: T) {
        if self.tx.send(message).is_err() {
            tracing::warn!("event bus has no receivers left");
        }
    }

    /// Everything queued so far, in publish order.
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }

    /// Dispatch all pending messages to a listener.
    /// This is what the UI loop calls once per frame.
    pub fn dispatch_to<L: EventListener<T>>(&self, listener: &mut L) {
        while let Ok(message) = self.rx.try_recv() {
            listener.handle_event(&message);
        }
    }
}

/// Trait for components that respond to bus messages.
pub trait EventListener<T = Event> {
    fn handle_event(&mut self, event: &T);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus_publish_receive() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let receiver = bus.receiver();

        sender
            .send(Event::NodeActivate {
                id: "us-east-pool-1".to_string(),
                origin: ActivationOrigin::Tree,
            })
            .unwrap();

        match receiver.recv().unwrap() {
            Event::NodeActivate { id, origin } => {
                assert_eq!(id, "us-east-pool-1");
                assert_eq!(origin, ActivationOrigin::Tree);
            }
            other => panic!("Expected NodeActivate, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_preserves_order() {
        struct Recorder(Vec<Event>);
        impl EventListener for Recorder {
            fn handle_event(&mut self, event: &Event) {
                self.0.push(event.clone());
            }
        }

        let bus = EventBus::new();
        bus.publish(Event::SearchInput {
            text: "a".to_string(),
        });
        bus.publish(Event::LoadMore {
            pool_id: NodeId::from("pool"),
        });
        bus.publish(Event::ExpandAll);

        let mut recorder = Recorder(Vec::new());
        bus.dispatch_to(&mut recorder);
        assert_eq!(recorder.0.len(), 3);
        assert!(matches!(recorder.0[0], Event::SearchInput { .. }));
        assert!(matches!(recorder.0[1], Event::LoadMore { .. }));
        assert_eq!(recorder.0[2], Event::ExpandAll);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_notification_bus() {
        let bus: EventBus<Notification> = EventBus::new();
        bus.publish(Notification::SelectionChanged {
            id: Some(NodeId::from("w1")),
        });
        bus.publish(Notification::SearchApplied {
            term: "abc".to_string(),
        });
        let drained = bus.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(
            drained[1],
            Notification::SearchApplied {
                term: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_event_serializes() {
        let event = Event::ViewportResize {
            width: 400.0,
            height: 720.0,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
