pub mod correspondence;
pub mod layout;
pub mod projector;
pub mod topology;

pub use correspondence::IdCorrespondence;
pub use layout::{TierLayout, Vec2};
pub use projector::{TopologyProjector, project};
pub use topology::{Topology, TopologyEdge, TopologyId, TopologyKind, TopologyNode};
