pub mod controller;
pub mod details;
pub mod project;
pub mod renderer;
pub mod selection;
pub mod settings;
pub mod sketch;

pub use controller::ViewController;
pub use details::NodeDetails;
pub use project::{InfraProject, ProjectError};
pub use renderer::{Renderer, TopologyFrame, TreeFrame};
pub use selection::SelectionController;
pub use settings::ViewSettings;
pub use sketch::{SketchEdge, SketchNode, SketchOverlay};
