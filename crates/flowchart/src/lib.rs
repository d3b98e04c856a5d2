//! # Flowmap Flowchart
//!
//! Converts a structure model into a renderable flowchart.
//!
//! ```text
//! CodeStructure
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Nodes: Start/End, functions, decisions, module code
//!     │      └─ Edges: Flow, Contains, Calls
//!     │
//!     ├──> DOT emitter (shapes per node kind)
//!     │
//!     └──> Graphviz renderer (`dot -Tpng`, deadline-bounded)
//! ```

mod builder;
mod dot;
mod error;
mod model;
mod render;

pub use builder::build_graph_model;
pub use dot::{create_logic_flowchart, Flowchart};
pub use error::{FlowchartError, Result};
pub use model::{EdgeKind, FlowNode, GraphModel, NodeKind};
pub use render::{graphviz_available, GraphvizRenderer, PngRenderer};
