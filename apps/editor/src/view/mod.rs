//! Typed view layer. Every renderer builds a [`node::Node`] tree; serialisation escapes all
//! document values.

pub mod forms;
pub mod node;
pub mod page;
pub mod templates;

pub use node::Node;
pub use page::{editor_page, PageModel};
pub use templates::{render, render_html};
