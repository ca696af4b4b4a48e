//! Course landing page - server-rendered IELTS product page.
//!
//! This workload demonstrates:
//! - One upstream fetch per revalidation interval, shared through Spin's key-value store
//! - Page regions chosen by the `type` of each section in the product document
//! - Shell-first streaming of the regions
//! - An interactive sidebar modelled by `SidebarWidget` and hydrated by an inline island

mod app;
mod data;
mod page;
mod script;
mod sections;
mod widget;

#[cfg(target_arch = "wasm32")]
mod handler;

pub use app::{load_config, load_document, prepare, route, stream_page, Reply, Route};
pub use data::*;
pub use page::{page_shell, render_error_page, render_regions, PageVariant, Region};
pub use widget::{DragState, SidebarWidget, DRAG_SPEED};
