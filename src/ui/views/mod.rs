//! Components drawn into frames
//!
//! Each view renders itself to a styled string frame sized by its last
//! `resize` call. Parents stack and box those frames; overlays are placed
//! with the compositor.

pub mod available;
pub mod connector;
pub mod help;
pub mod panel;
pub mod spinner;
pub mod stored;
pub mod stored_info;
pub mod table;
pub mod tabs;
pub mod text_content;
pub mod text_input;
pub mod toggle;
pub mod vpn;
pub mod wifi_pane;

pub use connector::ConnectorForm;
pub use stored_info::StoredInfoForm;
pub use tabs::Tabs;
pub use text_content::TextContent;
