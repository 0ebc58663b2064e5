pub mod chat_window;
pub mod overlay;
pub mod search_bar;

pub use chat_window::{ChatToggle, ChatWindow};
pub use overlay::ListeningOverlay;
pub use search_bar::SearchBar;
