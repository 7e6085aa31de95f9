/// UI module exports
pub mod components;
pub mod modal;
pub mod popup;
