//! UI components for Deckwright

pub mod block_card;
pub mod export_panel;
#[cfg(test)]
mod harness;
pub mod image_dialog;
pub mod slide_editor;
pub mod slide_list;
