//! Editing session: the owned presentation plus the selected slide

use super::error::PresentationError;
use super::presentation::{BlockContent, BlockId, BlockKind, Presentation, Slide, SlideId};

/// The editor's view of a presentation.
///
/// Holds the single canonical [`Presentation`] and which slide is being edited.
/// The selection always points at an existing slide.
#[derive(Debug, Clone)]
pub struct EditorSession {
    presentation: Presentation,
    active_slide: SlideId,
    default_title: String,
}

impl EditorSession {
    /// Start a session on the starter deck, with its only slide selected
    pub fn new(default_title: &str) -> Self {
        let presentation = Presentation::starter(default_title);
        let active_slide = presentation.first_slide_id();
        Self {
            presentation,
            active_slide,
            default_title: default_title.to_string(),
        }
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Title and block edits.
    ///
    /// Slides are added and removed only through the session, which keeps the
    /// selection valid.
    pub fn edits(&mut self) -> SlideEdits<'_> {
        SlideEdits {
            presentation: &mut self.presentation,
        }
    }

    pub fn active_slide_id(&self) -> SlideId {
        self.active_slide
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.presentation.slide(self.active_slide)
    }

    /// Select a slide; ignored if it doesn't exist
    pub fn select(&mut self, id: SlideId) -> bool {
        if self.presentation.slide(id).is_some() {
            self.active_slide = id;
            true
        } else {
            false
        }
    }

    /// Append a new slide and select it
    pub fn add_slide(&mut self) -> SlideId {
        let id = self.presentation.create_slide_titled(&self.default_title);
        self.active_slide = id;
        id
    }

    /// Delete a slide, moving the selection to the first slide if it was selected
    pub fn delete_slide(&mut self, id: SlideId) -> bool {
        let removed = self.presentation.delete_slide(id);
        if removed && self.active_slide == id {
            self.active_slide = self.presentation.first_slide_id();
            tracing::debug!("Selection moved to {}", self.active_slide);
        }
        removed
    }

    pub fn is_export_ready(&self) -> bool {
        self.presentation.is_export_ready()
    }
}

/// Edits that leave the set of slides untouched
pub struct SlideEdits<'a> {
    presentation: &'a mut Presentation,
}

impl SlideEdits<'_> {
    pub fn update_slide_title(&mut self, id: SlideId, title: &str) -> bool {
        self.presentation.update_slide_title(id, title)
    }

    pub fn add_block(
        &mut self,
        slide_id: SlideId,
        kind: BlockKind,
    ) -> Result<BlockId, PresentationError> {
        self.presentation.add_block(slide_id, kind)
    }

    pub fn update_block_content(
        &mut self,
        slide_id: SlideId,
        block_id: BlockId,
        content: BlockContent,
    ) -> bool {
        self.presentation
            .update_block_content(slide_id, block_id, content)
    }

    pub fn delete_block(&mut self, slide_id: SlideId, block_id: BlockId) -> bool {
        self.presentation.delete_block(slide_id, block_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_selects_starter_slide() {
        let session = EditorSession::new("Новый слайд");
        assert_eq!(session.presentation().slide_count(), 1);
        assert_eq!(session.active_slide_id(), session.presentation().first_slide_id());
        assert_eq!(session.active_slide().unwrap().title(), "Новый слайд");
        assert!(session.is_export_ready());
    }

    #[test]
    fn test_add_slide_selects_it() {
        let mut session = EditorSession::new("Slide");
        let id = session.add_slide();
        assert_eq!(session.active_slide_id(), id);
        assert_eq!(session.active_slide().unwrap().title(), "Slide");
        assert!(session.active_slide().unwrap().blocks().is_empty());
    }

    #[test]
    fn test_delete_active_slide_repairs_selection() {
        let mut session = EditorSession::new("Slide");
        let first = session.presentation().first_slide_id();
        let second = session.add_slide();
        let third = session.add_slide();

        session.select(second);
        assert!(session.delete_slide(second));
        assert_eq!(session.active_slide_id(), first);

        session.select(third);
        assert!(session.delete_slide(first));
        assert_eq!(session.active_slide_id(), third);
        assert!(session.active_slide().is_some());
    }

    #[test]
    fn test_delete_other_slide_keeps_selection() {
        let mut session = EditorSession::new("Slide");
        let first = session.presentation().first_slide_id();
        let second = session.add_slide();

        assert!(session.delete_slide(first));
        assert_eq!(session.active_slide_id(), second);
    }

    #[test]
    fn test_delete_last_slide_keeps_selection() {
        let mut session = EditorSession::new("Slide");
        let only = session.active_slide_id();
        assert!(!session.delete_slide(only));
        assert_eq!(session.active_slide_id(), only);
    }

    #[test]
    fn test_select_missing_slide() {
        let mut session = EditorSession::new("Slide");
        let first = session.active_slide_id();
        let gone = session.add_slide();
        session.delete_slide(gone);

        assert!(!session.select(gone));
        assert_eq!(session.active_slide_id(), first);
    }

    #[test]
    fn test_slide_edits() {
        let mut session = EditorSession::new("Slide");
        let slide = session.active_slide_id();

        let block = session.edits().add_block(slide, BlockKind::Text).unwrap();
        assert!(session
            .edits()
            .update_block_content(slide, block, BlockContent::Text("Body".into())));
        assert!(session.edits().update_slide_title(slide, "Agenda"));

        let active = session.active_slide().unwrap();
        assert_eq!(active.title(), "Agenda");
        assert_eq!(
            active.block(block).unwrap().content(),
            &BlockContent::Text("Body".into())
        );

        assert!(session.edits().delete_block(slide, block));
        assert!(session.active_slide().unwrap().blocks().is_empty());
        assert_eq!(session.active_slide_id(), slide);
    }
}
