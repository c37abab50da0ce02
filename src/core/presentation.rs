//! Presentation document model: an ordered list of slides built from typed blocks
//!
//! The [`Presentation`] is the only way to change slides and blocks. Every edit
//! keeps the deck non-empty, and an edit that names a missing slide or block is a
//! no-op rather than an error: ids only ever come from this same presentation,
//! so a stale id just means the target is already gone.

use std::fmt;

use super::attachment::AttachedFile;
use super::error::PresentationError;

/// Title given to slides created without an explicit one
pub const DEFAULT_SLIDE_TITLE: &str = "Новый слайд";

/// Placeholder text of a freshly created prompt block
pub const DEFAULT_PROMPT: &str = "Опишите, что должен сгенерировать AI...";

/// Stock picture applied by the image picker until real image search exists
pub const STOCK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800";

/// Alt text used when the image picker query is left empty
pub const DEFAULT_IMAGE_ALT: &str = "Presentation image";

/// Maximum number of characters of a text block shown in a slide summary
const SUMMARY_TEXT_LEN: usize = 30;

/// Identifier of a slide, unique for the lifetime of a presentation
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SlideId(u64);

/// Identifier of a block, never reused within a presentation
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BlockId(u64);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide-{}", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// The closed set of block variants
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum BlockKind {
    Text,
    Image,
    Prompt,
    Pdf,
    Pptx,
    Xlsx,
}

impl BlockKind {
    /// Every kind, in the order the editor offers them
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Text,
        BlockKind::Prompt,
        BlockKind::Image,
        BlockKind::Pdf,
        BlockKind::Pptx,
        BlockKind::Xlsx,
    ];

    /// Short machine tag
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Prompt => "prompt",
            BlockKind::Pdf => "pdf",
            BlockKind::Pptx => "pptx",
            BlockKind::Xlsx => "xlsx",
        }
    }

    /// Heading shown on the block card
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Text => "Text",
            BlockKind::Image => "Image",
            BlockKind::Prompt => "AI prompt",
            BlockKind::Pdf => "PDF document",
            BlockKind::Pptx => "PPTX presentation",
            BlockKind::Xlsx => "XLSX spreadsheet",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BlockKind::Text => "\u{1F4DD}",
            BlockKind::Image => "\u{1F5BC}",
            BlockKind::Prompt => "\u{2728}",
            BlockKind::Pdf => "\u{1F4C4}",
            BlockKind::Pptx => "\u{1F4CA}",
            BlockKind::Xlsx => "\u{1F4C8}",
        }
    }

    /// File extensions accepted by document kinds; empty for the others
    pub fn file_extensions(self) -> &'static [&'static str] {
        match self {
            BlockKind::Pdf => &["pdf"],
            BlockKind::Pptx => &["pptx"],
            BlockKind::Xlsx => &["xlsx", "xls"],
            BlockKind::Text | BlockKind::Image | BlockKind::Prompt => &[],
        }
    }

    /// Whether blocks of this kind hold an attached file
    #[allow(dead_code)]
    pub fn is_document(self) -> bool {
        !self.file_extensions().is_empty()
    }

    /// Content a new block of this kind starts with
    pub fn default_content(self) -> BlockContent {
        match self {
            BlockKind::Text => BlockContent::Text(String::new()),
            BlockKind::Prompt => BlockContent::Prompt(DEFAULT_PROMPT.to_string()),
            BlockKind::Image => BlockContent::Image(ImageContent::default()),
            BlockKind::Pdf => BlockContent::Pdf(DocumentContent::default()),
            BlockKind::Pptx => BlockContent::Pptx(DocumentContent::default()),
            BlockKind::Xlsx => BlockContent::Xlsx(DocumentContent::default()),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Content of an image block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageContent {
    pub url: String,
    pub alt: String,
}

impl ImageContent {
    /// Image chosen by the picker for a search query
    pub fn from_search(query: &str) -> Self {
        let query = query.trim();
        Self {
            url: STOCK_IMAGE_URL.to_string(),
            alt: if query.is_empty() {
                DEFAULT_IMAGE_ALT.to_string()
            } else {
                query.to_string()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// Content of a pdf, pptx or xlsx block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContent {
    pub file: Option<AttachedFile>,
    pub name: String,
}

impl DocumentContent {
    /// Content referencing `file`, displayed under its file name
    pub fn attached(file: AttachedFile) -> Self {
        Self {
            name: file.name.clone(),
            file: Some(file),
        }
    }
}

/// Block payload; the variant is the block's kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text(String),
    Prompt(String),
    Image(ImageContent),
    Pdf(DocumentContent),
    Pptx(DocumentContent),
    Xlsx(DocumentContent),
}

impl BlockContent {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Prompt(_) => BlockKind::Prompt,
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::Pdf(_) => BlockKind::Pdf,
            BlockContent::Pptx(_) => BlockKind::Pptx,
            BlockContent::Xlsx(_) => BlockKind::Xlsx,
        }
    }

    /// Wrap document content in the variant for `kind`.
    ///
    /// Returns `None` for kinds that don't hold documents.
    pub fn document(kind: BlockKind, content: DocumentContent) -> Option<Self> {
        match kind {
            BlockKind::Pdf => Some(BlockContent::Pdf(content)),
            BlockKind::Pptx => Some(BlockContent::Pptx(content)),
            BlockKind::Xlsx => Some(BlockContent::Xlsx(content)),
            BlockKind::Text | BlockKind::Image | BlockKind::Prompt => None,
        }
    }

    /// The document payload, for pdf/pptx/xlsx content
    #[allow(dead_code)]
    pub fn as_document(&self) -> Option<&DocumentContent> {
        match self {
            BlockContent::Pdf(doc) | BlockContent::Pptx(doc) | BlockContent::Xlsx(doc) => Some(doc),
            _ => None,
        }
    }
}

/// One typed content unit of a slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    content: BlockContent,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    /// One-line summary used by the slide list
    pub fn summary(&self) -> String {
        let kind = self.kind();
        match &self.content {
            BlockContent::Text(text) if text.is_empty() => format!("{} Empty text", kind.icon()),
            BlockContent::Text(text) => {
                let mut chars = text.chars();
                let head: String = chars.by_ref().take(SUMMARY_TEXT_LEN).collect();
                let ellipsis = if chars.next().is_some() { "..." } else { "" };
                format!("{} {}{}", kind.icon(), head, ellipsis)
            }
            BlockContent::Prompt(_) | BlockContent::Image(_) => {
                format!("{} {}", kind.icon(), kind.label())
            }
            BlockContent::Pdf(doc) | BlockContent::Pptx(doc) | BlockContent::Xlsx(doc) => {
                if doc.name.is_empty() {
                    format!("{} {}", kind.icon(), kind.tag().to_uppercase())
                } else {
                    format!("{} {}", kind.icon(), doc.name)
                }
            }
        }
    }
}

/// A titled, ordered collection of blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    id: SlideId,
    title: String,
    blocks: Vec<Block>,
}

impl Slide {
    pub fn id(&self) -> SlideId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for display, falling back to "Untitled"
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[allow(dead_code)]
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Summaries of the first `limit` blocks
    pub fn preview_lines(&self, limit: usize) -> Vec<String> {
        self.blocks.iter().take(limit).map(Block::summary).collect()
    }

    /// Number of blocks not covered by `preview_lines(limit)`
    pub fn hidden_block_count(&self, limit: usize) -> usize {
        self.blocks.len().saturating_sub(limit)
    }

    fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    fn has_ready_prompt(&self) -> bool {
        self.blocks.iter().any(|block| match &block.content {
            BlockContent::Prompt(prompt) => !prompt.trim().is_empty(),
            _ => false,
        })
    }
}

/// The presentation being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    slides: Vec<Slide>,
    next_slide: u64,
    next_block: u64,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    /// A presentation with a single empty slide
    pub fn new() -> Self {
        let mut presentation = Self::empty();
        presentation.create_slide();
        presentation
    }

    /// The deck a new editing session opens with: one slide holding a prompt
    pub fn starter(title: &str) -> Self {
        let mut presentation = Self::empty();
        let id = presentation.allocate_block_id();
        presentation.slides.push(Slide {
            id: SlideId(presentation.next_slide),
            title: title.to_string(),
            blocks: vec![Block {
                id,
                content: BlockKind::Prompt.default_content(),
            }],
        });
        presentation.next_slide += 1;
        presentation
    }

    /// No slides yet; only valid until the first slide is pushed
    fn empty() -> Self {
        Self {
            slides: Vec::new(),
            next_slide: 1,
            next_block: 1,
        }
    }

    fn allocate_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_block);
        self.next_block += 1;
        id
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn slide_index(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Total number of blocks across all slides
    pub fn block_count(&self) -> usize {
        self.slides.iter().map(|s| s.blocks.len()).sum()
    }

    /// The first slide; there always is one
    pub fn first_slide_id(&self) -> SlideId {
        self.slides[0].id
    }

    /// Append an empty slide with the default title
    pub fn create_slide(&mut self) -> SlideId {
        self.create_slide_titled(DEFAULT_SLIDE_TITLE)
    }

    /// Append an empty slide with the given title
    pub fn create_slide_titled(&mut self, title: &str) -> SlideId {
        let id = SlideId(self.next_slide);
        self.next_slide += 1;

        self.slides.push(Slide {
            id,
            title: title.to_string(),
            blocks: Vec::new(),
        });
        tracing::info!("Created {} ({} slides)", id, self.slides.len());
        id
    }

    /// Remove a slide.
    ///
    /// The last remaining slide is never removed. Returns whether a slide was
    /// removed, so the caller can repair its selection.
    pub fn delete_slide(&mut self, id: SlideId) -> bool {
        if self.slides.len() <= 1 {
            tracing::debug!("Keeping {}: it is the only slide", id);
            return false;
        }

        match self.slide_index(id) {
            Some(index) => {
                self.slides.remove(index);
                tracing::info!("Deleted {} ({} slides left)", id, self.slides.len());
                true
            }
            None => {
                tracing::debug!("Delete ignored, {} not found", id);
                false
            }
        }
    }

    /// Replace a slide's title
    pub fn update_slide_title(&mut self, id: SlideId, title: &str) -> bool {
        match self.slide_mut(id) {
            Some(slide) => {
                if slide.title != title {
                    slide.title = title.to_string();
                }
                true
            }
            None => {
                tracing::debug!("Title update ignored, {} not found", id);
                false
            }
        }
    }

    /// Append a block of `kind` with its default content to a slide
    pub fn add_block(
        &mut self,
        slide_id: SlideId,
        kind: BlockKind,
    ) -> Result<BlockId, PresentationError> {
        let index = self
            .slide_index(slide_id)
            .ok_or(PresentationError::SlideNotFound(slide_id))?;

        let id = self.allocate_block_id();
        self.slides[index].blocks.push(Block {
            id,
            content: kind.default_content(),
        });

        tracing::info!("Added {} block {} to {}", kind, id, slide_id);
        Ok(id)
    }

    /// Replace a block's content.
    ///
    /// The block keeps its kind: content of a different kind is ignored.
    pub fn update_block_content(
        &mut self,
        slide_id: SlideId,
        block_id: BlockId,
        content: BlockContent,
    ) -> bool {
        let Some(block) = self
            .slide_mut(slide_id)
            .and_then(|slide| slide.block_mut(block_id))
        else {
            tracing::debug!("Content update ignored, {}/{} not found", slide_id, block_id);
            return false;
        };

        if block.kind() != content.kind() {
            let err = PresentationError::KindMismatch {
                expected: block.kind(),
                got: content.kind(),
            };
            tracing::warn!("Content update ignored for {}: {}", block_id, err);
            return false;
        }

        block.content = content;
        true
    }

    /// Remove a block from a slide
    pub fn delete_block(&mut self, slide_id: SlideId, block_id: BlockId) -> bool {
        let Some(slide) = self.slide_mut(slide_id) else {
            tracing::debug!("Block delete ignored, {} not found", slide_id);
            return false;
        };

        let before = slide.blocks.len();
        slide.blocks.retain(|b| b.id != block_id);
        let removed = slide.blocks.len() != before;

        if removed {
            tracing::info!("Deleted {} from {}", block_id, slide_id);
        } else {
            tracing::debug!("Block delete ignored, {} not in {}", block_id, slide_id);
        }
        removed
    }

    /// Whether some slide has a prompt block with non-blank text
    pub fn is_export_ready(&self) -> bool {
        self.slides.iter().any(Slide::has_ready_prompt)
    }

    fn slide_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == id)
    }
}
