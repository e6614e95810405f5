/// The rendering surface the engine talks to.
use crate::schema::node::NodeId;

/// What the player is asked to do with a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Visible choice labels, in order.
    Choices(Vec<String>),
    /// Free-text capture instead of choices.
    Input,
}

/// Everything the view needs to draw one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub node: NodeId,
    /// Formatted display text.
    pub text: String,
    pub show_back: bool,
    pub presentation: Presentation,
}

impl Frame {
    pub fn labels(&self) -> &[String] {
        match &self.presentation {
            Presentation::Choices(labels) => labels,
            Presentation::Input => &[],
        }
    }

    pub fn is_input(&self) -> bool {
        self.presentation == Presentation::Input
    }
}

/// View-layer collaborator. Only [`render`](View::render) is required;
/// the hooks default to no-ops.
pub trait View {
    fn set_title(&mut self, _title: &str) {}

    fn scroll_to_top(&mut self) {}

    fn play_entrance(&mut self) {}

    fn render(&mut self, frame: &Frame);

    /// The highlighted choice changed.
    fn highlight(&mut self, _index: Option<usize>) {}
}

/// A view that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl View for NullView {
    fn render(&mut self, _frame: &Frame) {}
}

/// Keeps every call, for headless play and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub title: Option<String>,
    pub frames: Vec<Frame>,
    pub highlights: Vec<Option<usize>>,
    pub scrolls: usize,
    pub entrances: usize,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn last_highlight(&self) -> Option<usize> {
        self.highlights.last().copied().flatten()
    }
}

impl View for RecordingView {
    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn play_entrance(&mut self) {
        self.entrances += 1;
    }

    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.highlights.push(index);
    }
}
