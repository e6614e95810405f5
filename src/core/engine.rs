/// The traversal engine: node resolution, history, choices, input mode.
///
/// Every entry point is total. Failures (unresolved ids, stray submits,
/// out-of-range choices) are logged and leave the engine untouched.
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::choice;
use crate::core::config::{ConfigError, EngineConfig};
use crate::core::cursor::{Direction, SelectionCursor};
use crate::core::format::TextFormatter;
use crate::core::history::NavigationHistory;
use crate::core::input::InputBinding;
use crate::core::keymap::{Command, Key, Keymap};
use crate::core::view::{Frame, Presentation, View};
use crate::schema::node::{Choice, TextNode};
use crate::schema::roster::{CharacterRoster, PronounTable};
use crate::schema::state::{Player, Playthrough, StoryState};
use crate::schema::story::{NodeResolver, Story};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// A discrete input from the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The n-th visible choice was clicked.
    Choose(usize),
    Move(Direction),
    /// Activate the highlighted choice, or advance if none is highlighted.
    Accept,
    Back,
    Submit(String),
    /// Input landed somewhere other than a choice.
    Deselect,
}

/// The node currently on screen.
struct ActiveNode {
    node: TextNode,
    /// Indices into `node.choices` of the visible choices.
    visible: Vec<usize>,
}

/// All mutable playthrough data, owned by one engine.
#[derive(Default)]
pub struct EngineContext {
    playthrough: Playthrough,
    history: NavigationHistory,
    cursor: SelectionCursor,
    roster: CharacterRoster,
    pronouns: PronounTable,
    resolver: Option<Box<dyn NodeResolver>>,
    active: Option<ActiveNode>,
    input: Option<InputBinding>,
}

impl EngineContext {
    pub fn playthrough(&self) -> &Playthrough {
        &self.playthrough
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn cursor(&self) -> &SelectionCursor {
        &self.cursor
    }

    fn reset(&mut self) {
        self.input = None;
        self.active = None;
        self.history.clear();
        self.cursor.reset(0);
        self.playthrough.state.clear();
    }
}

impl fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineContext")
            .field("playthrough", &self.playthrough)
            .field("history", &self.history)
            .field("cursor", &self.cursor)
            .field("active", &self.active.as_ref().map(|a| a.node.id.as_str()))
            .field("awaiting_input", &self.input.is_some())
            .finish_non_exhaustive()
    }
}

/// Plays a [`Story`] through a [`View`]. Built via `StoryEngine::builder()`.
pub struct StoryEngine<S, V> {
    story: S,
    view: V,
    config: EngineConfig,
    keymap: Keymap,
    ctx: EngineContext,
    title_set: bool,
}

/// Builder for constructing a `StoryEngine`.
pub struct StoryEngineBuilder<S, V> {
    story: S,
    view: V,
    config: Option<EngineConfig>,
    config_path: Option<PathBuf>,
}

impl<S: Story, V: View> StoryEngine<S, V> {
    pub fn builder(story: S, view: V) -> StoryEngineBuilder<S, V> {
        StoryEngineBuilder {
            story,
            view,
            config: None,
            config_path: None,
        }
    }

    /// An engine with the default configuration. Call [`start`](Self::start)
    /// to show the first node.
    pub fn new(story: S, view: V) -> Self {
        Self::with_config(story, view, EngineConfig::default())
    }

    pub fn with_config(story: S, view: V, config: EngineConfig) -> Self {
        let keymap = config.keymap();
        Self {
            story,
            view,
            config,
            keymap,
            ctx: EngineContext::default(),
            title_set: false,
        }
    }

    /// Start (or restart) the story from its starting node.
    pub fn start(&mut self) {
        if !self.title_set {
            let title = self
                .story
                .title()
                .unwrap_or(self.config.title_placeholder.as_str())
                .to_string();
            self.view.set_title(&title);
            self.title_set = true;
        }

        self.ctx.reset();
        self.ctx.playthrough = Playthrough {
            state: StoryState::new(),
            player: self.story.player(),
        };
        self.ctx.roster = self.story.characters();
        self.ctx.pronouns = self.story.pronouns();

        self.story.init(&mut self.ctx.playthrough);
        self.ctx.resolver = Some(self.story.resolver());

        let start = self.story.starting_node().to_string();
        tracing::debug!(node = %start, "starting story");
        if !self.show(&start) {
            tracing::warn!(node = %start, "starting node could not be resolved");
        }
    }

    /// Show `id`. The restart id restarts the story instead.
    ///
    /// Returns false, changing nothing, if the id does not resolve.
    pub fn goto(&mut self, id: &str) -> bool {
        if id == self.config.restart_node {
            self.start();
            return true;
        }
        self.show(id)
    }

    fn show(&mut self, id: &str) -> bool {
        let Some(resolver) = self.ctx.resolver.as_ref() else {
            tracing::warn!(node = id, "story not started, ignoring navigation");
            return false;
        };
        let Some(node) = resolver.resolve(id, &self.ctx.playthrough) else {
            tracing::warn!(node = id, "unresolved node reference");
            return false;
        };

        // Leaving the previous node releases its input binding.
        self.ctx.input = None;

        self.view.scroll_to_top();
        self.ctx.history.push(id);
        self.view.play_entrance();

        let text = TextFormatter::new(
            &self.ctx.roster,
            &self.ctx.pronouns,
            &self.ctx.playthrough.player,
        )
        .format(&node.text);

        let (presentation, visible) = match &node.input {
            Some(mode) => {
                self.ctx.input = Some(InputBinding::bind(id, mode));
                (Presentation::Input, Vec::new())
            }
            None => {
                let visible = choice::visible_indices(&node.choices, &self.ctx.playthrough.state);
                let labels = visible
                    .iter()
                    .map(|&i| {
                        node.choices[i]
                            .display_label(&self.config.default_choice_label)
                            .to_string()
                    })
                    .collect();
                (Presentation::Choices(labels), visible)
            }
        };

        self.ctx.cursor.reset(visible.len());
        self.view.highlight(None);

        let frame = Frame {
            node: id.to_string(),
            text,
            show_back: !node.hide_back,
            presentation,
        };
        self.view.render(&frame);

        tracing::debug!(
            node = id,
            history = self.ctx.history.len(),
            choices = visible.len(),
            input = frame.is_input(),
            "showing node"
        );
        self.ctx.active = Some(ActiveNode { node, visible });
        true
    }

    /// Discard the current node and return to the one before it.
    ///
    /// With no earlier node to return to, the story restarts.
    pub fn go_back(&mut self) {
        let Some(current) = self.ctx.history.pop() else {
            tracing::debug!("history empty, restarting");
            self.start();
            return;
        };
        let Some(previous) = self.ctx.history.pop() else {
            tracing::debug!(from = %current, "history exhausted, restarting");
            self.start();
            return;
        };

        tracing::debug!(from = %current, to = %previous, "going back");
        if !self.goto(&previous) {
            self.ctx.history.push(&previous);
            self.ctx.history.push(&current);
        }
    }

    /// Select the `index`-th visible choice.
    pub fn choose(&mut self, index: usize) -> bool {
        let Some(choice) = self.visible_choice(index) else {
            tracing::debug!(index, "no visible choice at index");
            return false;
        };
        self.select_choice(&choice);
        true
    }

    fn visible_choice(&self, index: usize) -> Option<Choice> {
        let active = self.ctx.active.as_ref()?;
        let &i = active.visible.get(index)?;
        active.node.choices.get(i).cloned()
    }

    /// Apply `choice`: merge its patch, run its hook, then navigate.
    ///
    /// The start target restarts without applying anything.
    pub fn select_choice(&mut self, choice: &Choice) {
        if choice.target == self.config.start_target {
            self.start();
            return;
        }
        choice::apply_effects(choice, &mut self.ctx.playthrough);
        self.goto(&choice.target);
    }

    pub fn move_cursor(&mut self, direction: Direction) -> Option<usize> {
        let selected = self.ctx.cursor.move_by(direction);
        if selected.is_some() {
            self.view.highlight(selected);
        }
        selected
    }

    /// Select the highlighted choice. No-op without a highlight.
    pub fn activate(&mut self) -> bool {
        match self.ctx.cursor.selected() {
            Some(index) => self.choose(index),
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.ctx.cursor.clear();
        self.view.highlight(None);
    }

    /// Take the first visible choice, as a "next page" action.
    pub fn advance(&mut self) -> bool {
        if self.ctx.input.is_some() {
            return false;
        }
        self.choose(0)
    }

    /// Activate the highlight if there is one, otherwise advance.
    pub fn accept(&mut self) -> bool {
        if self.ctx.cursor.selected().is_some() {
            self.activate()
        } else {
            self.advance()
        }
    }

    /// Submit free text to the current input-mode node.
    ///
    /// Fires at most once per presentation; later submits are ignored.
    pub fn submit(&mut self, value: &str) -> bool {
        let Some(binding) = self.ctx.input.take() else {
            tracing::debug!("submit ignored, no input binding");
            return false;
        };
        let target = binding.fire(value, &mut self.ctx.playthrough);
        self.goto(&target)
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Choose(index) => {
                self.choose(index);
            }
            Event::Move(direction) => {
                self.move_cursor(direction);
            }
            Event::Accept => {
                self.accept();
            }
            Event::Back => self.go_back(),
            Event::Submit(value) => {
                self.submit(&value);
            }
            Event::Deselect => self.deselect(),
        }
    }

    /// Translate a key through the keymap and handle it.
    ///
    /// Keys are ignored while an input node owns the keyboard.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.is_awaiting_input() {
            return false;
        }
        let Some(command) = self.keymap.command_for(key) else {
            return false;
        };
        let event = match command {
            Command::Accept => Event::Accept,
            Command::Previous => Event::Move(Direction::Decrease),
            Command::Next => Event::Move(Direction::Increase),
            Command::Back => Event::Back,
            Command::Deselect => Event::Deselect,
        };
        self.handle(event);
        true
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.ctx.input.is_some()
    }

    pub fn current_node(&self) -> Option<&TextNode> {
        self.ctx.active.as_ref().map(|a| &a.node)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_node().map(|n| n.id.as_str())
    }

    pub fn visible_choices(&self) -> Vec<&Choice> {
        self.ctx
            .active
            .as_ref()
            .map(|a| a.visible.iter().map(|&i| &a.node.choices[i]).collect())
            .unwrap_or_default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.ctx.cursor.selected()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.ctx.history
    }

    pub fn state(&self) -> &StoryState {
        &self.ctx.playthrough.state
    }

    pub fn player(&self) -> &Player {
        &self.ctx.playthrough.player
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn story(&self) -> &S {
        &self.story
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

impl<S: Story, V: View> StoryEngineBuilder<S, V> {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a RON file at build time.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> Result<StoryEngine<S, V>, EngineError> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => EngineConfig::load_from_ron(&path)?,
            (None, None) => EngineConfig::default(),
        };
        Ok(StoryEngine::with_config(self.story, self.view, config))
    }
}
