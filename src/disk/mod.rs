/// Game disks: stories shipped as RON documents instead of code.
use std::path::Path;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::node::{Choice, InputMode, NodeId, TextNode};
use crate::schema::roster::{CharacterRoster, PronounTable};
use crate::schema::state::{Player, Playthrough, StatePatch};
use crate::schema::story::{NodeResolver, Story};

pub mod condition;
pub mod template;

use self::condition::Condition;
use self::template::{Template, TemplateError};

#[derive(Debug, Error)]
pub enum DiskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("node '{node}': {source}")]
    Template { node: NodeId, source: TemplateError },
    #[error("start node '{0}' is not defined")]
    MissingStart(NodeId),
}

/// Where an input node puts the submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputStore {
    PlayerName,
    State(String),
}

impl InputStore {
    /// Store the trimmed value; blank submissions leave everything as it was.
    pub fn store(&self, value: &str, playthrough: &mut Playthrough) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match self {
            InputStore::PlayerName => playthrough.player.name = value.to_string(),
            InputStore::State(key) => playthrough.state.insert(key.clone(), value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskChoice {
    pub label: Option<String>,
    pub target: NodeId,
    pub requires: Condition,
    pub set: StatePatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskInput {
    pub target: NodeId,
    pub store: InputStore,
}

/// A node as loaded from a disk, with its templates already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskNode {
    pub text: Template,
    /// Checked in order; the first matching condition replaces `text`.
    pub variants: Vec<(Condition, Template)>,
    pub hide_back: bool,
    pub choices: Vec<DiskChoice>,
    pub input: Option<DiskInput>,
}

impl DiskNode {
    fn template_for(&self, playthrough: &Playthrough) -> &Template {
        self.variants
            .iter()
            .find(|(when, _)| when.evaluate(&playthrough.state))
            .map(|(_, text)| text)
            .unwrap_or(&self.text)
    }

    /// Build the engine-facing node for the current playthrough.
    pub fn to_text_node(&self, id: &str, playthrough: &Playthrough) -> TextNode {
        let mut node = TextNode::new(id, self.template_for(playthrough).render(playthrough));
        if self.hide_back {
            node = node.hide_back();
        }

        for disk_choice in &self.choices {
            let mut choice = Choice::to(disk_choice.target.as_str());
            if let Some(label) = &disk_choice.label {
                choice = choice.label(label.as_str());
            }
            if disk_choice.requires != Condition::Always {
                choice = choice.requires_predicate(disk_choice.requires.clone().into_predicate());
            }
            if !disk_choice.set.is_empty() {
                choice = choice.set_state(disk_choice.set.clone());
            }
            node = node.choice(choice);
        }

        if let Some(input) = &self.input {
            let store = input.store.clone();
            node = node.input(
                InputMode::to(input.target.as_str())
                    .on_submit(move |value, playthrough| store.store(value, playthrough)),
            );
        }

        node
    }
}

// RON deserialization helpers. Text fields are raw template strings here
// and get parsed into `Template`s on load.

#[derive(Debug, Deserialize)]
#[serde(rename = "Variant")]
struct RonVariant {
    when: Condition,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Choice")]
struct RonChoice {
    #[serde(default)]
    label: Option<String>,
    target: String,
    #[serde(default)]
    requires: Condition,
    #[serde(default)]
    set: StatePatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Input")]
struct RonInput {
    target: String,
    store: InputStore,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Node")]
struct RonNode {
    text: String,
    #[serde(default)]
    variants: Vec<RonVariant>,
    #[serde(default)]
    hide_back: bool,
    #[serde(default)]
    choices: Vec<RonChoice>,
    #[serde(default)]
    input: Option<RonInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Disk")]
struct RonDisk {
    #[serde(default)]
    title: Option<String>,
    start: String,
    #[serde(default)]
    player: Player,
    #[serde(default)]
    characters: CharacterRoster,
    #[serde(default)]
    pronouns: Option<PronounTable>,
    #[serde(default)]
    initial_state: StatePatch,
    nodes: FxHashMap<String, RonNode>,
}

/// A story loaded from a RON game disk.
#[derive(Debug, Clone)]
pub struct DiskStory {
    title: Option<String>,
    start: NodeId,
    player: Player,
    characters: CharacterRoster,
    pronouns: Option<PronounTable>,
    initial_state: StatePatch,
    nodes: Rc<FxHashMap<NodeId, DiskNode>>,
}

impl DiskStory {
    /// Load a game disk from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<DiskStory, DiskError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a game disk from a RON string.
    pub fn parse_ron(input: &str) -> Result<DiskStory, DiskError> {
        let raw: RonDisk = ron::from_str(input)?;

        if !raw.nodes.contains_key(&raw.start) {
            return Err(DiskError::MissingStart(raw.start));
        }

        let mut nodes = FxHashMap::default();
        for (id, ron_node) in raw.nodes {
            let node = Self::compile_node(&id, ron_node)
                .map_err(|source| DiskError::Template { node: id.clone(), source })?;
            nodes.insert(id, node);
        }

        tracing::debug!(nodes = nodes.len(), start = %raw.start, "game disk loaded");

        Ok(DiskStory {
            title: raw.title,
            start: raw.start,
            player: raw.player,
            characters: raw.characters,
            pronouns: raw.pronouns,
            initial_state: raw.initial_state,
            nodes: Rc::new(nodes),
        })
    }

    fn compile_node(id: &str, raw: RonNode) -> Result<DiskNode, TemplateError> {
        let text = Template::parse(&raw.text)?;
        let variants = raw
            .variants
            .into_iter()
            .map(|variant| Ok((variant.when, Template::parse(&variant.text)?)))
            .collect::<Result<Vec<_>, TemplateError>>()?;

        let choices = raw
            .choices
            .into_iter()
            .map(|choice| DiskChoice {
                label: choice.label,
                target: choice.target,
                requires: choice.requires,
                set: choice.set,
            })
            .collect();

        let input = raw.input.map(|input| DiskInput {
            target: input.target,
            store: input.store,
        });

        tracing::trace!(node = id, "compiled disk node");

        Ok(DiskNode {
            text,
            variants,
            hide_back: raw.hide_back,
            choices,
            input,
        })
    }

    pub fn node(&self, id: &str) -> Option<&DiskNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Choice and input targets that name no node on this disk, as
    /// `(from, to)` pairs sorted by source node. Ids in `reserved` are
    /// handled by the engine and never reported.
    pub fn dangling_targets(&self, reserved: &[&str]) -> Vec<(NodeId, NodeId)> {
        let mut dangling = Vec::new();
        for (id, node) in self.nodes.iter() {
            let targets = node
                .choices
                .iter()
                .map(|choice| &choice.target)
                .chain(node.input.iter().map(|input| &input.target));
            for target in targets {
                if !self.nodes.contains_key(target) && !reserved.contains(&target.as_str()) {
                    dangling.push((id.clone(), target.clone()));
                }
            }
        }
        dangling.sort();
        dangling
    }
}

struct DiskResolver {
    nodes: Rc<FxHashMap<NodeId, DiskNode>>,
}

impl NodeResolver for DiskResolver {
    fn resolve(&self, id: &str, playthrough: &Playthrough) -> Option<TextNode> {
        self.nodes
            .get(id)
            .map(|node| node.to_text_node(id, playthrough))
    }
}

impl Story for DiskStory {
    fn starting_node(&self) -> &str {
        &self.start
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn player(&self) -> Player {
        self.player.clone()
    }

    fn characters(&self) -> CharacterRoster {
        self.characters.clone()
    }

    fn pronouns(&self) -> PronounTable {
        self.pronouns.clone().unwrap_or_else(PronounTable::english)
    }

    fn init(&self, playthrough: &mut Playthrough) {
        playthrough.state.merge(&self.initial_state);
    }

    fn resolver(&self) -> Box<dyn NodeResolver> {
        Box::new(DiskResolver {
            nodes: Rc::clone(&self.nodes),
        })
    }
}
