/// Story definitions: the boundary between authored content and the engine.
use rustc_hash::FxHashMap;
use std::rc::Rc;

use super::node::TextNode;
use super::roster::{CharacterRoster, PronounTable};
use super::state::{Player, Playthrough};

/// Produces nodes on demand. The same id may yield different content
/// depending on the playthrough.
pub trait NodeResolver {
    fn resolve(&self, id: &str, playthrough: &Playthrough) -> Option<TextNode>;
}

impl<F> NodeResolver for F
where
    F: Fn(&str, &Playthrough) -> Option<TextNode>,
{
    fn resolve(&self, id: &str, playthrough: &Playthrough) -> Option<TextNode> {
        self(id, playthrough)
    }
}

type NodeFn = Rc<dyn Fn(&Playthrough) -> TextNode>;

/// A resolver backed by one closure per node id.
#[derive(Clone, Default)]
pub struct NodeTable {
    nodes: FxHashMap<String, NodeFn>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(
        mut self,
        id: impl Into<String>,
        f: impl Fn(&Playthrough) -> TextNode + 'static,
    ) -> Self {
        self.nodes.insert(id.into(), Rc::new(f));
        self
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
}

impl NodeResolver for NodeTable {
    fn resolve(&self, id: &str, playthrough: &Playthrough) -> Option<TextNode> {
        self.nodes.get(id).map(|f| f(playthrough))
    }
}

/// A story the engine can play.
///
/// On every start or restart the engine calls [`init`](Story::init) and
/// then [`resolver`](Story::resolver), each exactly once.
pub trait Story {
    fn starting_node(&self) -> &str;

    fn title(&self) -> Option<&str> {
        None
    }

    fn player(&self) -> Player {
        Player::default()
    }

    fn characters(&self) -> CharacterRoster {
        CharacterRoster::default()
    }

    fn pronouns(&self) -> PronounTable {
        PronounTable::english()
    }

    fn init(&self, _playthrough: &mut Playthrough) {}

    fn resolver(&self) -> Box<dyn NodeResolver>;
}
