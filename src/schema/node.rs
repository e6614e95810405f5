use std::fmt;
use std::rc::Rc;

use super::state::{Playthrough, StatePatch, StoryState};

/// Identifier of a text node.
pub type NodeId = String;

/// Visibility predicate over story state.
#[derive(Clone)]
pub struct Predicate(Rc<dyn Fn(&StoryState) -> bool>);

impl Predicate {
    pub fn new(f: impl Fn(&StoryState) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Passes when `key` holds exactly `true`.
    pub fn flag(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(move |state| state.is_set(&key))
    }

    pub fn test(&self, state: &StoryState) -> bool {
        (self.0)(state)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// Side effect run after a choice's state patch is merged.
#[derive(Clone)]
pub struct SelectHook(Rc<dyn Fn(&mut Playthrough)>);

impl SelectHook {
    pub fn new(f: impl Fn(&mut Playthrough) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, playthrough: &mut Playthrough) {
        (self.0)(playthrough)
    }
}

impl fmt::Debug for SelectHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectHook(..)")
    }
}

/// Hook receiving the submitted text of an input-mode node.
#[derive(Clone)]
pub struct SubmitHook(Rc<dyn Fn(&str, &mut Playthrough)>);

impl SubmitHook {
    pub fn new(f: impl Fn(&str, &mut Playthrough) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, value: &str, playthrough: &mut Playthrough) {
        (self.0)(value, playthrough)
    }
}

impl fmt::Debug for SubmitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitHook(..)")
    }
}

/// An authored option on a node.
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: Option<String>,
    pub target: NodeId,
    pub requires: Option<Predicate>,
    pub set_state: Option<StatePatch>,
    pub on_select: Option<SelectHook>,
}

impl Choice {
    /// A choice leading to `target` with the default label.
    pub fn to(target: impl Into<NodeId>) -> Self {
        Self {
            label: None,
            target: target.into(),
            requires: None,
            set_state: None,
            on_select: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn requires(mut self, f: impl Fn(&StoryState) -> bool + 'static) -> Self {
        self.requires = Some(Predicate::new(f));
        self
    }

    pub fn requires_predicate(mut self, predicate: Predicate) -> Self {
        self.requires = Some(predicate);
        self
    }

    pub fn set_state(mut self, patch: StatePatch) -> Self {
        self.set_state = Some(patch);
        self
    }

    pub fn on_select(mut self, f: impl Fn(&mut Playthrough) + 'static) -> Self {
        self.on_select = Some(SelectHook::new(f));
        self
    }

    /// The label to show, falling back to `default` when none was authored.
    pub fn display_label<'a>(&'a self, default: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(default)
    }
}

/// Free-text entry shown instead of a choice list.
#[derive(Debug, Clone)]
pub struct InputMode {
    pub target: NodeId,
    pub on_submit: Option<SubmitHook>,
}

impl InputMode {
    pub fn to(target: impl Into<NodeId>) -> Self {
        Self {
            target: target.into(),
            on_submit: None,
        }
    }

    pub fn on_submit(mut self, f: impl Fn(&str, &mut Playthrough) + 'static) -> Self {
        self.on_submit = Some(SubmitHook::new(f));
        self
    }
}

/// One narrative beat, produced fresh by a resolver on every visit.
#[derive(Debug, Clone)]
pub struct TextNode {
    pub id: NodeId,
    pub text: String,
    pub hide_back: bool,
    pub choices: Vec<Choice>,
    pub input: Option<InputMode>,
}

impl TextNode {
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            hide_back: false,
            choices: Vec::new(),
            input: None,
        }
    }

    pub fn hide_back(mut self) -> Self {
        self.hide_back = true;
        self
    }

    pub fn choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn input(mut self, input: InputMode) -> Self {
        self.input = Some(input);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_label_is_used_when_missing() {
        let unlabeled = Choice::to("next");
        let labeled = Choice::to("redRoom").label("Open the red door");
        assert_eq!(unlabeled.display_label("Next"), "Next");
        assert_eq!(labeled.display_label("Next"), "Open the red door");
    }

    #[test]
    fn flag_predicate() {
        let predicate = Predicate::flag("hasKey");
        let mut state = StoryState::new();
        assert!(!predicate.test(&state));
        state.insert("hasKey", true);
        assert!(predicate.test(&state));
    }

    #[test]
    fn node_builder() {
        let node = TextNode::new("intro", "Welcome!")
            .hide_back()
            .choice(Choice::to("askName"));
        assert_eq!(node.id, "intro");
        assert!(node.hide_back);
        assert_eq!(node.choices.len(), 1);
        assert!(node.input.is_none());
    }
}
