/// Free-text input mode: the one-shot submit binding of an input node.
use crate::schema::node::{InputMode, NodeId, SubmitHook};
use crate::schema::state::Playthrough;

/// Submit binding for one presentation of an input-mode node.
///
/// Firing consumes the binding, so a presentation submits at most once.
/// Dropping it without firing releases it; the engine drops the binding
/// on every navigation away from the node.
#[derive(Debug)]
pub struct InputBinding {
    node: NodeId,
    target: NodeId,
    on_submit: Option<SubmitHook>,
}

impl InputBinding {
    pub fn bind(node: &str, mode: &InputMode) -> Self {
        tracing::trace!(node, target = %mode.target, "input binding acquired");
        Self {
            node: node.to_string(),
            target: mode.target.clone(),
            on_submit: mode.on_submit.clone(),
        }
    }

    /// The node this binding was created for.
    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Run the post-submit hook and hand back the node to go to next.
    pub fn fire(mut self, value: &str, playthrough: &mut Playthrough) -> NodeId {
        if let Some(hook) = self.on_submit.take() {
            hook.call(value, playthrough);
        }
        std::mem::take(&mut self.target)
    }
}

impl Drop for InputBinding {
    fn drop(&mut self) {
        tracing::trace!(node = %self.node, "input binding released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_runs_hook_and_returns_target() {
        let mode = InputMode::to("greeting").on_submit(|value, p| {
            p.player.name = value.trim().to_string();
        });
        let binding = InputBinding::bind("askName", &mode);
        assert_eq!(binding.node(), "askName");
        assert_eq!(binding.target(), "greeting");

        let mut playthrough = Playthrough::default();
        let next = binding.fire("  Ava ", &mut playthrough);
        assert_eq!(next, "greeting");
        assert_eq!(playthrough.player.name, "Ava");
    }

    #[test]
    fn fire_without_hook() {
        let binding = InputBinding::bind("ask", &InputMode::to("next"));
        let mut playthrough = Playthrough::default();
        assert_eq!(binding.fire("ignored", &mut playthrough), "next");
        assert!(playthrough.state.is_empty());
    }
}
