use crate::schema::node::NodeId;

/// Back-stack of visited node ids.
///
/// The same id is never stored twice in a row, so re-rendering the current
/// node does not grow the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    stack: Vec<NodeId>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `id` unless it is already on top. Returns whether it was pushed.
    pub fn push(&mut self, id: &str) -> bool {
        if self.top() == Some(id) {
            return false;
        }
        self.stack.push(id.to_string());
        true
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.stack
    }
}
