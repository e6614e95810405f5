/// Unattended play: picks random visible choices with a seeded RNG.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::engine::StoryEngine;
use crate::core::view::View;
use crate::schema::story::Story;

/// Names submitted to input-mode nodes when none were configured.
pub const DEFAULT_NAMES: &[&str] = &["Ava", "Kit", "Rowan", "Sol"];

/// The outcome of one automatic move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Chose { index: usize, node: String },
    Submitted { value: String, node: String },
    /// No visible choices and no input: the story ends here.
    DeadEnd,
    /// The move was made but the engine did not navigate.
    Stalled,
}

pub struct AutoPlayer {
    rng: StdRng,
    names: Vec<String>,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            names: DEFAULT_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn step<S: Story, V: View>(&mut self, engine: &mut StoryEngine<S, V>) -> Step {
        if engine.is_awaiting_input() {
            let value = self
                .names
                .choose(&mut self.rng)
                .cloned()
                .unwrap_or_default();
            if !engine.submit(&value) {
                return Step::Stalled;
            }
            return Step::Submitted {
                value,
                node: engine.current_id().unwrap_or_default().to_string(),
            };
        }

        let count = engine.visible_choices().len();
        if count == 0 {
            return Step::DeadEnd;
        }
        let index = self.rng.gen_range(0..count);
        if !engine.choose(index) {
            return Step::Stalled;
        }
        Step::Chose {
            index,
            node: engine.current_id().unwrap_or_default().to_string(),
        }
    }

    /// Play up to `max_steps` moves. Returns the visited node ids,
    /// starting with the current one.
    pub fn run<S: Story, V: View>(
        &mut self,
        engine: &mut StoryEngine<S, V>,
        max_steps: usize,
    ) -> Vec<String> {
        let mut visited: Vec<String> = engine.current_id().map(str::to_string).into_iter().collect();
        for _ in 0..max_steps {
            match self.step(engine) {
                Step::Chose { node, .. } | Step::Submitted { node, .. } => visited.push(node),
                Step::DeadEnd | Step::Stalled => break,
            }
        }
        tracing::debug!(steps = visited.len(), "autoplay finished");
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::NullView;
    use crate::schema::node::{Choice, InputMode, TextNode};
    use crate::schema::state::Playthrough;
    use crate::schema::story::{NodeResolver, NodeTable};

    struct Maze;

    impl Story for Maze {
        fn starting_node(&self) -> &str {
            "hall"
        }

        fn resolver(&self) -> Box<dyn NodeResolver> {
            Box::new(
                NodeTable::new()
                    .node("hall", |_| {
                        TextNode::new("hall", "A hall.")
                            .choice(Choice::to("left"))
                            .choice(Choice::to("right"))
                            .choice(Choice::to("name"))
                    })
                    .node("left", |_| TextNode::new("left", "Left.").choice(Choice::to("hall")))
                    .node("right", |_| TextNode::new("right", "Right.").choice(Choice::to("hall")))
                    .node("name", |_| {
                        TextNode::new("name", "Name?").input(
                            InputMode::to("exit").on_submit(|v, p: &mut Playthrough| {
                                p.player.name = v.to_string()
                            }),
                        )
                    })
                    .node("exit", |_| TextNode::new("exit", "The end.")),
            )
        }
    }

    fn walk(seed: u64) -> Vec<String> {
        let mut engine = StoryEngine::new(Maze, NullView);
        engine.start();
        AutoPlayer::new(seed).run(&mut engine, 50)
    }

    #[test]
    fn same_seed_same_walk() {
        assert_eq!(walk(7), walk(7));
    }

    #[test]
    fn walk_starts_at_current_node_and_stops_at_dead_end() {
        let visited = walk(3);
        assert_eq!(visited.first().map(String::as_str), Some("hall"));
        if visited.len() < 51 {
            assert_eq!(visited.last().map(String::as_str), Some("exit"));
        }
    }

    #[test]
    fn input_nodes_get_a_name() {
        let mut engine = StoryEngine::new(Maze, NullView);
        engine.start();
        engine.goto("name");
        let step = AutoPlayer::new(1).with_names(&["Ava"]).step(&mut engine);
        assert_eq!(
            step,
            Step::Submitted {
                value: "Ava".to_string(),
                node: "exit".to_string()
            }
        );
        assert_eq!(engine.player().name, "Ava");
    }

    #[test]
    fn dead_end_reported() {
        let mut engine = StoryEngine::new(Maze, NullView);
        engine.start();
        engine.goto("exit");
        assert_eq!(AutoPlayer::new(0).step(&mut engine), Step::DeadEnd);
    }
}
