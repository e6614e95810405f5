/// Simple Choice example: a tiny code-defined story, played by a script.
///
/// intro → name entry → two doors; the blue room holds a key that unlocks
/// a secret in the red room.
///
/// Run with: cargo run --example simple_choice

use cyoa_engine::core::engine::{Event, StoryEngine};
use cyoa_engine::core::view::{Frame, Presentation, View};
use cyoa_engine::schema::node::{Choice, InputMode, TextNode};
use cyoa_engine::schema::state::{Player, Playthrough, StatePatch};
use cyoa_engine::schema::story::{NodeResolver, NodeTable, Story};

struct SimpleChoice;

impl Story for SimpleChoice {
    fn starting_node(&self) -> &str {
        "intro"
    }

    fn title(&self) -> Option<&str> {
        Some("The Simple Choice")
    }

    fn player(&self) -> Player {
        Player::named("Wanderer")
    }

    fn resolver(&self) -> Box<dyn NodeResolver> {
        Box::new(
            NodeTable::new()
                .node("intro", |_| {
                    TextNode::new(
                        "intro",
                        "Welcome! This is a tiny demonstration.\n\nPress __Next__ (or Enter/Space) to continue.",
                    )
                    .hide_back()
                    .choice(Choice::to("askName"))
                })
                .node("askName", |_| {
                    TextNode::new("askName", "What is your name?").input(
                        InputMode::to("greeting").on_submit(|value, p: &mut Playthrough| {
                            let name = value.trim();
                            if !name.is_empty() {
                                p.player.name = name.to_string();
                            }
                        }),
                    )
                })
                .node("greeting", |p| {
                    TextNode::new(
                        "greeting",
                        format!(
                            "Hello, **{}**! You find yourself in a room with two doors.\nOne is *red*, the other is *blue*.",
                            p.player.name
                        ),
                    )
                    .choice(
                        Choice::to("redRoom")
                            .label("Open the red door")
                            .set_state(StatePatch::new().with("choseRed", true)),
                    )
                    .choice(
                        Choice::to("blueRoom")
                            .label("Open the blue door")
                            .set_state(StatePatch::new().with("choseBlue", true)),
                    )
                })
                .node("redRoom", |_| {
                    TextNode::new(
                        "redRoom",
                        "You enter a room that is entirely red. It feels warm.\nThere's nothing else here.",
                    )
                    .choice(Choice::to("greeting").label("Go back"))
                    .choice(
                        Choice::to("secretEnding")
                            .label("Check for secrets (requires key)")
                            .requires(|state| state.is_set("hasKey")),
                    )
                })
                .node("blueRoom", |_| {
                    TextNode::new(
                        "blueRoom",
                        "You enter a room that is entirely blue. It feels cool.\nYou find a small **key**!",
                    )
                    .choice(
                        Choice::to("greeting")
                            .label("Take the key and go back")
                            .set_state(StatePatch::new().with("hasKey", true)),
                    )
                })
                .node("secretEnding", |p| {
                    TextNode::new(
                        "secretEnding",
                        format!(
                            "Using the key you found in the blue room, you unlock a hidden panel in the red room!\n\n**Congratulations, {}!** You found the secret exit!",
                            p.player.name
                        ),
                    )
                    .choice(Choice::to("restart").label("Play Again?"))
                }),
        )
    }
}

/// Prints frames as plain text.
struct PrintView;

impl View for PrintView {
    fn set_title(&mut self, title: &str) {
        println!("========================================");
        println!("   {}", title);
        println!("========================================");
    }

    fn render(&mut self, frame: &Frame) {
        println!();
        println!("[{}]", frame.node);
        println!("{}", frame.text.replace("<br>", "\n"));
        match &frame.presentation {
            Presentation::Input => println!("  > ..."),
            Presentation::Choices(labels) => {
                for (i, label) in labels.iter().enumerate() {
                    println!("  {}. {}", i + 1, label);
                }
            }
        }
    }
}

fn main() {
    let mut engine = StoryEngine::new(SimpleChoice, PrintView);
    engine.start();

    let script = [
        Event::Accept,
        Event::Submit("Ava".to_string()),
        Event::Choose(0),
        Event::Back,
        Event::Choose(1),
        Event::Choose(0),
        Event::Choose(0),
        Event::Choose(1),
    ];

    for event in script {
        println!("\n>>> {:?}", event);
        engine.handle(event);
    }

    println!();
    println!("Visited: {}", engine.history().as_slice().join(" -> "));
}
