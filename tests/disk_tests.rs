/// Game disk loading and play-through integration tests.

use std::path::Path;

use cyoa_engine::core::autoplay::AutoPlayer;
use cyoa_engine::core::config::EngineConfig;
use cyoa_engine::core::engine::StoryEngine;
use cyoa_engine::core::keymap::Key;
use cyoa_engine::core::view::RecordingView;
use cyoa_engine::disk::{DiskError, DiskStory};
use cyoa_engine::schema::story::Story;

fn simple_choice() -> DiskStory {
    DiskStory::load_from_ron(Path::new("tests/fixtures/simple_choice.ron")).unwrap()
}

fn text(engine: &StoryEngine<DiskStory, RecordingView>) -> String {
    engine.view().last_frame().unwrap().text.clone()
}

fn labels(engine: &StoryEngine<DiskStory, RecordingView>) -> Vec<String> {
    engine.view().last_frame().unwrap().labels().to_vec()
}

#[test]
fn simple_choice_disk_loads() {
    let disk = simple_choice();
    assert_eq!(disk.len(), 6);
    assert_eq!(disk.title(), Some("The Simple Choice"));
    assert_eq!(disk.starting_node(), "intro");
    assert_eq!(disk.player().name, "Wanderer");
    assert_eq!(disk.characters().gender_of("mira"), Some("female"));
    // "restart" is handled by the engine, so the disk has no broken links.
    let config = EngineConfig::default();
    assert!(disk.dangling_targets(&config.reserved_targets()).is_empty());
    assert_eq!(
        disk.dangling_targets(&[]),
        vec![("secretEnding".to_string(), "restart".to_string())]
    );
}

#[test]
fn simple_choice_disk_plays_through() {
    let mut engine = StoryEngine::new(simple_choice(), RecordingView::new());
    engine.start();

    assert_eq!(engine.view().title.as_deref(), Some("The Simple Choice"));
    assert_eq!(
        text(&engine),
        "Welcome! This is a tiny demonstration.<br><br>Press <u>Next</u> (or Enter/Space) to continue."
    );
    assert!(!engine.view().last_frame().unwrap().show_back);
    assert!(!engine.state().is_set("hasKey"));

    engine.handle_key(Key::Space);
    assert!(engine.is_awaiting_input());

    engine.submit("  Ava  ");
    assert_eq!(engine.player().name, "Ava");
    assert_eq!(
        text(&engine),
        "Hello, <b>Ava</b>! You find yourself in a room with two doors.<br>\
         One is <i>red</i>, the other is <i>blue</i>. Your guide Mira waits by her lamp."
    );

    engine.choose(0);
    assert_eq!(engine.current_id(), Some("redRoom"));
    assert!(engine.state().is_set("choseRed"));
    assert_eq!(labels(&engine), ["Go back"]);

    engine.choose(0);
    engine.choose(1);
    engine.choose(0);
    assert!(engine.state().is_set("hasKey"));
    assert_eq!(
        text(&engine),
        "Welcome back, <b>Ava</b>. She eyes the key in your hand.<br>\
         One door is <i>red</i>, the other is <i>blue</i>."
    );

    engine.choose(0);
    assert_eq!(labels(&engine), ["Go back", "Check for secrets (requires key)"]);
    engine.choose(1);
    assert_eq!(engine.current_id(), Some("secretEnding"));
    assert!(text(&engine).contains("<b>Congratulations, Ava!</b>"));

    engine.choose(0);
    assert_eq!(engine.current_id(), Some("intro"));
    assert_eq!(engine.history().len(), 1);
    assert!(!engine.state().is_set("hasKey"));
    assert_eq!(engine.player().name, "Wanderer");
}

#[test]
fn autoplay_is_repeatable() {
    let walk = |seed| {
        let mut engine = StoryEngine::new(simple_choice(), RecordingView::new());
        engine.start();
        AutoPlayer::new(seed).run(&mut engine, 20)
    };
    let first = walk(9);
    assert_eq!(first, walk(9));
    assert_eq!(first[0], "intro");
    assert_eq!(first[1], "askName");
    assert_eq!(first[2], "greeting");
}

#[test]
fn config_fixture_drives_engine() {
    let mut engine = StoryEngine::builder(simple_choice(), RecordingView::new())
        .config_path("tests/fixtures/engine_config.ron")
        .build()
        .unwrap();
    engine.start();

    assert_eq!(engine.config().default_choice_label, "Continue");
    assert_eq!(labels(&engine), ["Continue"]);
    // Title comes from the disk, not the placeholder.
    assert_eq!(engine.view().title.as_deref(), Some("The Simple Choice"));

    assert!(!engine.handle_key(Key::Space));
    assert!(engine.handle_key(Key::Enter));
    engine.submit("Ava");

    assert!(engine.handle_key(Key::Char('l')));
    assert_eq!(engine.selected(), Some(0));
    assert!(engine.handle_key(Key::Char('j')));
    assert_eq!(engine.selected(), Some(1));
}

#[test]
fn missing_disk_file() {
    let err = DiskStory::load_from_ron(Path::new("tests/fixtures/no_such_disk.ron")).unwrap_err();
    assert!(matches!(err, DiskError::Io(_)));
}

#[test]
fn malformed_disk() {
    let err = DiskStory::parse_ron("Disk(start: \"a\", nodes: {\"a\": Node(txt: \"A\")})").unwrap_err();
    assert!(matches!(err, DiskError::Ron(_)));
}

#[test]
fn template_error_names_node() {
    let err = DiskStory::parse_ron(
        r#"Disk(start: "a", nodes: {"a": Node(text: "ok"), "b": Node(text: "Hi {player.age}")})"#,
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("node 'b':"), "{}", err);
}
