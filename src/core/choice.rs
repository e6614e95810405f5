/// Choice evaluation: visibility filtering and effect application.
use crate::schema::node::Choice;
use crate::schema::state::{Playthrough, StoryState};

/// A choice with no predicate is always visible.
pub fn is_visible(choice: &Choice, state: &StoryState) -> bool {
    choice
        .requires
        .as_ref()
        .map_or(true, |predicate| predicate.test(state))
}

/// Indices of the visible choices, in authored order.
pub fn visible_indices(choices: &[Choice], state: &StoryState) -> Vec<usize> {
    choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| is_visible(choice, state))
        .map(|(i, _)| i)
        .collect()
}

/// The visible choices, in authored order.
pub fn visible_choices<'a>(choices: &'a [Choice], state: &StoryState) -> Vec<&'a Choice> {
    choices
        .iter()
        .filter(|choice| is_visible(choice, state))
        .collect()
}

/// Merge the choice's patch, then run its side effect.
///
/// The hook observes the merged state.
pub fn apply_effects(choice: &Choice, playthrough: &mut Playthrough) {
    if let Some(patch) = &choice.set_state {
        playthrough.state.merge(patch);
    }
    if let Some(hook) = &choice.on_select {
        hook.call(playthrough);
    }
}
