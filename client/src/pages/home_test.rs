use super::*;

#[test]
fn every_intro_step_has_a_slide() {
    for step in 0..INTRO_STEPS {
        let (title, body) = intro_slide(step);
        assert!(!title.is_empty());
        assert!(!body.is_empty());
    }
}

#[test]
fn intro_slide_clamps_past_the_end() {
    assert_eq!(intro_slide(INTRO_STEPS + 3), INTRO_SLIDES[INTRO_STEPS - 1]);
}
