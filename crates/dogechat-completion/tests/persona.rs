use dogechat_completion::persona::{
    DEFAULT_FILLERS, PersonaPolicy, failure_line, meme_placeholder, system_prompt,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn reply_without_marker_gets_filler() {
    let policy = PersonaPolicy::stfudoge().unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    let out = policy.enforce_suffix("Buy the dip, peasant.", &mut rng);
    assert!(out.starts_with("Buy the dip, peasant. "));
    assert!(
        DEFAULT_FILLERS.iter().any(|f| out.ends_with(f)),
        "unexpected suffix: {out}"
    );
}

#[test]
fn reply_with_marker_is_untouched() {
    let policy = PersonaPolicy::stfudoge().unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for reply in [
        "Go away. such annoying. wow.",
        "Fine! much patience. very wow.",
        "Whatever. wow.",
        "HODL. SUCH GAINS. WOW.",
    ] {
        assert_eq!(policy.enforce_suffix(reply, &mut rng), reply);
    }
}

#[test]
fn custom_markers_and_fillers() {
    let policy = PersonaPolicy::new([r"meow\.$"], vec!["meow.".to_string()]).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    assert_eq!(policy.enforce_suffix("cat says meow.", &mut rng), "cat says meow.");
    assert_eq!(policy.enforce_suffix("cat says hi", &mut rng), "cat says hi meow.");
}

#[test]
fn policy_requires_fillers_and_valid_markers() {
    assert!(PersonaPolicy::new([r"wow\.$"], Vec::new()).is_err());
    assert!(PersonaPolicy::new([r"(unclosed"], vec!["x".to_string()]).is_err());
}

#[test]
fn system_prompt_reflects_tier() {
    assert!(system_prompt(true).ends_with("Current user status: VERIFIED $STFU Holder"));
    assert!(system_prompt(false).ends_with("Current user status: PEASANT (No $STFU)"));
}

#[test]
fn failure_line_carries_reason() {
    let line = failure_line("upstream returned 502: bad gateway");
    assert!(line.contains("upstream returned 502: bad gateway"));
    assert!(line.ends_with("much error. wow."));
}

#[test]
fn meme_placeholder_truncates_reply() {
    let reply = "x".repeat(80);
    let text = meme_placeholder("moon?", &reply);
    assert!(text.contains(&format!("{}...", "x".repeat(50))));
    assert!(!text.contains(&"x".repeat(51)));
}
