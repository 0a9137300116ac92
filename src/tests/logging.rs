use super::*;

#[test]
fn logging_disabled_by_default() {
    let c = apply_rules(SCENARIO, &Options::default());
    assert_eq!(c.substitutions(), 2);
    assert!(c.log.is_empty());
}

#[test]
fn one_entry_per_substitution() {
    let c = apply_rules(SCENARIO, &logging_opts(10));
    assert_eq!(c.log.len(), 2);
    assert_eq!(c.log[0].rule, "nested-array-wrapper");
    assert_eq!(c.log[0].position, 7);
    assert_eq!(c.log[0].context, "[{\"a\":1}\n  [\n    ");
    // positions of later rules refer to the text after earlier rules ran
    assert_eq!(c.log[1].rule, "trailing-double-close");
    assert_eq!(c.log[1].position, 18);
}

#[test]
fn context_window_limits_snippet() {
    let c = apply_rules(SCENARIO, &logging_opts(2));
    assert_eq!(c.log[0].context, ":1}\n");

    let c = apply_rules(SCENARIO, &logging_opts(0));
    assert_eq!(c.log[0].context, "");
}

#[test]
fn positions_are_character_offsets() {
    let input = "[{\"k\":\"é\"}\n[\n{\"k\":2}\n]\n]";
    let c = apply_rules(input, &logging_opts(3));
    assert_eq!(c.log[0].position, 9);
    assert_eq!(c.log[0].context, "\"é\"}\n[");
}

#[test]
fn repeated_matches_logged_in_order() {
    let input = "[{\"id\":1}\n[\n{\"id\":2}\n[\n{\"id\":3}\n]\n]\n]";
    let c = apply_rules(input, &logging_opts(1));
    let positions: Vec<usize> = c.log.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![8, 19]);
    assert!(c.log.iter().all(|e| e.rule == "nested-array-wrapper"));
}

#[test]
fn log_carried_on_file_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), SCENARIO);
    let opts = Options {
        logging: true,
        ..Options::for_input(&input)
    };
    let outcome = fix_file(&opts).unwrap();
    assert_eq!(outcome.log().len(), 2);
    assert_eq!(
        outcome.applied(),
        &[
            ("nested-array-wrapper".to_string(), 1),
            ("trailing-double-close".to_string(), 1)
        ]
    );
}
