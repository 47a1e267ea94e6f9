use super::*;
use crate::testing::{TestRepo, added, deleted, modified, renamed};

fn history(repo: &TestRepo) {
    // 0 | 1,2 | 3,4 | 5 | rename 0 -> 6
    repo.make_commit(&["0"]);
    repo.make_commit(&["1", "2"]);
    repo.make_commit(&["3", "4"]);
    repo.make_commit(&["5"]);
    repo.git.run(&["mv", "0", "6"]).unwrap();
    repo.git.run(&["commit", "--quiet", "-am", "6"]).unwrap();
}

#[test]
fn splitting_a_span_emits_one_commit_per_path() {
    let repo = TestRepo::new();
    history(&repo);
    let before = repo.git.rev_parse("HEAD").unwrap();

    run(&repo.git, Some("HEAD~~~")).unwrap();

    assert_eq!(
        repo.subjects(),
        vec![
            "[split] Renamed 0 -> 6",
            "[split] Added 5",
            "[split] Added 4",
            "[split] Added 3",
            "1_2",
            "0",
        ]
    );
    // the rewritten head reproduces the original tree exactly
    let difference = repo.git.run(&["diff", "--name-only", &before, "HEAD"]).unwrap();
    assert_eq!(difference, Vec::<String>::new());
    assert!(!repo.git.is_workspace_dirty());
}

#[test]
fn numeric_bases_split_the_same_span() {
    let repo = TestRepo::new();
    history(&repo);
    run(&repo.git, Some("3")).unwrap();
    assert_eq!(
        repo.subjects(),
        vec![
            "[split] Renamed 0 -> 6",
            "[split] Added 5",
            "[split] Added 4",
            "[split] Added 3",
            "1_2",
            "0",
        ]
    );
}

#[test]
fn splitting_with_no_base_decomposes_the_head_commit() {
    let repo = TestRepo::new();
    repo.make_commit(&["0", "1", "2"]);
    repo.make_commit(&["3", "4", "5"]);
    run(&repo.git, None).unwrap();
    assert_eq!(
        repo.subjects(),
        vec![
            "[split] Added 5",
            "[split] Added 4",
            "[split] Added 3",
            "0_1_2",
        ]
    );
}

#[test]
fn splitting_the_dirty_workspace() {
    let repo = TestRepo::new();
    repo.make_commit(&["0"]);
    repo.make_commit(&["1"]);
    repo.make_commit(&["2"]);
    repo.write_files(&["3", "4"]);
    repo.add(&["3"]);
    repo.git.run(&["mv", "1", "5"]).unwrap();
    repo.git.run(&["rm", "--quiet", "0"]).unwrap();

    run(&repo.git, None).unwrap();

    assert_eq!(
        repo.subjects(),
        vec![
            "[split] Added 4",
            "[split] Renamed 1 -> 5",
            "[split] Added 3",
            "[split] Deleted 0",
            "2",
            "1",
            "0",
        ]
    );
    assert_eq!(
        repo.git.run(&["status", "--porcelain"]).unwrap(),
        Vec::<String>::new()
    );
}

#[test]
fn base_equal_to_head_is_a_no_op() {
    let repo = TestRepo::new();
    repo.make_commit(&["0"]);
    repo.make_commit(&["1"]);
    let before = repo.git.rev_parse("HEAD").unwrap();
    run(&repo.git, Some("HEAD")).unwrap();
    assert_eq!(repo.git.rev_parse("HEAD").unwrap(), before);
    assert_eq!(repo.subjects(), vec!["1", "0"]);
}

#[test]
fn splitting_from_the_root_commit_fails_without_touching_history() {
    let repo = TestRepo::new();
    repo.make_commit(&["0"]);
    repo.make_commit(&["1", "2"]);
    assert!(matches!(
        run(&repo.git, Some("HEAD~")),
        Err(Error::UnknownReference(_))
    ));
    assert_eq!(repo.subjects(), vec!["1_2", "0"]);
}

#[test]
fn a_dirty_workspace_blocks_span_splits() {
    let repo = TestRepo::new();
    repo.make_commit(&["0"]);
    repo.make_commit(&["1"]);
    repo.write("0", "changed\n");
    let err = run(&repo.git, Some("HEAD~")).unwrap_err();
    assert_eq!(err.to_string(), "Your local changes would be overwritten");
    assert_eq!(repo.subjects(), vec!["1", "0"]);
}

#[test]
fn plans_preserve_commit_boundaries_over_path_order() {
    let sets = vec![
        ("c1".to_string(), vec![added("z")]),
        ("c2".to_string(), vec![added("a")]),
    ];
    let plan = plan_span(sets);
    let messages: Vec<&str> = plan.iter().map(|entry| entry.message.as_str()).collect();
    assert_eq!(messages, vec!["[split] Added z", "[split] Added a"]);
    assert_eq!(plan[0].source.as_deref(), Some("c1"));
    assert_eq!(plan[1].source.as_deref(), Some("c2"));
}

#[test]
fn messages_follow_the_contract() {
    let plan = plan_dirty(vec![
        added("a"),
        deleted("b"),
        modified("c"),
        renamed("old", "new"),
    ]);
    let messages: Vec<&str> = plan.iter().map(|entry| entry.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "[split] Added a",
            "[split] Deleted b",
            "[split] Modified c",
            "[split] Renamed old -> new",
        ]
    );
    assert!(plan.iter().all(|entry| entry.source.is_none()));
}

#[test]
fn failures_while_staging_surface_as_rewrite_failures() {
    let repo = TestRepo::new();
    repo.make_commit(&["0"]);
    let plan = plan_dirty(vec![added("missing")]);
    assert!(matches!(
        apply(&repo.git, None, &plan),
        Err(Error::RewriteFailed(_))
    ));
}

#[test]
fn an_empty_plan_leaves_the_head_alone() {
    let repo = TestRepo::new();
    repo.make_commit(&["0"]);
    let before = repo.git.rev_parse("HEAD").unwrap();
    let after = apply(&repo.git, Some(&before), &[]).unwrap();
    assert_eq!(after, before);
}
