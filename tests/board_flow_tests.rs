use predicates::str::contains;

mod common;
use common::{init_db, sbd, setup_test_db, start_pack_group};

const DATE: &str = "2025-09-01";

#[test]
fn start_pause_resume_stop_accounts_165_minutes() {
    let db = setup_test_db("flow_165");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "10:00", "pause", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("Paused 2 session(s)"));

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "10:15", "resume", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("Resumed 2 session(s)"));

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "12:00", "stop", "--group", "1"])
        .assert()
        .success()
        .stdout(contains("Stopped 2 session(s)"));

    // 180 minutes elapsed minus 15 paused -> 02:45 for both members
    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "12:30", "board"])
        .assert()
        .success()
        .stdout(contains("A"))
        .stdout(contains("B"))
        .stdout(contains("completed"))
        .stdout(contains("02:45"));
}

#[test]
fn stopping_twice_is_a_quiet_no_op() {
    let db = setup_test_db("flow_idempotent_stop");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "12:00", "stop", "--id", "2"])
        .assert()
        .success()
        .stdout(contains("Stopped 1 session(s)"));

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "15:00", "stop", "--id", "2"])
        .assert()
        .success()
        .stdout(contains("Nothing to stop"));

    // duration still reflects the first stop
    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "15:00", "board"])
        .assert()
        .success()
        .stdout(contains("03:00"));
}

#[test]
fn joiners_enter_ongoing_while_group_is_paused() {
    let db = setup_test_db("flow_join_paused");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "10:00", "pause", "--group", "1"])
        .assert()
        .success();

    sbd()
        .args([
            "--db", &db, "--date", DATE, "--at", "10:05", "join", "--group", "1", "--task",
            "Pack", "C",
        ])
        .assert()
        .success()
        .stdout(contains("Added to group 1"));

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "10:10", "board"])
        .assert()
        .success()
        .stdout(contains("ongoing"))
        .stdout(contains("paused"));
}

#[test]
fn unknown_group_join_changes_nothing() {
    let db = setup_test_db("flow_join_unknown");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args([
            "--db", &db, "--date", DATE, "--at", "10:00", "join", "--group", "99", "--task",
            "Pack", "C",
        ])
        .assert()
        .success()
        .stdout(contains("not found"));
}

#[test]
fn group_stop_credits_quantity_once() {
    let db = setup_test_db("flow_stop_qty");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args([
            "--db", &db, "--date", DATE, "--at", "12:00", "stop", "--group", "1", "--qty", "40",
        ])
        .assert()
        .success();

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "12:30", "board"])
        .assert()
        .success()
        .stdout(contains("Pack"))
        .stdout(contains("40"));
}

#[test]
fn edit_rejects_end_before_start() {
    let db = setup_test_db("flow_edit_invalid");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "12:00", "stop", "--id", "2"])
        .assert()
        .success();

    sbd()
        .args(["--db", &db, "--date", DATE, "edit", "--id", "2", "--end", "08:00"])
        .assert()
        .failure()
        .stderr(contains("end time must be later than start time"));
}

#[test]
fn edit_recomputes_net_minutes() {
    let db = setup_test_db("flow_edit_ok");
    init_db(&db);
    start_pack_group(&db, DATE);

    sbd()
        .args(["--db", &db, "--date", DATE, "--at", "12:00", "stop", "--id", "2"])
        .assert()
        .success();

    sbd()
        .args(["--db", &db, "--date", DATE, "edit", "--id", "2", "--end", "13:00"])
        .assert()
        .success()
        .stdout(contains("240 net minutes"));
}
