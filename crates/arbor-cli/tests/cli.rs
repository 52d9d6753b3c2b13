//! Binary-level tests for `arboradm`.
//!
//! Everything here runs without a server: completion is offline and the
//! failing commands stop before any request is sent.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn arboradm() -> Command {
    let mut cmd = cargo_bin_cmd!("arboradm");
    cmd.env_remove("ARBOR_API_URL")
        .env_remove("ARBOR_USER")
        .env_remove("ARBOR_PASSWORD")
        .env_remove("ARBOR_TIMEOUT");
    cmd
}

mod completion {
    use super::*;

    #[test]
    fn top_level_verbs() {
        arboradm()
            .arg("--generate-bash-completion")
            .assert()
            .success()
            .stdout(predicate::str::contains("environments\n"))
            .stdout(predicate::str::contains("check-config\n"));
    }

    #[test]
    fn subverbs_of_branch() {
        arboradm()
            .args(["--complete", "groups"])
            .assert()
            .success()
            .stdout(predicate::str::contains("create\n"))
            .stdout(predicate::str::contains("members\n"))
            .stdout(predicate::str::contains("tree\n"));
    }

    #[test]
    fn threshold_keywords_inside_threshold() {
        arboradm()
            .args([
                "check-config",
                "create",
                "foo",
                "in",
                "X",
                "threshold",
                "predicate",
                "--generate-bash-completion",
            ])
            .assert()
            .success()
            .stdout("level\nvalue\n");
    }

    #[test]
    fn repeatable_attributes_stay_on_offer() {
        arboradm()
            .args([
                "--complete",
                "property",
                "create",
                "service",
                "http",
                "team",
                "ops",
            ])
            .assert()
            .success()
            .stdout("port\ntransport_protocol\n");
    }

    #[test]
    fn locate_target_takes_two_values() {
        arboradm()
            .args(["--complete", "check-config", "locate", "http-up", "on", "node"])
            .assert()
            .success()
            .stdout("");
    }

    #[test]
    fn value_slot_is_silent() {
        arboradm()
            .args(["groups", "create", "api", "in", "--generate-bash-completion"])
            .assert()
            .success()
            .stdout("");
    }
}

mod failures {
    use super::*;

    #[test]
    fn unknown_command() {
        arboradm()
            .args(["--api-url", "http://127.0.0.1:9/", "gardens", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown command 'gardens'"));
    }

    #[test]
    fn missing_keyword_value() {
        arboradm()
            .args(["--api-url", "http://127.0.0.1:9/", "groups", "create", "api", "in"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("Error: "));
    }

    #[test]
    fn invalid_api_url() {
        arboradm()
            .args(["--api-url", "ftp://arbor/", "environments", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must start with http://"));
    }
}
