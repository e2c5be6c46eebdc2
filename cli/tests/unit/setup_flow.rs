//! End-to-end sequencer runs against in-memory fakes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use fptn_setup::application::{SetupOptions, SetupReport, run_setup};
use fptn_setup::domain::config::SetupConfig;
use fptn_setup::domain::error::{ProvisionError, SetupAborted};
use fptn_setup::domain::stage::Stage;
use fptn_setup::domain::token::CredentialToken;

use crate::mocks::{
    Answer, CannedRegistry, FINGERPRINT_HEX, FakeHost, RecordingReporter, ScriptedPrompter,
    err_output, ok_output,
};

const CANONICAL: &str = "batchar2/fptn";

fn registry() -> CannedRegistry {
    CannedRegistry::default().with_tags(CANONICAL, &["v2.1.0", "v2.0.0"])
}

async fn run(
    host: &FakeHost,
    registry: &CannedRegistry,
    prompter: &ScriptedPrompter,
    reporter: &RecordingReporter,
    config: &SetupConfig,
) -> Result<SetupReport, SetupAborted> {
    run_setup(
        host,
        registry,
        prompter,
        reporter,
        SetupOptions {
            config,
            machine: "x86_64",
        },
    )
    .await
}

// ── Happy paths ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_install_walks_every_stage_and_yields_token() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    let registry = registry();
    let reporter = RecordingReporter::default();

    let report = run(&host, &registry, &ScriptedPrompter::installing(), &reporter, &config)
        .await
        .expect("setup succeeds");

    assert_eq!(
        report.stages,
        vec![
            Stage::CheckingPrerequisites,
            Stage::CollectingInput,
            Stage::InstallingServer,
            Stage::ConfiguringBot,
            Stage::ConfiguringMonitoring,
            Stage::Summarizing,
            Stage::Done,
        ]
    );
    assert!(report.server_installed);
    assert_eq!(report.grafana_url, "http://203.0.113.7:3000");

    let token = CredentialToken::decode(report.token.as_deref().expect("token present")).unwrap();
    assert_eq!(token.username, "alice");
    assert_eq!(token.password, "hunter2-secret");
    assert_eq!(token.service_name, "MyFptnServer");
    assert_eq!(token.servers.len(), 1);
    assert_eq!(token.servers[0].host, "203.0.113.7");
    assert_eq!(token.servers[0].port, 443);
    assert_eq!(token.servers[0].md5_fingerprint, FINGERPRINT_HEX);
}

#[tokio::test]
async fn full_install_downloads_the_resolved_package_for_the_architecture() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    assert!(host.ran(
        "https://github.com/batchar2/fptn/releases/download/v2.1.0/fptn-server-v2.1.0-ubuntu22.04-amd64.deb"
    ));
    let download = host.position("curl -fL -o").unwrap();
    let install = host.position("apt-get install -y -f").unwrap();
    assert!(download < install);
}

#[tokio::test]
async fn server_steps_run_in_dependency_order() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let order: Vec<usize> = [
        "curl -fL",
        "apt-get update",
        "openssl genrsa",
        "openssl req -new -x509",
        "openssl rsa",
        "fptn-passwd --add-user alice --bandwidth 100",
        "apt-get install -y dnsmasq",
        "systemctl enable fptn-server",
        "systemctl start fptn-server",
        "systemctl status --no-pager fptn-server",
        "docker compose build",
        "docker compose down",
        "openssl x509 -noout -fingerprint -md5",
    ]
    .iter()
    .map(|f| host.position(f).unwrap_or_else(|| panic!("{f} never ran")))
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "order was {order:?}");
}

#[tokio::test]
async fn shared_secret_is_identical_in_server_and_grafana_config() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let secret_of = |content: String| {
        content
            .lines()
            .find_map(|l| l.strip_prefix("PROMETHEUS_SECRET_ACCESS_KEY="))
            .unwrap()
            .to_string()
    };
    let server = secret_of(host.file(config.server.config_path()).unwrap());
    let grafana = secret_of(host.file(config.services.grafana_dir.join(".env")).unwrap());
    assert_eq!(server.len(), config.secret_length);
    assert_eq!(server, grafana);
}

#[tokio::test]
async fn server_config_receives_interface_and_certificate_paths() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let conf = host.file(config.server.config_path()).unwrap();
    assert!(conf.contains("OUT_NETWORK_INTERFACE=eth0\n"));
    assert!(conf.contains("SERVER_KEY=/etc/fptn/server.key\n"));
    assert!(conf.contains("SERVER_CRT=/etc/fptn/server.crt\n"));
    assert!(conf.contains("SERVER_PUB=/etc/fptn/server.pub\n"));
}

#[tokio::test]
async fn declined_install_skips_server_branch_and_token() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    let registry = registry();

    let report = run(
        &host,
        &registry,
        &ScriptedPrompter::declining(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    assert!(!report.stages.contains(&Stage::InstallingServer));
    assert_eq!(report.stages.last(), Some(&Stage::Done));
    assert!(report.token.is_none());
    assert!(!report.server_installed);
    assert!(!host.ran("openssl"), "no certificate work without a server");
    assert!(!host.ran("apt-get"));
    assert!(registry.calls.borrow().is_empty());

    let bot_env = host.file(config.services.bot_dir.join(".env")).unwrap();
    assert_eq!(
        bot_env,
        "API_TOKEN=123456:bot-token\nFPTN_SERVER_HOST=203.0.113.7\nFPTN_SERVER_PORT=443\n"
    );
    let grafana_env = host.file(config.services.grafana_dir.join(".env")).unwrap();
    assert!(grafana_env.starts_with("FPTN_HOST=203.0.113.7\nFPTN_PORT=443\n"));
}

#[tokio::test]
async fn bot_server_lists_are_installed_with_a_reminder() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    let reporter = RecordingReporter::default();

    run(&host, &registry(), &ScriptedPrompter::declining(), &reporter, &config)
        .await
        .unwrap();

    assert!(host.file(config.services.bot_dir.join("servers.json")).is_some());
    assert!(
        host.file(config.services.bot_dir.join("servers_censored_zone.json"))
            .is_some()
    );
    assert!(reporter.warnings().iter().any(|w| w.contains("servers.json")));
}

#[tokio::test]
async fn compose_runs_inside_each_service_directory() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::declining(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let commands = host.commands.borrow();
    let compose: Vec<_> = commands
        .iter()
        .filter(|c| c.display().contains("docker compose"))
        .collect();
    assert_eq!(compose.len(), 4);
    assert_eq!(compose[0].spec.current_dir.as_deref(), Some(config.services.bot_dir.as_path()));
    assert!(compose[0].display().ends_with("compose build"));
    assert!(compose[1].display().ends_with("compose up -d"));
    assert_eq!(
        compose[2].spec.current_dir.as_deref(),
        Some(config.services.grafana_dir.as_path())
    );
    assert!(compose[2].display().ends_with("compose down"));
    assert!(compose[3].display().ends_with("compose up -d"));
}

// ── Secrets ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn secrets_never_appear_in_command_arguments() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    let prompter = ScriptedPrompter::new([
        Answer::Yes,
        Answer::Text("203.0.113.7"),
        Answer::Text("123456:bot-token"),
        Answer::Text("eth0"),
        Answer::Text("alice"),
        Answer::Text("hunter2-secret"),
        Answer::Text("100"),
        Answer::Text("dockeruser"),
        Answer::Text("docker-pass"),
    ]);

    run(&host, &registry(), &prompter, &RecordingReporter::default(), &config)
        .await
        .unwrap();

    let shared = host
        .file(config.services.grafana_dir.join(".env"))
        .unwrap()
        .lines()
        .find_map(|l| l.strip_prefix("PROMETHEUS_SECRET_ACCESS_KEY=").map(str::to_string))
        .unwrap();
    for line in host.command_lines() {
        for secret in ["hunter2-secret", "123456:bot-token", "docker-pass", shared.as_str()] {
            assert!(!line.contains(secret), "secret leaked into argv: {line}");
        }
    }
}

#[tokio::test]
async fn user_password_is_fed_twice_on_stdin() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let commands = host.commands.borrow();
    let passwd = commands
        .iter()
        .find(|c| c.display().contains("fptn-passwd"))
        .unwrap();
    assert_eq!(passwd.stdin.as_deref(), Some(&b"hunter2-secret\nhunter2-secret\n"[..]));
}

#[tokio::test]
async fn registry_login_uses_password_stdin() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    let prompter = ScriptedPrompter::new([
        Answer::No,
        Answer::Text("203.0.113.7"),
        Answer::Text("123456:bot-token"),
        Answer::Text("dockeruser"),
        Answer::Text("docker-pass"),
    ]);

    run(&host, &registry(), &prompter, &RecordingReporter::default(), &config)
        .await
        .unwrap();

    let commands = host.commands.borrow();
    let login = commands
        .iter()
        .find(|c| c.display().contains("docker login"))
        .unwrap();
    assert!(
        login
            .display()
            .ends_with("docker login --username dockeruser --password-stdin")
    );
    assert_eq!(login.stdin.as_deref(), Some(&b"docker-pass\n"[..]));
}

#[tokio::test]
async fn only_the_user_password_prompt_asks_for_confirmation() {
    let config = SetupConfig::default();
    let prompter = ScriptedPrompter::installing();

    run(
        &FakeHost::ready(&config),
        &registry(),
        &prompter,
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(*prompter.password_confirmations.borrow(), vec![false, true]);
}

// ── Aborts ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_docker_aborts_before_any_prompt_or_command() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).without_tool("docker");
    let prompter = ScriptedPrompter::installing();

    let err = run(&host, &registry(), &prompter, &RecordingReporter::default(), &config)
        .await
        .expect_err("docker is missing");

    assert_eq!(err.stage, Stage::CheckingPrerequisites);
    match err.provision_error() {
        Some(ProvisionError::MissingDependency { tool, hint }) => {
            assert_eq!(tool, "docker");
            assert!(hint.as_deref().unwrap_or_default().contains("docs.docker.com"));
        }
        other => panic!("expected MissingDependency, got {other:?}"),
    }
    assert!(host.commands.borrow().is_empty());
    assert!(prompter.asked.borrow().is_empty());
}

#[tokio::test]
async fn missing_openssl_hints_apt_get() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).without_tool("openssl");

    let err = run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert!(format!("{err}").contains("sudo apt-get install openssl"));
}

#[tokio::test]
async fn failed_registry_login_aborts_while_collecting_input() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).respond("docker login", err_output(1, b"unauthorized"));
    let prompter = ScriptedPrompter::new([
        Answer::No,
        Answer::Text("203.0.113.7"),
        Answer::Text("123456:bot-token"),
        Answer::Text("dockeruser"),
        Answer::Text("wrong"),
    ]);

    let err = run(&host, &registry(), &prompter, &RecordingReporter::default(), &config)
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::CollectingInput);
    assert!(!host.ran("docker compose"));
}

#[tokio::test]
async fn non_positive_bandwidth_aborts_while_collecting_input() {
    let config = SetupConfig::default();
    let prompter = ScriptedPrompter::new([
        Answer::Yes,
        Answer::Text("203.0.113.7"),
        Answer::Text("123456:bot-token"),
        Answer::Text("eth0"),
        Answer::Text("alice"),
        Answer::Text("pw"),
        Answer::Text("0"),
    ]);

    let err = run(
        &FakeHost::ready(&config),
        &registry(),
        &prompter,
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::CollectingInput);
}

#[tokio::test]
async fn package_install_failure_aborts_server_branch() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).respond("apt-get install -y -f", err_output(100, b"E: broken"));

    let err = run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::InstallingServer);
    match err.provision_error() {
        Some(ProvisionError::CommandFailed { status, stderr, .. }) => {
            assert_eq!(*status, Some(100));
            assert_eq!(stderr, "E: broken");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert!(!host.ran("openssl genrsa"));
    assert!(!host.ran("docker compose"), "no later stage runs after an abort");
}

#[tokio::test]
async fn unsupported_architecture_aborts_before_any_network_call() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    let registry = registry();

    let err = run_setup(
        &host,
        &registry,
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        SetupOptions {
            config: &config,
            machine: "riscv64",
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::InstallingServer);
    assert!(matches!(
        err.provision_error(),
        Some(ProvisionError::UnsupportedArchitecture(m)) if m == "riscv64"
    ));
    assert!(registry.calls.borrow().is_empty());
    assert!(!host.ran("curl"));
}

#[tokio::test]
async fn aarch64_selects_arm64_package() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run_setup(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        SetupOptions {
            config: &config,
            machine: "aarch64",
        },
    )
    .await
    .unwrap();

    assert!(host.ran("fptn-server-v2.1.0-ubuntu22.04-arm64.deb"));
}

#[tokio::test]
async fn missing_bot_template_aborts_while_configuring_bot() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    host.files
        .borrow_mut()
        .remove(&config.services.bot_dir.join(".env.demo"));

    let err = run(
        &host,
        &registry(),
        &ScriptedPrompter::declining(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::ConfiguringBot);
    assert!(matches!(err.provision_error(), Some(ProvisionError::FileNotFound(_))));
    assert!(!host.ran("docker compose"));
}

#[tokio::test]
async fn aborted_run_records_visited_stages_ending_in_aborted() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);
    host.files
        .borrow_mut()
        .remove(&config.services.bot_dir.join(".env.demo"));

    let err = run(
        &host,
        &registry(),
        &ScriptedPrompter::declining(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::ConfiguringBot);
    assert_eq!(
        err.stages,
        [
            Stage::CheckingPrerequisites,
            Stage::CollectingInput,
            Stage::ConfiguringBot,
            Stage::Aborted,
        ]
    );
}

#[tokio::test]
async fn unparsable_fingerprint_aborts_while_summarizing() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).respond("openssl x509", ok_output(b"unable to load certificate"));

    let err = run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::Summarizing);
    assert!(matches!(
        err.provision_error(),
        Some(ProvisionError::MalformedFingerprint(_))
    ));
}

// ── Host details ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_config_key_warns_and_continues() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).with_file(
        config.server.config_path(),
        "OUT_NETWORK_INTERFACE=\nSERVER_KEY=\nSERVER_CRT=\nSERVER_PUB=\n",
    );
    let reporter = RecordingReporter::default();

    run(&host, &registry(), &ScriptedPrompter::installing(), &reporter, &config)
        .await
        .expect("a missing key is not fatal");

    assert!(
        reporter
            .warnings()
            .iter()
            .any(|w| w.contains("PROMETHEUS_SECRET_ACCESS_KEY"))
    );
    let conf = host.file(config.server.config_path()).unwrap();
    assert!(!conf.contains("PROMETHEUS_SECRET_ACCESS_KEY"));
}

#[tokio::test]
async fn root_owned_server_config_is_read_and_written_through_escalation() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let lines = host.command_lines();
    assert!(lines.iter().any(|l| l == "sudo cat /etc/fptn/server.conf"));
    let secret = host
        .file(config.services.grafana_dir.join(".env"))
        .unwrap()
        .lines()
        .find_map(|l| l.strip_prefix("PROMETHEUS_SECRET_ACCESS_KEY="))
        .unwrap()
        .to_string();
    let commands = host.commands.borrow();
    let write = commands
        .iter()
        .find(|c| c.display() == "sudo dd of=/etc/fptn/server.conf status=none")
        .expect("server.conf written with sudo");
    let written = String::from_utf8(write.stdin.clone().unwrap()).unwrap();
    assert!(written.contains("SERVER_KEY=/etc/fptn/server.key\n"));
    assert!(written.contains(&format!("PROMETHEUS_SECRET_ACCESS_KEY={secret}\n")));
    assert!(!write.display().contains(&secret));
}

#[tokio::test]
async fn unreadable_server_config_aborts_with_permission_denied() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).respond(
        "cat /etc/fptn/server.conf",
        err_output(1, b"cat: /etc/fptn/server.conf: Permission denied\n"),
    );

    let err = run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.stage, Stage::InstallingServer);
    assert!(matches!(
        err.provision_error(),
        Some(ProvisionError::PermissionDenied(p)) if p == &config.server.config_path()
    ));
    assert!(!host.ran("dd of="));
    assert!(!host.ran("fptn-passwd"));
}

#[tokio::test]
async fn unchanged_server_config_is_not_rewritten() {
    let config = SetupConfig {
        escalation: String::new(),
        ..SetupConfig::default()
    };
    let host =
        FakeHost::ready(&config).with_file(config.server.config_path(), "# managed elsewhere\n");

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .expect("undeclared keys only warn");

    assert!(host.ran("cat /etc/fptn/server.conf"));
    assert!(!host.ran("dd of=/etc/fptn/server.conf"));
    assert_eq!(
        host.file(config.server.config_path()).as_deref(),
        Some("# managed elsewhere\n")
    );
}

#[tokio::test]
async fn active_systemd_resolved_gets_stub_listener_disabled() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config).respond("is-active systemd-resolved", ok_output(b"active\n"));

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let edit = host.position("DNSStubListener=no").expect("resolved.conf edited");
    let restart = host.position("systemctl restart systemd-resolved").unwrap();
    let dnsmasq = host.position("systemctl restart dnsmasq").unwrap();
    assert!(edit < restart && restart < dnsmasq);
}

#[tokio::test]
async fn inactive_systemd_resolved_is_left_alone() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config)
        .respond("is-active systemd-resolved", err_output(3, b""));

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .expect("probe failure is not fatal");

    assert!(!host.ran("DNSStubListener"));
    assert!(host.ran("systemctl enable dnsmasq"));
}

#[tokio::test]
async fn dns_upstreams_are_appended_through_stdin() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let commands = host.commands.borrow();
    let tee = commands.iter().find(|c| c.display().contains("tee -a")).unwrap();
    assert!(tee.display().ends_with("tee -a /etc/dnsmasq.conf"));
    assert_eq!(tee.stdin.as_deref(), Some(&b"server=8.8.8.8\nserver=8.8.4.4\n"[..]));
}

#[tokio::test]
async fn privileged_commands_are_escalated_with_environment_preserved() {
    let config = SetupConfig::default();
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    let lines = host.command_lines();
    assert!(lines.iter().any(|l| l == "sudo apt-get update"));
    assert!(
        lines
            .iter()
            .any(|l| l == "sudo DEBIAN_FRONTEND=noninteractive apt-get install -y dnsmasq")
    );
    assert!(lines.iter().any(|l| l.starts_with("curl ")), "downloads run unprivileged");
}

#[tokio::test]
async fn empty_escalation_runs_commands_directly() {
    let config = SetupConfig {
        escalation: String::new(),
        ..SetupConfig::default()
    };
    let host = FakeHost::ready(&config);

    run(
        &host,
        &registry(),
        &ScriptedPrompter::installing(),
        &RecordingReporter::default(),
        &config,
    )
    .await
    .unwrap();

    assert!(host.command_lines().iter().all(|l| !l.starts_with("sudo")));
    let commands = host.commands.borrow();
    let dnsmasq = commands
        .iter()
        .find(|c| c.display() == "apt-get install -y dnsmasq")
        .unwrap();
    assert_eq!(
        dnsmasq.spec.env,
        vec![("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string())]
    );
}
