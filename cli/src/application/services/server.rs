//! Application service — FPTN server installation branch.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandRunner, CommandSpec, HostEnvironment, ProgressReporter, TagRegistry,
};
use crate::application::services::config_keys::apply_keys_escalated;
use crate::application::services::executor::{execute, probe, run_required};
use crate::application::services::version::resolve_release;
use crate::domain::certificate::parse_md5_fingerprint;
use crate::domain::config::SetupConfig;
use crate::domain::context::{ProvisioningContext, ServerInput};
use crate::domain::release::{
    normalize_architecture, package_name, package_url, repo_path_from_remote,
};
use crate::domain::stage::{ServerStep, StepKind};

/// Everything the server branch needs besides the host.
pub struct ServerInstall<'a, G, R> {
    pub registry: &'a G,
    pub reporter: &'a R,
    pub config: &'a SetupConfig,
    /// Machine architecture as reported by the OS, e.g. `x86_64`.
    pub machine: &'a str,
}

impl<G: TagRegistry, R: ProgressReporter> ServerInstall<'_, G, R> {
    fn sudo(&self, cmd: CommandSpec) -> CommandSpec {
        cmd.escalated(&self.config.escalation)
    }

    /// Run the seven server sub-steps in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the failing step's error, wrapped with the step label.
    pub async fn run(&self, host: &impl HostEnvironment, ctx: &ProvisioningContext) -> Result<()> {
        let server = ctx
            .input
            .server
            .as_ref()
            .context("server install requested without server input")?;

        for step in ServerStep::ALL {
            self.reporter.step(step.label());
            tracing::info!(?step, "server step");
            let outcome = match step {
                ServerStep::ResolveRelease => self.resolve_version(host, ctx).await,
                ServerStep::InstallPackage => self.install_package(host, ctx).await,
                ServerStep::GenerateCertificates => self.generate_certificates(host, ctx).await,
                ServerStep::ConfigureServer => self.configure_server(host, ctx, server).await,
                ServerStep::CreateUser => self.create_user(host, server).await,
                ServerStep::ConfigureDns => self.configure_dns(host).await,
                ServerStep::StartService => self.start_service(host).await,
            };
            outcome.context(step.label())?;
        }
        Ok(())
    }

    async fn resolve_version(
        &self,
        host: &impl HostEnvironment,
        ctx: &ProvisioningContext,
    ) -> Result<()> {
        let arch = ctx.record_arch(normalize_architecture(self.machine)?)?;
        self.reporter.info(&format!("Detected architecture: {arch}"));

        let canonical = self.config.repository.canonical.as_str();
        let detected = probe(
            host,
            &CommandSpec::new("git").args(["config", "--get", "remote.origin.url"]),
        )
        .await
        .filter(|out| out.success())
        .and_then(|out| repo_path_from_remote(&out.stdout));
        match &detected {
            Some(repo) => self.reporter.info(&format!("Repository detected as: {repo}")),
            None => self.reporter.warn(&format!(
                "Could not determine the GitHub repository from 'git remote'; using {canonical}"
            )),
        }

        let release =
            resolve_release(self.registry, self.reporter, detected.as_deref(), canonical).await?;
        let release = ctx.record_release(release)?;
        self.reporter
            .success(&format!("Latest FPTN version: {} ({})", release.tag, release.repo));
        Ok(())
    }

    async fn install_package(
        &self,
        host: &impl HostEnvironment,
        ctx: &ProvisioningContext,
    ) -> Result<()> {
        let (Some(arch), Some(release)) = (ctx.arch(), ctx.release()) else {
            anyhow::bail!("release must be resolved before installing");
        };
        let repo_cfg = &self.config.repository;
        let asset = package_name(&repo_cfg.product, &release.tag, &repo_cfg.platform, arch);
        let url = package_url(&repo_cfg.download_base, release, &asset);
        let deb = std::env::temp_dir().join(&asset);

        self.reporter.info(&format!("Downloading {url}"));
        run_required(
            host,
            &CommandSpec::new("curl").args(["-fL", "-o"]).path_arg(&deb).arg(&url),
        )
        .await?;

        let installed = async {
            run_required(host, &self.sudo(CommandSpec::new("apt-get").arg("update"))).await?;
            run_required(
                host,
                &self.sudo(CommandSpec::new("apt-get").args(["install", "-y", "-f"]).path_arg(&deb)),
            )
            .await
        }
        .await;

        if let Err(e) = host.remove_file(&deb) {
            tracing::warn!(path = %deb.display(), error = %e, "could not remove downloaded package");
        }
        installed?;
        self.reporter.success("FPTN server package installed");
        Ok(())
    }

    async fn generate_certificates(
        &self,
        host: &impl CommandRunner,
        ctx: &ProvisioningContext,
    ) -> Result<()> {
        let server = &self.config.server;
        let key = server.key_path();

        run_required(
            host,
            &self.sudo(CommandSpec::new("mkdir").arg("-p").path_arg(&server.config_dir)),
        )
        .await?;
        run_required(
            host,
            &self.sudo(
                CommandSpec::new("openssl")
                    .args(["genrsa", "-out"])
                    .path_arg(&key)
                    .arg(server.key_bits.to_string()),
            ),
        )
        .await?;
        run_required(
            host,
            &self.sudo(
                CommandSpec::new("openssl")
                    .args(["req", "-new", "-x509", "-key"])
                    .path_arg(&key)
                    .arg("-out")
                    .path_arg(&server.certificate_path())
                    .arg("-days")
                    .arg(server.certificate_days.to_string())
                    .arg("-subj")
                    .arg(format!("/CN={}", ctx.input.public_address)),
            ),
        )
        .await?;
        run_required(
            host,
            &self.sudo(
                CommandSpec::new("openssl")
                    .args(["rsa", "-in"])
                    .path_arg(&key)
                    .args(["-pubout", "-out"])
                    .path_arg(&server.public_key_path()),
            ),
        )
        .await?;
        self.reporter.success("Certificates generated");
        Ok(())
    }

    async fn configure_server(
        &self,
        host: &impl HostEnvironment,
        ctx: &ProvisioningContext,
        input: &ServerInput,
    ) -> Result<()> {
        let server = &self.config.server;
        let secret = ctx
            .shared_secret()
            .context("shared secret must be generated before configuring the server")?;
        let key = server.key_path().to_string_lossy().into_owned();
        let crt = server.certificate_path().to_string_lossy().into_owned();
        let public = server.public_key_path().to_string_lossy().into_owned();

        apply_keys_escalated(
            host,
            self.reporter,
            &self.config.escalation,
            &server.config_path(),
            &[
                ("OUT_NETWORK_INTERFACE", input.network_interface.as_str()),
                ("SERVER_KEY", key.as_str()),
                ("SERVER_CRT", crt.as_str()),
                ("SERVER_PUB", public.as_str()),
                ("PROMETHEUS_SECRET_ACCESS_KEY", secret.expose()),
            ],
        )
        .await?;
        self.reporter.success("Server configuration updated");
        Ok(())
    }

    async fn create_user(&self, host: &impl CommandRunner, input: &ServerInput) -> Result<()> {
        let password = input.password.expose();
        let answers = format!("{password}\n{password}\n");
        execute(
            host,
            &self.sudo(
                CommandSpec::new("fptn-passwd")
                    .args(["--add-user", input.username.as_str()])
                    .args(["--bandwidth".to_string(), input.bandwidth_mbps.to_string()]),
            ),
            StepKind::Required,
            Some(answers.as_bytes()),
        )
        .await?;
        self.reporter
            .success(&format!("User '{}' created", input.username));
        Ok(())
    }

    async fn configure_dns(&self, host: &impl CommandRunner) -> Result<()> {
        let server = &self.config.server;
        run_required(
            host,
            &self.sudo(
                CommandSpec::new("apt-get")
                    .args(["install", "-y", "dnsmasq"])
                    .env("DEBIAN_FRONTEND", "noninteractive"),
            ),
        )
        .await?;

        let upstreams: String = server
            .dns_upstreams
            .iter()
            .map(|ip| format!("server={ip}\n"))
            .collect();
        execute(
            host,
            &self.sudo(CommandSpec::new("tee").arg("-a").path_arg(&server.dnsmasq_conf)),
            StepKind::Required,
            Some(upstreams.as_bytes()),
        )
        .await?;

        let resolved_active = probe(
            host,
            &CommandSpec::new("systemctl").args(["is-active", "systemd-resolved"]),
        )
        .await
        .is_some_and(|out| out.stdout.trim() == "active");
        if resolved_active {
            self.reporter
                .info("systemd-resolved is active; disabling its DNS stub listener");
            run_required(
                host,
                &self.sudo(
                    CommandSpec::new("sed")
                        .args(["-i", "s/#DNSStubListener=yes/DNSStubListener=no/"])
                        .path_arg(&server.resolved_conf),
                ),
            )
            .await?;
            run_required(
                host,
                &self.sudo(CommandSpec::new("systemctl").args(["restart", "systemd-resolved"])),
            )
            .await?;
        }

        run_required(
            host,
            &self.sudo(CommandSpec::new("systemctl").args(["enable", "dnsmasq"])),
        )
        .await?;
        run_required(
            host,
            &self.sudo(CommandSpec::new("systemctl").args(["restart", "dnsmasq"])),
        )
        .await?;
        self.reporter.success("dnsmasq configured");
        Ok(())
    }

    async fn start_service(&self, host: &impl CommandRunner) -> Result<()> {
        let unit = self.config.server.unit.as_str();
        for action in [["enable", unit], ["start", unit]] {
            run_required(host, &self.sudo(CommandSpec::new("systemctl").args(action))).await?;
        }
        run_required(
            host,
            &self.sudo(CommandSpec::new("systemctl").args(["status", "--no-pager", unit])),
        )
        .await?;
        self.reporter.success("FPTN server started");
        Ok(())
    }
}

/// Read the installed certificate's MD5 fingerprint and record it.
///
/// # Errors
///
/// Returns an error if `openssl` fails or its output cannot be parsed.
pub async fn record_certificate_fingerprint(
    host: &impl CommandRunner,
    config: &SetupConfig,
    ctx: &ProvisioningContext,
) -> Result<()> {
    let out = run_required(
        host,
        &CommandSpec::new("openssl")
            .args(["x509", "-noout", "-fingerprint", "-md5", "-in"])
            .path_arg(&config.server.certificate_path())
            .escalated(&config.escalation),
    )
    .await?;
    ctx.record_fingerprint(parse_md5_fingerprint(&out.stdout)?)?;
    Ok(())
}
