//! The installer form
//!
//! Optional sections follow a gate-then-body layout: a confirm group that is
//! hidden in expert mode, followed by a body group shown when expert mode is
//! on or the gate was answered with "Configure".

use crate::catalog::Catalog;
use crate::config::validation;
use crate::config::{Provider, Scale};
use crate::form::{Choice, ConfigMode, Field, FlagSlot, Form, FormState, Group, Item};

const GLOBAL: &str = "Step 1: Global Settings";
const PROVIDER: &str = "Step 2: Infrastructure Type";
const AWS_BASIC: &str = "Step 3a: AWS Basic Configuration";
const AWS_EXPERT: &str = "Step 3b: (Optional) AWS Expert Configurations";
const ONPREM_BASIC: &str = "Step 3a: On-Prem Configuration";
const ONPREM_EXPERT: &str = "Step 3b: (Optional) On-Prem Expert Configurations";
const PROXY: &str = "Step 4: (Optional) Proxy";
const CERT: &str = "Step 5: (Optional) TLS Certificate";
const SRE: &str = "Step 6: (Optional) Site Reliability Engineering (SRE)";
const SMTP: &str = "Step 7: (Optional) Email Notification";
const MODE: &str = "Step 8: Orchestrator Configuration";
const SIMPLE: &str = "Step 8: Select Orchestrator Components (Simple Mode)";
const ADVANCED: &str = "Step 8: Select Orchestrator Components (Advanced Mode)";

const SKIP_HINT: &str = "Skip it if you are not sure";

/// Build the complete installer form
#[must_use]
pub fn installer_form() -> Form {
    Form::new(vec![
        global(),
        provider(),
        Group::new(
            AWS_BASIC,
            vec![
                Field::input("AWS Region", |s| &mut s.config.aws.region)
                    .describe("This is the region where the EMF will be deployed.")
                    .placeholder("us-east-1")
                    .validate(validation::aws_region),
            ],
        )
        .visible_when(is_aws),
        gate(
            AWS_EXPERT,
            "Proceed with AWS Expert Configuration?",
            SKIP_HINT,
            |s| &mut s.flags.configure_aws_expert,
        )
        .visible_when(|s| is_aws(s) && !s.flags.expert_mode),
        aws_expert(),
        onprem_basic(),
        gate(
            ONPREM_EXPERT,
            "Proceed with On-Prem Expert Configuration?",
            SKIP_HINT,
            |s| &mut s.flags.configure_onprem_expert,
        )
        .visible_when(|s| is_onprem(s) && !s.flags.expert_mode),
        Group::new(
            ONPREM_EXPERT,
            vec![
                Field::input("Docker Username", |s| &mut s.config.onprem.docker_username)
                    .describe("Docker username to be used for pulling OCI artifacts"),
                Field::input("Docker Token", |s| &mut s.config.onprem.docker_token)
                    .describe("Docker token to be used for pulling OCI artifacts"),
            ],
        )
        .visible_when(|s| {
            is_onprem(s) && (s.flags.expert_mode || s.flags.configure_onprem_expert)
        }),
        gate(
            PROXY,
            "Proceed with Proxy Configuration?",
            "This is only required when running in a network behind proxy.",
            |s| &mut s.flags.configure_proxy,
        )
        .visible_when(not_expert),
        proxy().visible_when(|s| s.flags.expert_mode || s.flags.configure_proxy),
        gate(
            CERT,
            "Proceed with TLS Certificate Configuration?",
            "You can provide TLS certificate, or we will generate one using LetsEncrypt",
            |s| &mut s.flags.configure_cert,
        )
        .visible_when(not_expert),
        cert().visible_when(|s| s.flags.expert_mode || s.flags.configure_cert),
        gate(
            SRE,
            "Proceed with SRE Configuration?",
            SKIP_HINT,
            |s| &mut s.flags.configure_sre,
        )
        .visible_when(not_expert),
        sre().visible_when(|s| s.flags.expert_mode || s.flags.configure_sre),
        gate(
            SMTP,
            "Proceed with Email notification configuration?",
            SKIP_HINT,
            |s| &mut s.flags.configure_smtp,
        )
        .visible_when(not_expert),
        smtp().visible_when(|s| s.flags.expert_mode || s.flags.configure_smtp),
        Group::new(
            MODE,
            vec![
                Field::select("Orchestrator Configuration Mode", mode_choices).describe(
                    "Warning: Simple mode will reset all the advanced settings that was previously configured",
                ),
            ],
        ),
        Group::new(
            SIMPLE,
            vec![
                Field::multi_select("Select Orchestrator Packages", package_items, |s| {
                    &mut s.scratch.enabled_simple
                })
                .describe("Select the orchestrator packages to be enabled in the EMF.")
                .validate_set(validation::simple_mode),
            ],
        )
        .visible_when(|s| s.scratch.config_mode == ConfigMode::Simple),
        Group::new(
            ADVANCED,
            vec![
                Field::multi_select("Select Orchestrator Components", app_items, |s| {
                    &mut s.scratch.enabled_advanced
                })
                .describe("Select the Orchestrator components to be enabled in the EMF.")
                .validate_set(validation::advanced_mode),
            ],
        )
        .visible_when(|s| s.scratch.config_mode == ConfigMode::Advanced),
    ])
}

fn is_aws(state: &FormState) -> bool {
    state.config.provider == Some(Provider::Aws)
}

fn is_onprem(state: &FormState) -> bool {
    state.config.provider == Some(Provider::Onprem)
}

fn not_expert(state: &FormState) -> bool {
    !state.flags.expert_mode
}

fn gate(
    group: &'static str,
    question: &'static str,
    hint: &'static str,
    slot: FlagSlot,
) -> Group {
    Group::new(
        group,
        vec![Field::confirm(question, "Configure", "Skip", slot).describe(hint)],
    )
}

fn global() -> Group {
    Group::new(
        GLOBAL,
        vec![
            Field::input("Orchestrator Name", |s| &mut s.config.global.orch_name)
                .describe("Name of this orchestrator deployment")
                .placeholder("demo")
                .validate(validation::orch_name),
            Field::input("Parent Domain", |s| &mut s.config.global.parent_domain)
                .describe(
                    "Parent domain name. The domain for this deployment will be orchName.parentDomain",
                )
                .placeholder("edgeorchestration.intel.com")
                .validate(validation::parent_domain),
            Field::input("Admin Email", |s| &mut s.config.global.admin_email)
                .describe(
                    "Admin email address. This will be used to sign certificate and deliver alerts",
                )
                .placeholder("firstname.lastname@intel.com")
                .validate(validation::admin_email),
            Field::select("Scale", scale_choices).describe("Select target scale"),
        ],
    )
}

fn provider() -> Group {
    Group::new(
        PROVIDER,
        vec![
            Field::select("Infrastructure Type", provider_choices)
                .describe("Select the infrastructure type where the EMF will be deployed."),
        ],
    )
}

fn aws_expert() -> Group {
    Group::new(
        AWS_EXPERT,
        vec![
            Field::input("Custom Tag", |s| &mut s.config.aws.customer_tag)
                .describe("(Optional) Apply this tag to all AWS resources")
                .validate(validation::aws_custom_tag),
            Field::input("Container Registry Cache", |s| &mut s.config.aws.cache_registry)
                .describe("(Optional) Pull OCI artifact from this cache registry")
                .validate(validation::cache_registry),
            Field::input("Jump Host Whitelist", |s| &mut s.scratch.jump_host_whitelist)
                .describe(
                    "(Optional) Traffic from these comma separated CIDRs will be allowed to access the jump host",
                )
                .placeholder("10.0.0.0/8")
                .validate(validation::aws_jump_host_whitelist),
            Field::input("VPC ID", |s| &mut s.config.aws.vpc_id)
                .describe(
                    "(Optional) Enter VPC ID if you prefer to reuse existing VPC instead of letting us create one",
                )
                .validate(validation::aws_vpc_id),
            Field::confirm("Reduce NS TTL", "yes", "no", |s| &mut s.config.aws.reduce_ns_ttl)
                .describe("(Optional) Reduce the TTL of the NS record to 60 seconds"),
            Field::input("EKS DNS IP", |s| &mut s.config.aws.eks_dns_ip)
                .describe(
                    "(Optional) Enter EKS DNS IP if you prefer to reuse a non-default DNS server",
                )
                .validate(validation::aws_eks_dns_ip),
        ],
    )
    .visible_when(|s| is_aws(s) && (s.flags.expert_mode || s.flags.configure_aws_expert))
}

fn onprem_basic() -> Group {
    Group::new(
        ONPREM_BASIC,
        vec![
            Field::input("Argo CD IP Address", |s| &mut s.config.onprem.argo_ip)
                .describe("This is the IP address of Argo CD.")
                .placeholder("192.168.1.1")
                .validate(validation::ip),
            Field::input("Traefik IP Address", |s| &mut s.config.onprem.traefik_ip)
                .describe("This is the IP address of Traefik.")
                .placeholder("192.168.1.2")
                .validate(validation::ip),
            Field::input("NGINX IP Address", |s| &mut s.config.onprem.nginx_ip)
                .describe("This is the IP address of NGINX.")
                .placeholder("192.168.1.3")
                .validate(validation::ip),
        ],
    )
    .visible_when(is_onprem)
}

fn proxy() -> Group {
    Group::new(
        PROXY,
        vec![
            Field::input("HTTP Proxy", |s| &mut s.config.proxy.http_proxy)
                .describe("(Optional) HTTP proxy to be used for all outbound traffic")
                .validate(validation::proxy),
            Field::input("HTTPS Proxy", |s| &mut s.config.proxy.https_proxy)
                .describe("(Optional) HTTPS proxy to be used for all outbound traffic")
                .validate(validation::proxy),
            Field::input("SOCKS Proxy", |s| &mut s.config.proxy.socks_proxy)
                .describe("(Optional) SOCKS proxy to be used for all outbound traffic")
                .validate(validation::proxy),
            Field::input("No Proxy", |s| &mut s.config.proxy.no_proxy)
                .describe(
                    "(Optional) Comma separated list of domains that should not use the proxy",
                )
                .validate(validation::proxy),
        ],
    )
}

fn cert() -> Group {
    Group::new(
        CERT,
        vec![
            Field::text("TLS Certificate", |s| &mut s.config.cert.tls_cert)
                .describe("(Optional) TLS certificate to be used for the EMF")
                .validate(validation::tls_cert),
            Field::text("TLS Key", |s| &mut s.config.cert.tls_key)
                .describe("(Optional) TLS key to be used for the EMF")
                .validate(validation::tls_key),
            Field::text("TLS CA", |s| &mut s.config.cert.tls_ca)
                .describe("(Optional) TLS CA to be used for the EMF")
                .validate(validation::tls_ca),
        ],
    )
}

fn sre() -> Group {
    Group::new(
        SRE,
        vec![
            Field::input("SRE Username", |s| &mut s.config.sre.username)
                .describe("(Optional) SRE username to be used for the EMF"),
            Field::password("SRE Password", |s| &mut s.config.sre.password)
                .describe("(Optional) SRE password to be used for the EMF"),
            Field::input("SRE Secret URL", |s| &mut s.config.sre.secret_url)
                .describe("(Optional) SRE secret URL to be used for the EMF")
                .validate(validation::sre_secret_url),
            Field::input("SRE CA Secret", |s| &mut s.config.sre.ca_secret)
                .describe("(Optional) SRE CA secret to be used for the EMF")
                .validate(validation::sre_ca_secret),
        ],
    )
}

fn smtp() -> Group {
    Group::new(
        SMTP,
        vec![
            Field::input("SMTP Username", |s| &mut s.config.smtp.username)
                .describe("(Optional) SMTP username to be used for the EMF"),
            Field::password("SMTP Password", |s| &mut s.config.smtp.password)
                .describe("(Optional) SMTP password to be used for the EMF"),
            Field::input("SMTP URL", |s| &mut s.config.smtp.url)
                .describe("(Optional) SMTP URL to be used for the EMF")
                .validate(validation::smtp_url),
            Field::input("SMTP Port", |s| &mut s.config.smtp.port)
                .describe("(Optional) SMTP port to be used for the EMF")
                .placeholder("587")
                .validate(validation::smtp_port),
            Field::input("SMTP From Address", |s| &mut s.config.smtp.from)
                .describe("(Optional) SMTP from address to be used for the EMF")
                .validate(validation::smtp_from),
        ],
    )
}

fn scale_choices(state: &FormState, _catalog: &Catalog) -> Vec<Choice> {
    Scale::ALL
        .into_iter()
        .map(|scale| {
            let current = state.config.global.scale == Some(scale);
            Choice::new(scale.label(), current, move |s: &mut FormState| {
                s.config.global.scale = Some(scale);
            })
        })
        .collect()
}

fn provider_choices(state: &FormState, _catalog: &Catalog) -> Vec<Choice> {
    [(Provider::Aws, "AWS"), (Provider::Onprem, "On-Premises")]
        .into_iter()
        .map(|(provider, label)| {
            let current = state.config.provider == Some(provider);
            Choice::new(label, current, move |s: &mut FormState| {
                s.config.provider = Some(provider);
            })
        })
        .collect()
}

fn mode_choices(state: &FormState, _catalog: &Catalog) -> Vec<Choice> {
    let mut modes = vec![
        (
            ConfigMode::Simple,
            "Simple   - select from pre-defined packages (recommended)",
        ),
        (
            ConfigMode::Advanced,
            "Advanced - enable/disable each individual app",
        ),
    ];
    // Skip is only meaningful when there is a previous selection to keep
    if !state.config.orch.enabled.is_empty() {
        modes.push((ConfigMode::Skip, "Skip     - use existing config"));
    }

    modes
        .into_iter()
        .map(|(mode, label)| {
            let current = state.scratch.config_mode == mode;
            Choice::new(label, current, move |s: &mut FormState| {
                s.scratch.config_mode = mode;
            })
        })
        .collect()
}

fn package_items(_state: &FormState, catalog: &Catalog) -> Vec<Item> {
    catalog
        .packages_by_name()
        .into_iter()
        .map(|(id, package)| Item {
            label: format!("{} ({})", package.name, package.description),
            id: id.to_owned(),
            selected: true,
        })
        .collect()
}

fn app_items(state: &FormState, catalog: &Catalog) -> Vec<Item> {
    catalog
        .apps_by_name()
        .into_iter()
        .map(|(id, app)| Item {
            label: format!("{} ({})", app.name, app.description),
            id: id.to_owned(),
            selected: state.config.orch.enabled.iter().any(|e| e == id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchConfig;
    use crate::form::Flags;

    fn state(flags: Flags) -> FormState {
        FormState::new(OrchConfig::default(), flags)
    }

    fn visible_titles(state: &FormState) -> Vec<&'static str> {
        installer_form()
            .groups
            .iter()
            .filter(|g| g.is_visible(state))
            .map(|g| g.title)
            .collect()
    }

    #[test]
    fn test_fresh_state_shows_gates_only() {
        let titles = visible_titles(&state(Flags::default()));
        assert_eq!(
            titles,
            vec![GLOBAL, PROVIDER, PROXY, CERT, SRE, SMTP, MODE, SIMPLE]
        );
    }

    #[test]
    fn test_expert_mode_hides_gates_and_shows_bodies() {
        let mut s = state(Flags {
            expert_mode: true,
            ..Flags::default()
        });
        s.config.provider = Some(Provider::Aws);

        let form = installer_form();
        let visible: Vec<&Group> = form.groups.iter().filter(|g| g.is_visible(&s)).collect();
        let expert = visible.iter().filter(|g| g.title == AWS_EXPERT).count();
        assert_eq!(expert, 1);
        assert!(visible.iter().all(|g| {
            g.fields
                .iter()
                .all(|f| !matches!(f.kind, crate::form::FieldKind::Confirm { .. })
                    || f.info.title == "Reduce NS TTL")
        }));
    }

    #[test]
    fn test_provider_selects_basic_group() {
        let mut s = state(Flags::default());
        s.config.provider = Some(Provider::Onprem);
        let titles = visible_titles(&s);
        assert!(titles.contains(&ONPREM_BASIC));
        assert!(titles.contains(&ONPREM_EXPERT));
        assert!(!titles.contains(&AWS_BASIC));
    }

    #[test]
    fn test_sre_body_follows_its_own_gate() {
        let mut s = state(Flags::default());
        s.flags.configure_cert = true;
        let sre_groups = visible_titles(&s).iter().filter(|t| **t == SRE).count();
        assert_eq!(sre_groups, 1);

        s.flags.configure_sre = true;
        let sre_groups = visible_titles(&s).iter().filter(|t| **t == SRE).count();
        assert_eq!(sre_groups, 2);
    }

    #[test]
    fn test_skip_mode_offered_only_with_previous_selection() {
        let catalog = Catalog::default();
        let mut s = state(Flags::default());
        assert_eq!(mode_choices(&s, &catalog).len(), 2);

        s.config.orch.enabled = vec!["a".to_owned()];
        let choices = mode_choices(&s, &catalog);
        assert_eq!(choices.len(), 3);
        assert!(choices[0].current);
    }
}
