use anyhow::Context;
use clap::Parser;
use reg_wizard::config::toml_config::{FixtureKind, WizardConfig};
use reg_wizard::utils::{logger, validation::Validate};
use reg_wizard::{build_report, render_text, CliConfig, Domain, Snapshot, WizardRegistry};

fn trace_changes<T>(domain: Domain) -> impl FnMut(&Snapshot<T>) {
    move |snapshot| {
        tracing::debug!(
            domain = %domain,
            cursor = snapshot.cursor,
            revision = snapshot.revision,
            "Store broadcast"
        );
    }
}

fn load_config(cli: &CliConfig) -> anyhow::Result<WizardConfig> {
    let mut config = match &cli.config {
        Some(path) => WizardConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => WizardConfig::default(),
    };

    if let Some(policy) = cli.policy {
        config.wizard.cursor_policy = policy;
    }
    if let Some(path) = &cli.fixtures {
        config.fixtures.source = FixtureKind::Json;
        config.fixtures.path = Some(path.display().to_string());
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let fixtures = config.fixture_source()?;
    let mut registry = WizardRegistry::new(config.registry_options());

    let domains = cli.domains();
    for &domain in &domains {
        registry
            .mount(domain, &*fixtures)
            .with_context(|| format!("failed to mount {} store", domain))?;
    }

    if let Ok(store) = registry.layout_mut() {
        store.subscribe(trace_changes(Domain::Layout));
        for id in store.data().duplicate_ids() {
            tracing::warn!(%id, "Duplicate id in layout tree");
        }
    }
    if let Ok(store) = registry.equipment_mut() {
        store.subscribe(trace_changes(Domain::Equipment));
        for id in store.data().tree.duplicate_ids() {
            tracing::warn!(%id, "Duplicate id in equipment tree");
        }
    }
    if let Ok(store) = registry.material_mut() {
        store.subscribe(trace_changes(Domain::Material));
    }
    if let Ok(store) = registry.users_mut() {
        store.subscribe(trace_changes(Domain::Users));
    }

    for &domain in &domains {
        for &step in &cli.steps {
            if let Err(e) = registry.set_cursor(domain, step) {
                tracing::warn!(domain = %domain, step, "Cursor move rejected: {}", e);
            }
        }
    }

    let reports = domains
        .iter()
        .map(|&domain| build_report(&registry, domain))
        .collect::<reg_wizard::Result<Vec<_>>>()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("{}", render_text(&config.wizard.title, &reports));
    }

    Ok(())
}

fn main() {
    let cli = CliConfig::parse();

    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting reg-wizard");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
