//! Charm-style CLI prompts using cliclack

use crate::compose::{self, ComposeReport, ComposeRequest, StageEvent};
use crate::features::{self, catalog, Catalog};
use crate::runtime::{check_node, PackageManager, NODE_DOWNLOAD_URL};
use crate::version;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Upgrade command shown in version warnings
const UPGRADE_COMMAND: &str = "cargo install shopforge-tools --force";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use as the template root instead of the default
    pub templates_dir: Option<PathBuf>,

    /// Skip the Node.js runtime check
    pub skip_runtime_check: bool,

    /// Skip the dependency installation stage
    pub skip_install: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("create-shopforge")?;

    // Step 1: Check the host runtime (advisory; the user can continue)
    if args.skip_runtime_check {
        cliclack::log::info("Skipping runtime check")?;
    } else {
        check_host_runtime()?;
    }

    // Step 2: Load the feature catalog
    let root = features::resolve_template_root(args.templates_dir.clone());
    let catalog = load_catalog(&root)?;

    // Check version compatibility
    if let Some(warning) =
        version::check_compatibility(cli_version, &catalog.version, UPGRADE_COMMAND)
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 3: Collect answers
    let project_name = prompt_project_name()?;
    let current_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let target_dir = current_dir.join(&project_name);
    if target_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Pick another project name.",
            project_name
        );
    }

    let selected = prompt_features(&catalog)?;
    let theme = prompt_theme(&catalog)?;
    let seo = cliclack::confirm("Set up SEO metadata (robots.txt and sitemap)?")
        .initial_value(true)
        .interact()?;

    // Step 4: Close the selection under the requires relation
    let resolution = features::resolve(&selected, &catalog.requires_map());
    for added in &resolution.auto_added {
        cliclack::log::info(format!(
            "Adding '{}' (required by '{}')",
            added.feature, added.required_by
        ))?;
    }

    let order = catalog.apply_order(&resolution.features);
    catalog::verify_feature_dirs(&root, &order)?;

    // Step 5: Run the pipeline
    let request = ComposeRequest {
        project_name,
        target_dir,
        features: order,
        theme,
        seo,
        install: !args.skip_install,
        package_manager: PackageManager::detect(),
    };

    run_pipeline(&root, &request).await?;

    // Step 6: Show next steps
    print_next_steps(&request)?;
    cliclack::outro("Happy selling!")?;

    Ok(())
}

fn check_host_runtime() -> Result<()> {
    let node = check_node();

    if node.available {
        cliclack::log::success(format!(
            "Node.js installed ({})",
            node.version.as_deref().unwrap_or("unknown")
        ))?;
        return Ok(());
    }

    cliclack::log::warning("Node.js is not installed")?;

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "open",
            format!("Open the Node.js download page ({})", NODE_DOWNLOAD_URL),
            "",
        )
        .item("skip", "Continue without Node.js", "")
        .item("abort", "Abort setup", "")
        .interact()?;

    match action {
        "open" => {
            open::that(NODE_DOWNLOAD_URL)?;
            cliclack::outro("After installing Node.js, run this command again.")?;
            std::process::exit(0);
        }
        "skip" => {
            cliclack::log::info(
                "Continuing without Node.js; the generated project needs it to run",
            )?;
        }
        _ => anyhow::bail!("Setup cancelled."),
    }

    Ok(())
}

fn load_catalog(root: &Path) -> Result<Catalog> {
    let spinner = cliclack::spinner();
    spinner.start("Loading feature catalog...");

    match Catalog::load(root) {
        Ok(catalog) => {
            spinner.stop(format!(
                "Catalog loaded ({} optional features)",
                catalog.features.len()
            ));
            Ok(catalog)
        }
        Err(e) => {
            spinner.stop("Failed to load catalog");
            Err(e.into())
        }
    }
}

fn prompt_project_name() -> Result<String> {
    let name: String = cliclack::input("Project name")
        .placeholder("my-store")
        .validate(|input: &String| {
            if input.is_empty() {
                Err("Project name cannot be empty")
            } else if !input
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                Err("Use only letters, digits, '-' and '_'")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(name)
}

fn prompt_features(catalog: &Catalog) -> Result<Vec<String>> {
    if catalog.features.is_empty() {
        return Ok(Vec::new());
    }

    let mut multi = cliclack::multiselect("Select features (optional)");
    for feature in &catalog.features {
        multi = multi.item(feature.key.clone(), &feature.label, &feature.hint);
    }

    let selected: Vec<String> = multi.required(false).interact()?;
    Ok(selected)
}

fn prompt_theme(catalog: &Catalog) -> Result<String> {
    match catalog.themes.len() {
        0 => anyhow::bail!("No themes found in the catalog."),
        1 => {
            let theme = &catalog.themes[0];
            cliclack::log::info(format!("Using theme: {}", theme.label))?;
            Ok(theme.key.clone())
        }
        _ => {
            let mut select = cliclack::select("Select a theme");
            for theme in &catalog.themes {
                select = select.item(theme.key.clone(), &theme.label, "");
            }
            Ok(select.interact()?)
        }
    }
}

/// Drive the pipeline, rendering one spinner per stage. Fatal stage errors
/// propagate; theme and SEO failures surface as warnings and the run
/// continues.
async fn run_pipeline(root: &Path, request: &ComposeRequest) -> Result<ComposeReport> {
    let mut spinner: Option<cliclack::ProgressBar> = None;

    let result = compose::compose_project(root, request, |event| match event {
        StageEvent::Started(stage) => {
            let s = cliclack::spinner();
            s.start(stage.label());
            spinner = Some(s);
        }
        StageEvent::Completed { summary, .. } => {
            if let Some(s) = spinner.take() {
                s.stop(summary);
            }
        }
        StageEvent::Skipped { reason, .. } => {
            let _ = cliclack::log::info(format!("Skipped: {}", reason));
        }
        StageEvent::Warning { message, .. } => {
            if let Some(s) = spinner.take() {
                s.stop("Warning");
            }
            let _ = cliclack::log::warning(message);
        }
    })
    .await;

    match result {
        Ok(report) => Ok(report),
        Err(e) => {
            if let Some(s) = spinner.take() {
                s.stop("Failed");
            }
            Err(e)
        }
    }
}

fn print_next_steps(request: &ComposeRequest) -> Result<()> {
    let pm = request.package_manager;

    let mut steps = vec![format!("cd {}", request.project_name)];
    if !request.install {
        steps.push(format!("{} install", pm.command()));
    }
    steps.push(format!("{} prisma migrate dev", pm.exec_command()));
    steps.push(format!("{} run dev", pm.command()));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    Ok(())
}
