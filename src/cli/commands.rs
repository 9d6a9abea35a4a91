//! Command dispatch: maps parsed arguments onto services.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::services::{CatchReport, Hierarchy, InterestReport};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::Access;
use crate::infrastructure::{InfraError, ServiceContainer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        if cli.info || cli.generator.is_some() {
            return Ok(());
        }
        return Err(CliError::Usage(
            "no command given, see `lineage --help`".to_string(),
        ));
    };

    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e))?,
    };
    let settings = Settings::load(Some(project_dir.as_path()))?;
    let container = ServiceContainer::new(settings)?;

    match command {
        Commands::Mro { type_name, file } => cmd_mro(&container, file.as_deref(), type_name),
        Commands::Table { file } => cmd_table(&container, file.as_deref()),
        Commands::Tree { file } => cmd_tree(&container, file.as_deref()),
        Commands::IsSubclass {
            type_name,
            candidates,
            file,
        } => cmd_is_subclass(&container, file.as_deref(), type_name, candidates),
        Commands::Resolve {
            type_name,
            member,
            internal,
            file,
        } => cmd_resolve(&container, file.as_deref(), type_name, member, *internal),
        Commands::Super {
            type_name,
            after,
            member,
            file,
        } => cmd_super(&container, file.as_deref(), type_name, after, member),
        Commands::Chain {
            type_name,
            member,
            file,
        } => cmd_chain(&container, file.as_deref(), type_name, member),
        Commands::Catch {
            raised,
            handlers,
            file,
        } => cmd_catch(&container, file.as_deref(), raised, handlers),
        Commands::Range => cmd_range(&container),
        Commands::Interest {
            amount,
            years,
            rate,
        } => cmd_interest(&container, *amount, *years, *rate),
        Commands::Divide { a, b } => cmd_divide(&container, *a, *b),
        Commands::Config { command } => cmd_config(&container, command),
    }
}

/// The `--file` argument, or `declarations` from settings.
fn declarations_path(container: &ServiceContainer, file: Option<&Path>) -> CliResult<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| container.settings.declarations.clone())
        .ok_or_else(|| ApplicationError::NoDeclarations.into())
}

fn open(container: &ServiceContainer, file: Option<&Path>) -> CliResult<Hierarchy> {
    let path = declarations_path(container, file)?;
    debug!("declarations: {}", path.display());
    Ok(container.hierarchy.open(&path)?)
}

#[instrument(skip(container))]
fn cmd_mro(container: &ServiceContainer, file: Option<&Path>, type_name: &str) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let mro = hierarchy.mro(type_name)?;
    output::info(&mro.join(" -> "));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_table(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let table = hierarchy.table()?;
    let width = table.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, mro) in table {
        output::info(&format!("{:width$}  {}", name, mro.join(" -> ")));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    for tree in hierarchy.trees() {
        output::info(&tree);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_is_subclass(
    container: &ServiceContainer,
    file: Option<&Path>,
    type_name: &str,
    candidates: &[String],
) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let answer = hierarchy.is_subclass(type_name, candidates)?;
    output::info(if answer { "True" } else { "False" });
    Ok(())
}

#[instrument(skip(container))]
fn cmd_resolve(
    container: &ServiceContainer,
    file: Option<&Path>,
    type_name: &str,
    member: &str,
    internal: bool,
) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let access = if internal {
        Access::Internal
    } else {
        Access::External
    };
    let owner = hierarchy.resolve_member(type_name, member, access)?;
    output::action(&format!("{type_name}.{member}"), &owner);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_super(
    container: &ServiceContainer,
    file: Option<&Path>,
    type_name: &str,
    after: &str,
    member: &str,
) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let owner = hierarchy.super_lookup(type_name, after, member)?;
    output::action(&format!("super({after}, {type_name}).{member}"), &owner);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_chain(
    container: &ServiceContainer,
    file: Option<&Path>,
    type_name: &str,
    member: &str,
) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let order = hierarchy.completion_order(type_name, member)?;
    output::header(&format!("{type_name}.{member} completes in order:"));
    for name in order {
        output::detail(&name);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_catch(
    container: &ServiceContainer,
    file: Option<&Path>,
    raised: &str,
    handlers: &[String],
) -> CliResult<()> {
    let hierarchy = open(container, file)?;
    let report = hierarchy.catch(raised, handlers)?;
    print_catch_report(&report);
    Ok(())
}

fn print_catch_report(report: &CatchReport) {
    for shadowed in &report.unreachable {
        output::warning(&format!(
            "handler {} ({}) is unreachable: already caught by handler {} ({})",
            shadowed.index,
            report.handlers[shadowed.index],
            shadowed.shadowed_by,
            report.handlers[shadowed.shadowed_by]
        ));
    }
    match report.caught_by {
        Some(index) => output::success(&format!(
            "{} caught by handler {} ({})",
            report.raised, index, report.handlers[index]
        )),
        None => output::failure(&format!("{} propagates: no handler matches", report.raised)),
    }
}

#[instrument(skip(container))]
fn cmd_range(container: &ServiceContainer) -> CliResult<()> {
    let stdin = io::stdin();
    let value = container.range.run(stdin.lock(), io::stdout())?;
    debug!("range accepted {}", value);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_interest(container: &ServiceContainer, amount: f64, years: f64, rate: f64) -> CliResult<()> {
    match container.arithmetic.interest(amount, years, rate)? {
        InterestReport::Interest(interest) => {
            output::info(&format!("The Simple Interest is {interest}"))
        }
        InterestReport::RateOutOfRange(rate) => {
            output::info(&format!("interest rate is out of range {rate}"))
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_divide(container: &ServiceContainer, a: f64, b: f64) -> CliResult<()> {
    let quotient = container
        .arithmetic
        .divide(a, b)
        .map_err(ApplicationError::Failure)?;
    output::info(&quotient);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
