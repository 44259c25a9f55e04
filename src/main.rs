use clap::{Parser, Subcommand};
use docdex::classify::PathClassifier;
use docdex::{changes, config, git, index, mirror, output, template, url};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(clap::Args, Clone)]
struct MakeArgs {
    /// Answer "yes" to the confirmation prompt automatically
    #[arg(short = 'y', long = "no-ask")]
    yes: bool,

    /// Purge the publication tree and re-mirror every in-scope file
    #[arg(long)]
    full: bool,
}

#[derive(Parser)]
#[command(name = "docdex")]
#[command(about = "Mirror documentation assets into docs/ with generated index pages")]
#[command(long_about = "\
Mirror documentation assets into docs/ with generated index pages

Run from the root of a git repository. Files matching the selection pattern
(default: .html, .md, .jpg, .png) are copied into the publication tree with
their directory structure preserved, then every publication directory gets
an index.md with a breadcrumb and links to its children, targeting the
repository's GitHub Pages site.

By default only files reported as added, modified or renamed by
`git status` are mirrored. Renamed-from and deleted files are never removed
from the publication tree; run `make --full` to rebuild it from scratch.

Optional files next to the source tree:

  docdex.toml       # search_regex = '...' overrides the selection pattern
  docdex.tmpl.md    # index page template ($breadcrumb, $indices, $repo)

Run 'docdex gen-config' to print a documented docdex.toml.")]
#[command(version)]
struct Cli {
    /// Source tree (must be the root of a git repository)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Publication directory, relative to the source tree
    #[arg(long, default_value = "docs", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mirror changed files into the publication tree and regenerate index pages
    Make(MakeArgs),
    /// Report what would be mirrored, without writing anything
    Check,
    /// Print a documented stock docdex.toml
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            output::print_error(&error.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Make(args) => make(cli, args),
        Command::Check => check(cli),
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(true)
        }
    }
}

fn make(cli: &Cli, args: &MakeArgs) -> Result<bool, Box<dyn std::error::Error>> {
    if !git::is_git_repository(&cli.source) {
        return Err(format!(
            "{} is not the root of a git repository",
            cli.source.display()
        )
        .into());
    }

    if !args.yes && !confirm(&cli.source)? {
        println!("Aborted.");
        return Ok(true);
    }

    let repo = git::GitRepo::new(&cli.source);
    let identity = repo.identity()?;
    let classifier = build_classifier(cli)?;
    let output_root = cli.source.join(&cli.output);

    let entries = if args.full {
        // Rebuilding from scratch is what prunes stale renamed-from and
        // deleted entries out of the publication tree.
        purge(&output_root)?;
        changes::full_scan(&cli.source, &classifier)?
    } else {
        changes::parse_status(&repo.status_porcelain()?, &classifier)
    };

    println!(
        "==> Mirroring {} change(s) into {}",
        entries.len(),
        output_root.display()
    );
    let report = mirror::mirror(&entries, &cli.source, &output_root);
    output::print_mirror_report(&report);

    println!("==> Generating index pages");
    fs::create_dir_all(&output_root)?;
    let resolver = url::UrlResolver::new(identity);
    let template = template::load_template(&cli.source)?;
    let written = index::synthesize(&output_root, &resolver, &template)?;
    output::print_index_lines(&written);

    output::print_summary(report.files_written(), written.len());

    if !report.is_clean() {
        output::print_warn(&format!(
            "{} file(s) failed to mirror",
            report.failures.len()
        ));
        return Ok(false);
    }
    Ok(true)
}

fn check(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    if !git::is_git_repository(&cli.source) {
        return Err(format!(
            "{} is not the root of a git repository",
            cli.source.display()
        )
        .into());
    }

    let repo = git::GitRepo::new(&cli.source);
    let classifier = build_classifier(cli)?;
    let entries = changes::parse_status(&repo.status_porcelain()?, &classifier);

    println!("==> {} change(s) in scope", entries.len());
    for entry in &entries {
        println!("{}", output::format_change_entry(entry));
    }
    Ok(true)
}

fn build_classifier(cli: &Cli) -> Result<PathClassifier, config::ConfigError> {
    let config = config::load_config(&cli.source)?;
    let pattern = config.selection_pattern()?;
    Ok(PathClassifier::new(pattern, cli.output.clone()))
}

fn confirm(source: &Path) -> io::Result<bool> {
    print!("--> Mirror and index \"{}\" ? (y/N): ", source.display());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim() == "y")
}

fn purge(output_root: &Path) -> io::Result<()> {
    if output_root.is_dir() {
        fs::remove_dir_all(output_root)?;
    } else if output_root.is_file() {
        fs::remove_file(output_root)?;
    }
    Ok(())
}
